use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::ui::input::Keymap;
use crate::ui::navigation::ViewName;
use crate::ui::theme::{ACCENT, HEADER_TEXT, LABEL_TEXT, POPUP_BORDER};

use super::View;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Full-window overlay listing the key bindings.
#[derive(Debug, Default)]
pub struct HelpView {
    region: Rect,
}

impl View for HelpView {
    fn name(&self) -> ViewName {
        ViewName::Help
    }

    fn region(&self) -> Rect {
        self.region
    }

    fn set_region(&mut self, area: Rect) {
        self.region = area;
    }
}

impl HelpView {
    pub fn render(&self, frame: &mut Frame<'_>, keymap: &Keymap) {
        let area = self.region;
        if area.width == 0 || area.height == 0 {
            return;
        }

        frame.render_widget(Clear, area);
        let block = Block::default()
            .title(Span::styled(" Help ", Style::default().fg(ACCENT)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(POPUP_BORDER));
        frame.render_widget(Paragraph::new(help_lines(keymap)).block(block), area);
    }
}

fn help_lines(keymap: &Keymap) -> Vec<Line<'static>> {
    let bindings = keymap.describe();
    let width = bindings
        .iter()
        .map(|(keys, _)| keys.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("lntop v{VERSION}"),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    lines.extend(bindings.into_iter().map(|(keys, description)| {
        Line::from(vec![
            Span::styled(
                format!("  {keys:<width$}   "),
                Style::default().fg(HEADER_TEXT),
            ),
            Span::styled(description, Style::default().fg(LABEL_TEXT)),
        ])
    }));
    lines
}

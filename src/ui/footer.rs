use crate::ui::input::{Action, Keymap};
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT, STATUS_ERROR};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Footer<'a> {
    keymap: &'a Keymap,
    error: Option<&'a str>,
}

impl<'a> Footer<'a> {
    pub fn new(keymap: &'a Keymap, error: Option<&'a str>) -> Self {
        Self { keymap, error }
    }

    fn hints(&self) -> String {
        let first_key = |action: Action| {
            self.keymap
                .describe()
                .into_iter()
                .find(|(_, description)| *description == action.description())
                .and_then(|(keys, _)| keys.split(", ").next().map(str::to_uppercase))
        };
        let mut parts = Vec::new();
        if let Some(key) = first_key(Action::Help) {
            parts.push(format!("{key}: Help"));
        }
        parts.push("ENTER: Detail".to_string());
        parts.push("←/→: Columns".to_string());
        if let Some(key) = first_key(Action::Quit) {
            parts.push(format!("{key}: Quit"));
        }
        format!(" {}", parts.join(" │ "))
    }

    pub fn widget(&self, area: Rect) -> Paragraph<'static> {
        let (message, message_style) = match self.error {
            Some(error) => (format!(" {error}"), Style::default().fg(STATUS_ERROR)),
            None => (
                self.hints(),
                Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM),
            ),
        };
        let version = format!("v{} ", VERSION);
        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);

        // Char count, not bytes: the hints contain box-drawing characters.
        let content_width = area.width.saturating_sub(2) as usize;
        let padding = content_width
            .saturating_sub(message.chars().count())
            .saturating_sub(version.chars().count());

        let line = Line::from(vec![
            Span::styled(message, message_style),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(version, text_style),
        ]);

        Paragraph::new(line)
            .style(text_style)
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            )
    }
}

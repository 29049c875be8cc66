use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::ModelSnapshot;
use crate::network::ChannelSummary;
use crate::ui::format::{gauge, sats};
use crate::ui::navigation::ViewName;
use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_TEXT, LABEL_TEXT};

use super::View;

/// Detail pane for the channel the model store marks as current.
#[derive(Debug, Default)]
pub struct ChannelView {
    region: Rect,
}

impl View for ChannelView {
    fn name(&self) -> ViewName {
        ViewName::Channel
    }

    fn region(&self) -> Rect {
        self.region
    }

    fn set_region(&mut self, area: Rect) {
        self.region = area;
    }
}

impl ChannelView {
    pub fn render(&self, frame: &mut Frame<'_>, models: &ModelSnapshot, focused: bool) {
        let area = self.region;
        if area.width == 0 || area.height == 0 {
            return;
        }

        let border = if focused { ACCENT } else { GLOBAL_BORDER };
        let block = Block::default()
            .title(Span::styled(" Channel ", Style::default().fg(ACCENT)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));

        let lines = match models.current_channel() {
            Some(channel) => detail_lines(channel),
            None => vec![Line::from(Span::styled(
                "No channel selected",
                Style::default().fg(LABEL_TEXT),
            ))],
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

fn field(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<16}"), Style::default().fg(LABEL_TEXT)),
        Span::styled(value, Style::default().fg(HEADER_TEXT)),
    ])
}

fn detail_lines(channel: &ChannelSummary) -> Vec<Line<'static>> {
    let id = if channel.id == 0 {
        "-".to_string()
    } else {
        channel.id.to_string()
    };
    vec![
        Line::from(Span::styled(
            channel.remote_pubkey.clone(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        field("Status", channel.status.label().to_string()),
        field("ID", id),
        field("Channel point", channel.channel_point.clone()),
        field("Private", if channel.private { "yes" } else { "no" }.to_string()),
        Line::default(),
        field("Capacity", sats(channel.capacity)),
        field("Local balance", sats(channel.local_balance)),
        field("Remote balance", sats(channel.remote_balance)),
        field(
            "Balance",
            gauge(channel.local_balance, channel.capacity, 30),
        ),
        Line::default(),
        field("Total sent", sats(channel.total_sent)),
        field("Total received", sats(channel.total_received)),
        field("Updates", channel.num_updates.to_string()),
    ]
}

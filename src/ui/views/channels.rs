use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};
use ratatui::Frame;

use crate::models::ModelSnapshot;
use crate::network::{ChannelStatus, ChannelSummary};
use crate::ui::format::{abbreviate, gauge, sats};
use crate::ui::navigation::ViewName;
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, GLOBAL_BORDER, HEADER_TEXT, LABEL_TEXT, STATUS_ERROR, STATUS_OK,
    STATUS_WARN,
};

use super::View;

const GAUGE_WIDTH: usize = 20;

/// Column headers, in display order. Left/right scroll drops leading columns.
pub const COLUMNS: [&str; 11] = [
    "STATUS", "GAUGE", "LOCAL", "REMOTE", "CAPACITY", "SENT", "RECEIVED", "UPDATES", "PRIVATE",
    "ID", "PEER",
];

const WIDTHS: [u16; 11] = [9, 27, 13, 13, 13, 12, 12, 8, 8, 19, 23];

/// Channel list. The only view with a cursor: up/down picks a row,
/// left/right scrolls columns.
#[derive(Debug, Default)]
pub struct ChannelsView {
    region: Rect,
    cursor: usize,
    column_offset: usize,
}

impl View for ChannelsView {
    fn name(&self) -> ViewName {
        ViewName::Channels
    }

    fn region(&self) -> Rect {
        self.region
    }

    fn set_region(&mut self, area: Rect) {
        self.region = area;
    }

    fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn cursor_down(&mut self, rows: usize) {
        if self.cursor + 1 < rows {
            self.cursor += 1;
        }
    }

    fn cursor_left(&mut self) {
        self.column_offset = self.column_offset.saturating_sub(1);
    }

    fn cursor_right(&mut self) {
        if self.column_offset + 1 < COLUMNS.len() {
            self.column_offset += 1;
        }
    }
}

impl ChannelsView {
    /// Row under the cursor.
    pub fn cursor_row(&self) -> usize {
        self.cursor
    }

    pub fn column_offset(&self) -> usize {
        self.column_offset
    }

    /// Pull the cursor back inside a list that may have shrunk.
    pub fn clamp(&mut self, rows: usize) {
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }

    pub fn render(&self, frame: &mut Frame<'_>, models: &ModelSnapshot, focused: bool) {
        let area = self.region;
        if area.width == 0 || area.height == 0 {
            return;
        }

        let border = if focused { ACCENT } else { GLOBAL_BORDER };
        let block = Block::default()
            .title(Span::styled(
                format!(" Channels ({}) ", models.channels.len()),
                Style::default().fg(ACCENT),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));

        let skip = self.column_offset;
        let header = Row::new(COLUMNS.iter().skip(skip).map(|title| Cell::from(*title)))
            .style(Style::default().fg(LABEL_TEXT).add_modifier(Modifier::BOLD));
        let rows = models
            .channels
            .iter()
            .map(|channel| Row::new(channel_cells(channel).into_iter().skip(skip)));
        let widths = WIDTHS.iter().skip(skip).map(|w| Constraint::Length(*w));

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .style(Style::default().fg(HEADER_TEXT))
            .row_highlight_style(Style::default().bg(ACTIVE_HIGHLIGHT))
            .column_spacing(1);

        let mut state = TableState::default();
        if !models.channels.is_empty() {
            state.select(Some(self.cursor.min(models.channels.len() - 1)));
        }
        frame.render_stateful_widget(table, area, &mut state);
    }
}

fn channel_cells(channel: &ChannelSummary) -> Vec<Cell<'static>> {
    let status_color = match channel.status {
        ChannelStatus::Active => STATUS_OK,
        ChannelStatus::Inactive => STATUS_ERROR,
        ChannelStatus::Opening => STATUS_WARN,
    };
    vec![
        Cell::from(Span::styled(
            channel.status.label(),
            Style::default().fg(status_color),
        )),
        Cell::from(gauge(channel.local_balance, channel.capacity, GAUGE_WIDTH)),
        Cell::from(sats(channel.local_balance)),
        Cell::from(sats(channel.remote_balance)),
        Cell::from(sats(channel.capacity)),
        Cell::from(sats(channel.total_sent)),
        Cell::from(sats(channel.total_received)),
        Cell::from(channel.num_updates.to_string()),
        Cell::from(if channel.private { "yes" } else { "no" }),
        Cell::from(if channel.id == 0 {
            "-".to_string()
        } else {
            channel.id.to_string()
        }),
        Cell::from(abbreviate(&channel.remote_pubkey, 10)),
    ]
}

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::models::ModelSnapshot;
use crate::network::{ChannelsBalance, InfoSnapshot, WalletBalance};
use crate::ui::format::{abbreviate, sats};
use crate::ui::theme::{
    ACCENT, GLOBAL_BORDER, HEADER_TEXT, LABEL_TEXT, STATUS_OK, STATUS_WARN,
};

/// Node summary strip above the body. Not focusable.
#[derive(Debug, Default)]
pub struct SummaryView {
    region: Rect,
}

impl SummaryView {
    pub fn region(&self) -> Rect {
        self.region
    }

    pub fn set_region(&mut self, area: Rect) {
        self.region = area;
    }

    pub fn render(&self, frame: &mut Frame<'_>, models: &ModelSnapshot) {
        let area = self.region;
        if area.width == 0 || area.height == 0 {
            return;
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(30),
                Constraint::Percentage(30),
            ])
            .split(area);

        let panels = [
            (" Node ", node_lines(&models.info)),
            (" Wallet ", wallet_lines(&models.wallet_balance)),
            (
                " Channels ",
                channel_lines(&models.info, &models.channels_balance),
            ),
        ];
        for ((title, lines), column) in panels.into_iter().zip(columns.iter()) {
            let block = Block::default()
                .title(Span::styled(title, Style::default().fg(ACCENT)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER));
            frame.render_widget(Paragraph::new(lines).block(block), *column);
        }
    }
}

fn row(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<12}"), Style::default().fg(LABEL_TEXT)),
        Span::styled(value, Style::default().fg(HEADER_TEXT)),
    ])
}

fn node_lines(info: &InfoSnapshot) -> Vec<Line<'static>> {
    let (sync_label, sync_color) = if info.synced {
        ("synced", STATUS_OK)
    } else {
        ("syncing", STATUS_WARN)
    };
    vec![
        Line::from(vec![
            Span::styled(info.alias.clone(), Style::default().fg(HEADER_TEXT)),
            Span::raw(" "),
            Span::styled(
                abbreviate(&info.pubkey, 8),
                Style::default().fg(LABEL_TEXT),
            ),
        ]),
        row("Version", info.version.clone()),
        Line::from(vec![
            Span::styled(format!("{:<12}", "Height"), Style::default().fg(LABEL_TEXT)),
            Span::styled(
                info.block_height.to_string(),
                Style::default().fg(HEADER_TEXT),
            ),
            Span::raw(" "),
            Span::styled(sync_label, Style::default().fg(sync_color)),
        ]),
        row("Peers", info.num_peers.to_string()),
    ]
}

fn wallet_lines(wallet: &WalletBalance) -> Vec<Line<'static>> {
    vec![
        row("Total", sats(wallet.total)),
        row("Confirmed", sats(wallet.confirmed)),
        row("Unconfirmed", sats(wallet.unconfirmed)),
    ]
}

fn channel_lines(info: &InfoSnapshot, balance: &ChannelsBalance) -> Vec<Line<'static>> {
    vec![
        row("Balance", sats(balance.balance)),
        row("Pending", sats(balance.pending_open_balance)),
        row(
            "Count",
            format!(
                "{} active, {} inactive, {} pending",
                info.num_active_channels, info.num_inactive_channels, info.num_pending_channels
            ),
        ),
    ]
}

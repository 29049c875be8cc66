//! View registry.
//!
//! Fixed catalog of the dashboard's views. Besides the views themselves it
//! owns the navigation state, i.e. which view is focused and where it was
//! entered from; transitions go through [`NavigationReducer`].

mod channel;
mod channels;
mod help;
mod summary;

pub use channel::ChannelView;
pub use channels::{ChannelsView, COLUMNS};
pub use help::HelpView;
pub use summary::SummaryView;

use ratatui::layout::Rect;

use crate::ui::layout::layout_regions;
use crate::ui::mvi::Reducer;
use crate::ui::navigation::{NavigationIntent, NavigationReducer, NavigationState, ViewName};

/// Capabilities shared by focusable views. Cursor movement defaults to a
/// no-op for views that don't support it.
pub trait View {
    fn name(&self) -> ViewName;

    fn region(&self) -> Rect;

    fn set_region(&mut self, area: Rect);

    fn cursor_up(&mut self) {}

    /// `rows` is the number of rows the view currently shows.
    fn cursor_down(&mut self, _rows: usize) {}

    fn cursor_left(&mut self) {}

    fn cursor_right(&mut self) {}
}

pub struct Views {
    pub summary: SummaryView,
    pub channels: ChannelsView,
    pub channel: ChannelView,
    pub help: HelpView,
    navigation: NavigationState,
}

impl Default for Views {
    fn default() -> Self {
        Self::new()
    }
}

impl Views {
    pub fn new() -> Self {
        Self {
            summary: SummaryView::default(),
            channels: ChannelsView::default(),
            channel: ChannelView::default(),
            help: HelpView::default(),
            navigation: NavigationState::default(),
        }
    }

    /// Assign regions for a `width` x `height` window.
    ///
    /// The list and the detail share the body strip; help covers the whole
    /// window.
    pub fn layout(&mut self, width: u16, height: u16) {
        let area = Rect::new(0, 0, width, height);
        let (header, body, _footer) = layout_regions(area);
        self.summary.set_region(header);
        self.channels.set_region(body);
        self.channel.set_region(body);
        self.help.set_region(area);
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn active(&self) -> ViewName {
        self.navigation.active
    }

    pub fn get(&self, name: ViewName) -> &dyn View {
        match name {
            ViewName::Channels => &self.channels,
            ViewName::Channel => &self.channel,
            ViewName::Help => &self.help,
        }
    }

    pub fn get_mut(&mut self, name: ViewName) -> &mut dyn View {
        match name {
            ViewName::Channels => &mut self.channels,
            ViewName::Channel => &mut self.channel,
            ViewName::Help => &mut self.help,
        }
    }

    pub fn focused_mut(&mut self) -> &mut dyn View {
        let active = self.navigation.active;
        self.get_mut(active)
    }

    pub fn dispatch(&mut self, intent: NavigationIntent) {
        let from = self.navigation.active;
        self.navigation = NavigationReducer::reduce(std::mem::take(&mut self.navigation), intent);
        tracing::debug!(?intent, %from, to = %self.navigation.active, "navigation");
    }
}

use std::fmt;

use crate::ui::mvi::UiState;

/// The fixed set of focusable views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewName {
    /// Channel list.
    #[default]
    Channels,
    /// Single channel detail.
    Channel,
    /// Full-window help overlay.
    Help,
}

impl ViewName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewName::Channels => "channels",
            ViewName::Channel => "channel",
            ViewName::Help => "help",
        }
    }
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the active view was entered from.
///
/// Non-`None` only while `Help` is active, or while `Channel` is active having
/// come from `Channels`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Previous {
    #[default]
    None,
    /// Detail opened from the channel list.
    CameFromList,
    /// Help overlay; holds the full state it was opened over.
    CameFromOther(Box<NavigationState>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub active: ViewName,
    pub previous: Previous,
}

impl UiState for NavigationState {}

impl NavigationState {
    pub fn new(active: ViewName, previous: Previous) -> Self {
        Self { active, previous }
    }

    pub fn is_help(&self) -> bool {
        self.active == ViewName::Help
    }

    /// The view a back action would return to, if any.
    pub fn previous_view(&self) -> Option<ViewName> {
        match &self.previous {
            Previous::None => None,
            Previous::CameFromList => Some(ViewName::Channels),
            Previous::CameFromOther(state) => Some(state.active),
        }
    }
}

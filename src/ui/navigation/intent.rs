use crate::ui::mvi::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationIntent {
    /// Show the channel detail. The caller selects the channel first.
    OpenDetail,
    /// Leave the channel detail.
    CloseDetail,
    /// Show or dismiss the help overlay.
    ToggleHelp,
}

impl Intent for NavigationIntent {}

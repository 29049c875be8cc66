//! Reducer for view navigation.

use crate::ui::mvi::Reducer;

use super::intent::NavigationIntent;
use super::state::{NavigationState, Previous, ViewName};

/// Pure transition function. Selecting the channel before `OpenDetail` is
/// the caller's job; a failed selection means the intent is never sent.
pub struct NavigationReducer;

impl Reducer for NavigationReducer {
    type State = NavigationState;
    type Intent = NavigationIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            NavigationIntent::OpenDetail => match state.active {
                ViewName::Channels => {
                    NavigationState::new(ViewName::Channel, Previous::CameFromList)
                }
                _ => state,
            },

            NavigationIntent::CloseDetail => match state.active {
                // CameFromList returns to the list; anything else falls back
                // to it explicitly. Either way the history is cleared.
                ViewName::Channel => NavigationState::default(),
                _ => state,
            },

            NavigationIntent::ToggleHelp => match state.active {
                ViewName::Help => match state.previous {
                    Previous::CameFromOther(covered) => *covered,
                    Previous::None | Previous::CameFromList => NavigationState::default(),
                },
                _ => NavigationState::new(
                    ViewName::Help,
                    Previous::CameFromOther(Box::new(state)),
                ),
            },
        }
    }
}

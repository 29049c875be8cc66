//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents are user actions (key presses) or navigation requests; reducers
/// turn them into new states.
pub trait Intent: Send + 'static {}

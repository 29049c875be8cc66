//! Base trait for UI state.

/// Marker trait for UI state objects: cloneable, comparable, with a
/// well-defined starting value.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

//! Terminal dashboard: refresh controller, navigation and drawing.

pub mod app;
pub mod controller;
pub mod events;
pub mod footer;
pub mod format;
pub mod input;
pub mod layout;
pub mod mvi;
pub mod navigation;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;
pub mod views;

use std::io;

use thiserror::Error;

use crate::models::ModelError;

#[derive(Debug, Error)]
pub enum UiError {
    #[error("Key binding setup failed: {message}")]
    BindingSetup { message: String },

    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("Initial refresh failed: {0}")]
    Bootstrap(#[source] ModelError),
}

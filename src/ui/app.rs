use std::sync::Arc;

use crate::models::{ModelError, ModelStore};
use crate::ui::input::{Action, Keymap};
use crate::ui::navigation::{NavigationIntent, ViewName};
use crate::ui::views::Views;

/// UI-side state owned by the render loop.
///
/// All navigation writes happen here; the model store is only read, apart
/// from selecting the current channel before the detail view opens.
pub struct App {
    models: Arc<ModelStore>,
    views: Views,
    keymap: Keymap,
    should_quit: bool,
    last_error: Option<String>,
}

impl App {
    pub fn new(models: Arc<ModelStore>, keymap: Keymap) -> Self {
        Self {
            models,
            views: Views::new(),
            keymap,
            should_quit: false,
            last_error: None,
        }
    }

    pub fn models(&self) -> &ModelStore {
        &self.models
    }

    pub fn views(&self) -> &Views {
        &self.views
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    /// Last user-facing error, shown in the footer until the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn layout(&mut self, width: u16, height: u16) {
        self.views.layout(width, height);
    }

    /// Called before each draw; the channel list may have shrunk.
    pub fn sync_with_models(&mut self) {
        let rows = self.models.channels().len();
        self.views.channels.clamp(rows);
    }

    pub fn on_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.request_quit(),
            Action::Help => self.toggle_help(),
            Action::Enter => {
                if let Err(err) = self.on_enter() {
                    tracing::warn!(error = %err, "cannot open channel detail");
                    self.last_error = Some(err.to_string());
                }
            }
            Action::CursorUp => self.views.focused_mut().cursor_up(),
            Action::CursorDown => {
                let rows = self.models.channels().len();
                self.views.focused_mut().cursor_down(rows);
            }
            Action::CursorLeft => self.views.focused_mut().cursor_left(),
            Action::CursorRight => self.views.focused_mut().cursor_right(),
        }
    }

    /// Enter on the list opens the row under the cursor; on the detail it
    /// goes back. A failed selection leaves navigation untouched.
    pub fn on_enter(&mut self) -> Result<(), ModelError> {
        match self.views.active() {
            ViewName::Channels => {
                let row = self.views.channels.cursor_row();
                self.models.set_current_channel(row)?;
                self.last_error = None;
                self.views.dispatch(NavigationIntent::OpenDetail);
            }
            ViewName::Channel => self.views.dispatch(NavigationIntent::CloseDetail),
            ViewName::Help => {}
        }
        Ok(())
    }

    pub fn toggle_help(&mut self) {
        self.views.dispatch(NavigationIntent::ToggleHelp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{
        ChannelSummary, ChannelsBalance, DataSource, DataSourceError, InfoSnapshot,
        WalletBalance,
    };
    use async_trait::async_trait;

    struct Empty;

    #[async_trait]
    impl DataSource for Empty {
        async fn get_info(&self) -> Result<InfoSnapshot, DataSourceError> {
            Ok(InfoSnapshot::default())
        }
        async fn get_wallet_balance(&self) -> Result<WalletBalance, DataSourceError> {
            Ok(WalletBalance::default())
        }
        async fn get_channels_balance(&self) -> Result<ChannelsBalance, DataSourceError> {
            Ok(ChannelsBalance::default())
        }
        async fn list_channels(&self) -> Result<Vec<ChannelSummary>, DataSourceError> {
            Ok(Vec::new())
        }
    }

    fn app() -> App {
        App::new(Arc::new(ModelStore::new(Arc::new(Empty))), Keymap::default())
    }

    #[test]
    fn quit_action_sets_flag() {
        let mut app = app();
        assert!(!app.should_quit());
        app.on_action(Action::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn enter_on_empty_list_reports_error_and_stays() {
        let mut app = app();
        app.on_action(Action::Enter);
        assert_eq!(app.views().active(), ViewName::Channels);
        assert!(app.last_error().is_some_and(|e| e.contains("out of range")));
    }

    #[test]
    fn enter_on_help_is_ignored() {
        let mut app = app();
        app.on_action(Action::Help);
        assert!(app.on_enter().is_ok());
        assert_eq!(app.views().active(), ViewName::Help);
    }
}

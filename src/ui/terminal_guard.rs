use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear as TermClear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use parking_lot::Mutex;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::Arc;

use crate::ui::UiError;

type Cleanup = Arc<Mutex<Option<Box<dyn FnOnce() + Send + 'static>>>>;

pub type DashboardTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Leaves raw mode and the alternate screen on drop, and on panic before
/// the panic message is printed.
pub struct TerminalGuard {
    cleanup: Cleanup,
}

impl TerminalGuard {
    fn new<F: FnOnce() + Send + 'static>(cleanup: F) -> Self {
        let slot: Cleanup = Arc::new(Mutex::new(Some(Box::new(cleanup))));
        let hook_slot = Arc::clone(&slot);
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if let Some(cleanup) = hook_slot.lock().take() {
                cleanup();
            }
            default_hook(info);
        }));
        Self { cleanup: slot }
    }

    pub fn restore(&self) {
        if let Some(cleanup) = self.cleanup.lock().take() {
            cleanup();
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = stdout.execute(LeaveAlternateScreen);
    let _ = stdout.execute(Show);
}

/// Enter raw mode on the alternate screen. Failing here means the input
/// layer cannot work, so it is reported as a binding setup error.
pub fn setup_terminal() -> Result<(DashboardTerminal, TerminalGuard), UiError> {
    let binding_error = |step: &str, err: io::Error| UiError::BindingSetup {
        message: format!("{step}: {err}"),
    };

    enable_raw_mode().map_err(|err| binding_error("enable raw mode", err))?;
    // Restore whatever succeeded so far if a later step fails.
    let guard = TerminalGuard::new(restore_terminal);

    let mut stdout = io::stdout();
    stdout
        .execute(EnterAlternateScreen)
        .map_err(|err| binding_error("enter alternate screen", err))?;
    stdout.execute(TermClear(ClearType::All))?;
    stdout.execute(Hide)?;

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok((terminal, guard))
}

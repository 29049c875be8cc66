use crossterm::event::{Event, EventStream, KeyEvent};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::shutdown::ShutdownHandle;

pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    /// The controller finished a refresh plan.
    Redraw,
    /// Shutdown was signalled, or the terminal input stream ended.
    Shutdown,
}

/// Merges terminal input, redraw requests and shutdown into one stream for
/// the render loop.
pub struct EventHandler {
    input: EventStream,
    redraw: mpsc::Receiver<()>,
    shutdown: ShutdownHandle,
}

impl EventHandler {
    pub fn new(redraw: mpsc::Receiver<()>, shutdown: ShutdownHandle) -> Self {
        Self {
            input: EventStream::new(),
            redraw,
            shutdown,
        }
    }

    pub async fn next(&mut self) -> AppEvent {
        loop {
            if self.shutdown.is_shutting_down() {
                return AppEvent::Shutdown;
            }
            tokio::select! {
                _ = self.shutdown.wait() => return AppEvent::Shutdown,
                Some(()) = self.redraw.recv() => return AppEvent::Redraw,
                input = self.input.next() => match input {
                    Some(Ok(Event::Key(key))) => return AppEvent::Key(key),
                    Some(Ok(Event::Resize(cols, rows))) => return AppEvent::Resize(cols, rows),
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        tracing::error!(error = %err, "terminal input error");
                        return AppEvent::Shutdown;
                    }
                    None => return AppEvent::Shutdown,
                },
            }
        }
    }
}

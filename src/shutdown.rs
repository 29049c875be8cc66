use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::signal;
use tokio::sync::Notify;

/// Owner of the process-wide shutdown flag.
pub struct ShutdownCoordinator {
    shutdown: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Signal shutdown start
    pub fn signal(&self) {
        if !self.shutdown.swap(true, Ordering::SeqCst) {
            tracing::info!("Shutdown initiated");
            self.notify.notify_waiters();
        }
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Create a handle for sharing
    pub fn handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            shutdown: Arc::clone(&self.shutdown),
            notify: Arc::clone(&self.notify),
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Lightweight handle for checking shutdown state
#[derive(Clone)]
pub struct ShutdownHandle {
    shutdown: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownHandle {
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    pub fn signal(&self) {
        if !self.shutdown.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    pub async fn wait(&self) {
        // Register with Notify before checking the flag, otherwise a signal
        // landing between the check and the await is lost.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_shutting_down() {
            return;
        }
        notified.await;
    }

    /// Resolve on SIGINT/SIGTERM (or an in-process signal) and mark
    /// shutdown.
    pub async fn watch_os_signals(&self) -> io::Result<()> {
        #[cfg(unix)]
        {
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;
            tokio::select! {
                _ = signal::ctrl_c() => tracing::info!("SIGINT received"),
                _ = sigterm.recv() => tracing::info!("SIGTERM received"),
                _ = self.wait() => return Ok(()),
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                _ = signal::ctrl_c() => tracing::info!("Ctrl-C received"),
                _ = self.wait() => return Ok(()),
            }
        }

        self.signal();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn wait_returns_after_signal() {
        let coordinator = ShutdownCoordinator::new();
        let handle = coordinator.handle();
        let waiter = tokio::spawn(async move { handle.wait().await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        coordinator.signal();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter finished")
            .expect("task ok");
    }

    #[tokio::test]
    async fn wait_returns_immediately_when_already_signalled() {
        let coordinator = ShutdownCoordinator::new();
        let handle = coordinator.handle();
        handle.signal();
        assert!(coordinator.is_shutting_down());
        tokio::time::timeout(Duration::from_millis(100), handle.wait())
            .await
            .expect("no wait");
    }

    #[tokio::test]
    async fn signal_watcher_stops_on_in_process_shutdown() {
        let coordinator = ShutdownCoordinator::new();
        let handle = coordinator.handle();
        let watcher = tokio::spawn(async move { handle.watch_os_signals().await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        coordinator.signal();
        let result = tokio::time::timeout(Duration::from_secs(1), watcher)
            .await
            .expect("watcher finished")
            .expect("task ok");
        assert!(result.is_ok());
    }
}

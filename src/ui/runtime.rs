use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::config::Config;
use crate::models::{ModelError, ModelStore};
use crate::network::{DataSource, LndClient};
use crate::pubsub::PubSub;
use crate::shutdown::{ShutdownCoordinator, ShutdownHandle};
use crate::ui::app::App;
use crate::ui::controller::{Controller, RedrawHandle};
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::{handle_key, Keymap};
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use crate::ui::UiError;

const TRANSPORT_STOP_GRACE: Duration = Duration::from_secs(1);

/// Run the dashboard until quit or SIGINT/SIGTERM.
pub async fn run(config: &Config, client: Arc<LndClient>) -> Result<(), UiError> {
    let keymap = Keymap::from_config(&config.keys)?;

    let shutdown = ShutdownCoordinator::new();
    let signals = shutdown.handle();
    tokio::spawn(async move {
        if let Err(err) = signals.watch_os_signals().await {
            tracing::warn!(error = %err, "cannot install signal handlers");
        }
    });

    // Created before bootstrap so early events wait in the buffer.
    let (event_tx, event_rx) = mpsc::channel(config.ui.event_buffer);
    let source: Arc<dyn DataSource> = client.clone();
    let pubsub = PubSub::new(
        Arc::clone(&source),
        Duration::from_secs(config.ui.poll_interval_secs),
    )
    .with_invoices(client);
    let transport = tokio::spawn(pubsub.run(event_tx, shutdown.handle()));

    let models = Arc::new(
        ModelStore::new(source)
            .with_refresh_timeout(config.ui.refresh_timeout_secs.map(Duration::from_secs)),
    );
    match bootstrap_until_shutdown(&models, &shutdown.handle()).await {
        Ok(true) => tracing::info!("bootstrap complete"),
        Ok(false) => {
            tracing::info!("shutdown requested during bootstrap");
            return Ok(());
        }
        Err(err) => {
            tracing::error!(error = %err, "bootstrap failed");
            shutdown.signal();
            return Err(UiError::Bootstrap(err));
        }
    }

    let (mut terminal, guard) = setup_terminal()?;

    let (redraw, redraw_rx) = RedrawHandle::channel();
    let controller = Controller::new(Arc::clone(&models), Arc::new(redraw));
    let controller_task = tokio::spawn(controller.listen(event_rx));

    let mut app = App::new(models, keymap);
    let (cols, rows) = crossterm::terminal::size()?;
    app.layout(cols, rows);
    let mut events = EventHandler::new(redraw_rx, shutdown.handle());

    let result = loop {
        app.sync_with_models();
        if let Err(err) = terminal.draw(|frame| draw(frame, &app)) {
            break Err(UiError::Terminal(err));
        }
        if app.should_quit() {
            break Ok(());
        }

        match events.next().await {
            AppEvent::Key(key) => handle_key(&mut app, key),
            AppEvent::Resize(cols, rows) => app.layout(cols, rows),
            AppEvent::Redraw => {}
            AppEvent::Shutdown => break Ok(()),
        }
    };

    shutdown.signal();
    // A refresh blocked on the network cannot be interrupted any other way.
    controller_task.abort();
    if tokio::time::timeout(TRANSPORT_STOP_GRACE, transport)
        .await
        .is_err()
    {
        tracing::warn!("subscription transport did not stop in time");
    }
    drop(guard);
    result
}

/// Bootstrap `models` unless shutdown comes first.
///
/// Returns `Ok(false)` when shutdown was requested before bootstrap finished;
/// the in-flight refresh is dropped.
pub async fn bootstrap_until_shutdown(
    models: &ModelStore,
    shutdown: &ShutdownHandle,
) -> Result<bool, ModelError> {
    tokio::select! {
        result = models.bootstrap() => result.map(|()| true),
        _ = shutdown.wait() => Ok(false),
    }
}

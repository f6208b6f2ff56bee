//! Process host: wiring, control loop and signal handling.
//!
//! Every event source (shell reader thread, timer tasks, signal task) feeds
//! one unbounded channel. The loop below is the only consumer and runs each
//! event to completion on a single task, so no handler ever interleaves with
//! another.

use crate::libs::bounds_store::JsonBoundsStore;
use crate::libs::config::Config;
use crate::libs::data_storage::{DataStorage, APP_VERSION};
use crate::libs::event::{self, AppEvent, EventReceiver, EventSender};
use crate::libs::messages::Message;
use crate::libs::scheduler::{LocalClock, ScheduleEngine};
use crate::libs::session::SessionCoordinator;
use crate::libs::stdio_shell::{self, StdioShell};
use crate::libs::windows::{WindowManager, WindowRole};
use crate::{msg_error, msg_error_anyhow, msg_info};
use anyhow::Result;
use std::io;

pub struct Host {
    coordinator: SessionCoordinator,
    events: EventReceiver,
}

impl Host {
    pub fn new(coordinator: SessionCoordinator, events: EventReceiver) -> Self {
        Self { coordinator, events }
    }

    /// Shows the loading window, then handles events until one asks to stop.
    ///
    /// # Errors
    ///
    /// Fails only when the very first window can not be created.
    pub async fn run(mut self) -> Result<()> {
        self.coordinator.start().map_err(|e| {
            msg_error_anyhow!(Message::WindowOpenFailed(WindowRole::Loading.to_string(), e.to_string()))
        })?;

        while let Some(event) = self.events.recv().await {
            if self.coordinator.handle(event).is_break() {
                break;
            }
        }

        msg_info!(Message::HostShuttingDown);
        self.coordinator.shutdown();
        Ok(())
    }
}

/// Runs the application against the shell process on stdin/stdout.
pub async fn run_with_signal_handling(config: &Config, storage: DataStorage) -> Result<()> {
    let (tx, rx) = event::channel();
    spawn_signal_listener(tx.clone());

    let windows = WindowManager::new(
        Box::new(StdioShell::new(io::stdout())),
        Box::new(JsonBoundsStore::new(storage)),
    );
    let schedule = ScheduleEngine::new(
        Box::new(LocalClock),
        tx.clone(),
        config.poll_interval(),
        config.notification_title.clone(),
    );
    let coordinator = SessionCoordinator::new(windows, schedule);

    // Never joined: a blocking stdin read ends with the process.
    let _reader = stdio_shell::spawn_reader(io::BufReader::new(io::stdin()), tx);

    msg_info!(Message::HostStarted(APP_VERSION.to_string()));
    Host::new(coordinator, rx).run().await?;
    msg_info!(Message::HostExited);
    Ok(())
}

/// Turns SIGTERM/SIGINT (Ctrl+C on Windows) into [`AppEvent::Shutdown`].
fn spawn_signal_listener(events: EventSender) {
    #[cfg(unix)]
    {
        tokio::spawn(async move {
            use tokio::signal::unix::{signal, SignalKind};

            let (mut sigterm, mut sigint) = match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
                (Err(e), _) | (_, Err(e)) => {
                    msg_error!(Message::HostSignalHandlerFailed(e.to_string()));
                    return;
                }
            };

            tokio::select! {
                _ = sigterm.recv() => {
                    msg_info!(Message::HostReceivedSigterm);
                }
                _ = sigint.recv() => {
                    msg_info!(Message::HostReceivedSigint);
                }
            }

            let _ = events.send(AppEvent::Shutdown);
        });
    }

    #[cfg(windows)]
    {
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    msg_info!(Message::HostReceivedCtrlC);
                    let _ = events.send(AppEvent::Shutdown);
                }
                Err(e) => {
                    msg_error!(Message::HostCtrlCListenFailed(e.to_string()));
                }
            }
        });
    }

    #[cfg(not(any(unix, windows)))]
    {
        use crate::msg_warning;
        drop(events);
        msg_warning!(Message::HostSignalHandlingNotSupported);
    }
}

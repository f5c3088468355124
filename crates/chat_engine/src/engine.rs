use std::panic::AssertUnwindSafe;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use chat_core::{Outcome, RequestId, Turn};
use chat_logging::{chat_debug, chat_error};
use futures_util::FutureExt;

use crate::controller::{DispatchError, RequestDispatcher};
use crate::{into_outcome, ChatEndpoint, EngineEvent};

enum EngineCommand {
    Send {
        request_id: RequestId,
        conversation: Vec<Turn>,
    },
}

/// Runs endpoint calls on a background tokio runtime and reports completions as events.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(endpoint: Arc<dyn ChatEndpoint>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    // Dropping `cmd_rx` makes every later dispatch fail fast.
                    chat_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let endpoint = endpoint.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(endpoint.as_ref(), command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    /// Blocks until the next completion. `None` once the engine has shut down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

impl RequestDispatcher for EngineHandle {
    fn dispatch(
        &self,
        request_id: RequestId,
        conversation: Vec<Turn>,
    ) -> Result<(), DispatchError> {
        self.cmd_tx
            .send(EngineCommand::Send {
                request_id,
                conversation,
            })
            .map_err(|_| DispatchError::EngineStopped)
    }
}

async fn handle_command(
    endpoint: &dyn ChatEndpoint,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Send {
            request_id,
            conversation,
        } => {
            chat_debug!(
                "Request {} sending {} turns",
                request_id,
                conversation.len()
            );
            let call = AssertUnwindSafe(endpoint.complete(&conversation))
                .catch_unwind()
                .await;
            let outcome = match call {
                Ok(result) => into_outcome(result),
                Err(_) => {
                    chat_error!("Endpoint call for request {} panicked", request_id);
                    Outcome::Transport {
                        message: "endpoint call panicked".to_string(),
                    }
                }
            };
            let _ = event_tx.send(EngineEvent::Completed {
                request_id,
                outcome,
            });
        }
    }
}

//! Request/response futures over a channel.
//!
//! A single background task owns the [`NoteService`]; callers hold a cheap
//! [`ServiceHandle`] and await a oneshot reply per message. Each message is
//! handled on its own task so a slow unlock does not hold up other notes;
//! ordering within one note id comes from the service's per-id locks.
//!
//! Shutdown drains every accepted message before it completes, so a store
//! snapshot taken afterwards contains every write a caller was told succeeded.

use tokio::{
    sync::{mpsc, oneshot},
    task::JoinSet,
};
use tracing::{Instrument, debug, info, info_span, warn};

use super::{NoteService, Request, Response};

/// Commands accepted by the service task.
#[derive(Debug)]
enum ServiceCommand {
    /// Handle a UI message and reply on `response`.
    Message {
        request: Request,
        response: oneshot::Sender<Response>,
    },
    /// Stop accepting messages, finish the accepted ones, then ack on `done`.
    Shutdown { done: oneshot::Sender<()> },
}

/// Error returned when the service task is gone.
#[derive(Debug, thiserror::Error)]
#[error("Note service is not running")]
pub struct ServiceClosed;

/// Client side of the service task.
#[derive(Debug, Clone)]
pub struct ServiceHandle {
    command_tx: mpsc::Sender<ServiceCommand>,
}

impl ServiceHandle {
    /// Spawn the service task on the current runtime.
    pub fn spawn(service: NoteService) -> Self {
        let (tx, rx) = mpsc::channel(100);
        tokio::spawn(run(service, rx));
        Self { command_tx: tx }
    }

    /// Send a message and wait for its reply.
    pub async fn send(&self, request: Request) -> Result<Response, ServiceClosed> {
        let (response, reply) = oneshot::channel();
        self.command_tx
            .send(ServiceCommand::Message { request, response })
            .await
            .map_err(|_| ServiceClosed)?;
        reply.await.map_err(|_| ServiceClosed)
    }

    /// Stop the service task and wait until every accepted message is handled.
    ///
    /// Returns immediately if the task has already stopped.
    pub async fn shutdown(&self) {
        let (done, stopped) = oneshot::channel();
        if self
            .command_tx
            .send(ServiceCommand::Shutdown { done })
            .await
            .is_err()
        {
            return;
        }
        if stopped.await.is_err() {
            debug!("Note service stopped before acknowledging shutdown");
        }
    }
}

async fn run(service: NoteService, mut command_rx: mpsc::Receiver<ServiceCommand>) {
    async move {
        info!("Starting note service");
        let mut in_flight = JoinSet::new();
        let mut done = None;

        while let Some(command) = command_rx.recv().await {
            match command {
                ServiceCommand::Message { request, response } => {
                    let service = service.clone();
                    in_flight.spawn(
                        async move {
                            let reply = service.handle(request).await;
                            if response.send(reply).is_err() {
                                debug!("Caller dropped before reply");
                            }
                        }
                        .in_current_span(),
                    );
                    // Reap finished messages so the set stays small.
                    while in_flight.try_join_next().is_some() {}
                }
                ServiceCommand::Shutdown { done: ack } => {
                    done = Some(ack);
                    break;
                }
            }
        }

        command_rx.close();
        info!(pending = in_flight.len(), "Note service shutting down");
        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                warn!("Message task failed: {e}");
            }
        }
        if let Some(ack) = done {
            let _ = ack.send(());
        }
        info!("Note service stopped");
    }
    .instrument(info_span!("note_service"))
    .await
}

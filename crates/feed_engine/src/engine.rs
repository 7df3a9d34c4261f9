use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;

use feed_logging::{feed_debug, feed_info};
use tokio_util::sync::CancellationToken;

use crate::fetch::FeedClient;
use crate::{EngineError, EngineEvent, FailureKind, FetchError, RequestId};

enum EngineCommand {
    Fetch { request_id: RequestId },
    Cancel { request_id: RequestId },
    Finished { request_id: RequestId },
    Shutdown,
}

/// Runs feed fetches on a dedicated runtime thread.
///
/// Results come back through [`EngineEvents`], one `FetchCompleted` per
/// `fetch`, including cancelled ones.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    worker: Option<thread::JoinHandle<()>>,
}

/// Receiving end of engine results; may be moved to another thread.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn spawn(client: Arc<dyn FeedClient>) -> Result<(Self, EngineEvents), EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("feed-engine")
            .build()?;

        let loop_tx = cmd_tx.clone();
        let worker = thread::Builder::new()
            .name("feed-engine-cmd".to_string())
            .spawn(move || run_command_loop(runtime, client, cmd_rx, loop_tx, event_tx))?;

        Ok((
            Self {
                cmd_tx,
                worker: Some(worker),
            },
            EngineEvents { event_rx },
        ))
    }

    pub fn fetch(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Fetch { request_id });
    }

    pub fn cancel(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { request_id });
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl EngineEvents {
    /// Blocks until the next event; `None` once the engine has shut down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn run_command_loop(
    runtime: tokio::runtime::Runtime,
    client: Arc<dyn FeedClient>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let mut running: HashMap<RequestId, CancellationToken> = HashMap::new();

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::Fetch { request_id } => {
                feed_debug!("engine fetch start request_id={}", request_id);
                let token = CancellationToken::new();
                running.insert(request_id, token.clone());
                let client = client.clone();
                let event_tx = event_tx.clone();
                let done_tx = cmd_tx.clone();
                runtime.spawn(async move {
                    let result = fetch_or_cancel(client.as_ref(), &token).await;
                    let _ = event_tx.send(EngineEvent::FetchCompleted { request_id, result });
                    let _ = done_tx.send(EngineCommand::Finished { request_id });
                });
            }
            EngineCommand::Cancel { request_id } => {
                if let Some(token) = running.remove(&request_id) {
                    feed_info!("engine cancel request_id={}", request_id);
                    token.cancel();
                }
            }
            EngineCommand::Finished { request_id } => {
                running.remove(&request_id);
            }
            EngineCommand::Shutdown => break,
        }
    }

    for token in running.values() {
        token.cancel();
    }
    runtime.shutdown_timeout(std::time::Duration::from_millis(500));
}

async fn fetch_or_cancel(
    client: &dyn FeedClient,
    token: &CancellationToken,
) -> Result<Vec<crate::FeedPhoto>, FetchError> {
    tokio::select! {
        _ = token.cancelled() => Err(FetchError::new(FailureKind::Cancelled, "fetch cancelled")),
        result = client.fetch() => result,
    }
}

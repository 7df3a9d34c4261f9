use std::sync::{mpsc, Arc};
use std::thread;

use feed_core::{Effect, FeedItem, FetchFailure, Msg};
use feed_engine::{
    EngineEvent, EngineEvents, EngineHandle, FailureKind, FeedClient, FeedPhoto, FetchError,
    FetchSettings, ReqwestFeedClient,
};
use feed_logging::{feed_info, feed_warn};

use super::app::AppEvent;

/// Executes core effects. Implemented by the engine-backed runner and by test doubles.
pub trait EffectSink {
    fn run(&self, effects: Vec<Effect>);
}

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: FetchSettings, tx: mpsc::Sender<AppEvent>) -> anyhow::Result<Self> {
        let client = ReqwestFeedClient::new(settings)?;
        feed_info!("feed endpoint {}", client.url());
        Self::with_client(Arc::new(client), tx)
    }

    pub fn with_client(
        client: Arc<dyn FeedClient>,
        tx: mpsc::Sender<AppEvent>,
    ) -> anyhow::Result<Self> {
        let (engine, events) = EngineHandle::spawn(client)?;
        spawn_event_loop(events, tx);
        Ok(Self { engine })
    }
}

impl EffectSink for EffectRunner {
    fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchFeed { request_id } => {
                    feed_info!("FetchFeed request_id={}", request_id);
                    self.engine.fetch(request_id);
                }
                Effect::CancelFetch { request_id } => {
                    feed_info!("CancelFetch request_id={}", request_id);
                    self.engine.cancel(request_id);
                }
            }
        }
    }
}

// Engine results cross over to the UI thread as messages; the core never sees engine types.
fn spawn_event_loop(events: EngineEvents, tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if tx.send(AppEvent::Core(map_event(event))).is_err() {
                break;
            }
        }
    });
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::FetchCompleted { request_id, result } => {
            let result = match result {
                Ok(photos) => {
                    feed_info!(
                        "Fetch {} returned {} photos",
                        request_id,
                        photos.len()
                    );
                    Ok(photos.into_iter().map(map_photo).collect())
                }
                Err(err) => {
                    feed_warn!("Fetch {} failed: {}", request_id, err);
                    Err(map_failure(err))
                }
            };
            Msg::FetchCompleted { request_id, result }
        }
    }
}

fn map_photo(photo: FeedPhoto) -> FeedItem {
    FeedItem {
        title: photo.title,
        media_url: photo.media_url,
    }
}

fn map_failure(err: FetchError) -> FetchFailure {
    match err.kind {
        FailureKind::HttpStatus(status) => FetchFailure::Server { status },
        FailureKind::Decode
        | FailureKind::UnsupportedContentType { .. }
        | FailureKind::TooLarge { .. } => FetchFailure::Malformed(err.to_string()),
        FailureKind::Cancelled => FetchFailure::Cancelled,
        FailureKind::InvalidUrl | FailureKind::Timeout | FailureKind::Network => {
            FetchFailure::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    struct FixedClient {
        result: Result<Vec<FeedPhoto>, FetchError>,
    }

    #[async_trait::async_trait]
    impl FeedClient for FixedClient {
        async fn fetch(&self) -> Result<Vec<FeedPhoto>, FetchError> {
            self.result.clone()
        }
    }

    fn photo(title: &str, url: &str) -> FeedPhoto {
        FeedPhoto {
            title: title.to_string(),
            media_url: url.to_string(),
        }
    }

    fn fetch_error(kind: FailureKind) -> FetchError {
        FetchError {
            kind,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn fetch_effect_round_trips_to_core_message() {
        let client = Arc::new(FixedClient {
            result: Ok(vec![photo("a", "u1")]),
        });
        let (tx, rx) = mpsc::channel();
        let runner = EffectRunner::with_client(client, tx).unwrap();

        runner.run(vec![Effect::FetchFeed { request_id: 3 }]);
        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();

        match event {
            AppEvent::Core(msg) => assert_eq!(
                msg,
                Msg::FetchCompleted {
                    request_id: 3,
                    result: Ok(vec![FeedItem::new("a", "u1")]),
                }
            ),
            _ => panic!("expected a core message"),
        }
    }

    #[test]
    fn failures_map_onto_core_taxonomy() {
        assert_eq!(
            map_failure(fetch_error(FailureKind::HttpStatus(502))),
            FetchFailure::Server { status: 502 }
        );
        assert!(matches!(
            map_failure(fetch_error(FailureKind::Timeout)),
            FetchFailure::Transport(_)
        ));
        assert!(matches!(
            map_failure(fetch_error(FailureKind::Decode)),
            FetchFailure::Malformed(_)
        ));
        assert_eq!(
            map_failure(fetch_error(FailureKind::Cancelled)),
            FetchFailure::Cancelled
        );
    }
}

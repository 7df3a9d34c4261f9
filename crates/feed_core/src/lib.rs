//! Photo feed core: pure state machine, unique photo selection and view-model helpers.
mod bridge;
mod effect;
mod item;
mod msg;
mod selector;
mod state;
mod update;
mod view_model;

pub use bridge::{PhotoUrlBridge, SubscriptionId};
pub use effect::Effect;
pub use item::{FeedItem, FetchFailure};
pub use msg::Msg;
pub use selector::{ingest_batch, AcceptedSet, Ingest};
pub use state::{AppState, RequestId, Session, SessionId};
pub use update::{update, update_with_rng};
pub use view_model::{AppViewModel, LoadOutcome};

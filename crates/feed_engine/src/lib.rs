//! Photo feed engine: feed client, wire decoding and background fetch execution.
mod decode;
mod engine;
mod fetch;
mod types;

pub use decode::{decode_feed, DecodeError};
pub use engine::{EngineEvents, EngineHandle};
pub use fetch::{FeedClient, FetchSettings, ReqwestFeedClient, TagMode, DEFAULT_FEED_URL};
pub use types::{EngineError, EngineEvent, FailureKind, FeedPhoto, FetchError, RequestId};

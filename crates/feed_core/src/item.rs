use std::fmt;

/// One entry of the remote photo feed. The title doubles as the dedup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedItem {
    pub title: String,
    pub media_url: String,
}

impl FeedItem {
    pub fn new(title: impl Into<String>, media_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            media_url: media_url.into(),
        }
    }
}

/// Why a fetch produced no batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// Connectivity problem, timeout or client setup failure.
    Transport(String),
    /// The feed endpoint answered with a non-success status.
    Server { status: u16 },
    /// A response arrived but could not be turned into feed items.
    Malformed(String),
    /// The fetch was abandoned before it completed.
    Cancelled,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Transport(message) => write!(f, "transport error: {message}"),
            FetchFailure::Server { status } => write!(f, "server responded with {status}"),
            FetchFailure::Malformed(message) => write!(f, "malformed feed: {message}"),
            FetchFailure::Cancelled => write!(f, "cancelled"),
        }
    }
}

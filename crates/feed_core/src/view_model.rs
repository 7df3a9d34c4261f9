use crate::{FetchFailure, SessionId};

/// What happened on the most recent load trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A new photo joined the grid.
    Accepted { title: String },
    /// The batch held nothing that was not already on the grid.
    NoNewPhotos,
    /// The fetch failed; see `AppViewModel::last_failure`.
    Failed,
    /// A fetch was already running, so the trigger was dropped.
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session_id: Option<SessionId>,
    /// Published URLs: one per accepted photo, in acceptance order.
    pub photo_urls: Vec<String>,
    pub loading: bool,
    pub last_outcome: Option<LoadOutcome>,
    pub last_failure: Option<FetchFailure>,
    pub failed_fetches: u32,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The owning UI scope came up; creates a session if none is active.
    SessionStarted,
    /// The owning UI scope went away; drops the session and its accepted photos.
    SessionEnded,
    /// User asked for the next photo.
    LoadNextClicked,
    /// User asked to start over with an empty grid.
    ResetClicked,
    /// Engine finished (or failed) the fetch tagged with `request_id`.
    FetchCompleted {
        request_id: crate::RequestId,
        result: Result<Vec<crate::FeedItem>, crate::FetchFailure>,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

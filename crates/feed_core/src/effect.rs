use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch one batch from the feed; the result must come back tagged with `request_id`.
    FetchFeed { request_id: RequestId },
    /// Abandon an in-flight fetch whose session has ended.
    CancelFetch { request_id: RequestId },
}

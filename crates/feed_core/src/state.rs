use crate::view_model::{AppViewModel, LoadOutcome};
use crate::{AcceptedSet, FetchFailure};

pub type SessionId = u64;
pub type RequestId = u64;

/// Session-scoped selection state. Dropping the session drops its accepted photos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    accepted: AcceptedSet,
    in_flight: Option<RequestId>,
}

impl Session {
    fn new(id: SessionId) -> Self {
        Self {
            id,
            accepted: AcceptedSet::new(),
            in_flight: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn accepted(&self) -> &AcceptedSet {
        &self.accepted
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    session: Option<Session>,
    next_session_id: SessionId,
    // Never reset, so a result addressed to an ended session cannot match a later one.
    next_request_id: RequestId,
    last_outcome: Option<LoadOutcome>,
    last_failure: Option<FetchFailure>,
    failed_fetches: u32,
    pending_publication: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State with a live session, as after `Msg::SessionStarted`.
    pub fn with_session() -> Self {
        let mut state = Self::new();
        state.start_session();
        state.dirty = false;
        state
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            session_id: self.session.as_ref().map(Session::id),
            photo_urls: self
                .session
                .as_ref()
                .map(|session| session.accepted.published_urls())
                .unwrap_or_default(),
            loading: self.is_loading(),
            last_outcome: self.last_outcome.clone(),
            last_failure: self.last_failure.clone(),
            failed_fetches: self.failed_fetches,
            dirty: self.dirty,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn accepted(&self) -> Option<&AcceptedSet> {
        self.session.as_ref().map(Session::accepted)
    }

    pub fn is_loading(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.in_flight.is_some())
    }

    /// Returns and clears the dirty flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// URL list to hand to observers, at most once per accepted photo.
    pub fn take_publication(&mut self) -> Option<Vec<String>> {
        if !std::mem::take(&mut self.pending_publication) {
            return None;
        }
        self.accepted().map(AcceptedSet::published_urls)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Creates a session unless one is already live.
    pub(crate) fn start_session(&mut self) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.next_session_id += 1;
        self.session = Some(Session::new(self.next_session_id));
        self.last_outcome = None;
        self.last_failure = None;
        self.failed_fetches = 0;
        self.pending_publication = false;
        self.mark_dirty();
        true
    }

    /// Drops the live session, returning the request it was still waiting on.
    pub(crate) fn end_session(&mut self) -> Option<RequestId> {
        let session = self.session.take()?;
        self.pending_publication = false;
        self.mark_dirty();
        session.in_flight
    }

    pub(crate) fn begin_fetch(&mut self) -> Option<RequestId> {
        let session = self.session.as_mut()?;
        if session.in_flight.is_some() {
            return None;
        }
        self.next_request_id += 1;
        session.in_flight = Some(self.next_request_id);
        self.dirty = true;
        Some(self.next_request_id)
    }

    /// Clears the in-flight marker when `request_id` is the one the live session awaits.
    pub(crate) fn complete_fetch(&mut self, request_id: RequestId) -> Option<&mut AcceptedSet> {
        let session = self.session.as_mut()?;
        if session.in_flight != Some(request_id) {
            return None;
        }
        session.in_flight = None;
        self.dirty = true;
        Some(&mut session.accepted)
    }

    pub(crate) fn set_outcome(&mut self, outcome: LoadOutcome) {
        self.last_outcome = Some(outcome);
        self.mark_dirty();
    }

    pub(crate) fn record_failure(&mut self, failure: FetchFailure) {
        self.failed_fetches = self.failed_fetches.saturating_add(1);
        self.last_failure = Some(failure);
        self.set_outcome(LoadOutcome::Failed);
    }

    pub(crate) fn queue_publication(&mut self) {
        self.pending_publication = true;
    }
}

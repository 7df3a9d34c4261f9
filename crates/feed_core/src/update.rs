use rand::Rng;

use crate::{ingest_batch, AppState, Effect, Ingest, LoadOutcome, Msg};

/// Applies a message to state and returns any effects, drawing selection
/// randomness from the thread-local generator.
pub fn update(state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    update_with_rng(state, msg, &mut rand::rng())
}

/// Same as [`update`] with an explicit randomness source for photo selection.
pub fn update_with_rng<R: Rng + ?Sized>(
    mut state: AppState,
    msg: Msg,
    rng: &mut R,
) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SessionStarted => {
            state.start_session();
            Vec::new()
        }
        Msg::SessionEnded => cancel_effects(state.end_session()),
        Msg::ResetClicked => {
            let effects = cancel_effects(state.end_session());
            state.start_session();
            effects
        }
        Msg::LoadNextClicked => {
            if state.session().is_none() {
                return (state, Vec::new());
            }
            match state.begin_fetch() {
                Some(request_id) => vec![Effect::FetchFeed { request_id }],
                None => {
                    // Overlapping trigger: dropped while the previous fetch runs.
                    state.set_outcome(LoadOutcome::Busy);
                    Vec::new()
                }
            }
        }
        Msg::FetchCompleted { request_id, result } => {
            let Some(accepted) = state.complete_fetch(request_id) else {
                // Stale: ended session, cancelled or superseded request.
                return (state, Vec::new());
            };
            match result {
                Ok(batch) => match ingest_batch(accepted, batch, rng) {
                    Ingest::Accepted { index } => {
                        let title = accepted.items()[index].title.clone();
                        state.queue_publication();
                        state.set_outcome(LoadOutcome::Accepted { title });
                    }
                    Ingest::NoCandidates => state.set_outcome(LoadOutcome::NoNewPhotos),
                },
                Err(failure) => state.record_failure(failure),
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn cancel_effects(in_flight: Option<crate::RequestId>) -> Vec<Effect> {
    in_flight
        .map(|request_id| Effect::CancelFetch { request_id })
        .into_iter()
        .collect()
}

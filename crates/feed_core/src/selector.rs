//! Unique photo selection.
//!
//! Each fetched batch contributes at most one photo to the session's
//! [`AcceptedSet`]: titles already accepted are filtered out, and one of the
//! remaining candidates is picked uniformly at random.

use rand::Rng;

use crate::FeedItem;

/// Ordered, append-only list of accepted photos, unique by title.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AcceptedSet {
    items: Vec<FeedItem>,
}

impl AcceptedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    /// Linear scan; the set only grows by one per user-triggered load.
    pub fn contains_title(&self, title: &str) -> bool {
        self.items.iter().any(|item| item.title == title)
    }

    /// Media URLs in acceptance order.
    pub fn published_urls(&self) -> Vec<String> {
        self.items.iter().map(|item| item.media_url.clone()).collect()
    }

    fn push(&mut self, item: FeedItem) -> usize {
        debug_assert!(!self.contains_title(&item.title));
        self.items.push(item);
        self.items.len() - 1
    }
}

/// Outcome of feeding one batch to the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingest {
    /// A new photo was appended at `index` of the accepted set.
    Accepted { index: usize },
    /// Every item in the batch was already accepted (or the batch was empty).
    NoCandidates,
}

/// Filter `batch` against `accepted`, pick one remaining item at random and append it.
///
/// Every surviving item is its own candidate, so a title repeated inside the
/// batch is proportionally more likely to be picked.
pub fn ingest_batch<R: Rng + ?Sized>(
    accepted: &mut AcceptedSet,
    batch: Vec<FeedItem>,
    rng: &mut R,
) -> Ingest {
    let mut candidates: Vec<FeedItem> = batch
        .into_iter()
        .filter(|item| !accepted.contains_title(&item.title))
        .collect();

    if candidates.is_empty() {
        return Ingest::NoCandidates;
    }

    let pick = rng.random_range(0..candidates.len());
    let chosen = candidates.swap_remove(pick);
    let index = accepted.push(chosen);
    Ingest::Accepted { index }
}

use std::collections::HashSet;

use feed_core::{ingest_batch, AcceptedSet, FeedItem, Ingest};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn titles(accepted: &AcceptedSet) -> Vec<&str> {
    accepted.items().iter().map(|item| item.title.as_str()).collect()
}

#[test]
fn accepted_titles_stay_unique_across_random_batches() {
    let mut rng = StdRng::seed_from_u64(0xfeed);
    let mut accepted = AcceptedSet::new();

    for _ in 0..500 {
        let batch_len = rng.random_range(0..8);
        let batch = (0..batch_len)
            .map(|_| {
                let n = rng.random_range(0..40);
                FeedItem::new(format!("title-{n}"), format!("https://img/{n}.jpg"))
            })
            .collect();
        ingest_batch(&mut accepted, batch, &mut rng);

        let unique: HashSet<_> = titles(&accepted).into_iter().collect();
        assert_eq!(unique.len(), accepted.len());
        assert_eq!(accepted.published_urls().len(), accepted.len());
    }

    // Only 40 distinct titles exist.
    assert!(accepted.len() <= 40);
}

#[test]
fn accepts_at_most_one_item_per_batch() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut accepted = AcceptedSet::new();
    let batch: Vec<_> = (0..20)
        .map(|n| FeedItem::new(format!("t{n}"), format!("u{n}")))
        .collect();

    for round in 1..=20 {
        let outcome = ingest_batch(&mut accepted, batch.clone(), &mut rng);
        assert_eq!(outcome, Ingest::Accepted { index: round - 1 });
        assert_eq!(accepted.len(), round);
    }
    assert_eq!(
        ingest_batch(&mut accepted, batch, &mut rng),
        Ingest::NoCandidates
    );
    assert_eq!(accepted.len(), 20);
}

#[test]
fn the_only_new_title_is_picked_among_known_ones() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut accepted = AcceptedSet::new();
    ingest_batch(&mut accepted, vec![FeedItem::new("a", "u1")], &mut rng);
    ingest_batch(&mut accepted, vec![FeedItem::new("b", "u2")], &mut rng);

    let outcome = ingest_batch(
        &mut accepted,
        vec![
            FeedItem::new("a", "u1"),
            FeedItem::new("c", "u3"),
            FeedItem::new("b", "u2"),
        ],
        &mut rng,
    );

    assert_eq!(outcome, Ingest::Accepted { index: 2 });
    assert_eq!(accepted.published_urls(), vec!["u1", "u2", "u3"]);
}

#[test]
fn selection_is_uniform_over_new_candidates() {
    const TRIALS: usize = 20_000;
    let mut rng = StdRng::seed_from_u64(42);
    let batch: Vec<_> = ["a", "b", "c", "d"]
        .iter()
        .map(|t| FeedItem::new(*t, format!("https://img/{t}.jpg")))
        .collect();
    let mut counts = [0usize; 4];

    for _ in 0..TRIALS {
        let mut accepted = AcceptedSet::new();
        ingest_batch(&mut accepted, batch.clone(), &mut rng);
        let pos = batch
            .iter()
            .position(|item| item.title == accepted.items()[0].title)
            .unwrap();
        counts[pos] += 1;
    }

    // Expected 5000 each; standard deviation is about 61.
    for count in counts {
        assert!((4_500..=5_500).contains(&count), "counts skewed: {counts:?}");
    }
}

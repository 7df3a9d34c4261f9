//! Observer registry that hands the published URL list to the presentation layer.

pub type SubscriptionId = u64;

type Observer = Box<dyn FnMut(&[String])>;

/// Lives on the UI thread; observers always see the full list, never a delta.
#[derive(Default)]
pub struct PhotoUrlBridge {
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: SubscriptionId,
}

impl PhotoUrlBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&[String]) + 'static) -> SubscriptionId {
        self.next_id += 1;
        self.observers.push((self.next_id, Box::new(observer)));
        self.next_id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn publish(&mut self, urls: &[String]) {
        for (_, observer) in &mut self.observers {
            observer(urls);
        }
    }
}

impl std::fmt::Debug for PhotoUrlBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoUrlBridge")
            .field("observers", &self.observers.len())
            .finish()
    }
}

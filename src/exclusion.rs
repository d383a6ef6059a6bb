//! Exclusion bus
//!
//! Carries the current set of suppressed line ranges from the region scanner
//! to the block colorer. The bus keeps the latest published set and replays
//! it to every new subscriber, so subscribing late still sees the current
//! state.
//!
//! Everything runs on one thread: `publish` calls every subscriber
//! synchronously, in registration order, before it returns. A subscriber
//! that panics is logged and skipped; the remaining subscribers are still
//! notified.

use std::panic::{self, AssertUnwindSafe};

use crate::blocks::LineRange;

/// Ordered, outermost ranges to leave unpainted
pub type ExclusionSet = Vec<LineRange>;

/// Handle returned by [`ExclusionBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&ExclusionSet)>;

/// Publish/subscribe channel for the latest exclusion set
#[derive(Default)]
pub struct ExclusionBus {
    latest: ExclusionSet,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl ExclusionBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently published set (empty before the first publish)
    pub fn latest(&self) -> &ExclusionSet {
        &self.latest
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Register a callback. It is invoked immediately with the latest set
    /// and then on every publish.
    pub fn subscribe(&mut self, callback: impl FnMut(&ExclusionSet) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        let mut callback: Subscriber = Box::new(callback);
        notify(id, &mut callback, &self.latest);
        self.subscribers.push((id, callback));

        tracing::debug!("Exclusion subscriber {:?} registered", id);
        id
    }

    /// Remove a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        before != self.subscribers.len()
    }

    /// Replace the current set and notify every subscriber
    pub fn publish(&mut self, set: ExclusionSet) {
        tracing::debug!(
            "Publishing {} exclusion ranges to {} subscribers",
            set.len(),
            self.subscribers.len()
        );
        self.latest = set;
        for (id, callback) in &mut self.subscribers {
            notify(*id, callback, &self.latest);
        }
    }
}

/// Run one callback, containing any panic it raises
fn notify(id: SubscriptionId, callback: &mut Subscriber, set: &ExclusionSet) {
    let result = panic::catch_unwind(AssertUnwindSafe(|| callback(set)));
    if let Err(panic_info) = result {
        let msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        tracing::warn!("Exclusion subscriber {:?} panicked: {}", id, msg);
    }
}

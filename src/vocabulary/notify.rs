//! Change notifications for vocabulary listeners
//!
//! Each subscriber owns the receiving end of a channel. Sending never
//! blocks and never fails the operation that produced the event; a
//! subscriber whose receiver was dropped is pruned on the next send.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::Mutex;

use super::models::VocabularyEvent;

/// Identifies a subscription for [`ChangeNotifier::unsubscribe`]
pub type SubscriptionId = u64;

/// Receiving side handed to a subscriber
pub struct Subscription {
    pub id: SubscriptionId,
    pub receiver: mpsc::Receiver<VocabularyEvent>,
}

impl Subscription {
    /// Drain every event delivered so far without blocking
    pub fn pending(&self) -> Vec<VocabularyEvent> {
        self.receiver.try_iter().collect()
    }
}

#[derive(Default)]
pub struct ChangeNotifier {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<(SubscriptionId, mpsc::Sender<VocabularyEvent>)>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel();
        self.lock().push((id, tx));
        log::debug!("vocabulary: subscriber {} registered", id);
        Subscription { id, receiver: rx }
    }

    /// Returns false if the id was not subscribed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.lock();
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        before != subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    /// Deliver `event` to every live subscriber
    pub fn notify(&self, event: &VocabularyEvent) {
        let mut subscribers = self.lock();
        subscribers.retain(|(id, tx)| match tx.send(event.clone()) {
            Ok(()) => true,
            Err(_) => {
                log::debug!("vocabulary: dropping disconnected subscriber {}", id);
                false
            }
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(SubscriptionId, mpsc::Sender<VocabularyEvent>)>> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

//! Followup scheduler - one-shot delayed transitions with cancel handles

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

use crate::app::state::Followup;

/// A followup that reached its deadline, tagged with its handle
pub type FiredFollowup = (u64, Followup);

/// Spawns timers for followups and delivers them back to the App actor
pub struct FollowupScheduler {
    fired_tx: mpsc::UnboundedSender<FiredFollowup>,
    pending: HashMap<u64, oneshot::Sender<()>>,
    next_handle: u64,
}

impl FollowupScheduler {
    pub fn new(fired_tx: mpsc::UnboundedSender<FiredFollowup>) -> Self {
        FollowupScheduler {
            fired_tx,
            pending: HashMap::new(),
            next_handle: 1,
        }
    }

    /// Deliver `followup` after `delay` unless cancelled first. Returns its handle.
    pub fn schedule(&mut self, delay: Duration, followup: Followup) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;

        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
        self.pending.insert(handle, cancel_tx);

        let fired_tx = self.fired_tx.clone();
        tracing::debug!(handle, ?delay, ?followup, "Followup scheduled");
        tokio::spawn(async move {
            tokio::select! {
                biased;

                _ = &mut cancel_rx => {
                    tracing::debug!(handle, "Followup cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    let _ = fired_tx.send((handle, followup));
                }
            }
        });

        handle
    }

    /// Mark a delivered followup as done.
    ///
    /// Returns false when it was cancelled after its timer had already fired,
    /// in which case it must not run.
    pub fn take(&mut self, handle: u64) -> bool {
        self.pending.remove(&handle).is_some()
    }

    /// Cancel everything not yet delivered. Returns how many were pending.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        for (_, cancel_tx) in self.pending.drain() {
            let _ = cancel_tx.send(());
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = FollowupScheduler::new(tx);
        let handle = scheduler.schedule(Duration::from_millis(1500), Followup::RefetchBalance);

        tokio::time::sleep(Duration::from_millis(1499)).await;
        assert!(rx.try_recv().is_err());

        let (fired, followup) = rx.recv().await.unwrap();
        assert_eq!(fired, handle);
        assert_eq!(followup, Followup::RefetchBalance);
        assert!(scheduler.take(handle));
        assert!(!scheduler.take(handle));
        assert_eq!(scheduler.cancel_all(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_followup_never_fires() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = FollowupScheduler::new(tx);
        scheduler.schedule(Duration::from_secs(2), Followup::RefetchBalance);
        assert_eq!(scheduler.cancel_all(), 1);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_delivery_after_cancel_is_rejected() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = FollowupScheduler::new(tx);
        let handle = scheduler.schedule(Duration::from_secs(1), Followup::RefetchBalance);

        tokio::time::sleep(Duration::from_secs(2)).await;
        scheduler.cancel_all();
        let (fired, _) = rx.recv().await.unwrap();
        assert_eq!(fired, handle);
        assert!(!scheduler.take(fired));
    }
}

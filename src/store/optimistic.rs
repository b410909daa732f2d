//! # Optimistic Updates
//!
//! Bookkeeping for speculative state changes: the UI shows the change at
//! once, the server confirms or rejects it later.
//!
//! Every update runs in three explicit phases:
//!
//! 1. **Snapshot** - copy the state about to change
//! 2. **Speculate** - apply the change locally and record the snapshot here
//! 3. **Resolve** - on success [`OptimisticLedger::confirm`] drops the
//!    snapshot and the caller writes the server's value; on failure
//!    [`OptimisticLedger::rollback`] hands the snapshot back to restore
//!
//! Keeping the snapshot outside the item means the rollback path can be
//! tested without any network at all.
//!
//! ## Usage
//!
//! ```rust
//! use vidtube::store::optimistic::OptimisticLedger;
//!
//! let mut ledger = OptimisticLedger::new();
//! let mut likes = 5;
//!
//! let id = ledger.speculate("video-1".to_string(), likes);
//! likes += 1;
//!
//! // the server said no
//! if let Some(snapshot) = ledger.rollback(&id) {
//!     likes = snapshot;
//! }
//! assert_eq!(likes, 5);
//! ```

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::hash::Hash;
use tracing::debug;
use uuid::Uuid;

/// A change applied locally but not yet confirmed by the server
#[derive(Debug, Clone, PartialEq)]
pub struct Speculation<K, S> {
    /// Unique speculation ID
    pub id: Uuid,
    /// Item the change applies to
    pub key: K,
    /// State immediately before the change
    pub snapshot: S,
    /// When the change was applied
    pub applied_at: DateTime<Utc>,
}

/// Pending speculations, keyed by speculation id
#[derive(Debug)]
pub struct OptimisticLedger<K, S> {
    pending: HashMap<Uuid, Speculation<K, S>>,
}

impl<K, S> OptimisticLedger<K, S>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    S: Clone,
{
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }

    /// Record the pre-change snapshot; returns the speculation id
    pub fn speculate(&mut self, key: K, snapshot: S) -> Uuid {
        let id = Uuid::new_v4();
        debug!("Speculating on {:?} ({})", key, id);
        self.pending.insert(
            id,
            Speculation {
                id,
                key,
                snapshot,
                applied_at: Utc::now(),
            },
        );
        id
    }

    /// The server accepted the change
    pub fn confirm(&mut self, id: &Uuid) -> Option<Speculation<K, S>> {
        self.pending.remove(id)
    }

    /// The server rejected the change; returns the snapshot to restore
    pub fn rollback(&mut self, id: &Uuid) -> Option<S> {
        self.pending.remove(id).map(|speculation| {
            debug!("Rolling back {:?} ({})", speculation.key, id);
            speculation.snapshot
        })
    }

    pub fn is_pending(&self, id: &Uuid) -> bool {
        self.pending.contains_key(id)
    }

    /// Number of unresolved speculations for one item
    pub fn pending_for(&self, key: &K) -> usize {
        self.pending.values().filter(|s| &s.key == key).count()
    }

    pub fn count_pending(&self) -> usize {
        self.pending.len()
    }

    /// Forget speculations older than `max_age` whose response never came
    /// back (e.g. the view was torn down); returns how many were dropped.
    pub fn sweep_older_than(&mut self, max_age: Duration) -> usize {
        let cutoff = Utc::now() - max_age;
        let before = self.pending.len();
        self.pending.retain(|_, speculation| speculation.applied_at > cutoff);
        before - self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<K, S> Default for OptimisticLedger<K, S>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    S: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

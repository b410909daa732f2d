//! Optimistic like/dislike, shared by every slice that shows engagement.
//!
//! [`toggle_optimistically`] is the one place the snapshot / speculate /
//! resolve sequence lives. Slices only say where the item's [`Engagement`]
//! is ([`EngagementTarget`]) and how to read the server's answer.

use super::optimistic::OptimisticLedger;
use super::pagination::{Identified, PagedCollection};
use crate::shared::error::ClientError;
use crate::shared::models::{Comment, Engagement, EngagementAction, Video};
use chrono::Duration;
use std::future::Future;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

/// Speculations whose response never arrived are forgotten after this long
const STALE_SPECULATION_MINUTES: i64 = 5;

pub type EngagementLedger = Mutex<OptimisticLedger<String, Engagement>>;

/// Items that carry an engagement state
pub trait Engageable {
    fn engagement_mut(&mut self) -> &mut Engagement;
}

impl Engageable for Video {
    fn engagement_mut(&mut self) -> &mut Engagement {
        &mut self.engagement
    }
}

impl Engageable for Comment {
    fn engagement_mut(&mut self) -> &mut Engagement {
        &mut self.engagement
    }
}

/// State that can look up an item's engagement by id
pub trait EngagementTarget {
    fn engagement_of(&mut self, id: &str) -> Option<&mut Engagement>;

    /// A response is only written back if this is unchanged since the
    /// speculation was applied
    fn epoch(&self) -> u64 {
        0
    }
}

impl<T, Q> EngagementTarget for PagedCollection<T, Q>
where
    T: Identified + Engageable,
    Q: Clone,
{
    fn engagement_of(&mut self, id: &str) -> Option<&mut Engagement> {
        self.find_mut(id).map(Engageable::engagement_mut)
    }

    fn epoch(&self) -> u64 {
        self.generation()
    }
}

impl<T: Identified + Engageable> EngagementTarget for Vec<T> {
    fn engagement_of(&mut self, id: &str) -> Option<&mut Engagement> {
        self.iter_mut()
            .find(|item| item.id() == id)
            .map(Engageable::engagement_mut)
    }
}

/// Apply `action` to item `id` at once, then await `request`.
///
/// On success the server's engagement (via `reconcile`) replaces the
/// speculative one. On failure the snapshot taken right before the change
/// is restored and the error returned. Concurrent toggles on one item each
/// resolve independently, so the last response to arrive wins.
pub(crate) async fn toggle_optimistically<X, R, Fut>(
    target: &RwLock<X>,
    ledger: &EngagementLedger,
    id: &str,
    action: EngagementAction,
    request: Fut,
    reconcile: fn(R) -> Engagement,
) -> Result<Engagement, ClientError>
where
    X: EngagementTarget,
    Fut: Future<Output = Result<R, ClientError>>,
{
    let (speculation, epoch) = {
        let mut state = target.write().await;
        let epoch = state.epoch();
        let Some(engagement) = state.engagement_of(id) else {
            return Err(ClientError::validation("id", "That item is no longer loaded"));
        };
        let snapshot = *engagement;
        *engagement = snapshot.toggled(action);

        let mut ledger = ledger.lock().await;
        let swept = ledger.sweep_older_than(Duration::minutes(STALE_SPECULATION_MINUTES));
        if swept > 0 {
            debug!("Forgot {} stale speculations", swept);
        }
        (ledger.speculate(id.to_string(), snapshot), epoch)
    };

    match request.await {
        Ok(response) => {
            let confirmed = reconcile(response);
            ledger.lock().await.confirm(&speculation);
            settle(&mut *target.write().await, epoch, id, confirmed);
            Ok(confirmed)
        }
        Err(err) => {
            warn!("Reverting {} on {}: {}", action.as_path(), id, err);
            let snapshot = ledger.lock().await.rollback(&speculation);
            if let Some(snapshot) = snapshot {
                settle(&mut *target.write().await, epoch, id, snapshot);
            }
            Err(err)
        }
    }
}

fn settle<X: EngagementTarget>(state: &mut X, epoch: u64, id: &str, resolved: Engagement) {
    if state.epoch() != epoch {
        debug!("Dropping engagement for {}: the list was replaced", id);
        return;
    }
    if let Some(engagement) = state.engagement_of(id) {
        *engagement = resolved;
    }
}

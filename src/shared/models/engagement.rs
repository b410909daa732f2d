//! Engagement State
//!
//! An actor's relationship to an item is one of `Neutral`, `Liked` or
//! `Disliked`. Storing it as a single [`Reaction`] instead of two booleans
//! makes "liked and disliked at once" unrepresentable; the two server flags
//! are folded into it when a payload is decoded.
//!
//! Transitions:
//!
//! | from       | like                    | dislike                    |
//! |------------|-------------------------|----------------------------|
//! | `Neutral`  | `Liked`, likes + 1      | `Disliked`, dislikes + 1   |
//! | `Liked`    | `Neutral`, likes - 1    | `Disliked`, +1 / likes - 1 |
//! | `Disliked` | `Liked`, +1 / dislikes - 1 | `Neutral`, dislikes - 1 |

use serde::{Deserialize, Serialize};
use tracing::warn;

/// The actor's current reaction to an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    #[default]
    Neutral,
    Liked,
    Disliked,
}

/// A like or dislike button press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementAction {
    Like,
    Dislike,
}

impl EngagementAction {
    /// Trailing path segment of the toggle endpoint
    pub fn as_path(&self) -> &'static str {
        match self {
            EngagementAction::Like => "like",
            EngagementAction::Dislike => "dislike",
        }
    }
}

/// Reaction plus the public counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Engagement {
    pub reaction: Reaction,
    pub likes: u64,
    pub dislikes: u64,
}

impl Engagement {
    pub fn new(reaction: Reaction, likes: u64, dislikes: u64) -> Self {
        Self {
            reaction,
            likes,
            dislikes,
        }
    }

    /// Fold the server's two flags and signed counters into a valid state.
    ///
    /// Both flags set resolves to `Liked`; negative counters clamp to zero.
    pub fn from_flags(is_liked: bool, is_disliked: bool, likes: i64, dislikes: i64) -> Self {
        let reaction = match (is_liked, is_disliked) {
            (true, true) => {
                warn!("Payload marked item both liked and disliked, keeping like");
                Reaction::Liked
            }
            (true, false) => Reaction::Liked,
            (false, true) => Reaction::Disliked,
            (false, false) => Reaction::Neutral,
        };
        Self {
            reaction,
            likes: likes.max(0) as u64,
            dislikes: dislikes.max(0) as u64,
        }
    }

    pub fn is_liked(&self) -> bool {
        self.reaction == Reaction::Liked
    }

    pub fn is_disliked(&self) -> bool {
        self.reaction == Reaction::Disliked
    }

    /// State after the actor presses `action`
    pub fn toggled(self, action: EngagementAction) -> Self {
        let mut next = self;
        match (action, self.reaction) {
            (EngagementAction::Like, Reaction::Liked) => {
                next.likes = next.likes.saturating_sub(1);
                next.reaction = Reaction::Neutral;
            }
            (EngagementAction::Like, previous) => {
                next.likes += 1;
                if previous == Reaction::Disliked {
                    next.dislikes = next.dislikes.saturating_sub(1);
                }
                next.reaction = Reaction::Liked;
            }
            (EngagementAction::Dislike, Reaction::Disliked) => {
                next.dislikes = next.dislikes.saturating_sub(1);
                next.reaction = Reaction::Neutral;
            }
            (EngagementAction::Dislike, previous) => {
                next.dislikes += 1;
                if previous == Reaction::Liked {
                    next.likes = next.likes.saturating_sub(1);
                }
                next.reaction = Reaction::Disliked;
            }
        }
        next
    }
}

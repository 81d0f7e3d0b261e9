//! Per-posting mutations: like/unlike and delete.
//!
//! Updates are pessimistic: the displayed counter and heart only change
//! after the server confirms, so a failed request leaves the posting
//! exactly as it was.

use crate::api::ToeBeansClient;
use crate::error::ApiError;

/// Confirmed result of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeOutcome {
    pub liked: bool,
    pub liked_count: u64,
}

/// Toggle the viewer's like on a posting.
///
/// `liked`/`liked_count` are the posting's current (pre-toggle) values.
/// Issues `POST /likes/{id}` when unliked, `DELETE /likes/{id}` when
/// liked; only success yields the adjusted outcome. Concurrent toggles
/// for the same posting are not serialized here; the UI keeps the
/// control inert while a request is in flight.
pub async fn toggle_like(
    client: &ToeBeansClient,
    posting_id: u64,
    liked: bool,
    liked_count: u64,
) -> Result<LikeOutcome, ApiError> {
    if liked {
        client.unlike(posting_id).await?;
        Ok(LikeOutcome {
            liked: false,
            liked_count: liked_count.saturating_sub(1),
        })
    } else {
        client.like(posting_id).await?;
        Ok(LikeOutcome {
            liked: true,
            liked_count: liked_count + 1,
        })
    }
}

/// Delete a posting. Author-only; the server enforces it, the UI merely
/// hides the control for other people's postings.
pub async fn delete_posting(client: &ToeBeansClient, posting_id: u64) -> Result<(), ApiError> {
    client.delete_posting(posting_id).await
}

/// States of one posting's like control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeState {
    Unliked,
    Liked,
    /// A toggle request is in flight; the control is inert.
    Pending,
}

/// Like-control state machine for a single posting.
///
/// `Unliked -begin-> Pending -resolve-> Liked` (and the mirror image);
/// `fail` from `Pending` restores the prior stable state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeControl {
    state: LikeState,
    /// Stable state to fall back to when a pending toggle fails.
    prior_liked: bool,
}

impl LikeControl {
    pub fn from_liked(liked: bool) -> Self {
        Self {
            state: if liked { LikeState::Liked } else { LikeState::Unliked },
            prior_liked: liked,
        }
    }

    pub fn state(&self) -> LikeState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == LikeState::Pending
    }

    /// Enter `Pending`. Returns `false` (and stays put) when a toggle
    /// is already in flight, so a double-tap sends one request.
    pub fn begin(&mut self) -> bool {
        match self.state {
            LikeState::Pending => false,
            LikeState::Liked => {
                self.prior_liked = true;
                self.state = LikeState::Pending;
                true
            }
            LikeState::Unliked => {
                self.prior_liked = false;
                self.state = LikeState::Pending;
                true
            }
        }
    }

    /// The server confirmed the toggle.
    pub fn resolve(&mut self, outcome: &LikeOutcome) {
        self.state = if outcome.liked {
            LikeState::Liked
        } else {
            LikeState::Unliked
        };
        self.prior_liked = outcome.liked;
    }

    /// The toggle failed; return to the prior stable state.
    pub fn fail(&mut self) {
        self.state = if self.prior_liked {
            LikeState::Liked
        } else {
            LikeState::Unliked
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_is_single_shot_while_pending() {
        let mut control = LikeControl::from_liked(false);
        assert_eq!(control.state(), LikeState::Unliked);
        assert!(control.begin());
        assert!(control.is_pending());
        // Second tap while in flight does nothing.
        assert!(!control.begin());
        assert!(control.is_pending());
    }

    #[test]
    fn test_resolve_moves_to_confirmed_state() {
        let mut control = LikeControl::from_liked(false);
        control.begin();
        control.resolve(&LikeOutcome {
            liked: true,
            liked_count: 6,
        });
        assert_eq!(control.state(), LikeState::Liked);
    }

    #[test]
    fn test_fail_restores_prior_state() {
        let mut control = LikeControl::from_liked(true);
        control.begin();
        control.fail();
        assert_eq!(control.state(), LikeState::Liked);

        let mut control = LikeControl::from_liked(false);
        control.begin();
        control.fail();
        assert_eq!(control.state(), LikeState::Unliked);
    }

    #[test]
    fn test_round_trip_like_then_unlike() {
        let mut control = LikeControl::from_liked(false);
        control.begin();
        control.resolve(&LikeOutcome {
            liked: true,
            liked_count: 6,
        });
        control.begin();
        control.resolve(&LikeOutcome {
            liked: false,
            liked_count: 5,
        });
        assert_eq!(control.state(), LikeState::Unliked);
    }
}

//! Messages sent from spawned network tasks back to the event loop.
//!
//! Every API call runs on its own tokio task; the task reports its
//! classified result through one of these variants so the UI thread
//! never blocks on the network.

use crate::error::ApiError;
use crate::feed::LikeOutcome;
use crate::models::{FollowState, PostingsPage, UserProfile};

#[derive(Debug)]
pub enum AppMessage {
    /// Login plus the follow-up profile fetch that names the viewer.
    LoginFinished(Result<UserProfile, ApiError>),
    /// Account registration.
    RegisterFinished(Result<(), ApiError>),
    /// One feed page. `generation` identifies the pager instance the
    /// fetch was issued for; stale completions are dropped.
    PageLoaded {
        generation: u64,
        result: Result<PostingsPage, ApiError>,
    },
    /// A like/unlike toggle settled.
    LikeResolved {
        posting_id: u64,
        result: Result<LikeOutcome, ApiError>,
    },
    /// A posting delete settled.
    DeleteResolved {
        posting_id: u64,
        result: Result<(), ApiError>,
    },
    /// A profile fetch settled.
    ProfileLoaded {
        user_name: String,
        result: Result<UserProfile, ApiError>,
    },
    /// `GET /follows/{name}` settled.
    FollowStateLoaded {
        user_name: String,
        result: Result<FollowState, ApiError>,
    },
    /// A follow/unfollow settled. `following` is the state requested.
    FollowResolved {
        user_name: String,
        following: bool,
        result: Result<(), ApiError>,
    },
    /// `POST /postings` settled.
    PostingCreated(Result<(), ApiError>),
    /// Self-introduction update settled.
    IntroductionSaved(Result<(), ApiError>),
    /// `PUT /password` settled.
    PasswordChanged(Result<(), ApiError>),
    /// Account deletion settled.
    AccountDeleted(Result<(), ApiError>),
}

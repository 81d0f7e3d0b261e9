//! Wire types shared between the API client and the UI.

mod posting;
mod request;
mod user;

pub use posting::{Posting, PostingsPage};
pub use request::{
    is_valid_email, validate_registration, ChangePasswordRequest, CreatePostingRequest,
    LoginRequest, RegisterUserRequest, UpdateUserRequest, GUEST_EMAIL, GUEST_PASSWORD,
};
pub use user::{FollowState, UserProfile};

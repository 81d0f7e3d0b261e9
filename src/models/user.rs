//! User profile wire types.

use serde::{Deserialize, Serialize};

/// Profile as returned by `GET /users` (the viewer) or
/// `GET /users?user_name=<name>` (any user).
///
/// Counter fields default to zero because older backend revisions omit
/// counters that are still zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub user_name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub self_introduction: String,
    #[serde(default)]
    pub posting_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub liked_count: u64,
    #[serde(default)]
    pub follow_count: u64,
    #[serde(default)]
    pub followed_count: u64,
    #[serde(default)]
    pub created_at: String,
}

impl UserProfile {
    /// The `YYYY-MM-DD` part of `created_at`, for the "since" line.
    pub fn created_date(&self) -> &str {
        self.created_at.split('T').next().unwrap_or("")
    }
}

/// Response of `GET /follows/{name}`.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub struct FollowState {
    #[serde(default)]
    pub following: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_counters_default_to_zero() {
        let p: UserProfile =
            serde_json::from_str(r#"{"user_name":"alice","created_at":"2020-01-02T03:04:05Z"}"#)
                .unwrap();
        assert_eq!(p.posting_count, 0);
        assert_eq!(p.followed_count, 0);
        assert_eq!(p.created_date(), "2020-01-02");
    }
}

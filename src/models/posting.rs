//! Posting wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single posting as returned by `GET /postings`.
///
/// Server-owned; the client holds a read-through copy. Only
/// `liked_count` and `liked` change locally, and only after the server
/// confirms a like/unlike.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Posting {
    /// Stable unique identifier for the posting's lifetime.
    pub posting_id: u64,
    /// Author.
    pub user_name: String,
    /// Caption text.
    pub title: String,
    /// Reference to the stored image.
    #[serde(default)]
    pub image_url: String,
    /// Authoritative ordering key, newest first.
    pub uploaded_at: DateTime<Utc>,
    /// Non-negative like counter.
    #[serde(default)]
    pub liked_count: u64,
    /// Whether the current viewer has liked this posting.
    #[serde(default)]
    pub liked: bool,
}

/// One page of postings: `{page, postings}`.
///
/// The backend omits `postings` entirely (or sends `null`) for an empty
/// page, so both map to an empty vec.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostingsPage {
    #[serde(default)]
    pub page: i64,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub postings: Vec<Posting>,
}

fn deserialize_null_default<'de, D>(deserializer: D) -> Result<Vec<Posting>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<Vec<Posting>> = serde::Deserialize::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posting_deserializes_wire_fields() {
        let json = r#"{
            "posting_id": 7,
            "user_name": "alice",
            "title": "paw",
            "image_url": "https://img.example.com/7.png",
            "uploaded_at": "2020-06-01T12:00:00Z",
            "liked_count": 3,
            "liked": true
        }"#;
        let p: Posting = serde_json::from_str(json).unwrap();
        assert_eq!(p.posting_id, 7);
        assert_eq!(p.user_name, "alice");
        assert_eq!(p.liked_count, 3);
        assert!(p.liked);
    }

    #[test]
    fn test_page_with_null_postings_is_empty() {
        let page: PostingsPage = serde_json::from_str(r#"{"page":0,"postings":null}"#).unwrap();
        assert!(page.postings.is_empty());
    }

    #[test]
    fn test_page_with_absent_postings_is_empty() {
        let page: PostingsPage = serde_json::from_str(r#"{"page":0}"#).unwrap();
        assert!(page.postings.is_empty());
    }
}

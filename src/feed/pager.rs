//! Cursor-based feed pagination.
//!
//! The backend pages postings by an exclusive upper timestamp bound:
//! each fetch asks for items strictly older than the cursor, newest
//! first, at most `page_size` of them. The pager owns the cursor, the
//! accumulated items and the continuation flag for one feed view
//! instance; screens create one pager per mount and never share it.
//!
//! State transitions (the only way pager state changes):
//!
//! - `n == 0`          → `has_more = false`, cursor and items untouched
//! - `0 < n < size`    → append, cursor = oldest fetched, `has_more = false`
//! - `n == size`       → append, cursor = oldest fetched, `has_more = true`
//! - any error         → nothing changes
//!
//! The cursor only ever moves backward in time.

use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashSet;

use crate::api::ToeBeansClient;
use crate::error::ApiError;
use crate::models::Posting;

/// Page size for interactive infinite-scroll screens.
pub const INTERACTIVE_PAGE_SIZE: usize = 10;

/// Page size for single-shot initial loads (legacy screens fetched one
/// big page and stopped).
pub const SINGLE_SHOT_PAGE_SIZE: usize = 50;

/// Far-future sentinel the cursor starts from, so the first fetch sees
/// every posting.
pub fn sentinel_cursor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).unwrap()
}

/// What a feed shows: everything, or one author's postings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedScope {
    Global,
    User(String),
}

impl FeedScope {
    /// The `user_name` query filter, if any.
    pub fn user_name(&self) -> Option<&str> {
        match self {
            FeedScope::Global => None,
            FeedScope::User(name) => Some(name),
        }
    }
}

/// Parameters of the next page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub since_at: DateTime<Utc>,
    pub limit: usize,
    pub user_name: Option<String>,
}

/// Stateful pager for one feed view.
#[derive(Debug)]
pub struct FeedPager {
    scope: FeedScope,
    page_size: usize,
    cursor: DateTime<Utc>,
    items: Vec<Posting>,
    has_more: bool,
    /// Posting ids already appended. Guards against a posting slipping
    /// through twice when uploads share a timestamp across a page
    /// boundary; duplicates are dropped, never reordered.
    seen: HashSet<u64>,
}

impl FeedPager {
    /// Pager with the interactive page size.
    pub fn new(scope: FeedScope) -> Self {
        Self::with_page_size(scope, INTERACTIVE_PAGE_SIZE)
    }

    /// Pager with an explicit page size.
    pub fn with_page_size(scope: FeedScope, page_size: usize) -> Self {
        Self {
            scope,
            page_size: page_size.max(1),
            cursor: sentinel_cursor(),
            items: Vec::new(),
            has_more: true,
            seen: HashSet::new(),
        }
    }

    pub fn scope(&self) -> &FeedScope {
        &self.scope
    }

    pub fn items(&self) -> &[Posting] {
        &self.items
    }

    pub fn cursor(&self) -> DateTime<Utc> {
        self.cursor
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Parameters for the next fetch, or `None` once the feed is
    /// exhausted. Spurious load-more triggers therefore no-op without
    /// touching the network.
    pub fn next_request(&self) -> Option<PageRequest> {
        if !self.has_more {
            return None;
        }
        Some(PageRequest {
            since_at: self.cursor,
            limit: self.page_size,
            user_name: self.scope.user_name().map(str::to_string),
        })
    }

    /// Fold one fetched page into the pager and return the slice of
    /// newly appended items.
    pub fn apply_page(&mut self, page: Vec<Posting>) -> &[Posting] {
        let n = page.len();
        if n == 0 {
            // Leaving the cursor alone here keeps it sane: an empty page
            // carries no timestamp to move to.
            self.has_more = false;
            return &[];
        }
        if n < self.page_size {
            self.has_more = false;
        }

        // Oldest item fetched so far becomes the next exclusive bound.
        if let Some(last) = page.last() {
            if last.uploaded_at <= self.cursor {
                self.cursor = last.uploaded_at;
            } else {
                tracing::warn!(
                    cursor = %self.cursor,
                    got = %last.uploaded_at,
                    "server returned items newer than the cursor; keeping cursor"
                );
            }
        }

        let start = self.items.len();
        for posting in page {
            if self.seen.insert(posting.posting_id) {
                self.items.push(posting);
            }
        }
        &self.items[start..]
    }

    /// Fetch and fold the next page. No-op returning an empty slice
    /// when the feed is already exhausted. On error nothing changes.
    pub async fn fetch_next_page(
        &mut self,
        client: &ToeBeansClient,
    ) -> Result<&[Posting], ApiError> {
        let request = match self.next_request() {
            Some(r) => r,
            None => return Ok(&[]),
        };
        let page = client
            .get_postings(request.since_at, request.limit, request.user_name.as_deref())
            .await?;
        Ok(self.apply_page(page.postings))
    }

    /// Reconcile a confirmed like/unlike into the accumulated list.
    pub fn set_like(&mut self, posting_id: u64, liked: bool, liked_count: u64) {
        if let Some(posting) = self.items.iter_mut().find(|p| p.posting_id == posting_id) {
            posting.liked = liked;
            posting.liked_count = liked_count;
        }
    }

    /// Drop a deleted posting from the accumulated list. Returns
    /// whether anything was removed.
    pub fn remove(&mut self, posting_id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|p| p.posting_id != posting_id);
        self.items.len() != before
    }
}

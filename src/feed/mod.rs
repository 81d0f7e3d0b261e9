//! Feed pagination and per-posting mutations.

pub mod mutations;
pub mod pager;

pub use mutations::{delete_posting, toggle_like, LikeControl, LikeOutcome, LikeState};
pub use pager::{
    sentinel_cursor, FeedPager, FeedScope, PageRequest, INTERACTIVE_PAGE_SIZE,
    SINGLE_SHOT_PAGE_SIZE,
};

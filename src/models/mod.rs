//! Data models for the bookmarks manager.
//!
//! This module contains the bookmark entity, its validation machinery, and
//! the shelf collection used to accumulate one batch of records.

mod bookmark;
mod error;
mod field;
mod shelf;
mod state;
mod variation;

pub use bookmark::{Bookmark, BookmarkInput};
pub use error::{Reason, ValidationError};
pub use field::{column_labels, FieldId, COLUMN_COUNT};
pub use shelf::BookmarkShelf;
pub use state::State;
pub use variation::{Variation, VARIATION_KEYS};

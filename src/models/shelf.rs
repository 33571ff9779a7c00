//! The bookmark shelf: one batch worth of validated records.
//!
//! The shelf keys bookmarks by a synthetic UUID (titles are not unique) and
//! owns the running unions of all keywords and reserved keywords inserted
//! so far, which back the batch-wide disjointness rules.

use super::bookmark::Bookmark;
use super::error::ValidationError;
use crate::{Error, Result};
use std::collections::HashSet;
use uuid::Uuid;

/// An append-only keyed collection of bookmarks.
///
/// Iteration order is insertion order, which keeps batch output
/// deterministic.
#[derive(Debug, Default)]
pub struct BookmarkShelf {
    entries: Vec<(Uuid, Bookmark)>,
    keywords: HashSet<String>,
    reserved_keywords: HashSet<String>,
}

impl BookmarkShelf {
    /// Creates an empty shelf.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a bookmark under a freshly generated key.
    ///
    /// The insert fails as a whole — nothing is registered — if any of the
    /// collection rules is violated:
    ///
    /// - a keyword collides with a previously registered reserved keyword,
    /// - a reserved keyword collides with a previously registered keyword,
    /// - a reserved keyword was already registered by an earlier bookmark,
    /// - a bookmark with the same title and the same live state
    ///   (published or scheduled) already exists.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] for the first violated rule.
    pub fn add(&mut self, bookmark: Bookmark) -> std::result::Result<Uuid, ValidationError> {
        for keyword in &bookmark.keywords {
            if self.reserved_keywords.contains(keyword) {
                return Err(ValidationError::keyword_is_reserved(keyword));
            }
        }

        if let Some(reserved) = &bookmark.reserved_keywords {
            for keyword in reserved {
                if self.keywords.contains(keyword) {
                    return Err(ValidationError::reserved_keyword_in_keywords(keyword));
                }
                if self.reserved_keywords.contains(keyword) {
                    return Err(ValidationError::reserved_keyword_exists(keyword));
                }
            }
        }

        if let Some(state) = bookmark.state {
            if state.is_live()
                && self
                    .entries
                    .iter()
                    .any(|(_, existing)| {
                        existing.title == bookmark.title && existing.state == Some(state)
                    })
            {
                return Err(ValidationError::duplicate_title(&bookmark.title));
            }
        }

        self.keywords.extend(bookmark.keywords.iter().cloned());
        if let Some(reserved) = &bookmark.reserved_keywords {
            self.reserved_keywords.extend(reserved.iter().cloned());
        }

        let key = Uuid::new_v4();
        self.entries.push((key, bookmark));
        Ok(key)
    }

    /// Looks up a bookmark by key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown key.
    pub fn get(&self, key: &Uuid) -> Result<&Bookmark> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, bookmark)| bookmark)
            .ok_or_else(|| Error::NotFound(key.to_string()))
    }

    /// Iterates all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Uuid, &Bookmark)> {
        self.entries.iter().map(|(k, b)| (k, b))
    }

    /// Number of bookmarks on the shelf.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the shelf holds no bookmarks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The union of all keywords registered so far.
    #[must_use]
    pub fn keywords(&self) -> &HashSet<String> {
        &self.keywords
    }

    /// The union of all reserved keywords registered so far.
    #[must_use]
    pub fn reserved_keywords(&self) -> &HashSet<String> {
        &self.reserved_keywords
    }
}

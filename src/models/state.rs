//! Bookmark publication states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Publication state of a bookmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    /// Visible in search results.
    Published,
    /// Saved but not yet visible.
    Draft,
    /// Will go live at its start date.
    Scheduled,
    /// Proposed by a user, awaiting review.
    Suggested,
    /// Removed from search results by an admin.
    Excluded,
    /// Past its end date.
    Expired,
}

impl State {
    /// Returns all state variants.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Published,
            Self::Draft,
            Self::Scheduled,
            Self::Suggested,
            Self::Excluded,
            Self::Expired,
        ]
    }

    /// Returns the state as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Suggested => "suggested",
            Self::Excluded => "excluded",
            Self::Expired => "expired",
        }
    }

    /// Returns the human-readable display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Published => "Published",
            Self::Draft => "Draft",
            Self::Scheduled => "Scheduled",
            Self::Suggested => "Suggested",
            Self::Excluded => "Excluded",
            Self::Expired => "Expired",
        }
    }

    /// Returns true for states that occupy the title namespace.
    ///
    /// Two bookmarks may share a title unless both hold the same live state.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Published | Self::Scheduled)
    }

    /// Parses a state from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "published" => Some(Self::Published),
            "draft" => Some(Self::Draft),
            "scheduled" => Some(Self::Scheduled),
            "suggested" => Some(Self::Suggested),
            "excluded" => Some(Self::Excluded),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Structured validation errors.
//!
//! One taxonomy covers field-level and collection-level failures. Callers
//! (and tests) match on [`FieldId`] and [`Reason`] rather than on message
//! prose; `Display` renders the operator-facing message.

use super::field::FieldId;
use std::fmt;

/// Why a validation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    /// A field value failed its predicate.
    Invalid,
    /// A live bookmark with the same title and state already exists.
    DuplicateTitle,
    /// A reserved keyword is already registered by another bookmark.
    ReservedKeywordExists,
    /// A reserved keyword collides with a previously registered keyword.
    ReservedKeywordInKeywords,
    /// A keyword collides with a previously registered reserved keyword.
    KeywordIsReserved,
}

/// A validation failure naming the offending field and subject.
///
/// For field-level failures the subject is the record's title (for
/// variation fields, the offending value). For collection-level failures it
/// is the colliding title or keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field or aspect that failed.
    pub field: FieldId,
    /// Why it failed.
    pub reason: Reason,
    /// The record title, or the offending keyword/value.
    pub subject: String,
}

impl ValidationError {
    /// A field-scoped failure for the record with the given title.
    #[must_use]
    pub fn invalid(field: FieldId, subject: impl Into<String>) -> Self {
        Self {
            field,
            reason: Reason::Invalid,
            subject: subject.into(),
        }
    }

    /// A duplicate-title collision on shelf insert.
    #[must_use]
    pub fn duplicate_title(title: impl Into<String>) -> Self {
        Self {
            field: FieldId::Title,
            reason: Reason::DuplicateTitle,
            subject: title.into(),
        }
    }

    /// A reserved keyword registered twice across the batch.
    #[must_use]
    pub fn reserved_keyword_exists(keyword: impl Into<String>) -> Self {
        Self {
            field: FieldId::ReservedKeywords,
            reason: Reason::ReservedKeywordExists,
            subject: keyword.into(),
        }
    }

    /// A reserved keyword colliding with the batch keyword union.
    #[must_use]
    pub fn reserved_keyword_in_keywords(keyword: impl Into<String>) -> Self {
        Self {
            field: FieldId::ReservedKeywords,
            reason: Reason::ReservedKeywordInKeywords,
            subject: keyword.into(),
        }
    }

    /// A keyword colliding with the batch reserved-keyword union.
    #[must_use]
    pub fn keyword_is_reserved(keyword: impl Into<String>) -> Self {
        Self {
            field: FieldId::Keywords,
            reason: Reason::KeywordIsReserved,
            subject: keyword.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            Reason::Invalid => write!(
                f,
                "{} of '{}' could not be validated",
                self.field.label(),
                self.subject
            ),
            Reason::DuplicateTitle => {
                write!(f, "a bookmark with the title '{}' exists already", self.subject)
            },
            Reason::ReservedKeywordExists => {
                write!(f, "the reserved keyword '{}' exists already", self.subject)
            },
            Reason::ReservedKeywordInKeywords => {
                write!(f, "the reserved keyword '{}' exists in other keywords", self.subject)
            },
            Reason::KeywordIsReserved => {
                write!(f, "the keyword '{}' exists as reserved keyword", self.subject)
            },
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_message() {
        let err = ValidationError::invalid(FieldId::Url, "My Bookmark");
        assert_eq!(err.to_string(), "Url of 'My Bookmark' could not be validated");
    }

    #[test]
    fn test_collection_error_messages() {
        let err = ValidationError::duplicate_title("My Bookmark");
        assert_eq!(
            err.to_string(),
            "a bookmark with the title 'My Bookmark' exists already"
        );

        let err = ValidationError::keyword_is_reserved("vpn");
        assert_eq!(err.to_string(), "the keyword 'vpn' exists as reserved keyword");
    }

    #[test]
    fn test_structured_fields() {
        let err = ValidationError::reserved_keyword_exists("intranet");
        assert_eq!(err.field, FieldId::ReservedKeywords);
        assert_eq!(err.reason, Reason::ReservedKeywordExists);
        assert_eq!(err.subject, "intranet");
    }
}

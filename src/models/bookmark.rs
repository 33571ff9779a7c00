//! The bookmark entity and its validation engine.
//!
//! A [`Bookmark`] is constructed once per source row and never mutated
//! afterward. Construction is eager and atomic: every field is checked by
//! its own predicate, then the cross-field invariants run, and a single
//! failure rejects the whole record. Title and description are the only
//! "soft" fields — over-length values are truncated with a warning instead
//! of rejected.

use super::error::ValidationError;
use super::field::{FieldId, COLUMN_COUNT};
use super::state::State;
use super::variation::{parse_variations, serialize_variations, Variation};
use crate::codec::{self, DateValue};
use crate::lookup::Lookups;
use chrono::{DateTime, Utc};
use url::Url;
use uuid::Uuid;

/// Maximum title length in characters before truncation.
const TITLE_LIMIT: usize = 60;
/// Maximum description length in characters before truncation.
const DESCRIPTION_LIMIT: usize = 300;
/// Suffix appended to truncated titles and descriptions.
const ELLIPSIS: &str = "...";

/// Raw constructor input for one bookmark.
///
/// Title, URL, and keywords are required; every other field is an optional
/// raw string exactly as read from its cell. Empty cells map to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkInput {
    /// Bookmark title.
    pub title: String,
    /// Target URL.
    pub url: String,
    /// `;`-separated keywords.
    pub keywords: String,
    /// `"true"`/`"false"` fuzzy-matching flag.
    pub match_similar_keywords: Option<String>,
    /// Publication state token.
    pub state: Option<String>,
    /// Description text.
    pub description: Option<String>,
    /// `;`-separated reserved keywords.
    pub reserved_keywords: Option<String>,
    /// `;`-separated categories.
    pub categories: Option<String>,
    /// Scheduling start date text.
    pub start_date: Option<String>,
    /// Scheduling end date text.
    pub end_date: Option<String>,
    /// `;`-separated country codes.
    pub country_region: Option<String>,
    /// `"True"`/`"False"` AAD-location flag.
    pub use_aad_location: Option<String>,
    /// `;`-separated group UUIDs.
    pub groups: Option<String>,
    /// `;`-separated device identifiers.
    pub device_and_os: Option<String>,
    /// Variations JSON.
    pub targeted_variations: Option<String>,
    /// Last-modified date text.
    pub last_modified: Option<String>,
    /// Last-modifying user.
    pub last_modified_by: Option<String>,
    /// Record UUID.
    pub id: Option<String>,
}

impl BookmarkInput {
    /// Creates an input with the three required fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        keywords: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            keywords: keywords.into(),
            ..Self::default()
        }
    }

    /// Maps an ordered row of cells onto the named fields.
    ///
    /// Rows shorter than 18 cells are padded with absent fields; empty
    /// cells become `None`.
    #[must_use]
    pub fn from_row(cells: &[String]) -> Self {
        let required = |i: usize| cells.get(i).cloned().unwrap_or_default();
        let optional = |i: usize| cells.get(i).filter(|c| !c.is_empty()).cloned();
        Self {
            title: required(0),
            url: required(1),
            keywords: required(2),
            match_similar_keywords: optional(3),
            state: optional(4),
            description: optional(5),
            reserved_keywords: optional(6),
            categories: optional(7),
            start_date: optional(8),
            end_date: optional(9),
            country_region: optional(10),
            use_aad_location: optional(11),
            groups: optional(12),
            device_and_os: optional(13),
            targeted_variations: optional(14),
            last_modified: optional(15),
            last_modified_by: optional(16),
            id: optional(17),
        }
    }

    /// Sets the state token.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the reserved keywords cell.
    #[must_use]
    pub fn with_reserved_keywords(mut self, reserved: impl Into<String>) -> Self {
        self.reserved_keywords = Some(reserved.into());
        self
    }

    /// Sets the start date cell.
    #[must_use]
    pub fn with_start_date(mut self, start: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self
    }

    /// Sets the end date cell.
    #[must_use]
    pub fn with_end_date(mut self, end: impl Into<String>) -> Self {
        self.end_date = Some(end.into());
        self
    }

    /// Sets the variations cell.
    #[must_use]
    pub fn with_targeted_variations(mut self, variations: impl Into<String>) -> Self {
        self.targeted_variations = Some(variations.into());
        self
    }
}

/// One validated bookmark record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    /// Title, at most 60 characters (truncated with `...` beyond that).
    pub title: String,
    /// Validated URL.
    pub url: String,
    /// Deduplicated lowercase keywords, first-seen order.
    pub keywords: Vec<String>,
    /// Fuzzy keyword matching (default true).
    pub match_similar_keywords: bool,
    /// Publication state.
    pub state: Option<State>,
    /// Description, at most 300 characters.
    pub description: Option<String>,
    /// Deduplicated lowercase reserved keywords.
    pub reserved_keywords: Option<Vec<String>>,
    /// Deduplicated lowercase categories, first-seen order.
    pub categories: Option<Vec<String>>,
    /// Scheduling start.
    pub start_date: Option<DateTime<Utc>>,
    /// Scheduling end.
    pub end_date: Option<DateTime<Utc>>,
    /// Country/region codes.
    pub country_region: Option<Vec<String>>,
    /// AAD location targeting (default false).
    pub use_aad_location: bool,
    /// Group UUIDs.
    pub groups: Option<Vec<String>>,
    /// Device identifiers.
    pub device_and_os: Option<Vec<String>>,
    /// Variation sub-records.
    pub targeted_variations: Option<Vec<Variation>>,
    /// Last modification date.
    pub last_modified: Option<DateTime<Utc>>,
    /// Last modifying user.
    pub last_modified_by: Option<String>,
    /// Record UUID.
    pub id: Option<String>,
}

impl Bookmark {
    /// Constructs and validates a bookmark from raw input.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first failing field or
    /// cross-field aspect; no partially constructed bookmark is observable.
    pub fn new(input: &BookmarkInput, lookups: &Lookups) -> Result<Self, ValidationError> {
        Self::new_at(input, lookups, Utc::now())
    }

    /// Constructs a bookmark with an explicit "now" for date validation.
    ///
    /// # Errors
    ///
    /// See [`Bookmark::new`].
    pub fn new_at(
        input: &BookmarkInput,
        lookups: &Lookups,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let title = if valid_title(&input.title) {
            input.title.clone()
        } else {
            let shortened = truncate(&input.title, TITLE_LIMIT - ELLIPSIS.len());
            tracing::warn!(title = %shortened, "title has been shortened");
            shortened
        };

        if !valid_url(&input.url) {
            return Err(ValidationError::invalid(FieldId::Url, &title));
        }

        let keywords = codec::dedup_lowercase(&codec::split_tokens(&input.keywords));
        if !valid_keywords(&keywords) {
            return Err(ValidationError::invalid(FieldId::Keywords, &title));
        }

        let match_similar_keywords = match &input.match_similar_keywords {
            Some(raw) => codec::parse_match_similar(raw)
                .ok_or_else(|| ValidationError::invalid(FieldId::MatchSimilarKeywords, &title))?,
            None => true,
        };

        let state = match &input.state {
            Some(raw) => Some(
                State::parse(raw)
                    .ok_or_else(|| ValidationError::invalid(FieldId::State, &title))?,
            ),
            None => None,
        };

        let description = input.description.as_ref().map(|raw| {
            if valid_description(raw) {
                raw.clone()
            } else {
                let shortened = truncate(raw, DESCRIPTION_LIMIT - ELLIPSIS.len());
                tracing::warn!(title = %title, "description has been shortened");
                shortened
            }
        });

        let reserved_keywords = input
            .reserved_keywords
            .as_ref()
            .map(|raw| codec::dedup_lowercase(&codec::split_tokens(raw)));

        let categories = input
            .categories
            .as_ref()
            .map(|raw| codec::dedup_lowercase(&codec::split_tokens(raw)));

        let start_date = parse_date_field(input.start_date.as_deref(), FieldId::StartDate, &title)?;
        let end_date = parse_date_field(input.end_date.as_deref(), FieldId::EndDate, &title)?;

        let country_region = match &input.country_region {
            Some(raw) => {
                let regions = codec::split_tokens(raw);
                if !regions.iter().all(|r| lookups.is_country(r)) {
                    return Err(ValidationError::invalid(FieldId::CountryRegion, &title));
                }
                Some(regions)
            },
            None => None,
        };

        let use_aad_location = match &input.use_aad_location {
            Some(raw) => codec::parse_use_aad_location(raw)
                .ok_or_else(|| ValidationError::invalid(FieldId::UseAadLocation, &title))?,
            None => false,
        };

        let groups = match &input.groups {
            Some(raw) => {
                let groups = codec::split_tokens(raw);
                if !groups.iter().all(|g| Uuid::parse_str(g).is_ok()) {
                    return Err(ValidationError::invalid(FieldId::Groups, &title));
                }
                Some(groups)
            },
            None => None,
        };

        let device_and_os = match &input.device_and_os {
            Some(raw) => {
                let devices = codec::split_tokens(raw);
                if !devices.iter().all(|d| lookups.is_device(d)) {
                    return Err(ValidationError::invalid(FieldId::DeviceAndOs, &title));
                }
                Some(devices)
            },
            None => None,
        };

        let targeted_variations = match &input.targeted_variations {
            Some(raw) => Some(parse_variations(raw, &title, lookups)?),
            None => None,
        };

        let last_modified =
            parse_date_field(input.last_modified.as_deref(), FieldId::LastModified, &title)?;

        let id = match &input.id {
            Some(raw) => {
                if Uuid::parse_str(raw).is_err() {
                    return Err(ValidationError::invalid(FieldId::Id, &title));
                }
                Some(raw.clone())
            },
            None => None,
        };

        // Cross-field invariants
        if let Some(end) = end_date {
            if end < now {
                return Err(ValidationError::invalid(FieldId::StartEndDates, &title));
            }
            if let Some(start) = start_date {
                if end < start {
                    return Err(ValidationError::invalid(FieldId::StartEndDates, &title));
                }
            }
        }

        if state == Some(State::Scheduled) && start_date.is_none() {
            return Err(ValidationError::invalid(FieldId::StateAndDates, &title));
        }

        if let Some(reserved) = &reserved_keywords {
            if reserved.iter().any(|rk| keywords.contains(rk)) {
                return Err(ValidationError::invalid(
                    FieldId::KeywordsReservedKeywords,
                    &title,
                ));
            }
        }

        Ok(Self {
            title,
            url: input.url.clone(),
            keywords,
            match_similar_keywords,
            state,
            description,
            reserved_keywords,
            categories,
            start_date,
            end_date,
            country_region,
            use_aad_location,
            groups,
            device_and_os,
            targeted_variations,
            last_modified,
            last_modified_by: input.last_modified_by.clone(),
            id,
        })
    }

    /// Serializes the bookmark into its 18-cell row representation.
    ///
    /// Absent optional fields serialize as empty strings.
    #[must_use]
    pub fn to_row(&self) -> [String; COLUMN_COUNT] {
        let join_opt = |tokens: &Option<Vec<String>>| {
            tokens.as_deref().map(codec::join_tokens).unwrap_or_default()
        };
        [
            self.title.clone(),
            self.url.clone(),
            codec::join_tokens(&self.keywords),
            if self.match_similar_keywords { "true" } else { "false" }.to_string(),
            self.state.map(|s| s.as_str().to_string()).unwrap_or_default(),
            self.description.clone().unwrap_or_default(),
            join_opt(&self.reserved_keywords),
            join_opt(&self.categories),
            self.start_date.map(codec::format_start_end).unwrap_or_default(),
            self.end_date.map(codec::format_start_end).unwrap_or_default(),
            join_opt(&self.country_region),
            if self.use_aad_location { "True" } else { "False" }.to_string(),
            join_opt(&self.groups),
            join_opt(&self.device_and_os),
            self.targeted_variations
                .as_deref()
                .map(serialize_variations)
                .unwrap_or_default(),
            self.last_modified
                .map(codec::format_last_modified)
                .unwrap_or_default(),
            self.last_modified_by.clone().unwrap_or_default(),
            self.id.clone().unwrap_or_default(),
        ]
    }
}

fn parse_date_field(
    raw: Option<&str>,
    field: FieldId,
    title: &str,
) -> Result<Option<DateTime<Utc>>, ValidationError> {
    match raw {
        Some(raw) => match codec::parse_date_time(raw) {
            DateValue::Timestamp(ts) => Ok(Some(ts)),
            DateValue::Raw(_) => Err(ValidationError::invalid(field, title)),
        },
        None => Ok(None),
    }
}

fn truncate(text: &str, keep: usize) -> String {
    let mut shortened: String = text.chars().take(keep).collect();
    shortened.push_str(ELLIPSIS);
    shortened
}

pub(crate) fn valid_title(title: &str) -> bool {
    let len = title.chars().count();
    len > 0 && len < TITLE_LIMIT
}

pub(crate) fn valid_url(url: &str) -> bool {
    Url::parse(url).map(|u| u.has_host()).unwrap_or(false)
}

pub(crate) fn valid_description(description: &str) -> bool {
    description.chars().count() < DESCRIPTION_LIMIT
}

fn valid_keywords(keywords: &[String]) -> bool {
    !keywords.is_empty() && keywords.iter().all(|kw| !kw.is_empty())
}

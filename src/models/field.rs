//! Field identifiers and the fixed column map.
//!
//! Both conversion directions share one ordered correspondence between
//! column label and semantic field. The CSV header row is validated against
//! it on read and emitted from it on write.

/// Number of columns in the flat row representation.
pub const COLUMN_COUNT: usize = 18;

/// Identifies a bookmark field or validation aspect.
///
/// The first 18 variants are the row columns in order. The remaining
/// variants name cross-field invariants and variation sub-record fields so
/// that validation failures can be reported structurally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    /// Bookmark title (column A).
    Title,
    /// Target URL (column B).
    Url,
    /// Trigger keywords (column C).
    Keywords,
    /// Fuzzy keyword matching flag (column D).
    MatchSimilarKeywords,
    /// Publication state (column E).
    State,
    /// Description text (column F).
    Description,
    /// Reserved keywords (column G).
    ReservedKeywords,
    /// Category tokens (column H).
    Categories,
    /// Scheduling start (column I).
    StartDate,
    /// Scheduling end (column J).
    EndDate,
    /// Country/region targeting (column K).
    CountryRegion,
    /// AAD location targeting flag (column L).
    UseAadLocation,
    /// Targeted security groups (column M).
    Groups,
    /// Device/OS targeting (column N).
    DeviceAndOs,
    /// Variation sub-records (column O).
    TargetedVariations,
    /// Last modification date (column P).
    LastModified,
    /// Last modifying user (column Q).
    LastModifiedBy,
    /// Record UUID (column R).
    Id,

    /// Cross-field: end date against now and against start date.
    StartEndDates,
    /// Cross-field: scheduled state requires a start date.
    StateAndDates,
    /// Cross-field: keyword and reserved-keyword sets must be disjoint.
    KeywordsReservedKeywords,

    /// A variation sub-record as a whole (unrecognized key, bad JSON).
    Variations,
    /// Title override inside a variation.
    VariationTitle,
    /// URL override inside a variation.
    VariationUrl,
    /// Description override inside a variation.
    VariationDescription,
    /// Country targeting inside a variation.
    VariationCountry,
    /// Device targeting inside a variation.
    VariationDevice,
}

impl FieldId {
    /// Returns the row columns in their fixed serialization order.
    #[must_use]
    pub const fn columns() -> [Self; COLUMN_COUNT] {
        [
            Self::Title,
            Self::Url,
            Self::Keywords,
            Self::MatchSimilarKeywords,
            Self::State,
            Self::Description,
            Self::ReservedKeywords,
            Self::Categories,
            Self::StartDate,
            Self::EndDate,
            Self::CountryRegion,
            Self::UseAadLocation,
            Self::Groups,
            Self::DeviceAndOs,
            Self::TargetedVariations,
            Self::LastModified,
            Self::LastModifiedBy,
            Self::Id,
        ]
    }

    /// Returns the human-readable label.
    ///
    /// For column fields this is the exact header-row label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Url => "Url",
            Self::Keywords => "Keywords",
            Self::MatchSimilarKeywords => "Match Similar Keywords",
            Self::State => "State",
            Self::Description => "Description",
            Self::ReservedKeywords => "Reserved Keywords",
            Self::Categories => "Categories",
            Self::StartDate => "Start Date",
            Self::EndDate => "End Date",
            Self::CountryRegion => "Country/Region",
            Self::UseAadLocation => "Use AAD Location",
            Self::Groups => "Groups",
            Self::DeviceAndOs => "Device & OS",
            Self::TargetedVariations => "Targeted Variations",
            Self::LastModified => "Last Modified",
            Self::LastModifiedBy => "Last Modified By",
            Self::Id => "Id",
            Self::StartEndDates => "Start Date/End Date",
            Self::StateAndDates => "State/End Date",
            Self::KeywordsReservedKeywords => "Keywords/Reserved Keywords",
            Self::Variations => "Variations",
            Self::VariationTitle => "Variation Title",
            Self::VariationUrl => "Variation URL",
            Self::VariationDescription => "Variation Description",
            Self::VariationCountry => "Variation Country",
            Self::VariationDevice => "Variation Device",
        }
    }
}

/// Returns the ordered header-row labels.
#[must_use]
pub fn column_labels() -> [&'static str; COLUMN_COUNT] {
    let columns = FieldId::columns();
    let mut labels = [""; COLUMN_COUNT];
    let mut i = 0;
    while i < COLUMN_COUNT {
        labels[i] = columns[i].label();
        i += 1;
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_order() {
        let labels = column_labels();
        assert_eq!(labels.len(), 18);
        assert_eq!(labels[0], "Title");
        assert_eq!(labels[3], "Match Similar Keywords");
        assert_eq!(labels[10], "Country/Region");
        assert_eq!(labels[13], "Device & OS");
        assert_eq!(labels[17], "Id");
    }

    #[test]
    fn test_aspect_labels() {
        assert_eq!(FieldId::StartEndDates.label(), "Start Date/End Date");
        assert_eq!(FieldId::VariationUrl.label(), "Variation URL");
        assert_eq!(FieldId::Variations.label(), "Variations");
    }
}

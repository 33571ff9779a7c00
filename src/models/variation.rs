//! Targeted variation sub-records.
//!
//! A variation overrides selected bookmark fields for a specific
//! country/device combination. Variations travel as a JSON array inside one
//! row cell; their values obey the same validators as the corresponding
//! top-level fields.

use super::bookmark::{valid_description, valid_title, valid_url};
use super::error::ValidationError;
use super::field::FieldId;
use crate::codec;
use crate::lookup::Lookups;
use serde::{Deserialize, Serialize};

/// The keys a variation sub-record may carry.
pub const VARIATION_KEYS: [&str; 5] = ["title", "url", "description", "country", "device"];

/// A partial field override targeted at a country/device combination.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Variation {
    /// Title override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// URL override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Description override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Country targeting (`;`-separated codes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Device targeting (`;`-separated identifiers).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

impl Variation {
    /// Returns a placeholder variation for the CLI sample listing.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            title: Some("<your title>".to_string()),
            url: Some("<your URL>".to_string()),
            description: Some("<your description>".to_string()),
            country: Some("<your country>".to_string()),
            device: Some("<your device>".to_string()),
        }
    }
}

/// Parses and validates a variations cell.
///
/// Two failure classes stay distinguishable: an unrecognized key (or
/// malformed JSON) reports the generic [`FieldId::Variations`] aspect with
/// the record title as subject, while a recognized key holding an invalid
/// value reports the matching `Variation*` aspect with the offending value
/// as subject.
///
/// # Errors
///
/// Returns a [`ValidationError`] as described above.
pub fn parse_variations(
    raw: &str,
    title: &str,
    lookups: &Lookups,
) -> Result<Vec<Variation>, ValidationError> {
    let generic = || ValidationError::invalid(FieldId::Variations, title);

    let unescaped = codec::unescape_variations(raw);
    let parsed: serde_json::Value = serde_json::from_str(&unescaped).map_err(|_| generic())?;
    let items = parsed.as_array().ok_or_else(generic)?;

    let mut variations = Vec::with_capacity(items.len());
    for item in items {
        let object = item.as_object().ok_or_else(generic)?;
        let mut variation = Variation::default();
        for (key, value) in object {
            let value = value.as_str().ok_or_else(generic)?;
            match key.as_str() {
                "title" => {
                    if !valid_title(value) {
                        return Err(ValidationError::invalid(FieldId::VariationTitle, value));
                    }
                    variation.title = Some(value.to_string());
                },
                "url" => {
                    if !valid_url(value) {
                        return Err(ValidationError::invalid(FieldId::VariationUrl, value));
                    }
                    variation.url = Some(value.to_string());
                },
                "description" => {
                    if !valid_description(value) {
                        return Err(ValidationError::invalid(
                            FieldId::VariationDescription,
                            value,
                        ));
                    }
                    variation.description = Some(value.to_string());
                },
                "country" => {
                    let regions = codec::split_tokens(value);
                    if !regions.iter().all(|r| lookups.is_country(r)) {
                        return Err(ValidationError::invalid(FieldId::VariationCountry, value));
                    }
                    variation.country = Some(value.to_string());
                },
                "device" => {
                    let devices = codec::split_tokens(value);
                    if !devices.iter().all(|d| lookups.is_device(d)) {
                        return Err(ValidationError::invalid(FieldId::VariationDevice, value));
                    }
                    variation.device = Some(value.to_string());
                },
                _ => return Err(generic()),
            }
        }
        variations.push(variation);
    }
    Ok(variations)
}

/// Serializes variations back into their cell representation.
#[must_use]
pub fn serialize_variations(variations: &[Variation]) -> String {
    serde_json::to_string(variations).unwrap_or_default()
}

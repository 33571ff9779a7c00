//! Enumeration lookup tables.
//!
//! The country and device tables are explicitly constructed and passed into
//! the validator, never read from module state. The defaults carry the full
//! ISO 3166-1 alpha-2 table and the four SharePoint device identifiers;
//! tests can swap in synthetic tables via the `with_*` builders.

mod countries;

pub use countries::ISO_3166_ALPHA2;

use std::collections::BTreeMap;

/// Default device/OS identifiers and display labels.
pub const DEVICES: &[(&str, &str)] = &[
    ("pc-windows", "PC - Windows"),
    ("pc-mac", "PC - Apple Mac"),
    ("mobile-ios", "Mobile - iOS"),
    ("mobile-android", "Mobile - Android"),
];

/// Injected lookup tables for enumerable fields.
#[derive(Debug, Clone)]
pub struct Lookups {
    countries: BTreeMap<String, String>,
    devices: BTreeMap<String, String>,
}

impl Default for Lookups {
    fn default() -> Self {
        Self {
            countries: to_table(ISO_3166_ALPHA2),
            devices: to_table(DEVICES),
        }
    }
}

impl Lookups {
    /// Creates lookups with the default tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the country table.
    #[must_use]
    pub fn with_countries<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.countries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Replaces the device table.
    #[must_use]
    pub fn with_devices<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.devices = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Returns true if `code` is a known country code.
    #[must_use]
    pub fn is_country(&self, code: &str) -> bool {
        self.countries.contains_key(code)
    }

    /// Returns true if `id` is a known device identifier.
    #[must_use]
    pub fn is_device(&self, id: &str) -> bool {
        self.devices.contains_key(id)
    }

    /// Iterates the known country codes.
    pub fn country_codes(&self) -> impl Iterator<Item = &str> {
        self.countries.keys().map(String::as_str)
    }

    /// Iterates the known `(code, name)` country pairs.
    pub fn countries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.countries
            .iter()
            .map(|(code, name)| (code.as_str(), name.as_str()))
    }

    /// Iterates the device display labels.
    pub fn device_labels(&self) -> impl Iterator<Item = &str> {
        self.devices.values().map(String::as_str)
    }
}

fn to_table(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

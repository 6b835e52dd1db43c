//! Currency directory loaded from the static country/currency table.
//!
//! The table is a JSON object mapping a lowercase alias (country name, currency name,
//! common abbreviation) to a currency record:
//!
//! ```json
//! { "japan": { "iso": "JPY", "symbol": "¥", "currency": "Japanese Yen" } }
//! ```
//!
//! Several aliases may point at the same currency. The directory is read-only after
//! loading and is passed by reference to whoever needs lookups.
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConverterError;
use crate::result::Result;

/// A single currency as shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrencyRecord {
    /// 3-letter code (ISO 4217, or ticker for cryptocurrencies).
    pub iso: String,
    /// Display glyph, e.g. `$` or `₿`.
    pub symbol: String,
    /// Display name, e.g. `US Dollar`.
    #[serde(rename = "currency")]
    pub display_name: String,
}

/// Lookup table from normalized aliases and ISO codes to currency records.
#[derive(Debug, Clone, Default)]
pub struct CurrencyDirectory {
    aliases: HashMap<String, CurrencyRecord>,
    by_iso: HashMap<String, CurrencyRecord>,
}

/// Lowercases and trims user text for alias matching.
pub fn normalize_input(input: &str) -> String {
    input.trim().to_lowercase()
}

impl CurrencyDirectory {
    /// Opens and parses the table at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parses the table from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: HashMap<String, CurrencyRecord> = serde_json::from_reader(reader)?;
        Self::from_entries(raw)
    }

    /// Builds the directory from alias/record pairs, normalizing keys and ISO codes.
    ///
    /// Fails if two records share an ISO code but disagree on symbol or name.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, CurrencyRecord)>,
    {
        let mut directory = CurrencyDirectory::default();

        for (alias, mut record) in entries {
            record.iso = record.iso.trim().to_uppercase();

            match directory.by_iso.entry(record.iso.clone()) {
                Entry::Occupied(existing) if *existing.get() != record => {
                    return Err(ConverterError::Directory(format!(
                        "ISO code {} has conflicting records ('{}' vs '{}')",
                        record.iso,
                        existing.get().display_name,
                        record.display_name
                    )));
                }
                Entry::Occupied(_) => {}
                Entry::Vacant(slot) => {
                    slot.insert(record.clone());
                }
            }

            directory.aliases.insert(normalize_input(&alias), record);
        }
        Ok(directory)
    }

    /// Resolves free-form user text to a currency.
    ///
    /// Tries the normalized alias first, then an exact ISO code match (case-insensitive).
    pub fn resolve(&self, input: &str) -> Option<&CurrencyRecord> {
        self.aliases
            .get(&normalize_input(input))
            .or_else(|| self.by_iso(input))
    }

    /// Like `resolve`, but reports an unknown currency as `ConverterError::CurrencyNotFound`.
    pub fn require(&self, input: &str) -> Result<&CurrencyRecord> {
        self.resolve(input)
            .ok_or_else(|| ConverterError::CurrencyNotFound(input.trim().to_string()))
    }

    /// Looks up a currency by ISO code (case-insensitive).
    pub fn by_iso(&self, iso: &str) -> Option<&CurrencyRecord> {
        self.by_iso.get(&iso.trim().to_uppercase())
    }

    /// Number of distinct currencies.
    pub fn len(&self) -> usize {
        self.by_iso.len()
    }

    /// Returns `true` if no currency was loaded.
    pub fn is_empty(&self) -> bool {
        self.by_iso.is_empty()
    }
}

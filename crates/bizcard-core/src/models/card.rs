//! Business card data model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the seven contact fields extracted from a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Title,
    Company,
    Email,
    Phone,
    Address,
    Website,
}

impl Field {
    /// All fields in export column order.
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Title,
        Field::Company,
        Field::Email,
        Field::Phone,
        Field::Address,
        Field::Website,
    ];

    /// Column label used in exports and UIs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Title => "Title",
            Self::Company => "Company",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Address => "Address",
            Self::Website => "Website",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Field::ALL
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown field: {}", s))
    }
}

/// Contact fields extracted from one card image.
///
/// Every field is a plain string; an empty string means the field was not
/// found. `source_file` and `raw_text` are carried for display and
/// debugging only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionResult {
    pub name: String,
    pub title: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub website: String,

    /// Name of the file the card was read from.
    pub source_file: String,

    /// Text as recognized by the OCR engine.
    pub raw_text: String,
}

impl ExtractionResult {
    /// Create an all-empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the originating file name.
    pub fn with_source(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = source_file.into();
        self
    }

    /// Attach the raw recognized text.
    pub fn with_raw_text(mut self, raw_text: impl Into<String>) -> Self {
        self.raw_text = raw_text.into();
        self
    }

    /// Get the value of one field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Title => &self.title,
            Field::Company => &self.company,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Address => &self.address,
            Field::Website => &self.website,
        }
    }

    /// Overwrite the value of exactly one field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Title => &mut self.title,
            Field::Company => &mut self.company,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Address => &mut self.address,
            Field::Website => &mut self.website,
        };
        *slot = value.into();
    }

    /// Whether a field holds a value.
    pub fn has(&self, field: Field) -> bool {
        !self.get(field).is_empty()
    }

    /// Number of populated fields.
    pub fn found_count(&self) -> usize {
        Field::ALL.iter().filter(|f| self.has(**f)).count()
    }

    /// True when none of the seven fields is populated.
    pub fn is_empty(&self) -> bool {
        self.found_count() == 0
    }

    /// Field values in export column order.
    pub fn values(&self) -> [&str; 7] {
        Field::ALL.map(|f| self.get(f))
    }
}

/// Aggregate counts over a set of cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Number of cards processed.
    pub cards: usize,
    /// Cards with an email address.
    pub emails_found: usize,
    /// Cards with a phone number.
    pub phones_found: usize,
}

impl SessionSummary {
    /// Count cards and their found contact fields.
    pub fn from_cards<'a>(cards: impl IntoIterator<Item = &'a ExtractionResult>) -> Self {
        cards.into_iter().fold(Self::default(), |mut acc, card| {
            acc.cards += 1;
            if card.has(Field::Email) {
                acc.emails_found += 1;
            }
            if card.has(Field::Phone) {
                acc.phones_found += 1;
            }
            acc
        })
    }
}

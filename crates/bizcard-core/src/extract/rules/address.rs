//! Postal address detection.

use super::patterns::{CITY_STATE_ZIP, STREET_ADDRESS};
use super::{CardLine, LineRule};
use crate::models::card::Field;

/// Check whether a line looks like a street address or a "City, ST ZIP" line.
pub fn is_address(text: &str) -> bool {
    STREET_ADDRESS.is_match(text) || CITY_STATE_ZIP.is_match(text)
}

/// Address lines, stored whole.
pub struct AddressRule;

impl LineRule for AddressRule {
    fn field(&self) -> Field {
        Field::Address
    }

    fn capture(&self, line: &CardLine<'_>) -> Option<String> {
        is_address(line.text).then(|| line.text.to_string())
    }
}

//! Rule-based line classifiers for business cards.
//!
//! Each rule inspects a single trimmed line and either yields the value to
//! store for its field or declines. Rules are evaluated in priority order by
//! [`EntityExtractor`](crate::extract::EntityExtractor).

pub mod address;
pub mod contact;
pub mod keywords;
pub mod name;
pub mod patterns;

pub use address::{is_address, AddressRule};
pub use contact::{extract_email, extract_phone, extract_website, EmailRule, PhoneRule, WebsiteRule};
pub use keywords::{is_company_name, is_title, CompanyRule, TitleRule};
pub use name::NameRule;
pub use patterns::*;

use crate::models::card::Field;

/// A non-empty, trimmed line of OCR output with its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLine<'a> {
    /// Zero-based position among the non-empty lines.
    pub index: usize,
    /// Trimmed line text.
    pub text: &'a str,
}

impl<'a> CardLine<'a> {
    pub fn new(index: usize, text: &'a str) -> Self {
        Self { index, text }
    }

    /// Number of whitespace-separated tokens.
    pub fn token_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Trait for line rules.
pub trait LineRule: Send + Sync {
    /// The field this rule populates.
    fn field(&self) -> Field;

    /// Value to store if the line qualifies for this rule's field.
    fn capture(&self, line: &CardLine<'_>) -> Option<String>;

    /// Whether a qualifying line is consumed even when the field is
    /// already filled, so lower-priority rules never see it.
    fn claims(&self, _line: &CardLine<'_>) -> bool {
        false
    }
}

/// The rules in priority order: Email, Phone, Website, Address, Title,
/// Company, Name.
pub fn default_rules(name: NameRule) -> Vec<Box<dyn LineRule>> {
    vec![
        Box::new(EmailRule),
        Box::new(PhoneRule),
        Box::new(WebsiteRule),
        Box::new(AddressRule),
        Box::new(TitleRule),
        Box::new(CompanyRule),
        Box::new(name),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_rule_order() {
        let fields: Vec<Field> = default_rules(NameRule::default())
            .iter()
            .map(|r| r.field())
            .collect();

        assert_eq!(
            fields,
            vec![
                Field::Email,
                Field::Phone,
                Field::Website,
                Field::Address,
                Field::Title,
                Field::Company,
                Field::Name,
            ]
        );
    }

    #[test]
    fn test_token_count() {
        assert_eq!(CardLine::new(0, "Jane   Q. Doe").token_count(), 3);
        assert_eq!(CardLine::new(0, "Jane").token_count(), 1);
    }
}

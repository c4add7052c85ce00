//! Email, phone and website extraction.

use super::patterns::{EMAIL, PHONE, URL_SCHEME, WEBSITE};
use super::{CardLine, LineRule};
use crate::models::card::Field;

/// Extract the first email address contained in the text.
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

/// Extract the first NANP-style phone number contained in the text.
pub fn extract_phone(text: &str) -> Option<String> {
    PHONE
        .captures(text)
        .and_then(|c| c.name("phone"))
        .map(|m| m.as_str().trim().to_string())
}

/// Extract the first website contained in the text, without its scheme.
///
/// `www.` is kept.
pub fn extract_website(text: &str) -> Option<String> {
    WEBSITE
        .find(text)
        .map(|m| URL_SCHEME.replace(m.as_str(), "").into_owned())
        .filter(|site| !site.is_empty())
}

/// Lines containing an email address.
///
/// Email lines are claimed even once an email is found: a second address
/// is dropped rather than leaking into Website or Company.
pub struct EmailRule;

impl LineRule for EmailRule {
    fn field(&self) -> Field {
        Field::Email
    }

    fn capture(&self, line: &CardLine<'_>) -> Option<String> {
        extract_email(line.text)
    }

    fn claims(&self, line: &CardLine<'_>) -> bool {
        EMAIL.is_match(line.text)
    }
}

/// Lines containing a phone number.
pub struct PhoneRule;

impl LineRule for PhoneRule {
    fn field(&self) -> Field {
        Field::Phone
    }

    fn capture(&self, line: &CardLine<'_>) -> Option<String> {
        extract_phone(line.text)
    }
}

/// Lines containing a website.
pub struct WebsiteRule;

impl LineRule for WebsiteRule {
    fn field(&self) -> Field {
        Field::Website
    }

    fn capture(&self, line: &CardLine<'_>) -> Option<String> {
        extract_website(line.text)
    }
}

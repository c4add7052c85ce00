//! Keyword vocabulary rules for job titles and company names.

use super::patterns::{COMPANY_INDICATORS, TITLE};
use super::{CardLine, LineRule};
use crate::models::card::Field;

/// Check whether text contains a job title keyword as a whole word.
pub fn is_title(text: &str) -> bool {
    TITLE.is_match(text)
}

/// Check whether text contains a company indicator.
///
/// The test is a case-insensitive substring match, so short indicators
/// such as `co` also match inside longer words.
pub fn is_company_name(text: &str) -> bool {
    let lower = text.to_lowercase();
    COMPANY_INDICATORS.iter().any(|k| lower.contains(k.as_str()))
}

/// Job title lines, stored whole.
pub struct TitleRule;

impl LineRule for TitleRule {
    fn field(&self) -> Field {
        Field::Title
    }

    fn capture(&self, line: &CardLine<'_>) -> Option<String> {
        is_title(line.text).then(|| line.text.to_string())
    }
}

/// Company lines, stored whole.
pub struct CompanyRule;

impl LineRule for CompanyRule {
    fn field(&self) -> Field {
        Field::Company
    }

    fn capture(&self, line: &CardLine<'_>) -> Option<String> {
        is_company_name(line.text).then(|| line.text.to_string())
    }
}

//! Common regex patterns and vocabularies for business card extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Job title keywords, matched case-insensitively as whole words.
pub const TITLE_KEYWORDS: &[&str] = &[
    "CEO",
    "CTO",
    "CFO",
    "President",
    "Vice President",
    "Director",
    "Manager",
    "Engineer",
    "Developer",
    "Designer",
    "Consultant",
    "Analyst",
    "Coordinator",
    "Specialist",
    "Administrator",
    "Assistant",
    "Associate",
    "Partner",
    "Founder",
    "Owner",
    "Lead",
    "Senior",
    "Junior",
    "Principal",
];

/// Company indicators, matched case-insensitively as substrings.
pub const COMPANY_KEYWORDS: &[&str] = &[
    "Inc",
    "Corp",
    "LLC",
    "Ltd",
    "Co",
    "Company",
    "Corporation",
    "Incorporated",
    "Limited",
    "LP",
    "PLC",
    "Group",
    "Holdings",
    "Enterprises",
    "Solutions",
    "Technologies",
    "Systems",
    "Services",
    "Consulting",
    "Agency",
    "Studio",
    "Labs",
    "Ventures",
    "Partners",
];

/// Street type words recognized after a house number.
pub const STREET_TYPES: &[&str] = &[
    "Street",
    "St",
    "Avenue",
    "Ave",
    "Boulevard",
    "Blvd",
    "Lane",
    "Ln",
    "Road",
    "Rd",
    "Drive",
    "Dr",
    "Court",
    "Ct",
    "Way",
    "Place",
    "Pl",
];

/// Build a case-insensitive whole-word alternation over a vocabulary.
fn word_alternation(words: &[&str]) -> String {
    let alternatives: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
    format!(r"(?i)\b(?:{})\b", alternatives.join("|"))
}

lazy_static! {
    // Email (local-part@domain.tld)
    pub static ref EMAIL: Regex = Regex::new(
        r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}"
    ).unwrap();

    // Phone (NANP: optional +1, optional (area code), 3-3-4 digits), not
    // preceded by a digit
    pub static ref PHONE: Regex = Regex::new(
        r"(?:^|\D)(?P<phone>(?:\+1[\s.-]?)?(?:\(\d{3}\)|\d{3})[\s.-]?\d{3}[\s.-]?\d{4})\b"
    ).unwrap();

    // Website (optional scheme, optional www., domain.tld, optional path)
    pub static ref WEBSITE: Regex = Regex::new(
        r"(?i)\b(?:https?://)?(?:www\.)?[a-z0-9-]+(?:\.[a-z0-9-]+)*\.[a-z]{2,}\b(?:/[^\s]*)?"
    ).unwrap();

    pub static ref URL_SCHEME: Regex = Regex::new(r"(?i)^https?://").unwrap();

    // Street address (house number, up to four words, street type)
    pub static ref STREET_ADDRESS: Regex = Regex::new(&format!(
        r"(?i)\b\d+\s+(?:[\w.'-]+\s+){{0,4}}(?:{})\b",
        STREET_TYPES.join("|")
    )).unwrap();

    // City, ST 12345
    pub static ref CITY_STATE_ZIP: Regex = Regex::new(
        r"\b[A-Z][A-Za-z]+(?:\s+[A-Z][A-Za-z]+)*,\s*[A-Z]{2}\s+\d{5}(?:-\d{4})?\b"
    ).unwrap();

    pub static ref TITLE: Regex = Regex::new(&word_alternation(TITLE_KEYWORDS)).unwrap();

    pub static ref COMPANY_INDICATORS: Vec<String> = COMPANY_KEYWORDS
        .iter()
        .map(|k| k.to_lowercase())
        .collect();
}

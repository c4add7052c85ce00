//! Positional name heuristic.

use super::patterns::EMAIL;
use super::{CardLine, LineRule};
use crate::models::card::Field;
use crate::models::config::ExtractionConfig;

/// Short multi-word lines near the top of the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameRule {
    window: usize,
    min_tokens: usize,
    max_tokens: usize,
}

impl NameRule {
    /// Create a rule accepting lines before `window` with `min_tokens..=max_tokens` tokens.
    pub fn new(window: usize, min_tokens: usize, max_tokens: usize) -> Self {
        Self {
            window,
            min_tokens,
            max_tokens,
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(
            config.name_window,
            config.name_min_tokens,
            config.name_max_tokens,
        )
    }

    fn qualifies(&self, line: &CardLine<'_>) -> bool {
        let tokens = line.token_count();
        line.index < self.window
            && (self.min_tokens..=self.max_tokens).contains(&tokens)
            && !EMAIL.is_match(line.text)
    }
}

impl Default for NameRule {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}

impl LineRule for NameRule {
    fn field(&self) -> Field {
        Field::Name
    }

    fn capture(&self, line: &CardLine<'_>) -> Option<String> {
        self.qualifies(line).then(|| line.text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_accepts_short_top_lines() {
        let rule = NameRule::default();
        assert_eq!(
            rule.capture(&CardLine::new(0, "Jane Doe")),
            Some("Jane Doe".to_string())
        );
        assert!(rule.capture(&CardLine::new(2, "Mary Ann de Vries")).is_some());
    }

    #[test]
    fn test_rejects_outside_window() {
        let rule = NameRule::default();
        assert_eq!(rule.capture(&CardLine::new(3, "Jane Doe")), None);
    }

    #[test]
    fn test_rejects_token_counts() {
        let rule = NameRule::default();
        assert_eq!(rule.capture(&CardLine::new(0, "Jane")), None);
        assert_eq!(
            rule.capture(&CardLine::new(0, "Jane Mary Ann Lee Doe")),
            None
        );
    }

    #[test]
    fn test_rejects_email() {
        let rule = NameRule::default();
        assert_eq!(rule.capture(&CardLine::new(0, "mail: jane@doe.com")), None);
    }

    #[test]
    fn test_custom_window() {
        let rule = NameRule::new(5, 1, 3);
        assert!(rule.capture(&CardLine::new(4, "Prince")).is_some());
    }
}

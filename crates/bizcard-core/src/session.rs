//! In-memory store of the cards read during one session.

use serde::Serialize;
use tracing::debug;

use crate::error::{ExportError, SessionError};
use crate::export::CsvExporter;
use crate::models::card::{ExtractionResult, Field, SessionSummary};

/// Ordered cards of one upload session.
///
/// Cards are only changed by [`edit`](Self::edit), which rewrites a single
/// field, or dropped all at once by [`clear`](Self::clear).
#[derive(Debug, Clone, Default, Serialize)]
pub struct CardSession {
    cards: Vec<ExtractionResult>,
    #[serde(skip)]
    limit: usize,
}

impl CardSession {
    /// Create a session holding at most `limit` cards.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            cards: Vec::new(),
            limit,
        }
    }

    /// Add a card, returning its index.
    pub fn push(&mut self, card: ExtractionResult) -> Result<usize, SessionError> {
        if self.cards.len() >= self.limit {
            return Err(SessionError::LimitReached(self.limit));
        }
        self.cards.push(card);
        Ok(self.cards.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ExtractionResult> {
        self.cards.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtractionResult> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[ExtractionResult] {
        &self.cards
    }

    /// Overwrite one field of one card.
    pub fn edit(
        &mut self,
        index: usize,
        field: Field,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        let card = self
            .cards
            .get_mut(index)
            .ok_or(SessionError::NoSuchCard(index))?;
        let value = value.into();
        debug!("Card {}: {} := {:?}", index, field, value);
        card.set(field, value);
        Ok(())
    }

    /// Drop every card.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_cards(&self.cards)
    }

    /// Render the session as CSV.
    pub fn export_csv(&self, exporter: &CsvExporter) -> Result<String, ExportError> {
        exporter.to_string(&self.cards)
    }
}

impl<'a> IntoIterator for &'a CardSession {
    type Item = &'a ExtractionResult;
    type IntoIter = std::slice::Iter<'a, ExtractionResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_entities;
    use pretty_assertions::assert_eq;

    fn session_with(texts: &[&str]) -> CardSession {
        let mut session = CardSession::with_limit(10);
        for (i, text) in texts.iter().enumerate() {
            let card = extract_entities(text).with_source(format!("card{}.png", i));
            session.push(card).unwrap();
        }
        session
    }

    #[test]
    fn test_edit_rewrites_one_field() {
        let mut session = session_with(&["Jane Doe\nMarketing Director\njane@doe.io"]);
        let before = session.get(0).unwrap().clone();

        session.edit(0, Field::Title, "VP Marketing").unwrap();

        let after = session.get(0).unwrap();
        assert_eq!(after.title, "VP Marketing");
        assert_eq!(after.name, before.name);
        assert_eq!(after.email, before.email);
        assert_eq!(after.source_file, before.source_file);
    }

    #[test]
    fn test_edit_unknown_card() {
        let mut session = session_with(&[]);
        assert_eq!(
            session.edit(3, Field::Name, "x"),
            Err(SessionError::NoSuchCard(3))
        );
    }

    #[test]
    fn test_limit() {
        let mut session = CardSession::with_limit(1);
        assert_eq!(session.push(ExtractionResult::new()), Ok(0));
        assert_eq!(
            session.push(ExtractionResult::new()),
            Err(SessionError::LimitReached(1))
        );
    }

    #[test]
    fn test_clear_and_summary() {
        let mut session = session_with(&["jane@doe.io\n555-123-4567", "bob@acme.com", "Acme Corp"]);
        let summary = session.summary();
        assert_eq!(summary.cards, 3);
        assert_eq!(summary.emails_found, 2);
        assert_eq!(summary.phones_found, 1);

        session.clear();
        assert!(session.is_empty());
        assert_eq!(session.summary(), SessionSummary::default());
    }

    #[test]
    fn test_export_csv() {
        let session = session_with(&["Jane Doe\nAcme, Inc."]);
        let csv = session.export_csv(&CsvExporter::new()).unwrap();
        assert_eq!(
            csv,
            "\"Name\",\"Title\",\"Company\",\"Email\",\"Phone\",\"Address\",\"Website\"\n\
             \"Jane Doe\",\"\",\"Acme, Inc.\",\"\",\"\",\"\",\"\"\n"
        );
    }
}

//! Tabular export of extracted cards.

use std::io::Write;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::info;

use crate::error::ExportError;
use crate::models::card::{ExtractionResult, Field};
use crate::models::config::ExportConfig;

/// Header of the optional numbering column.
pub const INDEX_HEADER: &str = "#";

/// Header of the optional source file column.
pub const SOURCE_HEADER: &str = "Source File";

/// Writes one row per card and one column per field.
///
/// Columns are `Name, Title, Company, Email, Phone, Address, Website`, in
/// that order, after one header row. Every value is quoted.
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    include_index: bool,
    include_source: bool,
}

impl CsvExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            include_index: config.include_index,
            include_source: config.include_source,
        }
    }

    /// Prepend a `#` column numbering cards from 1.
    pub fn with_index(mut self, include: bool) -> Self {
        self.include_index = include;
        self
    }

    /// Append a `Source File` column.
    pub fn with_source(mut self, include: bool) -> Self {
        self.include_source = include;
        self
    }

    /// Header row.
    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = Vec::with_capacity(Field::ALL.len() + 2);
        if self.include_index {
            headers.push(INDEX_HEADER);
        }
        headers.extend(Field::ALL.iter().map(Field::label));
        if self.include_source {
            headers.push(SOURCE_HEADER);
        }
        headers
    }

    /// Write the cards to any writer.
    pub fn write_to<W: Write>(
        &self,
        writer: W,
        cards: &[ExtractionResult],
    ) -> Result<(), ExportError> {
        let mut wtr = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(writer);

        wtr.write_record(self.headers())?;

        for (i, card) in cards.iter().enumerate() {
            let ordinal = (i + 1).to_string();
            let mut row: Vec<&str> = Vec::with_capacity(Field::ALL.len() + 2);
            if self.include_index {
                row.push(&ordinal);
            }
            row.extend(card.values());
            if self.include_source {
                row.push(&card.source_file);
            }
            wtr.write_record(&row)?;
        }

        wtr.flush().map_err(|e| ExportError::Flush(e.to_string()))?;
        Ok(())
    }

    /// Render the cards as a CSV string.
    pub fn to_string(&self, cards: &[ExtractionResult]) -> Result<String, ExportError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer, cards)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Write the cards to a file.
    pub fn write_path(&self, path: &Path, cards: &[ExtractionResult]) -> Result<(), ExportError> {
        let file = std::fs::File::create(path).map_err(csv::Error::from)?;
        self.write_to(file, cards)?;
        info!("CSV exported: {} ({} records)", path.display(), cards.len());
        Ok(())
    }
}

/// Insert a `_YYYYmmdd-HHMMSS` stamp before the extension of `base`.
pub fn timestamped_filename(base: &str, at: &NaiveDateTime) -> String {
    let stamp = at.format("%Y%m%d-%H%M%S");
    let path = Path::new(base);
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) => {
            let name = format!("{}_{}.{}", stem.to_string_lossy(), stamp, ext.to_string_lossy());
            match path.parent().filter(|p| !p.as_os_str().is_empty()) {
                Some(parent) => parent.join(name).to_string_lossy().into_owned(),
                None => name,
            }
        }
        _ => format!("{}_{}", base, stamp),
    }
}

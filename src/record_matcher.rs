use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use once_cell::sync::Lazy;

use crate::app_config::{Collection, MetadataConfig};
use crate::errors::MatchError;
use crate::transcript_processor::normalize_apostrophes;

// @module: Pairing transcript blocks with metadata rows

// Book III hymns whose transcript layout differs: the title line is followed
// directly by verse, with no blank separator, and the transcribed title is
// not comparable against the table. These hymns skip the title check and
// read their stanza lines one line earlier than the default.
static BOOK_THREE_LAYOUT_EXCEPTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "89.", "90.", "91.", "92.", "94.", "95.", "98.", "102.", "103.", "104.", "105.", "106.",
        "107.",
    ])
});

/// Whether a hymn uses the exceptional block layout for its collection
pub fn layout_exception(collection: Collection, hymn_number: &str) -> bool {
    collection == Collection::BookThree && BOOK_THREE_LAYOUT_EXCEPTIONS.contains(hymn_number)
}

/// Hymn author, decoded from the metadata author flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    Newton,
    Cowper,
}

impl Author {
    /// Decode the author flag column. Only the two literal values are legal.
    pub fn from_flag(flag: &str) -> Result<Self, MatchError> {
        match flag {
            "Yes" => Ok(Self::Cowper),
            "No" => Ok(Self::Newton),
            _ => Err(MatchError::InvalidAuthorFlag {
                flag: flag.to_string(),
            }),
        }
    }

    // @returns: Name as printed in the contributor line
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Newton => "Newton",
            Self::Cowper => "Cowper",
        }
    }
}

/// One row of the metadata table, resolved through the configured columns
#[derive(Debug, Clone)]
pub struct MetadataRecord {
    /// Hymn title as recorded in the table
    pub title: String,

    /// Raw meter notation
    pub meter: String,

    /// Author flag, "Yes" or "No"
    pub author_flag: String,

    /// Row position in the table
    pub row: usize,
}

/// The metadata table, read once and then only indexed
#[derive(Debug)]
pub struct MetadataTable {
    rows: Vec<Vec<String>>,
    layout: MetadataConfig,
}

impl MetadataTable {
    /// Load a metadata table from a CSV file
    pub fn from_csv_path<P: AsRef<Path>>(path: P, layout: MetadataConfig) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Could not open CSV file {}", path.display()))?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record =
                record.with_context(|| format!("Failed to parse CSV file {}", path.display()))?;
            rows.push(record.iter().map(|field| field.to_string()).collect());
        }

        Ok(MetadataTable { rows, layout })
    }

    /// Build a table from in-memory rows - used by tests
    #[allow(dead_code)]
    pub fn from_rows(rows: Vec<Vec<String>>, layout: MetadataConfig) -> Self {
        MetadataTable { rows, layout }
    }

    /// Number of hymn rows, excluding the header
    pub fn hymn_rows(&self) -> usize {
        self.rows.len().saturating_sub(self.layout.header_rows)
    }

    /// Resolve one row into a record through the configured column positions
    fn record(&self, row: usize) -> Result<MetadataRecord, MatchError> {
        let fields = self
            .rows
            .get(row)
            .ok_or(MatchError::TableExhausted { row })?;

        let field = |column: usize| -> Result<String, MatchError> {
            fields
                .get(column)
                .map(|value| value.to_string())
                .ok_or(MatchError::MissingColumn {
                    row,
                    fields: fields.len(),
                    column,
                })
        };

        Ok(MetadataRecord {
            title: field(self.layout.title_column)?,
            meter: field(self.layout.meter_column)?,
            author_flag: field(self.layout.author_flag_column)?,
            row,
        })
    }
}

/// Walks the metadata table in step with the transcript blocks.
///
/// The cursor starts past the header and advances by exactly one per hymn
/// block, on every branch: position is the only thing pairing a block with
/// its row.
#[derive(Debug)]
pub struct RecordMatcher {
    table: MetadataTable,
    cursor: usize,
}

impl RecordMatcher {
    /// Create a matcher positioned on the first hymn row
    pub fn new(table: MetadataTable) -> Self {
        let cursor = table.layout.header_rows;
        RecordMatcher { table, cursor }
    }

    /// Return the current row's record and advance the cursor
    pub fn next_record(&mut self) -> Result<MetadataRecord, MatchError> {
        let record = self.table.record(self.cursor)?;
        self.cursor += 1;
        Ok(record)
    }

    /// Current row position - used by tests
    #[allow(dead_code)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// Compare a transcript title against the metadata title.
///
/// Both sides get their apostrophes normalized to the typographic form, the
/// transcript side loses a single trailing period, and the comparison is
/// case-insensitive. A mismatch reports both compared strings.
pub fn validate_title(transcript_title: &str, metadata_title: &str) -> Result<(), MatchError> {
    let transcript = normalize_apostrophes(transcript_title);
    let transcript = transcript.strip_suffix('.').unwrap_or(&transcript);
    let metadata = normalize_apostrophes(metadata_title);

    if transcript.to_lowercase() != metadata.to_lowercase() {
        return Err(MatchError::TitleMismatch {
            transcript: transcript.to_string(),
            metadata,
        });
    }

    Ok(())
}

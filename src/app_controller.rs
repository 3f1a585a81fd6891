use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::PathBuf;

use crate::app_config::{Collection, Config};
use crate::file_utils::FileManager;
use crate::markup_emitter::{self, Emitter, StreamEmitter};
use crate::meter::MeterDescriptor;
use crate::record_matcher::{self, Author, MetadataTable, RecordMatcher};
use crate::stanza_engine::StanzaEngine;
use crate::transcript_processor;

// @module: Application controller for transcript processing

/// Paths and selections for one processing run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Transcript base name, e.g. "book-1"; selects the collection
    pub base_name: String,

    /// Metadata CSV path; derived from the base name when not given
    pub csv_path: Option<PathBuf>,

    /// Output path; derived from the base name when not given
    pub output_path: Option<PathBuf>,
}

impl RunOptions {
    fn transcript_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.xhtml", self.base_name))
    }

    fn csv_path(&self, csv_prefix: &str) -> PathBuf {
        self.csv_path.clone().unwrap_or_else(|| {
            // The metadata tables live one directory up from the transcripts
            PathBuf::from(format!("../{}{}.csv", csv_prefix, self.base_name))
        })
    }

    fn output_path(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.txt", self.base_name)))
    }
}

/// Main application controller for the transcript conversion
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Run the whole single-pass conversion: read the transcript and the
    /// metadata table, pair blocks with rows by position, validate, and
    /// stream the markup to the output file.
    pub fn run(&self, options: &RunOptions) -> Result<()> {
        let collection = Collection::from_base_name(&options.base_name)?;

        let transcript_path = options.transcript_path();
        if !FileManager::file_exists(&transcript_path) {
            return Err(anyhow::anyhow!(
                "Transcript file does not exist: {:?}",
                transcript_path
            ));
        }

        let content = FileManager::read_to_string(&transcript_path)?;
        let blocks = transcript_processor::parse_transcript(&content)
            .with_context(|| format!("Failed to read transcript {:?}", transcript_path))?;

        let csv_path = options.csv_path(&self.config.csv_prefix);
        let table = MetadataTable::from_csv_path(&csv_path, self.config.metadata.clone())?;

        info!(
            "{}: {} hymn blocks, {} metadata rows",
            collection,
            blocks.len(),
            table.hymn_rows()
        );
        if table.hymn_rows() > blocks.len() {
            warn!(
                "Metadata table has {} rows beyond the last hymn block",
                table.hymn_rows() - blocks.len()
            );
        }

        let output_path = options.output_path();
        let mut emitter = StreamEmitter::new(FileManager::create_output(&output_path)?);

        self.process(collection, &blocks, table, &mut emitter)?;
        emitter.flush()?;

        info!("Wrote {:?}", output_path);
        Ok(())
    }

    /// The single pass over the hymn blocks, against any emitter
    pub fn process<E: Emitter>(
        &self,
        collection: Collection,
        blocks: &[transcript_processor::HymnBlock],
        table: MetadataTable,
        emitter: &mut E,
    ) -> Result<()> {
        let mut matcher = RecordMatcher::new(table);

        emitter.emit(&markup_emitter::document_header(collection))?;

        for block in blocks {
            let record = matcher
                .next_record()
                .with_context(|| format!("Hymn {}", block.number))?;

            let author = Author::from_flag(&record.author_flag)
                .with_context(|| format!("Hymn {}", block.number))?;

            if !record_matcher::layout_exception(collection, &block.number) {
                record_matcher::validate_title(&block.title, &record.title)
                    .with_context(|| format!("Hymn {}", block.number))?;
            }

            let meter = MeterDescriptor::parse(&record.meter)
                .with_context(|| format!("Hymn {}", block.number))?;

            debug!(
                "Hymn {}: {:?}, ref {:?} ({} by {})",
                block.number,
                block.title,
                block.reference,
                meter,
                author.display_name()
            );

            let engine = StanzaEngine::new(collection, block, &meter)
                .with_context(|| format!("Hymn {}", block.number))?;
            engine
                .emit_hymn(author, emitter)
                .with_context(|| format!("Hymn {}", block.number))?;
        }

        emitter.emit(markup_emitter::document_footer())?;
        Ok(())
    }
}

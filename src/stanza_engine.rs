use log::debug;

use crate::app_config::Collection;
use crate::doubled_hymns;
use crate::errors::{AppError, MeterError, StanzaError};
use crate::indent_rules::{self, IndentRule};
use crate::markup_emitter::{self, Emitter};
use crate::meter::MeterDescriptor;
use crate::record_matcher::{self, Author};
use crate::transcript_processor::HymnBlock;

// @module: Stanza segmentation, validation and emission

// Stanza ordinals as printed in stanza headers. The books never run past
// ten stanzas; an eleventh is treated as a transcription error.
const ROMAN_NUMERALS: [&str; 10] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"];

/// Roman numeral for a 1-based stanza ordinal
pub fn roman_numeral(hymn: &str, ordinal: usize) -> Result<&'static str, StanzaError> {
    if (1..=ROMAN_NUMERALS.len()).contains(&ordinal) {
        Ok(ROMAN_NUMERALS[ordinal - 1])
    } else {
        Err(StanzaError::OrdinalOutOfRange {
            hymn: hymn.to_string(),
            ordinal,
        })
    }
}

/// Segments one hymn's verse into stanzas, validates every stanza's line
/// count against the meter, and emits the hymn's markup.
pub struct StanzaEngine<'a> {
    collection: Collection,
    block: &'a HymnBlock,
    meter: &'a MeterDescriptor,
    rule: IndentRule,
    layout_exception: bool,
}

impl<'a> StanzaEngine<'a> {
    /// Build an engine for one hymn. Fails if the canonical meter has no
    /// indentation rule.
    pub fn new(
        collection: Collection,
        block: &'a HymnBlock,
        meter: &'a MeterDescriptor,
    ) -> Result<Self, MeterError> {
        let rule = indent_rules::rule_for(&meter.canonical)?;
        let layout_exception = record_matcher::layout_exception(collection, &block.number);
        Ok(StanzaEngine {
            collection,
            block,
            meter,
            rule,
            layout_exception,
        })
    }

    /// The verse lines of this hymn, after the layout offset.
    ///
    /// By default the first body line is the blank separator under the title
    /// and is skipped; exception hymns start their verse directly under the
    /// title.
    fn verse_lines(&self) -> &[String] {
        if self.layout_exception || self.block.body.is_empty() {
            &self.block.body
        } else {
            &self.block.body[1..]
        }
    }

    // A doubled transcription is signalled by the meter notation itself or,
    // when the notation carries no flag, by the per-collection registry. The
    // two signals never stack.
    fn doubling_applies(&self) -> bool {
        if self.meter.doubled {
            true
        } else {
            doubled_hymns::is_doubled(self.collection, &self.block.number)
        }
    }

    /// Check one closed stanza against the meter's nominal line count
    fn verify_stanza(&self, ordinal: usize, line_count: usize) -> Result<(), StanzaError> {
        let actual = if self.doubling_applies() {
            line_count / 2
        } else {
            line_count
        };
        let expected = self.meter.line_count();
        if actual != expected {
            return Err(StanzaError::LineCountMismatch {
                hymn: self.block.number.clone(),
                stanza: ordinal,
                actual,
                expected,
            });
        }
        Ok(())
    }

    /// Emit the whole hymn: section opening, header block, one section per
    /// stanza, closing tag.
    pub fn emit_hymn<E: Emitter>(&self, author: Author, emitter: &mut E) -> Result<(), AppError> {
        emitter.emit(&markup_emitter::hymn_open(
            self.collection,
            self.block.slug(),
        ))?;
        emitter.emit(&markup_emitter::hymn_header(
            &self.block.number,
            &self.block.title,
            author,
            &self.block.reference,
        ))?;
        self.emit_stanzas(emitter)?;
        emitter.emit(markup_emitter::hymn_close())?;
        Ok(())
    }

    /// Walk the verse lines: every non-blank line is emitted immediately with
    /// its position's indent level; a blank line closes the stanza, which is
    /// validated and followed by the next stanza's header; the end of the
    /// block closes the final stanza.
    fn emit_stanzas<E: Emitter>(&self, emitter: &mut E) -> Result<(), AppError> {
        let verse = self.verse_lines();

        let mut stanza_count = 0;
        let mut line_count = 0;

        emitter.emit(&markup_emitter::stanza_open(
            self.collection,
            self.block.slug(),
            1,
            roman_numeral(&self.block.number, 1)?,
        ))?;

        for line in verse {
            if line.is_empty() {
                stanza_count += 1;
                self.verify_stanza(stanza_count, line_count)?;
                emitter.emit(markup_emitter::stanza_close())?;
                emitter.emit(&markup_emitter::stanza_open(
                    self.collection,
                    self.block.slug(),
                    stanza_count + 1,
                    roman_numeral(&self.block.number, stanza_count + 1)?,
                ))?;
                line_count = 0;
            } else {
                line_count += 1;
                let level = self.rule.level(line_count);
                emitter.emit(&markup_emitter::line_span(line, level))?;
            }
        }

        // The block end closes the last stanza
        stanza_count += 1;
        self.verify_stanza(stanza_count, line_count)?;
        emitter.emit(markup_emitter::stanza_close())?;

        debug!(
            "Hymn {}: {} stanzas of {} lines ({})",
            self.block.number,
            stanza_count,
            self.meter.line_count(),
            self.meter.canonical
        );
        Ok(())
    }
}

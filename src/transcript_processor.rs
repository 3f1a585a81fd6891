use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TranscriptError;

// @module: Transcript block reading

// @const: Hymn number line, e.g. "12."
static NUMBER_LINE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.$").unwrap());

// @const: Block delimiters in the raw transcript
const BLOCK_START: &str = "<h>";
const BLOCK_END: &str = "</h>";

// The title line separates the hymn title from its scripture reference with
// an em-dash. Only the LAST em-dash splits: reference text may itself carry
// dash-like punctuation.
const EM_DASH: &str = "\u{2014}";

// @struct: One hymn block from the transcript
#[derive(Debug, Clone)]
pub struct HymnBlock {
    // @field: Hymn number label, e.g. "12.", kept verbatim
    pub number: String,

    // @field: Title, apostrophes normalized, trailing period stripped
    pub title: String,

    // @field: Scripture reference from the title line, may be empty
    pub reference: String,

    // @field: Every raw line between the title line and the end marker
    pub body: Vec<String>,
}

impl HymnBlock {
    /// Hymn number without its trailing period, for use in section ids
    pub fn slug(&self) -> &str {
        self.number.strip_suffix('.').unwrap_or(&self.number)
    }
}

/// Split a title line at the last em-dash into (title, scripture reference).
/// A line with no em-dash is all title.
pub fn split_title_line(line: &str) -> (String, String) {
    match line.rfind(EM_DASH) {
        Some(index) => {
            let left = line[..index].trim().to_string();
            let right = line[index + EM_DASH.len()..].trim().to_string();
            (left, right)
        }
        None => (line.trim().to_string(), String::new()),
    }
}

/// Replace straight apostrophes with the typographic form used in the book
pub fn normalize_apostrophes(text: &str) -> String {
    text.replace('\'', "\u{2019}")
}

/// Parse the whole transcript into hymn blocks, in transcript order.
///
/// Blocks are delimited by `<h>`/`</h>` markers. The first line of a block
/// is the hymn number, the second is the title/reference line, and the rest
/// is the body: verse lines and the blank lines that separate stanzas. Lines
/// outside any block are ignored.
pub fn parse_transcript(content: &str) -> Result<Vec<HymnBlock>, TranscriptError> {
    let mut blocks = Vec::new();

    // State for the block under construction
    let mut block_start_line = 0;
    let mut in_block = false;
    let mut current_number: Option<String> = None;
    let mut current_title_line: Option<String> = None;
    let mut current_body: Vec<String> = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;

        if line == BLOCK_START {
            if in_block {
                // A new block opened while the previous one was still being read
                return Err(TranscriptError::Unterminated {
                    number: current_number.unwrap_or_else(|| format!("at line {}", block_start_line)),
                });
            }
            in_block = true;
            block_start_line = line_number;
            continue;
        }

        if line == BLOCK_END {
            if !in_block {
                // Stray end marker between blocks, nothing to close
                continue;
            }

            let number = current_number.take().ok_or(TranscriptError::MissingNumber {
                line: block_start_line,
            })?;
            let title_line = current_title_line
                .take()
                .ok_or_else(|| TranscriptError::MissingTitle {
                    number: number.clone(),
                })?;

            let (raw_title, reference) = split_title_line(&title_line);
            let title = normalize_apostrophes(&raw_title);
            let title = title.strip_suffix('.').unwrap_or(&title).to_string();

            blocks.push(HymnBlock {
                number,
                title,
                reference,
                body: std::mem::take(&mut current_body),
            });
            in_block = false;
            continue;
        }

        if !in_block {
            continue;
        }

        if current_number.is_none() {
            if !NUMBER_LINE_REGEX.is_match(line.trim()) {
                return Err(TranscriptError::InvalidNumber {
                    line: line.to_string(),
                });
            }
            current_number = Some(line.trim().to_string());
        } else if current_title_line.is_none() {
            current_title_line = Some(line.to_string());
        } else {
            current_body.push(line.to_string());
        }
    }

    if in_block {
        return Err(match current_number {
            Some(number) => TranscriptError::Unterminated { number },
            None => TranscriptError::MissingNumber {
                line: block_start_line,
            },
        });
    }

    Ok(blocks)
}

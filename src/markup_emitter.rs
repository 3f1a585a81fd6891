use std::io::Write;

use anyhow::{Context, Result};

use crate::app_config::Collection;
use crate::record_matcher::Author;

// @module: Markup formatting and output

// Define the XML chunk as a constant raw string literal
const DOCUMENT_HEADER: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops" epub:prefix="z3998: http://www.daisy.org/z3998/2012/vocab/structure/, se: https://standardebooks.org/vocab/1.0" xml:lang="en-GB">
<head>
	<title>$BOOKNUM$</title>
	<link href="../css/core.css" rel="stylesheet" type="text/css"/>
	<link href="../css/local.css" rel="stylesheet" type="text/css"/>
</head>
<body epub:type="bodymatter z3998:fiction">
<section id="$BOOKDASHNUM$" epub:type="part">
"#;

const DOCUMENT_FOOTER: &str = "</section>
</body>
</html>
";

/// Receives the formatted markup strings, in emission order.
///
/// The processing pass only ever appends; everything downstream of this
/// trait is presentation plumbing.
pub trait Emitter {
    /// Append one formatted chunk to the output
    fn emit(&mut self, markup: &str) -> Result<()>;
}

/// Emitter writing to an underlying stream
pub struct StreamEmitter<W: Write> {
    out: W,
}

impl<W: Write> StreamEmitter<W> {
    /// Wrap a writer; callers usually hand in a buffered file
    pub fn new(out: W) -> Self {
        StreamEmitter { out }
    }

    /// Flush the underlying stream
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().context("Could not flush output stream")
    }
}

impl<W: Write> Emitter for StreamEmitter<W> {
    fn emit(&mut self, markup: &str) -> Result<()> {
        self.out
            .write_all(markup.as_bytes())
            .context("Could not write to output stream")
    }
}

/// In-memory emitter collecting chunks - used by tests
#[derive(Debug, Default)]
pub struct BufferEmitter {
    /// Every chunk, in emission order
    pub chunks: Vec<String>,
}

impl BufferEmitter {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    /// The whole emitted document as one string
    #[allow(dead_code)]
    pub fn text(&self) -> String {
        self.chunks.concat()
    }
}

impl Emitter for BufferEmitter {
    fn emit(&mut self, markup: &str) -> Result<()> {
        self.chunks.push(markup.to_string());
        Ok(())
    }
}

/// Document header with the book title and part id substituted
pub fn document_header(collection: Collection) -> String {
    let book_title = format!("BOOK {}", collection.roman());
    DOCUMENT_HEADER
        .replacen("$BOOKNUM$", &book_title, 1)
        .replacen("$BOOKDASHNUM$", &collection.to_string(), 1)
}

/// Document footer closing the part section
pub fn document_footer() -> &'static str {
    DOCUMENT_FOOTER
}

/// Opening tag of a hymn section
pub fn hymn_open(collection: Collection, slug: &str) -> String {
    format!(
        "<section id=\"hymn-{}-{}\" epub:type=\"z3998:hymn\">\n",
        collection.number(),
        slug
    )
}

/// Hymn header block: ordinal, title, contributor line, scripture reference.
/// The title gets its trailing period back here; the block reader stripped
/// it for comparison against the metadata table.
pub fn hymn_header(number: &str, title: &str, author: Author, reference: &str) -> String {
    let mut header = String::new();
    header.push_str("  <header>\n");
    header.push_str("  <hgroup>\n");
    header.push_str(&format!("    <h3 epub:type=\"ordinal\">{}</h3>\n", number));
    header.push_str(&format!("    <p epub:type=\"title\">{}.</p>\n", title));
    header.push_str("  </hgroup>\n");
    header.push_str(&format!(
        "  <p epub:type=\"z3998:contributors\">By {}</p>\n",
        author.display_name()
    ));
    header.push_str(&format!("  <p epub:type=\"bridgehead\">{}</p>\n", reference));
    header.push_str("  </header>\n");
    header
}

/// Closing tag of a hymn section
pub fn hymn_close() -> &'static str {
    "</section>\n"
}

/// Opening of a stanza section, with its Roman numeral heading
pub fn stanza_open(collection: Collection, slug: &str, ordinal: usize, numeral: &str) -> String {
    let mut stanza = String::new();
    stanza.push_str(&format!(
        "<section id=\"stanza-{}-{}-{}\">\n",
        collection.number(),
        slug,
        ordinal
    ));
    stanza.push_str(" \t<header>\n");
    stanza.push_str(&format!(" \t\t<p>{}</p>\n", numeral));
    stanza.push_str(" \t</header>\n");
    stanza.push_str(" \t<p>\n");
    stanza
}

/// Closing of a stanza section
pub fn stanza_close() -> &'static str {
    " \t</p>\n \t</section>\n"
}

/// One verse line as a span carrying its indentation class
pub fn line_span(line: &str, level: u8) -> String {
    match level {
        1 => format!("      <span class=\"i1\">{}</span>\n", line),
        2 => format!("      <span class=\"i2\">{}</span>\n", line),
        _ => format!("    <span>{}</span>\n", line),
    }
}

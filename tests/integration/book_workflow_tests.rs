/*!
 * End-to-end book conversion tests
 */

use hymnbook::app_config::{Collection, Config};
use hymnbook::app_controller::{Controller, RunOptions};
use hymnbook::markup_emitter::BufferEmitter;
use hymnbook::record_matcher::MetadataTable;
use hymnbook::transcript_processor::parse_transcript;

use crate::common;

/// A full run over files on disk: transcript in, validated markup out
#[test]
fn test_run_withSampleBook_shouldWriteDocument() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();

    common::create_test_file(&dir, "book-1.xhtml", common::sample_transcript()).unwrap();
    let csv_path = common::create_test_metadata_csv(
        &dir,
        "olney-book-1.csv",
        &[
            common::metadata_header(),
            common::metadata_row("Amazing grace", "No", "8,6,8,6"),
            common::metadata_row("Walking with God", "Yes", "8,6,8,6"),
        ],
    )
    .unwrap();

    let base_name = dir.join("book-1").to_string_lossy().to_string();
    let output_path = dir.join("book-1.txt");

    let controller = Controller::new_for_test().unwrap();
    controller
        .run(&RunOptions {
            base_name,
            csv_path: Some(csv_path),
            output_path: Some(output_path.clone()),
        })
        .unwrap();

    let output = std::fs::read_to_string(output_path).unwrap();

    // Document frame
    assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(output.contains("<title>BOOK I</title>"));
    assert!(output.contains("<section id=\"book-1\" epub:type=\"part\">"));
    assert!(output.trim_end().ends_with("</html>"));

    // Both hymns, with their attributions
    assert!(output.contains("<section id=\"hymn-1-1\" epub:type=\"z3998:hymn\">"));
    assert!(output.contains("<section id=\"hymn-1-2\" epub:type=\"z3998:hymn\">"));
    assert!(output.contains("<p epub:type=\"title\">Amazing Grace.</p>"));
    assert!(output.contains("By Newton"));
    assert!(output.contains("By Cowper"));
    assert!(output.contains("<p epub:type=\"bridgehead\">Genesis 5:24</p>"));

    // Hymn 1 has two stanzas, hymn 2 one
    assert!(output.contains("id=\"stanza-1-1-2\""));
    assert!(!output.contains("id=\"stanza-1-2-2\""));

    // Common meter indentation
    assert!(output.contains("      <span class=\"i1\">That saved a wretch like me!</span>"));
}

/// A title that disagrees with the table aborts the run with both strings
#[test]
fn test_process_withWrongMetadataTitle_shouldFail() {
    let blocks = parse_transcript(common::sample_transcript()).unwrap();
    let table = MetadataTable::from_rows(
        vec![
            common::metadata_header(),
            common::metadata_row("Amazing grace", "No", "8,6,8,6"),
            common::metadata_row("Walking with Godd", "Yes", "8,6,8,6"),
        ],
        common::default_layout(),
    );

    let controller = Controller::new_for_test().unwrap();
    let mut emitter = BufferEmitter::new();
    let error = controller
        .process(Collection::BookOne, &blocks, table, &mut emitter)
        .unwrap_err();

    let message = format!("{:#}", error);
    assert!(message.contains("Title mismatch"));
    assert!(message.contains("Walking with God"));
    assert!(message.contains("Walking with Godd"));
}

/// Book III exception hymns skip the title check and the separator line, and
/// the row cursor still advances once per block
#[test]
fn test_process_withBookThreeExceptionHymn_shouldBypassTitleAndStayAligned() {
    // 89. is on the exception list (verse directly under the title, title not
    // comparable) and in the doubled registry; 88. is a plain hymn.
    let transcript = "<h>\n\
         89.\n\
         Self-acquaintance.\u{2014}Job 42:5,6\n\
         a1\na2\na3\na4\na5\na6\na7\na8\n\
         </h>\n\
         <h>\n\
         88.\n\
         The Saints Rest.\u{2014}Hebrews 4:9\n\
         \n\
         b1\nb2\nb3\nb4\n\
         </h>\n";
    let blocks = parse_transcript(transcript).unwrap();

    let table = MetadataTable::from_rows(
        vec![
            common::metadata_header(),
            // The table spells this title differently; the bypass must not care
            common::metadata_row("A very different title", "Yes", "8,6,8,6"),
            common::metadata_row("The Saints Rest", "No", "8,6,8,6"),
        ],
        common::default_layout(),
    );

    let controller = Controller::new_for_test().unwrap();
    let mut emitter = BufferEmitter::new();
    controller
        .process(Collection::BookThree, &blocks, table, &mut emitter)
        .unwrap();

    let text = emitter.text();
    assert!(text.contains("<section id=\"hymn-3-89\" epub:type=\"z3998:hymn\">"));
    assert!(text.contains("<section id=\"hymn-3-88\" epub:type=\"z3998:hymn\">"));
    // 89. took row 1 (Cowper), 88. took row 2 (Newton): one row per block
    assert!(text.contains("By Cowper"));
    assert!(text.contains("By Newton"));
    // All eight doubled lines of 89. were emitted
    for line in ["a1", "a8", "b1", "b4"] {
        assert!(text.contains(&format!(">{}<", line)), "missing {}", line);
    }
}

/// More transcript blocks than metadata rows is fatal
#[test]
fn test_process_withExhaustedTable_shouldFail() {
    let blocks = parse_transcript(common::sample_transcript()).unwrap();
    let table = MetadataTable::from_rows(
        vec![
            common::metadata_header(),
            common::metadata_row("Amazing grace", "No", "8,6,8,6"),
        ],
        common::default_layout(),
    );

    let controller = Controller::new_for_test().unwrap();
    let mut emitter = BufferEmitter::new();
    let error = controller
        .process(Collection::BookOne, &blocks, table, &mut emitter)
        .unwrap_err();

    assert!(format!("{:#}", error).contains("exhausted"));
}

/// A bad author flag in the table is fatal and names the hymn
#[test]
fn test_process_withBadAuthorFlag_shouldFail() {
    let blocks = parse_transcript(common::sample_transcript()).unwrap();
    let table = MetadataTable::from_rows(
        vec![
            common::metadata_header(),
            common::metadata_row("Amazing grace", "Perhaps", "8,6,8,6"),
            common::metadata_row("Walking with God", "Yes", "8,6,8,6"),
        ],
        common::default_layout(),
    );

    let controller = Controller::new_for_test().unwrap();
    let mut emitter = BufferEmitter::new();
    let error = controller
        .process(Collection::BookOne, &blocks, table, &mut emitter)
        .unwrap_err();

    let message = format!("{:#}", error);
    assert!(message.contains("Hymn 1."));
    assert!(message.contains("Perhaps"));
}

/// Test Config default flowing into the controller
#[test]
fn test_controller_withDefaultConfig_shouldInitialize() {
    let controller = Controller::with_config(Config::default());
    assert!(controller.is_ok());
}

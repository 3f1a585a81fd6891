/*!
 * Tests for meter notation parsing
 */

use hymnbook::errors::MeterError;
use hymnbook::meter::{MeterDescriptor, canonicalize};

/// Test parsing a plain notation
#[test]
fn test_parse_withPlainNotation_shouldReturnUnitsInOrder() {
    let meter = MeterDescriptor::parse("8,6,8,6").unwrap();

    assert_eq!(meter.units, vec![8, 6, 8, 6]);
    assert_eq!(meter.line_count(), 4);
    assert!(!meter.doubled);
    assert_eq!(meter.canonical, "8,6,8,6");
}

/// Test the doubling marker
#[test]
fn test_parse_withDoublingMarker_shouldSetFlagAndStripMarker() {
    let meter = MeterDescriptor::parse("8,6,8,6D").unwrap();

    assert_eq!(meter.units, vec![8, 6, 8, 6]);
    assert!(meter.doubled);
    assert_eq!(meter.canonical, "8,6,8,6");
}

/// Test the ignorable trailing marker
#[test]
fn test_parse_withIgnorableMarker_shouldStripWithoutDoubling() {
    let meter = MeterDescriptor::parse("7,6,7,6a").unwrap();

    assert_eq!(meter.units, vec![7, 6, 7, 6]);
    assert!(!meter.doubled);
    assert_eq!(meter.canonical, "7,6,7,6");
}

/// The markers strip in source order: `a` first, then `D`. The doubling flag
/// reads the raw notation's final character, so `Da` does not set it.
#[test]
fn test_parse_withBothMarkers_shouldStripBothButNotDouble() {
    let meter = MeterDescriptor::parse("8,6,8,6Da").unwrap();

    assert_eq!(meter.units, vec![8, 6, 8, 6]);
    assert!(!meter.doubled);
    assert_eq!(meter.canonical, "8,6,8,6");
}

/// Test parse failure on a non-numeric segment
#[test]
fn test_parse_withNonNumericSegment_shouldFail() {
    let result = MeterDescriptor::parse("3,x,3");

    match result {
        Err(MeterError::MalformedNotation { segment, notation }) => {
            assert_eq!(segment, "x");
            assert_eq!(notation, "3,x,3");
        }
        other => panic!("Expected MalformedNotation, got {:?}", other),
    }
}

/// Test parse failure on an empty notation
#[test]
fn test_parse_withEmptyNotation_shouldFail() {
    assert!(MeterDescriptor::parse("").is_err());
}

/// Segments may carry surrounding whitespace
#[test]
fn test_parse_withWhitespaceSegments_shouldTrim() {
    let meter = MeterDescriptor::parse("8, 6, 8, 6").unwrap();
    assert_eq!(meter.units, vec![8, 6, 8, 6]);
}

/// Canonicalization is idempotent: parsing a canonical form yields the same
/// unit list, a clear flag, and the same canonical string
#[test]
fn test_parse_withCanonicalForm_shouldBeIdempotent() {
    for raw in ["8,6,8,6D", "6,6,6,6,7,7a", "10,10,11,11"] {
        let first = MeterDescriptor::parse(raw).unwrap();
        let again = MeterDescriptor::parse(&first.canonical).unwrap();

        assert_eq!(again.units, first.units);
        assert!(!again.doubled);
        assert_eq!(again.canonical, first.canonical);
    }
}

/// Test canonicalize on its own
#[test]
fn test_canonicalize_withMarkers_shouldStripAtMostOneEach() {
    assert_eq!(canonicalize("8,6,8,6"), "8,6,8,6");
    assert_eq!(canonicalize("8,6,8,6D"), "8,6,8,6");
    assert_eq!(canonicalize("8,6,8,6a"), "8,6,8,6");
    assert_eq!(canonicalize("8,6,8,6Da"), "8,6,8,6");
    // Only one of each marker strips
    assert_eq!(canonicalize("8,6,8,6DD"), "8,6,8,6D");
}

/// Display re-attaches the doubling marker
#[test]
fn test_display_withDoubledMeter_shouldShowMarker() {
    let meter = MeterDescriptor::parse("8,7,8,7D").unwrap();
    assert_eq!(meter.to_string(), "8,7,8,7D");

    let plain = MeterDescriptor::parse("8,7,8,7").unwrap();
    assert_eq!(plain.to_string(), "8,7,8,7");
}

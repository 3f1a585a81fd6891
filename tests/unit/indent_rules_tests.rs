/*!
 * Tests for the indentation rule table
 */

use hymnbook::errors::MeterError;
use hymnbook::indent_rules::{indent_level, rule_for, vocabulary};

/// Collect the levels a meter assigns to positions 1..=count
fn levels(canonical: &str, count: usize) -> Vec<u8> {
    (1..=count)
        .map(|position| indent_level(canonical, position).unwrap())
        .collect()
}

/// Test the alternating common-meter pattern
#[test]
fn test_indent_withCommonMeter_shouldAlternate() {
    assert_eq!(levels("8,6,8,6", 4), vec![0, 1, 0, 1]);
    assert_eq!(levels("7,6,7,6", 4), vec![0, 1, 0, 1]);
}

/// Test the flush meters
#[test]
fn test_indent_withFlushMeters_shouldStayAtZero() {
    for canonical in [
        "8,8,8,8",
        "7,7,7,7",
        "10,10,11,11",
        "7,7,7,7,7,7",
        "8,7,8,7",
        "8,8,8,8,8,8",
        "10,10,10,10",
        "8,8,8",
        "7,6,7,6,7,7",
    ] {
        for position in 1..=8 {
            assert_eq!(
                indent_level(canonical, position).unwrap(),
                0,
                "meter {} position {}",
                canonical,
                position
            );
        }
    }
}

/// Test the threshold meters: the first four lines are indented
#[test]
fn test_indent_withThresholdMeters_shouldIndentLeadingLines() {
    assert_eq!(levels("6,6,6,6,8,8", 6), vec![1, 1, 1, 1, 0, 0]);
    assert_eq!(levels("6,6,6,6,7,7", 6), vec![1, 1, 1, 1, 0, 0]);
}

/// Positions outside the indented set fall back to flush, including position
/// five and beyond
#[test]
fn test_indent_withPositionOutsideSet_shouldBeFlush() {
    assert_eq!(indent_level("6,6,6,6,7,7", 5).unwrap(), 0);
    assert_eq!(indent_level("6,6,6,6,7,7", 7).unwrap(), 0);
}

/// Test the explicit position-set meters
#[test]
fn test_indent_withExplicitSets_shouldMatchTable() {
    assert_eq!(levels("6,6,8,6", 4), vec![1, 1, 0, 1]);
    assert_eq!(levels("8,7,8,7,7,7", 6), vec![0, 1, 0, 1, 1, 1]);
    assert_eq!(levels("7,6,7,6,7,7,7,6", 8), vec![0, 1, 0, 1, 0, 0, 0, 1]);
    assert_eq!(levels("8,8,6,8,8,6", 6), vec![0, 0, 1, 0, 0, 1]);
}

/// The one meter with a second indent level
#[test]
fn test_indent_withIrregularMeter_shouldUseSecondLevel() {
    assert_eq!(levels("8,7,8,7,11", 5), vec![1, 2, 1, 2, 0]);
}

/// Test lookup failure for an unknown meter
#[test]
fn test_rule_withUnknownMeter_shouldFailUnsupported() {
    match rule_for("9,9,9") {
        Err(MeterError::Unsupported { notation }) => assert_eq!(notation, "9,9,9"),
        other => panic!("Expected Unsupported, got {:?}", other),
    }
}

/// Indent level is a pure function of meter and position
#[test]
fn test_indent_withRepeatedLookups_shouldBeStable() {
    for canonical in vocabulary() {
        for position in 1..=10 {
            let first = indent_level(canonical, position).unwrap();
            let second = indent_level(canonical, position).unwrap();
            assert_eq!(first, second);
            assert!(first <= 2);
        }
    }
}

/// The table is the closed vocabulary of the three books
#[test]
fn test_vocabulary_withFullTable_shouldHoldEighteenMeters() {
    assert_eq!(vocabulary().len(), 18);
}

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::errors::MeterError;

// @module: Indentation rules keyed by canonical meter notation

/// How the verse lines of one meter are indented on the rendered page.
/// Indent levels are 0 (flush), 1 or 2; a level is a pure function of the
/// canonical meter and the 1-based line position within the stanza.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentRule {
    /// Every line flush left
    Flush,

    /// Even positions indented one level
    AlternateEven,

    /// The first `n` positions indented one level, the rest flush
    LeadingIndent(usize),

    /// The listed positions indented one level, all others flush
    Positions(&'static [usize]),

    /// Explicit per-position levels; unlisted positions are flush
    Levels(&'static [(usize, u8)]),
}

impl IndentRule {
    /// Indentation level for a 1-based line position within a stanza
    pub fn level(&self, position: usize) -> u8 {
        match self {
            IndentRule::Flush => 0,
            IndentRule::AlternateEven => {
                if position % 2 == 0 {
                    1
                } else {
                    0
                }
            }
            IndentRule::LeadingIndent(n) => {
                if position <= *n {
                    1
                } else {
                    0
                }
            }
            IndentRule::Positions(set) => {
                if set.contains(&position) {
                    1
                } else {
                    0
                }
            }
            IndentRule::Levels(levels) => levels
                .iter()
                .find(|(p, _)| *p == position)
                .map(|(_, level)| *level)
                .unwrap_or(0),
        }
    }
}

// The closed meter vocabulary. These are all the meters that occur across
// the three books; a canonical notation outside this table is a data error,
// not a formatting request.
static INDENT_RULES: Lazy<HashMap<&'static str, IndentRule>> = Lazy::new(|| {
    HashMap::from([
        ("8,6,8,6", IndentRule::AlternateEven),
        ("7,6,7,6", IndentRule::AlternateEven),
        ("8,8,8,8", IndentRule::Flush),
        ("7,7,7,7", IndentRule::Flush),
        ("10,10,11,11", IndentRule::Flush),
        ("7,7,7,7,7,7", IndentRule::Flush),
        ("8,7,8,7", IndentRule::Flush),
        ("8,8,8,8,8,8", IndentRule::Flush),
        ("10,10,10,10", IndentRule::Flush),
        ("8,8,8", IndentRule::Flush),
        ("7,6,7,6,7,7", IndentRule::Flush),
        ("6,6,6,6,8,8", IndentRule::LeadingIndent(4)),
        ("6,6,6,6,7,7", IndentRule::LeadingIndent(4)),
        ("6,6,8,6", IndentRule::Positions(&[1, 2, 4])),
        ("8,7,8,7,7,7", IndentRule::Positions(&[2, 4, 5, 6])),
        ("7,6,7,6,7,7,7,6", IndentRule::Positions(&[2, 4, 8])),
        ("8,8,6,8,8,6", IndentRule::Positions(&[3, 6])),
        ("8,7,8,7,11", IndentRule::Levels(&[(1, 1), (2, 2), (3, 1), (4, 2)])),
    ])
});

/// Look up the indentation rule for a canonical meter notation
pub fn rule_for(canonical: &str) -> Result<IndentRule, MeterError> {
    INDENT_RULES
        .get(canonical)
        .copied()
        .ok_or_else(|| MeterError::Unsupported {
            notation: canonical.to_string(),
        })
}

/// Indentation level for one line position under a canonical meter
pub fn indent_level(canonical: &str, position: usize) -> Result<u8, MeterError> {
    Ok(rule_for(canonical)?.level(position))
}

/// All canonical notations in the vocabulary - used by tests
#[allow(dead_code)]
pub fn vocabulary() -> Vec<&'static str> {
    INDENT_RULES.keys().copied().collect()
}

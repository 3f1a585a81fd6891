use crate::errors::MeterError;

/// Meter notation utilities
///
/// A hymn's meter is recorded in the metadata table as a compact
/// comma-separated notation such as "8,6,8,6": one syllable count per
/// transcript line of a stanza. The notation may carry a trailing doubling
/// marker `D` (the stanza is transcribed at twice the nominal line count)
/// and/or a trailing `a` marker, which carries no structural meaning and is
/// only stripped. The `a` marker is stripped before the `D` marker; the
/// doubling flag is read from the raw notation's final character, so a
/// notation ending in `Da` canonicalizes cleanly but does not set the flag.
/// Parsed form of a meter notation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeterDescriptor {
    // @field: Syllable counts per line, in stanza order
    pub units: Vec<u32>,

    // @field: Raw notation ended in the doubling marker
    pub doubled: bool,

    // @field: Notation with both trailing markers stripped
    pub canonical: String,
}

impl MeterDescriptor {
    /// Parse a raw meter notation string from the metadata table.
    pub fn parse(raw: &str) -> Result<Self, MeterError> {
        let doubled = raw.ends_with('D');
        let canonical = canonicalize(raw);

        let mut units = Vec::new();
        for segment in canonical.split(',') {
            let trimmed = segment.trim();
            let value: u32 = trimmed.parse().map_err(|_| MeterError::MalformedNotation {
                segment: trimmed.to_string(),
                notation: raw.to_string(),
            })?;
            units.push(value);
        }

        Ok(MeterDescriptor {
            units,
            doubled,
            canonical,
        })
    }

    /// Nominal number of transcript lines per stanza
    pub fn line_count(&self) -> usize {
        self.units.len()
    }
}

impl std::fmt::Display for MeterDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.doubled {
            write!(f, "{}D", self.canonical)
        } else {
            write!(f, "{}", self.canonical)
        }
    }
}

/// Strip the trailing `a` marker, then the trailing `D` marker, at most one
/// of each. The result is the lookup key for the indentation rule table.
pub fn canonicalize(raw: &str) -> String {
    let stripped = raw.strip_suffix('a').unwrap_or(raw);
    let stripped = stripped.strip_suffix('D').unwrap_or(stripped);
    stripped.to_string()
}

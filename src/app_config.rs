use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Metadata table layout
    #[serde(default)]
    pub metadata: MetadataConfig,

    /// Prefix of the metadata CSV filename; the collection base name is appended
    #[serde(default = "default_csv_prefix")]
    pub csv_prefix: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// One of the three hymnals processed by this tool
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    // @collection: Book I
    BookOne,
    // @collection: Book II
    BookTwo,
    // @collection: Book III
    BookThree,
}

impl Collection {
    /// Derive the collection from a transcript base name such as "book-1".
    /// The trailing character selects the book; anything but 1, 2 or 3 is fatal.
    pub fn from_base_name(base_name: &str) -> Result<Self> {
        match base_name.chars().last() {
            Some('1') => Ok(Self::BookOne),
            Some('2') => Ok(Self::BookTwo),
            Some('3') => Ok(Self::BookThree),
            _ => Err(anyhow!(
                "Book number must be 1, 2, or 3; base name was: {}",
                base_name
            )),
        }
    }

    // @returns: Book number as printed in section ids
    pub fn number(&self) -> u8 {
        match self {
            Self::BookOne => 1,
            Self::BookTwo => 2,
            Self::BookThree => 3,
        }
    }

    // @returns: Roman numeral used in the book title
    pub fn roman(&self) -> &'static str {
        match self {
            Self::BookOne => "I",
            Self::BookTwo => "II",
            Self::BookThree => "III",
        }
    }
}

// Implement Display trait for Collection
impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "book-{}", self.number())
    }
}

// Implement FromStr trait for Collection
impl std::str::FromStr for Collection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_base_name(s)
    }
}

/// Column layout of the metadata CSV
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MetadataConfig {
    /// Column holding the hymn title
    #[serde(default = "default_title_column")]
    pub title_column: usize,

    /// Column holding the author flag
    #[serde(default = "default_author_flag_column")]
    pub author_flag_column: usize,

    /// Column holding the meter notation
    #[serde(default = "default_meter_column")]
    pub meter_column: usize,

    /// Rows to skip before the first hymn row
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            title_column: default_title_column(),
            author_flag_column: default_author_flag_column(),
            meter_column: default_meter_column(),
            header_rows: default_header_rows(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_title_column() -> usize {
    0
}

fn default_author_flag_column() -> usize {
    15
}

fn default_meter_column() -> usize {
    20
}

fn default_header_rows() -> usize {
    1
}

fn default_csv_prefix() -> String {
    "olney-".to_string()
}

impl Config {
    /// Validate the configuration after loading and CLI overrides
    pub fn validate(&self) -> Result<()> {
        // The three metadata columns must be distinct positions
        let m = &self.metadata;
        if m.title_column == m.meter_column
            || m.title_column == m.author_flag_column
            || m.meter_column == m.author_flag_column
        {
            return Err(anyhow!(
                "Metadata columns must be distinct (title: {}, author flag: {}, meter: {})",
                m.title_column,
                m.author_flag_column,
                m.meter_column
            ));
        }

        if m.header_rows == 0 {
            return Err(anyhow!(
                "Metadata tables carry a header row; header_rows must be at least 1"
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            metadata: MetadataConfig::default(),
            csv_prefix: default_csv_prefix(),
            log_level: LogLevel::default(),
        }
    }
}

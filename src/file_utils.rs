use anyhow::{Context, Result};
use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Create a file for streaming output, truncating any existing one
    pub fn create_output<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)?;
        }

        let file = File::create(path)
            .with_context(|| format!("Could not create output file: {:?}", path))?;
        Ok(BufWriter::new(file))
    }
}

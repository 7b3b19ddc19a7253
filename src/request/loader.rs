//! Load triangle datasets from disk and inspect their header row

use super::{TriangleFile, TriangleUploadRequest};
use csv::ReaderBuilder;
use std::path::Path;

/// Read a dataset from disk. The file name (without directories) is kept as
/// upload metadata.
pub fn load_triangle_file<P: AsRef<Path>>(path: P) -> std::io::Result<TriangleFile> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.csv".to_string());

    log::debug!("Loaded {} ({} bytes)", name, bytes.len());
    Ok(TriangleFile::new(name, bytes))
}

/// Column names from the first CSV record
pub fn read_header_columns(bytes: &[u8]) -> Result<Vec<String>, csv::Error> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);
    let headers = reader.headers()?;
    Ok(headers.iter().map(|h| h.trim().to_string()).collect())
}

impl TriangleUploadRequest {
    /// Configured columns that the dataset header does not contain. Both
    /// sides are compared with surrounding whitespace trimmed.
    ///
    /// Advisory only: an unreadable header yields no findings, the service
    /// remains the authority on the dataset.
    pub fn missing_columns(&self) -> Vec<String> {
        let headers = match read_header_columns(self.file().bytes()) {
            Ok(h) => h,
            Err(e) => {
                log::debug!("Could not read CSV header of {}: {}", self.file().name(), e);
                return Vec::new();
            }
        };

        self.columns()
            .into_iter()
            .filter(|col| !headers.iter().any(|h| h == col.trim()))
            .map(|col| col.to_string())
            .collect()
    }
}

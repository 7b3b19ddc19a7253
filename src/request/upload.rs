//! Upload request data structures and the pre-flight builder

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default column holding the origin period
pub const DEFAULT_ORIGIN_COLUMN: &str = "origin";
/// Default column holding the development period
pub const DEFAULT_DEV_COLUMN: &str = "dev";
/// Default column holding the observed value
pub const DEFAULT_VALUE_COLUMN: &str = "value";

/// Pre-flight validation failures. Raised before any network activity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a CSV file")]
    NoFileSelected,
    #[error("Selected file '{0}' is empty")]
    EmptyFile(String),
}

/// Uploaded tabular dataset: an owned byte buffer plus its metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriangleFile {
    name: String,
    bytes: Vec<u8>,
}

impl TriangleFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size of the payload in bytes
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Hand the buffer over to an encoder without copying it
    pub fn into_parts(self) -> (String, Vec<u8>) {
        (self.name, self.bytes)
    }
}

/// Raw form values as entered by the user. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    #[serde(default)]
    pub origin_col: Option<String>,
    #[serde(default)]
    pub dev_col: Option<String>,
    #[serde(default)]
    pub value_col: Option<String>,
    /// Cumulative switch as text ("true", "off", ...). Missing means cumulative.
    #[serde(default)]
    pub cumulative: Option<String>,
}

impl FormValues {
    /// Form values with an explicit cumulative switch and default columns
    pub fn with_cumulative(cumulative: bool) -> Self {
        Self {
            cumulative: Some(cumulative.to_string()),
            ..Default::default()
        }
    }
}

/// A normalized analysis request. Only `build` creates one, so a request
/// always carries a non-empty file and non-blank column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriangleUploadRequest {
    file: TriangleFile,
    origin_column: String,
    development_column: String,
    value_column: String,
    cumulative: bool,
}

impl TriangleUploadRequest {
    pub fn file(&self) -> &TriangleFile {
        &self.file
    }

    pub fn origin_column(&self) -> &str {
        &self.origin_column
    }

    pub fn development_column(&self) -> &str {
        &self.development_column
    }

    pub fn value_column(&self) -> &str {
        &self.value_column
    }

    pub fn cumulative(&self) -> bool {
        self.cumulative
    }

    /// Text fields in wire order, with the cumulative flag as "true"/"false"
    pub fn text_fields(&self) -> [(&'static str, String); 4] {
        [
            ("origin_col", self.origin_column.clone()),
            ("dev_col", self.development_column.clone()),
            ("value_col", self.value_column.clone()),
            ("cumulative", self.cumulative.to_string()),
        ]
    }

    /// Configured column names in origin/development/value order
    pub fn columns(&self) -> [&str; 3] {
        [
            self.origin_column.as_str(),
            self.development_column.as_str(),
            self.value_column.as_str(),
        ]
    }

    pub fn into_file(self) -> TriangleFile {
        self.file
    }
}

/// Validate the user's selection and build a sendable request
pub fn build(
    file: Option<TriangleFile>,
    form: &FormValues,
) -> Result<TriangleUploadRequest, ValidationError> {
    let file = file.ok_or(ValidationError::NoFileSelected)?;
    if file.size() == 0 {
        return Err(ValidationError::EmptyFile(file.name.clone()));
    }

    Ok(TriangleUploadRequest {
        file,
        origin_column: column_or_default(form.origin_col.as_deref(), DEFAULT_ORIGIN_COLUMN),
        development_column: column_or_default(form.dev_col.as_deref(), DEFAULT_DEV_COLUMN),
        value_column: column_or_default(form.value_col.as_deref(), DEFAULT_VALUE_COLUMN),
        cumulative: parse_cumulative(form.cumulative.as_deref()),
    })
}

fn column_or_default(value: Option<&str>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// Permissive: only an explicit false-equivalent turns the flag off
fn parse_cumulative(value: Option<&str>) -> bool {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) => !matches!(v.as_str(), "false" | "0" | "no" | "off"),
        None => true,
    }
}

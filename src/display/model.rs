//! Presentation-ready shapes

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use super::format::NOT_AVAILABLE;

/// A formatted value or an explicit "not available" marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayValue {
    Value(String),
    Unavailable,
}

impl DisplayValue {
    pub fn is_available(&self) -> bool {
        matches!(self, DisplayValue::Value(_))
    }
}

impl From<Option<String>> for DisplayValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(DisplayValue::Unavailable, DisplayValue::Value)
    }
}

/// Serialized as the rendered text, so JSON consumers see the marker too
impl Serialize for DisplayValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DisplayValue::Value(v) => serializer.serialize_str(v),
            DisplayValue::Unavailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Value(v) => f.pad(v),
            DisplayValue::Unavailable => f.pad(NOT_AVAILABLE),
        }
    }
}

/// One row of the development factor table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactorRow {
    pub origin: String,
    pub development: String,
    pub factor: DisplayValue,
}

impl FactorRow {
    pub fn key(&self) -> (&str, &str) {
        (&self.origin, &self.development)
    }
}

/// Two factors reported for the same cell
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Duplicate development factor for origin '{origin}', development '{development}'")]
pub struct DuplicateFactor {
    pub origin: String,
    pub development: String,
}

/// Development factor table, rows in service order and unique by
/// `(origin, development)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FactorTable {
    rows: Vec<FactorRow>,
}

impl FactorTable {
    /// Build the table, rejecting the first repeated key
    pub fn from_rows(rows: Vec<FactorRow>) -> Result<Self, DuplicateFactor> {
        let mut seen = HashSet::with_capacity(rows.len());
        for row in &rows {
            if !seen.insert(row.key()) {
                return Err(DuplicateFactor {
                    origin: row.origin.clone(),
                    development: row.development.clone(),
                });
            }
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[FactorRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, origin: &str, development: &str) -> Option<&FactorRow> {
        self.rows.iter().find(|r| r.key() == (origin, development))
    }
}

/// Ultimate estimates and factor table of a successful analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsView {
    pub mack_ultimate: DisplayValue,
    /// Present only when a Mack ultimate exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mack_mse: Option<DisplayValue>,
    pub cape_cod_ultimate: DisplayValue,
    /// Omitted entirely when the service returned no factors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor_table: Option<FactorTable>,
}

/// What the rendering surface shows for the current submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DisplayModel {
    /// Nothing submitted yet
    Idle,
    /// Submission in flight; no earlier result is shown
    InProgress,
    Error { message: String },
    Results(ResultsView),
}

impl DisplayModel {
    pub fn error_message(&self) -> Option<&str> {
        match self {
            DisplayModel::Error { message } => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn results(&self) -> Option<&ResultsView> {
        match self {
            DisplayModel::Results(view) => Some(view),
            _ => None,
        }
    }
}

//! Maps analysis outcomes into display models

use super::format::NumberFormat;
use super::model::{DisplayModel, DisplayValue, DuplicateFactor, FactorRow, FactorTable, ResultsView};
use crate::analysis::{AnalysisOutcome, TriangleAnalysisResult};

/// Projects outcomes using a fixed number format
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultProjector {
    format: NumberFormat,
}

impl ResultProjector {
    pub fn new(format: NumberFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> &NumberFormat {
        &self.format
    }

    /// Pure mapping: projecting the same outcome twice gives equal models
    pub fn project(&self, outcome: &AnalysisOutcome) -> DisplayModel {
        match outcome {
            AnalysisOutcome::Pending => DisplayModel::InProgress,
            AnalysisOutcome::Failed { message } => DisplayModel::Error {
                message: message.clone(),
            },
            AnalysisOutcome::Succeeded { result } => match self.results_view(result) {
                Ok(view) => DisplayModel::Results(view),
                Err(duplicate) => {
                    log::warn!("Rejecting analysis result: {}", duplicate);
                    DisplayModel::Error {
                        message: duplicate.to_string(),
                    }
                }
            },
        }
    }

    fn results_view(
        &self,
        result: &TriangleAnalysisResult,
    ) -> Result<ResultsView, DuplicateFactor> {
        let estimate = |value: Option<f64>| -> DisplayValue {
            value.and_then(|v| self.format.format(v)).into()
        };

        let factor_table = if result.development_factors.is_empty() {
            None
        } else {
            let rows = result
                .development_factors
                .iter()
                .map(|f| FactorRow {
                    origin: f.origin.clone(),
                    development: f.development.clone(),
                    factor: f.factor.and_then(|v| self.format.format_factor(v)).into(),
                })
                .collect();
            Some(FactorTable::from_rows(rows)?)
        };

        Ok(ResultsView {
            mack_ultimate: estimate(result.mack_ultimate()),
            mack_mse: result.mack.map(|m| estimate(m.mse)),
            cape_cod_ultimate: estimate(result.cape_cod_ultimate),
            factor_table,
        })
    }
}

/// Project with the default (en-US) number format
pub fn project(outcome: &AnalysisOutcome) -> DisplayModel {
    ResultProjector::default().project(outcome)
}

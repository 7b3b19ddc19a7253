//! Parsed reserving service response

use serde::{Deserialize, Serialize};

/// Mack chain-ladder estimate. The MSE only exists alongside an ultimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MackEstimate {
    pub ultimate: f64,
    pub mse: Option<f64>,
}

/// One age-to-age development factor cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentFactor {
    pub origin: String,
    pub development: String,
    /// None when the factor could not be computed for this cell
    #[serde(rename = "ldf")]
    pub factor: Option<f64>,
}

/// Result of one triangle analysis.
///
/// Absent estimates mean the method was not computed or not applicable;
/// they are never represented by zero. Factor order is the service's order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireResult", into = "WireResult")]
pub struct TriangleAnalysisResult {
    pub mack: Option<MackEstimate>,
    pub cape_cod_ultimate: Option<f64>,
    pub development_factors: Vec<DevelopmentFactor>,
}

/// Flat JSON shape used on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireResult {
    #[serde(default)]
    mack_ultimate: Option<f64>,
    #[serde(default)]
    mack_mse: Option<f64>,
    #[serde(default)]
    cape_cod_ultimate: Option<f64>,
    ldfs: Vec<DevelopmentFactor>,
}

impl From<WireResult> for TriangleAnalysisResult {
    fn from(wire: WireResult) -> Self {
        let mack = match (wire.mack_ultimate, wire.mack_mse) {
            (Some(ultimate), mse) => Some(MackEstimate { ultimate, mse }),
            (None, Some(mse)) => {
                log::warn!("Ignoring mack_mse={} reported without a Mack ultimate", mse);
                None
            }
            (None, None) => None,
        };

        Self {
            mack,
            cape_cod_ultimate: wire.cape_cod_ultimate,
            development_factors: wire.ldfs,
        }
    }
}

impl From<TriangleAnalysisResult> for WireResult {
    fn from(result: TriangleAnalysisResult) -> Self {
        Self {
            mack_ultimate: result.mack.map(|m| m.ultimate),
            mack_mse: result.mack.and_then(|m| m.mse),
            cape_cod_ultimate: result.cape_cod_ultimate,
            ldfs: result.development_factors,
        }
    }
}

impl TriangleAnalysisResult {
    pub fn mack_ultimate(&self) -> Option<f64> {
        self.mack.map(|m| m.ultimate)
    }

    pub fn mack_mse(&self) -> Option<f64> {
        self.mack.and_then(|m| m.mse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_full_response() {
        let body = r#"{
            "mack_ultimate": 1234567.891,
            "mack_mse": 2500.5,
            "cape_cod_ultimate": 1200000.0,
            "ldfs": [
                {"origin": "2019", "development": "12", "ldf": 1.8512},
                {"origin": "2019", "development": "24", "ldf": null}
            ]
        }"#;
        let result: TriangleAnalysisResult = serde_json::from_str(body).unwrap();

        assert_relative_eq!(result.mack_ultimate().unwrap(), 1234567.891);
        assert_relative_eq!(result.mack_mse().unwrap(), 2500.5);
        assert_relative_eq!(result.cape_cod_ultimate.unwrap(), 1_200_000.0);
        assert_eq!(result.development_factors.len(), 2);
        assert_eq!(result.development_factors[0].origin, "2019");
        assert_eq!(result.development_factors[1].factor, None);
    }

    #[test]
    fn test_missing_optionals_accepted() {
        let result: TriangleAnalysisResult = serde_json::from_str(r#"{"ldfs": []}"#).unwrap();
        assert!(result.mack.is_none());
        assert!(result.cape_cod_ultimate.is_none());
        assert!(result.development_factors.is_empty());
    }

    #[test]
    fn test_ldfs_required() {
        let parsed = serde_json::from_str::<TriangleAnalysisResult>(r#"{"mack_ultimate": 1.0}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_zero_is_not_absent() {
        let result: TriangleAnalysisResult =
            serde_json::from_str(r#"{"mack_ultimate": 0.0, "mack_mse": 0.0, "ldfs": []}"#).unwrap();
        assert_eq!(result.mack, Some(MackEstimate { ultimate: 0.0, mse: Some(0.0) }));
    }

    #[test]
    fn test_mse_without_ultimate_dropped() {
        let result: TriangleAnalysisResult =
            serde_json::from_str(r#"{"mack_ultimate": null, "mack_mse": 12.0, "ldfs": []}"#).unwrap();
        assert!(result.mack.is_none());
        assert!(result.mack_mse().is_none());
    }

    #[test]
    fn test_factor_order_preserved() {
        let body = r#"{"ldfs": [
            {"origin": "2021", "development": "12", "ldf": 1.2},
            {"origin": "2019", "development": "36", "ldf": 1.05},
            {"origin": "2020", "development": "24", "ldf": 1.1}
        ]}"#;
        let result: TriangleAnalysisResult = serde_json::from_str(body).unwrap();
        let origins: Vec<_> = result.development_factors.iter().map(|f| f.origin.as_str()).collect();
        assert_eq!(origins, vec!["2021", "2019", "2020"]);
    }
}

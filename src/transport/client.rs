//! HTTP client for the reserving service

use super::{AnalysisService, ClientConfig, TransportError};
use crate::analysis::{AnalysisOutcome, TriangleAnalysisResult};
use crate::request::TriangleUploadRequest;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Triangle analysis endpoint, relative to the base URL
pub const ANALYZE_PATH: &str = "/reserving/analyze";

/// Liveness endpoint, relative to the base URL
pub const HEALTH_PATH: &str = "/health";

/// Body of a successful health probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Encode a request as multipart: the dataset as binary part `csv`, every
/// scalar as a text part. The file buffer is moved, not copied.
pub fn encode_form(request: TriangleUploadRequest) -> Result<Form, TransportError> {
    let fields = request.text_fields();
    let (name, bytes) = request.into_file().into_parts();

    let part = Part::bytes(bytes)
        .file_name(name)
        .mime_str("text/csv")
        .map_err(|e| TransportError::Encoding(e.to_string()))?;

    let form = fields
        .into_iter()
        .fold(Form::new().part("csv", part), |form, (key, value)| form.text(key, value));

    Ok(form)
}

/// Error for a non-success answer. A body that cannot be read is reported as
/// the transport failure it is, so a timeout mid-body still reads "timed out".
fn service_failure(status: StatusCode, body: Result<String, reqwest::Error>) -> TransportError {
    match body {
        Ok(body) => TransportError::Service { status, body },
        Err(e) => {
            warn!("Could not read body of {} response: {}", status, e);
            TransportError::from(e)
        }
    }
}

/// Client for one reserving service deployment
#[derive(Debug, Clone)]
pub struct ReservingClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ReservingClient {
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| TransportError::Configuration(e.to_string()))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send one analysis request and parse the result
    pub async fn analyze(
        &self,
        request: TriangleUploadRequest,
    ) -> Result<TriangleAnalysisResult, TransportError> {
        let url = self.config.endpoint(ANALYZE_PATH);
        debug!(
            "POST {} (file={}, {} bytes, columns={:?}, cumulative={})",
            url,
            request.file().name(),
            request.file().size(),
            request.columns(),
            request.cumulative()
        );

        let form = encode_form(request)?;
        let response = self.http.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(service_failure(status, response.text().await));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| TransportError::MalformedResponse(e.to_string()))
    }

    /// Send one analysis request and fold every failure into the outcome
    pub async fn submit(&self, request: TriangleUploadRequest) -> AnalysisOutcome {
        let file_name = request.file().name().to_string();
        info!("Submitting {} for analysis", file_name);

        match self.analyze(request).await {
            Ok(result) => {
                info!(
                    "Analysis of {} succeeded ({} development factors)",
                    file_name,
                    result.development_factors.len()
                );
                AnalysisOutcome::Succeeded { result }
            }
            Err(e) => {
                warn!("Analysis of {} failed: {}", file_name, e);
                AnalysisOutcome::failed(e.to_string())
            }
        }
    }

    /// GET the health endpoint; fails on any non-success status
    pub async fn check_health(&self) -> Result<HealthStatus, TransportError> {
        let url = self.config.endpoint(HEALTH_PATH);
        debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Health { status });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| TransportError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl AnalysisService for ReservingClient {
    async fn submit(&self, request: TriangleUploadRequest) -> AnalysisOutcome {
        ReservingClient::submit(self, request).await
    }

    async fn check_health(&self) -> Result<HealthStatus, TransportError> {
        ReservingClient::check_health(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{build, FormValues, TriangleFile};
    use approx::assert_relative_eq;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CSV: &str = "origin,dev,value\n2019,12,100\n2019,24,150\n2020,12,120\n";

    fn test_request(form: &FormValues) -> TriangleUploadRequest {
        build(Some(TriangleFile::new("triangle.csv", CSV.as_bytes().to_vec())), form).unwrap()
    }

    fn test_client(server: &MockServer) -> ReservingClient {
        ReservingClient::new(ClientConfig::resolve(Some(server.uri()))).unwrap()
    }

    fn text_part(name: &str, value: &str) -> String {
        format!("name=\"{}\"\r\n\r\n{}\r\n", name, value)
    }

    #[tokio::test]
    async fn test_defaults_on_the_wire() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ANALYZE_PATH))
            .and(body_string_contains(text_part("origin_col", "origin")))
            .and(body_string_contains(text_part("dev_col", "dev")))
            .and(body_string_contains(text_part("value_col", "value")))
            .and(body_string_contains(text_part("cumulative", "true")))
            .and(body_string_contains("filename=\"triangle.csv\""))
            .and(body_string_contains("2019,24,150"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "mack_ultimate": 520.25,
                "mack_mse": 12.5,
                "cape_cod_ultimate": 498.0,
                "ldfs": [{"origin": "2019", "development": "12", "ldf": 1.5}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = test_client(&server).submit(test_request(&FormValues::default())).await;

        let result = outcome.result().expect("analysis should succeed");
        assert_relative_eq!(result.mack_ultimate().unwrap(), 520.25);
        assert_relative_eq!(result.mack_mse().unwrap(), 12.5);
        assert_eq!(result.development_factors.len(), 1);
    }

    #[tokio::test]
    async fn test_incremental_flag_on_the_wire() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ANALYZE_PATH))
            .and(body_string_contains(text_part("cumulative", "false")))
            .and(body_string_contains(text_part("origin_col", "AccidentYear")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ldfs": []})))
            .expect(1)
            .mount(&server)
            .await;

        let form = FormValues {
            origin_col: Some("AccidentYear".to_string()),
            cumulative: Some("false".to_string()),
            ..Default::default()
        };
        let outcome = test_client(&server).submit(test_request(&form)).await;
        assert!(outcome.result().is_some());
    }

    #[tokio::test]
    async fn test_service_failure_keeps_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ANALYZE_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("invalid column: dev"))
            .mount(&server)
            .await;

        let outcome = test_client(&server).submit(test_request(&FormValues::default())).await;

        match outcome {
            AnalysisOutcome::Failed { message } => {
                assert!(message.contains("500"), "{message}");
                assert!(message.contains("invalid column: dev"), "{message}");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_service_error_is_typed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ANALYZE_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_string("File must be a CSV"))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .analyze(test_request(&FormValues::default()))
            .await
            .unwrap_err();

        match err {
            TransportError::Service { status, body } => {
                assert_eq!(status.as_u16(), 400);
                assert_eq!(body, "File must be a CSV");
            }
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ANALYZE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
            .mount(&server)
            .await;

        let outcome = test_client(&server).submit(test_request(&FormValues::default())).await;

        match outcome {
            AnalysisOutcome::Failed { message } => {
                assert!(message.starts_with("Malformed response body"), "{message}")
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_ldfs_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ANALYZE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"mack_ultimate": 1.0})))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .analyze(test_request(&FormValues::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::MalformedResponse(ref m) if m.contains("ldfs")));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let client = ReservingClient::new(ClientConfig::resolve(Some("http://127.0.0.1:1".to_string()))).unwrap();

        let outcome = client.submit(test_request(&FormValues::default())).await;

        match outcome {
            AnalysisOutcome::Failed { message } => {
                assert!(message.starts_with("API request failed"), "{message}")
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ANALYZE_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"ldfs": []}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let config = ClientConfig::resolve(Some(server.uri())).with_timeout(Duration::from_millis(100));
        let client = ReservingClient::new(config).unwrap();
        let outcome = client.submit(test_request(&FormValues::default())).await;

        assert_eq!(outcome, AnalysisOutcome::failed("timed out"));
    }

    #[tokio::test]
    async fn test_trailing_slash_base_url() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ANALYZE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ldfs": []})))
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig::resolve(Some(format!("{}/", server.uri())));
        let client = ReservingClient::new(config).unwrap();
        let outcome = client.submit(test_request(&FormValues::default())).await;
        assert!(outcome.result().is_some());
    }

    #[tokio::test]
    async fn test_health_ok() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(HEALTH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
            .expect(1)
            .mount(&server)
            .await;

        let health = test_client(&server).check_health().await.unwrap();
        assert_eq!(health.status, "healthy");
    }

    #[tokio::test]
    async fn test_health_failure_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(HEALTH_PATH))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = test_client(&server).check_health().await.unwrap_err();
        assert!(matches!(err, TransportError::Health { status } if status.as_u16() == 503));
    }

    #[tokio::test]
    async fn test_unreadable_failure_body_is_not_swallowed() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap();
        let read_error = http
            .get(format!("{}/slow", server.uri()))
            .send()
            .await
            .unwrap_err();

        let err = service_failure(StatusCode::INTERNAL_SERVER_ERROR, Err(read_error));
        assert!(matches!(err, TransportError::Timeout), "{:?}", err);
        assert_eq!(err.to_string(), "timed out");

        let err = service_failure(StatusCode::BAD_REQUEST, Ok("bad header".to_string()));
        assert_eq!(err.to_string(), "API request failed: 400 Bad Request - bad header");
    }
}

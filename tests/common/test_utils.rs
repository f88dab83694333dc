use super::mocks::CountingInferenceClient;
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use plant_doctor::{
    config::{Config, ServerConfig},
    diagnosis::{DiagnosisService, NormalizeOptions, StaticCredential},
    server::{self, DIAGNOSE_PATH, handlers::AppState},
};
use serde_json::Value;
use std::sync::Arc;

pub const TEST_API_KEY: &str = "test-api-key";

/// Tiny base64 payload; the pipeline never decodes it.
pub const TEST_IMAGE: &str = "/9j/4AAQSkZJRgABAQAAAQABAAD/2wBDAAgGBgcGBQgHBwcJCQgKDBQNDAsLDBkSEw8UHR8eHR";

pub const BLIGHT_JSON: &str = r#"{"disease":"Blight","confidence":87,"severity":"High","description":"Brown concentric lesions on lower leaves","treatment":"Remove infected leaves and apply copper fungicide","prevention":"Rotate crops and water at the base"}"#;

/// Create a test configuration pointing Gemini at `base_url`
pub fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.gemini.base_url = base_url.to_string();
    config.gemini.model = "gemini-test".to_string();
    config
}

pub fn create_service(mock: CountingInferenceClient, key: Option<&str>) -> DiagnosisService {
    DiagnosisService::new(
        Arc::new(mock),
        Arc::new(StaticCredential::new(
            "GEMINI_API_KEY",
            key.map(str::to_string),
        )),
        NormalizeOptions::default(),
    )
}

pub fn create_test_app(service: DiagnosisService) -> Router {
    let state = AppState {
        service: Arc::new(service),
    };
    server::router(state, &ServerConfig::default())
}

pub fn diagnose_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(DIAGNOSE_PATH)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 8081
  max_body_bytes: 1048576
  cors: true
  logs:
    level: "debug"

gemini:
  base_url: "http://localhost:9999"
  model: "gemini-test"
  api_key_env: "PLANT_DOCTOR_KEY"

diagnosis:
  extraction: "balanced"
  strict_schema: true
  expose_raw_output: false
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  port: "not-a-number"
"#;

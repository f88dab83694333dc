use async_trait::async_trait;
use plant_doctor::{
    Error, Result,
    inference::{GenerateContentResponse, InferenceClient},
};
use std::sync::{Arc, Mutex};

/// Recorded arguments of one `generate_content` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub api_key: String,
    pub image_base64: String,
}

/// Inference client double that records every call
#[derive(Debug, Clone)]
pub struct CountingInferenceClient {
    pub responses: Arc<Mutex<Vec<GenerateContentResponse>>>,
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
    pub error: Option<String>,
}

impl CountingInferenceClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_text(self, text: &str) -> Self {
        self.add_response(GenerateContentResponse::from_text(text));
        self
    }

    pub fn with_response(self, response: GenerateContentResponse) -> Self {
        self.add_response(response);
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn add_response(&self, response: GenerateContentResponse) {
        self.responses.lock().unwrap().push(response);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn get_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceClient for CountingInferenceClient {
    async fn generate_content(
        &self,
        api_key: &str,
        image_base64: &str,
    ) -> Result<GenerateContentResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            api_key: api_key.to_string(),
            image_base64: image_base64.to_string(),
        });

        if let Some(ref error) = self.error {
            return Err(Error::internal(error.clone()));
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::internal("No more mock responses available"));
        }

        Ok(responses.remove(0))
    }
}

impl Default for CountingInferenceClient {
    fn default() -> Self {
        Self::new()
    }
}

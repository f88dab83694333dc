use super::{
    credential::{CredentialProvider, EnvCredential},
    normalizer::{NormalizeOptions, normalize},
    types::DiagnosisRecord,
};
use crate::{
    Error, Result,
    config::Config,
    inference::{GeminiClient, InferenceClient},
};
use std::sync::Arc;
use tracing::{debug, info};

/// Request pipeline: input check, credential, inference call, normalization.
pub struct DiagnosisService {
    client: Arc<dyn InferenceClient>,
    credential: Arc<dyn CredentialProvider>,
    options: NormalizeOptions,
    expose_raw_output: bool,
}

impl DiagnosisService {
    pub fn new(
        client: Arc<dyn InferenceClient>,
        credential: Arc<dyn CredentialProvider>,
        options: NormalizeOptions,
    ) -> Self {
        Self {
            client,
            credential,
            options,
            expose_raw_output: true,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        info!(
            "Using Gemini model {} with credential from ${}",
            config.gemini.model, config.gemini.api_key_env
        );

        Self::new(
            Arc::new(GeminiClient::new(&config.gemini)),
            Arc::new(EnvCredential::new(&config.gemini.api_key_env)),
            NormalizeOptions::from(&config.diagnosis),
        )
        .with_raw_output(config.diagnosis.expose_raw_output)
    }

    pub fn with_raw_output(mut self, expose: bool) -> Self {
        self.expose_raw_output = expose;
        self
    }

    pub fn expose_raw_output(&self) -> bool {
        self.expose_raw_output
    }

    pub async fn diagnose(&self, image_base64: Option<&str>) -> Result<DiagnosisRecord> {
        let image = image_base64
            .filter(|image| !image.is_empty())
            .ok_or(Error::InvalidInput)?;

        let api_key = self
            .credential
            .api_key()
            .ok_or_else(|| Error::configuration_missing(self.credential.name()))?;

        info!("Diagnosing image ({} base64 bytes)", image.len());

        let envelope = self.client.generate_content(&api_key, image).await?;
        debug!("Gemini envelope: {:?}", envelope);

        normalize(&envelope, self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        diagnosis::StaticCredential,
        error::ErrorKind,
        inference::{GenerateContentResponse, MockInferenceClient},
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn service(mock: MockInferenceClient, key: Option<&str>) -> DiagnosisService {
        DiagnosisService::new(
            Arc::new(mock),
            Arc::new(StaticCredential::new(
                "GEMINI_API_KEY",
                key.map(str::to_string),
            )),
            NormalizeOptions::default(),
        )
    }

    #[test_log::test(tokio::test)]
    async fn test_missing_image_skips_inference() {
        for image in [None, Some("")] {
            let mut mock = MockInferenceClient::new();
            mock.expect_generate_content().never();

            let err = service(mock, Some("key")).diagnose(image).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_missing_credential_skips_inference() {
        for key in [None, Some("")] {
            let mut mock = MockInferenceClient::new();
            mock.expect_generate_content().never();

            let err = service(mock, key).diagnose(Some("aW1n")).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigurationMissing);
            assert_eq!(err.to_string(), "Missing GEMINI_API_KEY in environment.");
        }
    }

    #[tokio::test]
    async fn test_successful_diagnosis_passes_key_and_image() {
        let mut mock = MockInferenceClient::new();
        mock.expect_generate_content()
            .withf(|key, image| key == "secret" && image == "aW1n")
            .times(1)
            .returning(|_, _| {
                Ok(GenerateContentResponse::from_text(
                    r#"{"disease":"Blight","confidence":87}"#,
                ))
            });

        let record = service(mock, Some("secret"))
            .diagnose(Some("aW1n"))
            .await
            .unwrap();

        assert_eq!(
            record.as_value(),
            &json!({"disease": "Blight", "confidence": 87})
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_internal() {
        let mut mock = MockInferenceClient::new();
        mock.expect_generate_content()
            .times(1)
            .returning(|_, _| Err(Error::internal("connection reset")));

        let err = service(mock, Some("secret"))
            .diagnose(Some("aW1n"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InternalFailure);
    }

    #[tokio::test]
    async fn test_empty_envelope_is_empty_reply() {
        let mut mock = MockInferenceClient::new();
        mock.expect_generate_content()
            .times(1)
            .returning(|_, _| Ok(GenerateContentResponse::default()));

        let err = service(mock, Some("secret"))
            .diagnose(Some("aW1n"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::EmptyUpstreamReply);
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Diagnosis as returned to the caller.
///
/// Holds whatever JSON the model produced, unchanged. The six-field shape
/// requested in the prompt is only checked by [`DiagnosisRecord::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiagnosisRecord(Value);

/// Typed view of a record that follows the requested schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub disease: String,
    pub confidence: f64,
    pub severity: String,
    pub description: String,
    pub treatment: String,
    pub prevention: String,
}

impl DiagnosisRecord {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Checks the record against the six-field schema with `confidence` in 0..=100.
    pub fn validate(&self) -> std::result::Result<Diagnosis, String> {
        let diagnosis: Diagnosis =
            serde_json::from_value(self.0.clone()).map_err(|e| e.to_string())?;

        if !(0.0..=100.0).contains(&diagnosis.confidence) {
            return Err(format!(
                "confidence {} is outside 0-100",
                diagnosis.confidence
            ));
        }

        Ok(diagnosis)
    }
}

impl From<Value> for DiagnosisRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

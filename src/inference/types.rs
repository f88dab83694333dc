use serde::{Deserialize, Deserializer, Serialize};

/// MIME type attached to every image, whatever its real encoding.
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

pub const DIAGNOSIS_PROMPT: &str = r#"
You are an expert plant pathologist. Diagnose the disease visible in the attached plant image.
Reply with a single JSON object and nothing else: no explanations, no markdown, no code fences. Only JSON.
Use exactly this shape:

{
  "disease": "name of the disease, or \"Healthy\"",
  "confidence": 0-100,
  "severity": "Low | Medium | High",
  "description": "what the disease is and the visible symptoms",
  "treatment": "how to treat it",
  "prevention": "how to prevent it in future"
}
"#;

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RequestPart {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl GenerateContentRequest {
    /// Builds the single-turn diagnosis request for one base64 image.
    pub fn diagnosis(image_base64: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::Text {
                        text: DIAGNOSIS_PROMPT.to_string(),
                    },
                    RequestPart::InlineData {
                        inline_data: InlineData {
                            mime_type: IMAGE_MIME_TYPE.to_string(),
                            data: image_base64.to_string(),
                        },
                    },
                ],
            }],
        }
    }
}

/// Top-level envelope returned by `generateContent`.
///
/// Every level is optional so that a reply missing candidates, content or
/// text still decodes and reads as an empty answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<ResponseContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseContent {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

/// Reads an explicit `null` list the same as a missing one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl GenerateContentResponse {
    /// Envelope carrying a single candidate with a single text part.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(ResponseContent {
                    parts: vec![ResponsePart {
                        text: Some(text.into()),
                    }],
                }),
            }],
        }
    }

    /// Text of the first part of the first candidate, or `""` if absent.
    pub fn first_text(&self) -> &str {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.as_deref())
            .unwrap_or_default()
    }
}

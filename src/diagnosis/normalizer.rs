use super::types::DiagnosisRecord;
use crate::{
    Error, Result,
    config::{DiagnosisConfig, ExtractionStrategy},
    inference::GenerateContentResponse,
};
use serde_json::Value;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub extraction: ExtractionStrategy,
    pub strict_schema: bool,
}

impl From<&DiagnosisConfig> for NormalizeOptions {
    fn from(config: &DiagnosisConfig) -> Self {
        Self {
            extraction: config.extraction,
            strict_schema: config.strict_schema,
        }
    }
}

/// Turns a model envelope into a diagnosis record.
pub fn normalize(
    envelope: &GenerateContentResponse,
    options: NormalizeOptions,
) -> Result<DiagnosisRecord> {
    let text = envelope.first_text();
    debug!("Gemini text response: {}", text);

    if text.is_empty() {
        warn!("Gemini returned an empty text response");
        return Err(Error::EmptyUpstreamReply);
    }

    parse_reply(text, options)
}

/// Parses the model's text, falling back to the JSON block embedded in it.
pub fn parse_reply(text: &str, options: NormalizeOptions) -> Result<DiagnosisRecord> {
    let value = match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(e) => {
            warn!("Direct JSON parse failed ({}), trying to extract JSON block", e);

            let block = extract_json_block(text, options.extraction).ok_or_else(|| {
                error!("No JSON block found in Gemini response");
                Error::unparsable(text)
            })?;

            serde_json::from_str::<Value>(block).map_err(|e| {
                error!("Extracted JSON block did not parse: {}", e);
                Error::unparsable(text)
            })?
        }
    };

    let record = DiagnosisRecord::from(value);

    if options.strict_schema {
        record.validate().map_err(|reason| {
            error!("Gemini result failed schema validation: {}", reason);
            Error::SchemaViolation {
                reason,
                raw: text.to_string(),
            }
        })?;
    }

    Ok(record)
}

/// Locates a `{ ... }` block inside free text.
pub fn extract_json_block(text: &str, strategy: ExtractionStrategy) -> Option<&str> {
    match strategy {
        ExtractionStrategy::Greedy => greedy_block(text),
        ExtractionStrategy::Balanced => balanced_block(text),
    }
}

fn greedy_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn balanced_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

mod client;
mod types;

pub use client::{API_KEY_HEADER, GeminiClient, InferenceClient};
#[cfg(test)]
pub use client::MockInferenceClient;
pub use types::*;

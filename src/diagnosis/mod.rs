mod credential;
mod normalizer;
mod service;
mod types;

pub use credential::{CredentialProvider, EnvCredential, StaticCredential};
pub use normalizer::{NormalizeOptions, extract_json_block, normalize, parse_reply};
pub use service::DiagnosisService;
pub use types::{Diagnosis, DiagnosisRecord};

use std::env;

/// Source of the inference API key, consulted on every request.
pub trait CredentialProvider: Send + Sync {
    /// Name reported when the key is missing.
    fn name(&self) -> &str;

    fn api_key(&self) -> Option<String>;
}

/// Reads the key from an environment variable at call time.
#[derive(Debug, Clone)]
pub struct EnvCredential {
    var: String,
}

impl EnvCredential {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialProvider for EnvCredential {
    fn name(&self) -> &str {
        &self.var
    }

    fn api_key(&self) -> Option<String> {
        env::var(&self.var).ok().filter(|key| !key.is_empty())
    }
}

/// Fixed key, for embedding and tests.
#[derive(Debug, Clone)]
pub struct StaticCredential {
    name: String,
    key: Option<String>,
}

impl StaticCredential {
    pub fn new(name: impl Into<String>, key: Option<String>) -> Self {
        Self {
            name: name.into(),
            key,
        }
    }
}

impl CredentialProvider for StaticCredential {
    fn name(&self) -> &str {
        &self.name
    }

    fn api_key(&self) -> Option<String> {
        self.key.clone().filter(|key| !key.is_empty())
    }
}

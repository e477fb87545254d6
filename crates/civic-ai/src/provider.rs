use async_trait::async_trait;
use serde_json::Value;

use crate::error::ProviderError;

/// Schema-constrained text generation.
///
/// Implementations return the raw response text, which callers parse and
/// validate against `schema` themselves.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, prompt: &str, schema: &Value) -> Result<String, ProviderError>;
}

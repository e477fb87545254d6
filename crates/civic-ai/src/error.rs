use thiserror::Error;

/// Failure talking to the generative model.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[cfg(feature = "gemini")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("provider returned no candidate text")]
    EmptyResponse,

    #[error("{0}")]
    Other(String),
}

/// Why a single assistant request failed.
#[derive(Debug, Error)]
pub enum FailureCause {
    #[error("generation failed: {0}")]
    Generation(#[from] ProviderError),

    #[error("response is not valid JSON for the schema: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {value:?}")]
    InvalidEnumValue { field: &'static str, value: String },

    #[error("response violates the schema: {0}")]
    SchemaViolation(String),
}

/// Error surfaced to the initiating action. The display text is the
/// user-facing message; the cause is available as the error source.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Failed to generate AI triage. Please try again.")]
    TriageFailure(#[source] FailureCause),

    #[error("Failed to generate AI summary. Please try again.")]
    SummaryFailure(#[source] FailureCause),
}

impl AssistantError {
    pub fn cause(&self) -> &FailureCause {
        match self {
            Self::TriageFailure(c) | Self::SummaryFailure(c) => c,
        }
    }
}

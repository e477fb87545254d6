//! AI assistant layer: triage and city summaries from a generative model, with
//! a canned fallback when no provider credential is configured.

mod assistant;
mod config;
mod error;
mod memo;
pub mod prompts;
mod provider;

#[cfg(feature = "gemini")]
pub mod gemini;

pub use assistant::{
    Assistant, AssistantMode, CANNED_SUMMARY_DELAY, CANNED_TRIAGE_DELAY, CannedAssistant,
    LiveAssistant, parse_city_summary, parse_triage,
};
pub use config::{AssistantConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::{AssistantError, FailureCause, ProviderError};
pub use memo::SummaryMemo;
pub use provider::GenerativeModel;

#[cfg(feature = "gemini")]
pub use gemini::GeminiClient;

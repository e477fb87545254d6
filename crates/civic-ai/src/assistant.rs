//! Triage and city-summary requests behind a strategy chosen at startup.
//!
//! [`LiveAssistant`] calls a [`GenerativeModel`] and validates what comes
//! back; [`CannedAssistant`] answers with fixed results after a short delay
//! and never touches the network.

use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;

use async_trait::async_trait;
use civic_core::{AiCitySummary, AiTriageResult, Incident, Severity};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{AssistantError, FailureCause};
use crate::prompts::{self, SUMMARY_RECOMMENDATIONS, TRIAGE_RECOMMENDATIONS};
use crate::provider::GenerativeModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantMode {
    Live,
    Canned,
}

impl AssistantMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Canned => "canned",
        }
    }
}

impl fmt::Display for AssistantMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// AI assistant for one incident (triage) or the whole list (city summary).
///
/// Each call is a single attempt: no retry, no queueing, no deduplication of
/// identical requests in flight.
#[async_trait]
pub trait Assistant: Send + Sync {
    fn mode(&self) -> AssistantMode;

    async fn request_triage(&self, description: &str) -> Result<AiTriageResult, AssistantError>;

    async fn request_city_summary(
        &self,
        incidents: &[Incident],
    ) -> Result<AiCitySummary, AssistantError>;
}

// ── Live ──

/// Assistant backed by a real generative model.
pub struct LiveAssistant<M> {
    model: M,
}

impl<M: GenerativeModel> LiveAssistant<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }
}

#[async_trait]
impl<M: GenerativeModel> Assistant for LiveAssistant<M> {
    fn mode(&self) -> AssistantMode {
        AssistantMode::Live
    }

    async fn request_triage(&self, description: &str) -> Result<AiTriageResult, AssistantError> {
        info!(description_len = description.len(), "requesting AI triage");
        let prompt = prompts::triage_prompt(description);
        let result: Result<AiTriageResult, FailureCause> = async {
            let text = self.model.generate(&prompt, &prompts::triage_schema()).await?;
            parse_triage(&text)
        }
        .await;

        match result {
            Ok(triage) => {
                debug!(priority = %triage.priority, "triage complete");
                Ok(triage)
            }
            Err(cause) => {
                warn!(error = %cause, "triage failed");
                Err(AssistantError::TriageFailure(cause))
            }
        }
    }

    async fn request_city_summary(
        &self,
        incidents: &[Incident],
    ) -> Result<AiCitySummary, AssistantError> {
        info!(count = incidents.len(), "requesting AI city summary");
        let prompt = prompts::city_summary_prompt(incidents);
        let result: Result<AiCitySummary, FailureCause> = async {
            let text = self
                .model
                .generate(&prompt, &prompts::city_summary_schema())
                .await?;
            parse_city_summary(&text)
        }
        .await;

        result.map_err(|cause| {
            warn!(error = %cause, "city summary failed");
            AssistantError::SummaryFailure(cause)
        })
    }
}

// ── Response validation ──

#[derive(Deserialize)]
struct RawTriage {
    summary: String,
    priority: String,
    recommendations: Vec<String>,
}

#[derive(Deserialize)]
struct RawCitySummary {
    situation: String,
    recommendations: Vec<String>,
}

/// Parse a triage response, rejecting any priority outside [`Severity`].
pub fn parse_triage(text: &str) -> Result<AiTriageResult, FailureCause> {
    let raw: RawTriage = serde_json::from_str(text)?;

    let priority: Severity =
        raw.priority
            .parse()
            .map_err(|e: civic_core::UnknownLabel| FailureCause::InvalidEnumValue {
                field: "priority",
                value: e.value,
            })?;
    require_text("summary", &raw.summary)?;
    require_recommendations(&raw.recommendations, TRIAGE_RECOMMENDATIONS)?;

    Ok(AiTriageResult {
        summary: raw.summary,
        priority,
        recommendations: raw.recommendations,
    })
}

/// Parse a city summary response with the same strictness as triage.
pub fn parse_city_summary(text: &str) -> Result<AiCitySummary, FailureCause> {
    let raw: RawCitySummary = serde_json::from_str(text)?;

    require_text("situation", &raw.situation)?;
    require_recommendations(&raw.recommendations, SUMMARY_RECOMMENDATIONS)?;

    Ok(AiCitySummary {
        situation: raw.situation,
        recommendations: raw.recommendations,
    })
}

fn require_text(field: &str, value: &str) -> Result<(), FailureCause> {
    if value.trim().is_empty() {
        return Err(FailureCause::SchemaViolation(format!("`{field}` is empty")));
    }
    Ok(())
}

fn require_recommendations(
    recommendations: &[String],
    allowed: RangeInclusive<usize>,
) -> Result<(), FailureCause> {
    if !allowed.contains(&recommendations.len()) {
        return Err(FailureCause::SchemaViolation(format!(
            "expected {}..={} recommendations, got {}",
            allowed.start(),
            allowed.end(),
            recommendations.len()
        )));
    }
    if recommendations.iter().any(|r| r.trim().is_empty()) {
        return Err(FailureCause::SchemaViolation(
            "recommendation is empty".to_string(),
        ));
    }
    Ok(())
}

// ── Canned ──

pub const CANNED_TRIAGE_DELAY: Duration = Duration::from_millis(1500);
pub const CANNED_SUMMARY_DELAY: Duration = Duration::from_millis(2000);

/// Fixed answers used when no provider credential is configured.
#[derive(Debug, Clone)]
pub struct CannedAssistant {
    triage_delay: Duration,
    summary_delay: Duration,
}

impl Default for CannedAssistant {
    fn default() -> Self {
        Self {
            triage_delay: CANNED_TRIAGE_DELAY,
            summary_delay: CANNED_SUMMARY_DELAY,
        }
    }
}

impl CannedAssistant {
    pub fn with_delays(triage_delay: Duration, summary_delay: Duration) -> Self {
        Self {
            triage_delay,
            summary_delay,
        }
    }

    pub fn triage_result() -> AiTriageResult {
        AiTriageResult {
            summary: "A major water pipe has burst, causing significant flooding and traffic disruption."
                .to_string(),
            priority: Severity::Critical,
            recommendations: vec![
                "Dispatch emergency water works crew immediately.".to_string(),
                "Alert traffic police to redirect vehicles.".to_string(),
                "Issue a public service announcement for the affected area.".to_string(),
            ],
        }
    }

    pub fn city_summary() -> AiCitySummary {
        AiCitySummary {
            situation: "The city is currently experiencing a high volume of public works and \
                        traffic-related issues, particularly in the downtown and northside areas. \
                        Multiple reports of water leakages and power outages suggest potential \
                        infrastructure strain. A cluster of high-severity traffic incidents requires \
                        immediate attention."
                .to_string(),
            recommendations: vec![
                "Increase patrol units in the Downtown area to manage traffic disruptions.".to_string(),
                "Deploy public works assessment teams to the Northside to investigate correlated water and power issues.".to_string(),
                "Send a public safety alert regarding the traffic signal malfunctions on major avenues.".to_string(),
            ],
        }
    }
}

#[async_trait]
impl Assistant for CannedAssistant {
    fn mode(&self) -> AssistantMode {
        AssistantMode::Canned
    }

    async fn request_triage(&self, description: &str) -> Result<AiTriageResult, AssistantError> {
        debug!(description_len = description.len(), "serving canned triage");
        tokio::time::sleep(self.triage_delay).await;
        Ok(Self::triage_result())
    }

    async fn request_city_summary(
        &self,
        incidents: &[Incident],
    ) -> Result<AiCitySummary, AssistantError> {
        debug!(count = incidents.len(), "serving canned city summary");
        tokio::time::sleep(self.summary_delay).await;
        Ok(Self::city_summary())
    }
}

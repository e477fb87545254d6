//! Prompt templates and response schemas for the two assistant requests.
//!
//! Schemas use the provider's OpenAPI subset (upper-case type names).

use std::ops::RangeInclusive;

use civic_core::{Incident, Severity};
use serde_json::{Value, json};

/// Allowed number of triage recommendations.
pub const TRIAGE_RECOMMENDATIONS: RangeInclusive<usize> = 2..=3;

/// A city summary carries exactly three recommendations.
pub const SUMMARY_RECOMMENDATIONS: RangeInclusive<usize> = 3..=3;

pub fn triage_prompt(description: &str) -> String {
    format!(
        "You are an AI assistant for a city's civic authority. Analyze the following incident report.\n\
         Your task is to provide a triage assessment in JSON format.\n\
         \n\
         Incident Report: \"{description}\"\n\
         \n\
         Based on the report, provide a concise summary, assess the priority, and suggest actionable recommendations."
    )
}

pub fn triage_schema() -> Value {
    let priorities: Vec<&str> = Severity::ALL.iter().map(|s| s.label()).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "A concise, one-sentence summary of the incident."
            },
            "priority": {
                "type": "STRING",
                "enum": priorities,
                "description": "The assessed priority level of the incident."
            },
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "minItems": TRIAGE_RECOMMENDATIONS.start(),
                "maxItems": TRIAGE_RECOMMENDATIONS.end(),
                "description": "A list of 2-3 brief, actionable recommendations for the responsible department."
            }
        },
        "required": ["summary", "priority", "recommendations"]
    })
}

/// One line per incident: `- {type} ({severity}) at {address}`.
pub fn city_summary_prompt(incidents: &[Incident]) -> String {
    let listing = incidents
        .iter()
        .map(|i| format!("- {} ({}) at {}", i.kind, i.severity, i.location.address))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an AI city operations analyst. Based on the following list of active incidents, \
         provide a high-level situation overview and three strategic recommendations for the city administrator.\n\
         \n\
         Current Incidents:\n\
         {listing}"
    )
}

pub fn city_summary_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "situation": {
                "type": "STRING",
                "description": "A 2-3 sentence overview of the current city-wide situation based on the incidents."
            },
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "minItems": SUMMARY_RECOMMENDATIONS.start(),
                "maxItems": SUMMARY_RECOMMENDATIONS.end(),
                "description": "A list of 3 high-level strategic recommendations for the city administration."
            }
        },
        "required": ["situation", "recommendations"]
    })
}

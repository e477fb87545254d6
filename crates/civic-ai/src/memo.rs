use civic_core::{AiCitySummary, Incident};
use tracing::debug;

use crate::assistant::Assistant;
use crate::error::AssistantError;

/// Holds the first successful city summary for the lifetime of one panel.
///
/// Later calls return the stored summary without a new request, even if the
/// incident list has changed. Failures are not stored.
#[derive(Debug, Default)]
pub struct SummaryMemo {
    cached: Option<AiCitySummary>,
}

impl SummaryMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&AiCitySummary> {
        self.cached.as_ref()
    }

    pub async fn get_or_request(
        &mut self,
        assistant: &dyn Assistant,
        incidents: &[Incident],
    ) -> Result<&AiCitySummary, AssistantError> {
        let summary = match self.cached.take() {
            Some(summary) => {
                debug!("city summary served from memo");
                summary
            }
            None => assistant.request_city_summary(incidents).await?,
        };
        Ok(self.cached.insert(summary))
    }
}

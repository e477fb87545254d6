//! Per-view state owned by a view controller.
//!
//! Each view holds its own incident list; these structs carry only the user's
//! selections and hand back new lists from the pure functions in
//! [`crate::views`].

use serde::Serialize;

use crate::model::{AiTriageResult, Department, Incident, Status};
use crate::views::{self, DepartmentFilter, SeverityFilter, SortKey, SortOrder};

/// Filter and sort selections of the incident table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IncidentTableState {
    pub department: DepartmentFilter,
    pub severity: SeverityFilter,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

impl IncidentTableState {
    /// Column-header click: the active key flips its order, a new key starts
    /// descending.
    pub fn toggle_sort(self, key: SortKey) -> Self {
        let sort_order = if key == self.sort_key {
            self.sort_order.flipped()
        } else {
            SortOrder::Desc
        };
        Self {
            sort_key: key,
            sort_order,
            ..self
        }
    }

    pub fn with_department(self, department: DepartmentFilter) -> Self {
        Self { department, ..self }
    }

    pub fn with_severity(self, severity: SeverityFilter) -> Self {
        Self { severity, ..self }
    }

    /// Rows to display: department filter, then severity filter, then sort.
    pub fn apply(&self, incidents: &[Incident]) -> Vec<Incident> {
        let by_department = views::filter_by_department(incidents, self.department);
        let by_severity = views::filter_by_severity(&by_department, self.severity);
        views::sort(&by_severity, self.sort_key, self.sort_order)
    }
}

/// Case-management panel for one incident.
///
/// Edits live here, not on the incident: the generated record stays as it was
/// reported. Any status or department change is allowed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncidentCase {
    pub incident: Incident,
    pub status: Status,
    pub assigned: Department,
    pub triage: Option<AiTriageResult>,
}

impl IncidentCase {
    pub fn open(incident: Incident) -> Self {
        Self {
            status: incident.status,
            assigned: incident.department,
            incident,
            triage: None,
        }
    }

    /// Attach a triage result; the case moves to [`Status::AiTriaged`].
    pub fn record_triage(&mut self, result: AiTriageResult) {
        self.triage = Some(result);
        self.status = Status::AiTriaged;
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub fn reassign(&mut self, department: Department) {
        self.assigned = department;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;
    use crate::model::Severity;

    #[test]
    fn default_sorts_newest_first() {
        let state = IncidentTableState::default();
        assert_eq!(state.sort_key, SortKey::ReportedAt);
        assert_eq!(state.sort_order, SortOrder::Desc);

        let rows = state.apply(&mock::generate(50));
        assert!(rows.windows(2).all(|w| w[0].reported_at >= w[1].reported_at));
    }

    #[test]
    fn toggle_same_key_flips_order() {
        let state = IncidentTableState::default().toggle_sort(SortKey::ReportedAt);
        assert_eq!(state.sort_order, SortOrder::Asc);
        let state = state.toggle_sort(SortKey::ReportedAt);
        assert_eq!(state.sort_order, SortOrder::Desc);
    }

    #[test]
    fn toggle_new_key_starts_descending() {
        let state = IncidentTableState::default()
            .toggle_sort(SortKey::ReportedAt)
            .toggle_sort(SortKey::Severity);
        assert_eq!(state.sort_key, SortKey::Severity);
        assert_eq!(state.sort_order, SortOrder::Desc);
    }

    #[test]
    fn apply_combines_filters() {
        let list = mock::generate(200);
        let state = IncidentTableState::default()
            .with_department(DepartmentFilter::Only(Department::PowerGrid))
            .with_severity(SeverityFilter::Only(Severity::Critical));
        let rows = state.apply(&list);

        let expected = list
            .iter()
            .filter(|i| i.department == Department::PowerGrid && i.severity == Severity::Critical)
            .count();
        assert_eq!(rows.len(), expected);
        assert!(rows.iter().all(|i| i.department == Department::PowerGrid));
    }

    #[test]
    fn triage_moves_case_to_ai_triaged() {
        let incident = mock::generate(1).remove(0);
        let original_status = incident.status;
        let mut case = IncidentCase::open(incident);
        assert_eq!(case.status, original_status);

        case.record_triage(AiTriageResult {
            summary: "Burst pipe".into(),
            priority: Severity::Critical,
            recommendations: vec!["Dispatch crew".into(), "Divert traffic".into()],
        });
        assert_eq!(case.status, Status::AiTriaged);
        assert_eq!(case.incident.status, original_status);
        assert!(case.triage.is_some());
    }

    #[test]
    fn any_transition_is_allowed() {
        let mut case = IncidentCase::open(mock::generate(1).remove(0));
        case.set_status(Status::Closed);
        case.set_status(Status::Submitted);
        assert_eq!(case.status, Status::Submitted);

        case.reassign(Department::HealthServices);
        assert_eq!(case.assigned, Department::HealthServices);
    }
}

//! Derived views over an incident list: filters, stable sort, aggregates,
//! day buckets, and the chart and map series built from them.
//!
//! Every function is pure. Inputs are borrowed and never mutated; outputs are
//! fresh collections. None of them can fail.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{Local, NaiveDate, TimeZone};
use serde::Serialize;

use crate::model::{Department, Incident, Severity, Status};

// ── Filters ──

/// Department filter. Unknown labels mean "no filter".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepartmentFilter {
    #[default]
    All,
    Only(Department),
}

impl DepartmentFilter {
    /// Parse a filter label leniently: "All", empty text, or any label that is
    /// not a department all yield [`DepartmentFilter::All`].
    pub fn from_label(label: &str) -> Self {
        label.trim().parse().map(Self::Only).unwrap_or(Self::All)
    }

    pub fn matches(&self, incident: &Incident) -> bool {
        match self {
            Self::All => true,
            Self::Only(d) => incident.department == *d,
        }
    }
}

/// Severity filter. Unknown labels mean "no filter".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeverityFilter {
    #[default]
    All,
    Only(Severity),
}

impl SeverityFilter {
    pub fn from_label(label: &str) -> Self {
        label.trim().parse().map(Self::Only).unwrap_or(Self::All)
    }

    pub fn matches(&self, incident: &Incident) -> bool {
        match self {
            Self::All => true,
            Self::Only(s) => incident.severity == *s,
        }
    }
}

pub fn filter_by_department(incidents: &[Incident], filter: DepartmentFilter) -> Vec<Incident> {
    incidents
        .iter()
        .filter(|i| filter.matches(i))
        .cloned()
        .collect()
}

pub fn filter_by_severity(incidents: &[Incident], filter: SeverityFilter) -> Vec<Incident> {
    incidents
        .iter()
        .filter(|i| filter.matches(i))
        .cloned()
        .collect()
}

// ── Sorting ──

/// Incident field a table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Id,
    Type,
    Severity,
    Status,
    Department,
    #[default]
    ReportedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl SortKey {
    /// Natural ordering of the field: timestamps by instant, severity and
    /// status by rank, everything else as text.
    pub fn compare(&self, a: &Incident, b: &Incident) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Type => a.kind.cmp(&b.kind),
            Self::Severity => a.severity.cmp(&b.severity),
            Self::Status => a.status.cmp(&b.status),
            Self::Department => a.department.label().cmp(b.department.label()),
            Self::ReportedAt => a.reported_at.cmp(&b.reported_at),
        }
    }
}

/// Stable sort. Equal keys keep their input order in both directions.
pub fn sort(incidents: &[Incident], key: SortKey, order: SortOrder) -> Vec<Incident> {
    let mut sorted = incidents.to_vec();
    // `sort_by` is a stable merge sort; reversing the comparator (not the
    // output) keeps ties in input order for descending too.
    match order {
        SortOrder::Asc => sorted.sort_by(|a, b| key.compare(a, b)),
        SortOrder::Desc => sorted.sort_by(|a, b| key.compare(b, a)),
    }
    sorted
}

// ── Aggregates ──

/// Open and total incident counts for one department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DepartmentLoad {
    pub open: usize,
    pub total: usize,
}

/// Per-department load, pre-seeded with every department.
pub fn aggregate_by_department(incidents: &[Incident]) -> BTreeMap<Department, DepartmentLoad> {
    let mut loads: BTreeMap<Department, DepartmentLoad> = Department::ALL
        .iter()
        .map(|d| (*d, DepartmentLoad::default()))
        .collect();

    for incident in incidents {
        let load = loads.entry(incident.department).or_default();
        load.total += 1;
        if incident.status.is_open() {
            load.open += 1;
        }
    }
    loads
}

/// Count per severity, zero-filled.
pub fn aggregate_by_severity(incidents: &[Incident]) -> BTreeMap<Severity, usize> {
    let mut counts: BTreeMap<Severity, usize> = Severity::ALL.iter().map(|s| (*s, 0)).collect();
    for incident in incidents {
        *counts.entry(incident.severity).or_default() += 1;
    }
    counts
}

/// Count per status, zero-filled.
pub fn aggregate_by_status(incidents: &[Incident]) -> BTreeMap<Status, usize> {
    let mut counts: BTreeMap<Status, usize> = Status::ALL.iter().map(|s| (*s, 0)).collect();
    for incident in incidents {
        *counts.entry(incident.status).or_default() += 1;
    }
    counts
}

/// Number of incidents reported on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCount {
    /// Displays as `YYYY-MM-DD`.
    pub day: NaiveDate,
    pub count: usize,
}

/// Group by local calendar date, ascending.
pub fn bucket_by_day(incidents: &[Incident]) -> Vec<DayCount> {
    bucket_by_day_in(incidents, &Local)
}

/// Group by calendar date in `tz`, ascending.
pub fn bucket_by_day_in<Tz: TimeZone>(incidents: &[Incident], tz: &Tz) -> Vec<DayCount> {
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for incident in incidents {
        let day = incident.reported_at.with_timezone(tz).date_naive();
        *days.entry(day).or_default() += 1;
    }
    days.into_iter()
        .map(|(day, count)| DayCount { day, count })
        .collect()
}

/// Headline dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct KpiSummary {
    pub total: usize,
    pub open: usize,
    pub resolved: usize,
    pub high_severity: usize,
}

pub fn kpi_summary(incidents: &[Incident]) -> KpiSummary {
    incidents.iter().fold(
        KpiSummary {
            total: incidents.len(),
            ..Default::default()
        },
        |mut kpi, i| {
            if i.status.is_open() {
                kpi.open += 1;
            }
            if i.status == Status::Resolved {
                kpi.resolved += 1;
            }
            if i.severity.is_high() {
                kpi.high_severity += 1;
            }
            kpi
        },
    )
}

// ── Chart series ──

/// One bar, slice, or line point for the charting layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: usize,
}

/// Incident count per department, in enumeration order.
pub fn department_series(incidents: &[Incident]) -> Vec<ChartPoint> {
    aggregate_by_department(incidents)
        .into_iter()
        .map(|(d, load)| ChartPoint {
            name: d.label().to_string(),
            value: load.total,
        })
        .collect()
}

pub fn severity_series(incidents: &[Incident]) -> Vec<ChartPoint> {
    aggregate_by_severity(incidents)
        .into_iter()
        .map(|(s, value)| ChartPoint {
            name: s.label().to_string(),
            value,
        })
        .collect()
}

pub fn status_series(incidents: &[Incident]) -> Vec<ChartPoint> {
    aggregate_by_status(incidents)
        .into_iter()
        .map(|(s, value)| ChartPoint {
            name: s.label().to_string(),
            value,
        })
        .collect()
}

/// Incidents over time, one point per local calendar day.
pub fn timeline_series(incidents: &[Incident]) -> Vec<ChartPoint> {
    bucket_by_day(incidents)
        .into_iter()
        .map(|d| ChartPoint {
            name: d.day.to_string(),
            value: d.count,
        })
        .collect()
}

// ── Map ──

/// Render mode of the map widget. The two are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MapMode {
    #[default]
    Clusters,
    Heatmap,
}

/// A marker (or heatmap weight) for one incident.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lng: f64,
    pub label: String,
}

pub fn map_points(incidents: &[Incident]) -> Vec<MapPoint> {
    incidents
        .iter()
        .map(|i| MapPoint {
            lat: i.location.lat,
            lng: i.location.lng,
            label: i.kind.clone(),
        })
        .collect()
}

/// Number of entries in the dashboard live feed.
pub const LIVE_FEED_LEN: usize = 15;

/// The first `n` incidents in list order.
pub fn live_feed(incidents: &[Incident], n: usize) -> &[Incident] {
    &incidents[..n.min(incidents.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;
    use crate::model::{Location, Reporter};
    use chrono::{DateTime, TimeDelta, Utc};
    use uuid::Uuid;

    fn at(ts: &str) -> DateTime<Utc> {
        ts.parse().unwrap()
    }

    fn incident(
        kind: &str,
        department: Department,
        severity: Severity,
        status: Status,
        reported_at: DateTime<Utc>,
    ) -> Incident {
        Incident {
            id: Uuid::new_v4(),
            kind: kind.into(),
            description: format!("{kind} reported"),
            department,
            severity,
            status,
            location: Location {
                lat: 12.97,
                lng: 77.59,
                address: "123 MG Road, Ashok Nagar".into(),
            },
            reported_at,
            reporter: Reporter {
                name: "Arjun Kumar".into(),
                credibility: 85,
            },
            media: None,
        }
    }

    fn sample() -> Vec<Incident> {
        vec![
            incident(
                "Pothole",
                Department::PublicWorks,
                Severity::High,
                Status::Submitted,
                at("2026-03-01T09:00:00Z"),
            ),
            incident(
                "Power Outage",
                Department::PowerGrid,
                Severity::Critical,
                Status::Resolved,
                at("2026-03-02T09:00:00Z"),
            ),
            incident(
                "Fallen Tree",
                Department::PublicWorks,
                Severity::Low,
                Status::Closed,
                at("2026-03-01T15:00:00Z"),
            ),
            incident(
                "Illegal Parking",
                Department::Traffic,
                Severity::Medium,
                Status::InProgress,
                at("2026-03-03T09:00:00Z"),
            ),
        ]
    }

    fn ids(list: &[Incident]) -> Vec<Uuid> {
        list.iter().map(|i| i.id).collect()
    }

    /// `sub` appears in `full` in the same relative order.
    fn is_subsequence(sub: &[Incident], full: &[Incident]) -> bool {
        let mut it = full.iter();
        sub.iter().all(|s| it.any(|f| f.id == s.id))
    }

    #[test]
    fn department_filter_keeps_exact_matches_in_order() {
        let list = mock::generate(120);
        for d in Department::ALL {
            let filtered = filter_by_department(&list, DepartmentFilter::Only(*d));
            assert!(is_subsequence(&filtered, &list));
            assert!(filtered.iter().all(|i| i.department == *d));
            let expected = list.iter().filter(|i| i.department == *d).count();
            assert_eq!(filtered.len(), expected);
        }
    }

    #[test]
    fn all_filter_is_identity() {
        let list = sample();
        assert_eq!(filter_by_department(&list, DepartmentFilter::All), list);
        assert_eq!(filter_by_severity(&list, SeverityFilter::All), list);
    }

    #[test]
    fn unknown_filter_labels_mean_no_filter() {
        assert_eq!(DepartmentFilter::from_label("All"), DepartmentFilter::All);
        assert_eq!(DepartmentFilter::from_label("Fire Brigade"), DepartmentFilter::All);
        assert_eq!(DepartmentFilter::from_label(""), DepartmentFilter::All);
        assert_eq!(
            DepartmentFilter::from_label("Water Works"),
            DepartmentFilter::Only(Department::WaterWorks)
        );
        assert_eq!(SeverityFilter::from_label("Urgent"), SeverityFilter::All);
        assert_eq!(
            SeverityFilter::from_label(" High "),
            SeverityFilter::Only(Severity::High)
        );
    }

    #[test]
    fn severity_filter_keeps_exact_matches() {
        let list = sample();
        let high = filter_by_severity(&list, SeverityFilter::Only(Severity::High));
        assert_eq!(high.len(), 1);
        assert_eq!(high[0].kind, "Pothole");
    }

    #[test]
    fn sort_by_reported_at_both_directions() {
        let list = sample();
        let asc = sort(&list, SortKey::ReportedAt, SortOrder::Asc);
        let kinds: Vec<_> = asc.iter().map(|i| i.kind.as_str()).collect();
        assert_eq!(
            kinds,
            ["Pothole", "Fallen Tree", "Power Outage", "Illegal Parking"]
        );

        let desc = sort(&asc, SortKey::ReportedAt, SortOrder::Desc);
        let mut reversed = ids(&asc);
        reversed.reverse();
        assert_eq!(ids(&desc), reversed);
    }

    #[test]
    fn sort_severity_uses_rank_not_text() {
        let sorted = sort(&sample(), SortKey::Severity, SortOrder::Asc);
        let sev: Vec<_> = sorted.iter().map(|i| i.severity).collect();
        assert_eq!(
            sev,
            [Severity::Low, Severity::Medium, Severity::High, Severity::Critical]
        );
    }

    #[test]
    fn sort_department_by_label() {
        let sorted = sort(&sample(), SortKey::Department, SortOrder::Asc);
        let labels: Vec<_> = sorted.iter().map(|i| i.department.label()).collect();
        assert_eq!(labels, ["Power Grid", "Public Works", "Public Works", "Traffic"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let t = at("2026-03-01T09:00:00Z");
        let list: Vec<Incident> = (0..20)
            .map(|n| {
                let sev = if n % 2 == 0 { Severity::High } else { Severity::Low };
                incident(&format!("Item {n}"), Department::Traffic, sev, Status::Submitted, t)
            })
            .collect();

        for order in [SortOrder::Asc, SortOrder::Desc] {
            let sorted = sort(&list, SortKey::Severity, order);
            let highs: Vec<_> = sorted.iter().filter(|i| i.severity == Severity::High).collect();
            let expected: Vec<_> = list.iter().filter(|i| i.severity == Severity::High).collect();
            assert_eq!(highs, expected, "ties reordered for {order:?}");

            // All timestamps equal: ReportedAt sort is the identity.
            assert_eq!(ids(&sort(&list, SortKey::ReportedAt, order)), ids(&list));
        }
    }

    #[test]
    fn sort_does_not_mutate_input() {
        let list = sample();
        let before = list.clone();
        let _ = sort(&list, SortKey::Type, SortOrder::Asc);
        assert_eq!(list, before);
    }

    #[test]
    fn department_aggregate_has_all_six() {
        let empty = aggregate_by_department(&[]);
        assert_eq!(empty.len(), 6);
        assert!(empty.values().all(|l| *l == DepartmentLoad::default()));

        let list = mock::generate(150);
        let loads = aggregate_by_department(&list);
        assert_eq!(loads.len(), 6);
        assert_eq!(loads.values().map(|l| l.total).sum::<usize>(), list.len());
        assert!(loads.values().all(|l| l.open <= l.total));
    }

    #[test]
    fn department_aggregate_counts_open() {
        let loads = aggregate_by_department(&sample());
        assert_eq!(
            loads[&Department::PublicWorks],
            DepartmentLoad { open: 1, total: 2 }
        );
        assert_eq!(
            loads[&Department::PowerGrid],
            DepartmentLoad { open: 0, total: 1 }
        );
        assert_eq!(loads[&Department::Sanitation], DepartmentLoad::default());
    }

    #[test]
    fn severity_and_status_counts_zero_filled() {
        let list = sample();
        let sev = aggregate_by_severity(&list);
        assert_eq!(sev.len(), 4);
        assert!(sev.values().all(|c| *c == 1));

        let status = aggregate_by_status(&list);
        assert_eq!(status.len(), 6);
        assert_eq!(status[&Status::AiTriaged], 0);
        assert_eq!(status[&Status::Assigned], 0);
        assert_eq!(status.values().sum::<usize>(), list.len());
    }

    #[test]
    fn bucket_by_day_groups_and_sorts() {
        let days = bucket_by_day_in(&sample(), &Utc);
        let rendered: Vec<_> = days.iter().map(|d| (d.day.to_string(), d.count)).collect();
        assert_eq!(
            rendered,
            [
                ("2026-03-01".to_string(), 2),
                ("2026-03-02".to_string(), 1),
                ("2026-03-03".to_string(), 1),
            ]
        );
    }

    #[test]
    fn bucket_by_day_respects_time_zone() {
        let late = incident(
            "Pothole",
            Department::PublicWorks,
            Severity::Low,
            Status::Submitted,
            at("2026-03-01T22:30:00Z"),
        );
        let ist = chrono::FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let days = bucket_by_day_in(std::slice::from_ref(&late), &ist);
        assert_eq!(days[0].day.to_string(), "2026-03-02");
    }

    #[test]
    fn bucket_counts_sum_to_total() {
        let list = mock::generate(200);
        let days = bucket_by_day(&list);
        assert_eq!(days.iter().map(|d| d.count).sum::<usize>(), list.len());
        assert!(days.windows(2).all(|w| w[0].day < w[1].day));
    }

    #[test]
    fn kpi_summary_counts() {
        let kpi = kpi_summary(&sample());
        assert_eq!(
            kpi,
            KpiSummary {
                total: 4,
                open: 2,
                resolved: 1,
                high_severity: 2,
            }
        );
    }

    #[test]
    fn kpi_open_plus_finished_is_total() {
        let list = mock::generate(300);
        let kpi = kpi_summary(&list);
        let finished = list
            .iter()
            .filter(|i| matches!(i.status, Status::Resolved | Status::Closed))
            .count();
        assert_eq!(kpi.total, list.len());
        assert_eq!(kpi.open + finished, list.len());
    }

    #[test]
    fn chart_series_follow_enumeration_order() {
        let list = sample();
        let depts: Vec<_> = department_series(&list)
            .into_iter()
            .map(|p| (p.name, p.value))
            .collect();
        assert_eq!(depts[0], ("Traffic".to_string(), 1));
        assert_eq!(depts[4], ("Public Works".to_string(), 2));
        assert_eq!(depts.len(), 6);

        let statuses: Vec<_> = status_series(&list).into_iter().map(|p| p.name).collect();
        assert_eq!(
            statuses,
            ["Submitted", "AI Triaged", "Assigned", "In Progress", "Resolved", "Closed"]
        );
        assert_eq!(severity_series(&list).len(), 4);
    }

    #[test]
    fn timeline_matches_buckets() {
        let now = Utc::now();
        let list = vec![
            incident("A", Department::Traffic, Severity::Low, Status::Submitted, now),
            incident(
                "B",
                Department::Traffic,
                Severity::Low,
                Status::Submitted,
                now - TimeDelta::days(3),
            ),
        ];
        let series = timeline_series(&list);
        assert_eq!(series.len(), 2);
        assert!(series[0].name < series[1].name);
        assert_eq!(series[0].name.len(), "YYYY-MM-DD".len());
    }

    #[test]
    fn map_points_use_type_as_label() {
        let points = map_points(&sample());
        assert_eq!(points.len(), 4);
        assert_eq!(points[1].label, "Power Outage");
        assert_eq!(points[1].lat, 12.97);
    }

    #[test]
    fn live_feed_is_a_prefix() {
        let list = mock::generate(40);
        assert_eq!(live_feed(&list, LIVE_FEED_LEN), &list[..15]);
        assert_eq!(live_feed(&list[..3], LIVE_FEED_LEN).len(), 3);
    }
}

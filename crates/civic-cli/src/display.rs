//! Terminal rendering for incident lists, cases and dashboard panels.
//!
//! Incident cards are rendered from a single-row RecordBatch grouped by
//! schema section, the same columns the table view uses.

use arrow::array::Array;
use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use civic_core::views::{ChartPoint, DepartmentLoad, KpiSummary};
use civic_core::{AiCitySummary, AiTriageResult, DepartmentInfo, Incident, IncidentCase, incidents};

const BAR_WIDTH: usize = 40;

// ── Schema section groupings ──

const IDENTITY: &[&str] = &["id", "type", "severity", "status", "department"];

const LOCATION: &[&str] = &["address", "lat", "lng"];

const REPORT: &[&str] = &["reported_at", "reporter", "credibility", "media_url"];

// ── Public API ──

/// Print incidents as a table of the display columns, in list order.
pub fn print_incident_table(list: &[Incident]) -> anyhow::Result<()> {
    let batch = incidents::to_record_batch(list)?;
    let view = incidents::table_view(&batch)?;
    println!("{}", arrow::util::pretty::pretty_format_batches(&[view])?);
    println!("{} incidents", list.len());
    Ok(())
}

/// Print a case panel: the reported incident as a vertical card, then the
/// case-management state and any triage result.
pub fn print_case(case: &IncidentCase) -> anyhow::Result<()> {
    let batch = incidents::to_record_batch(std::slice::from_ref(&case.incident))?;

    println!("=== {} ===", case.incident.kind);
    println!("{}", case.incident.description);
    println!();

    print_section(&batch, "Identity", IDENTITY);
    print_section(&batch, "Location", LOCATION);
    print_section(&batch, "Report", REPORT);

    println!("Case");
    println!("  {:<26} {}", "status", case.status);
    println!("  {:<26} {}", "assigned", case.assigned);
    let contact = case.assigned.info();
    println!("  {:<26} {} <{}>", "contact", contact.head, contact.email);
    println!();

    if let Some(triage) = &case.triage {
        print_triage(triage);
    }
    Ok(())
}

pub fn print_triage(result: &AiTriageResult) {
    println!("AI Triage");
    println!("  {:<26} {}", "summary", result.summary);
    println!("  {:<26} {}", "priority", result.priority);
    print_recommendations(&result.recommendations);
    println!();
}

pub fn print_city_summary(summary: &AiCitySummary) {
    println!("AI City Summary");
    println!("  {}", summary.situation);
    print_recommendations(&summary.recommendations);
    println!();
}

pub fn print_department_card(info: &DepartmentInfo, load: DepartmentLoad) {
    println!("=== {} ===", info.department);
    println!("  {:<26} {}", "head", info.head);
    println!("  {:<26} {}", "email", info.email);
    println!("  {:<26} {}", "phone", info.phone);
    println!("  {:<26} {} / {}", "open / total", load.open, load.total);
    println!();
}

pub fn print_kpis(kpis: &KpiSummary) {
    println!("Key Metrics");
    println!("  {:<26} {}", "total incidents", kpis.total);
    println!("  {:<26} {}", "open", kpis.open);
    println!("  {:<26} {}", "resolved", kpis.resolved);
    println!("  {:<26} {}", "high severity", kpis.high_severity);
    println!();
}

/// Print a named series as horizontal bars scaled to the largest value.
pub fn print_series(title: &str, points: &[ChartPoint]) {
    println!("{title}");
    let max = points.iter().map(|p| p.value).max().unwrap_or(0);
    for p in points {
        println!("  {:<26} {:>5}  {}", p.name, p.value, "#".repeat(bar_len(p.value, max)));
    }
    println!();
}

pub fn print_feed(feed: &[Incident]) {
    println!("Live Feed ({})", feed.len());
    for i in feed {
        println!(
            "  {}  {:<10} {:<18} {}",
            i.reported_at.format("%m-%d %H:%M"),
            i.severity,
            i.kind,
            i.location.address
        );
    }
    println!();
}

// ── Section rendering ──

fn print_section(batch: &RecordBatch, header: &str, cols: &[&str]) {
    let options = FormatOptions::default();
    println!("{header}");
    for &col_name in cols {
        let Some(col) = batch.column_by_name(col_name) else {
            continue;
        };
        if col.is_null(0) {
            continue;
        }
        match ArrayFormatter::try_new(col.as_ref(), &options) {
            Ok(fmt) => println!("  {:<26} {}", col_name, fmt.value(0)),
            Err(_) => println!("  {:<26} ({})", col_name, col.data_type()),
        }
    }
    println!();
}

fn print_recommendations(items: &[String]) {
    for (n, item) in items.iter().enumerate() {
        println!("  {}. {}", n + 1, item);
    }
}

fn bar_len(value: usize, max: usize) -> usize {
    if max == 0 {
        return 0;
    }
    (value * BAR_WIDTH).div_ceil(max)
}

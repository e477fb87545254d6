mod display;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use civic_ai::{Assistant, AssistantConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, SummaryMemo};
use civic_core::views::{
    self, DepartmentFilter, LIVE_FEED_LEN, MapMode, MapPoint, SeverityFilter, SortKey, SortOrder,
};
use civic_core::{Incident, IncidentCase, IncidentTableState, mock};
use serde::Serialize;
use tracing::info;

/// Civic incident dashboard: browse simulated incidents, aggregate them, and
/// request AI triage and city summaries.
#[derive(Parser)]
#[command(name = "civic", version, about)]
struct Cli {
    #[command(flatten)]
    ai: AiArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct AiArgs {
    /// Gemini API key. Without one, canned AI responses are used.
    #[arg(long, env = "GEMINI_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, env = "GEMINI_MODEL", global = true, default_value = DEFAULT_MODEL)]
    model: String,

    #[arg(long, env = "GEMINI_BASE_URL", global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

impl From<AiArgs> for AssistantConfig {
    fn from(args: AiArgs) -> Self {
        Self {
            api_key: args.api_key,
            model: args.model,
            base_url: args.base_url,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Filtered, sorted incident table
    Incidents {
        #[arg(long, default_value_t = 50)]
        count: usize,
        /// Department label, or "All"
        #[arg(long, default_value = "All")]
        department: String,
        /// Severity label, or "All"
        #[arg(long, default_value = "All")]
        severity: String,
        #[arg(long, value_enum, default_value_t = SortArg::ReportedAt)]
        sort: SortArg,
        #[arg(long, value_enum, default_value_t = OrderArg::Desc)]
        order: OrderArg,
    },
    /// One incident as a case panel
    Show {
        #[arg(long, default_value_t = 50)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        index: usize,
        /// Run AI triage on the incident description
        #[arg(long)]
        triage: bool,
    },
    /// Department directory with workload
    Departments {
        #[arg(long, default_value_t = 150)]
        count: usize,
    },
    /// Severity and status distributions, incidents over time
    Analytics {
        #[arg(long, default_value_t = 200)]
        count: usize,
    },
    /// Key metrics, department load, and live feed
    Dashboard {
        #[arg(long, default_value_t = 150)]
        count: usize,
        #[arg(long, default_value_t = LIVE_FEED_LEN)]
        feed: usize,
        /// Include the AI city summary
        #[arg(long)]
        summary: bool,
    },
    /// Triage free-text incident descriptions
    Triage {
        #[arg(required = true)]
        descriptions: Vec<String>,
    },
    /// AI city summary over a generated batch
    Summary {
        #[arg(long, default_value_t = 150)]
        count: usize,
    },
    /// Map payload as JSON
    Map {
        #[arg(long, default_value_t = 150)]
        count: usize,
        #[arg(long, value_enum, default_value_t = ModeArg::Clusters)]
        mode: ModeArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Id,
    Type,
    Severity,
    Status,
    Department,
    ReportedAt,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Id => SortKey::Id,
            SortArg::Type => SortKey::Type,
            SortArg::Severity => SortKey::Severity,
            SortArg::Status => SortKey::Status,
            SortArg::Department => SortKey::Department,
            SortArg::ReportedAt => SortKey::ReportedAt,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Asc => SortOrder::Asc,
            OrderArg::Desc => SortOrder::Desc,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Clusters,
    Heatmap,
}

impl From<ModeArg> for MapMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Clusters => MapMode::Clusters,
            ModeArg::Heatmap => MapMode::Heatmap,
        }
    }
}

#[derive(Serialize)]
struct MapPayload {
    mode: MapMode,
    points: Vec<MapPoint>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries command output only.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    info!("civic v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config = AssistantConfig::from(cli.ai);

    match cli.command {
        Command::Incidents {
            count,
            department,
            severity,
            sort,
            order,
        } => {
            let state = IncidentTableState {
                department: DepartmentFilter::from_label(&department),
                severity: SeverityFilter::from_label(&severity),
                sort_key: sort.into(),
                sort_order: order.into(),
            };
            let rows = state.apply(&mock::generate(count));
            display::print_incident_table(&rows)?;
        }
        Command::Show {
            count,
            index,
            triage,
        } => {
            let list = mock::generate(count);
            let incident = list
                .into_iter()
                .nth(index)
                .with_context(|| format!("no incident at index {index} (batch of {count})"))?;
            let mut case = IncidentCase::open(incident);
            if triage {
                let assistant = build_assistant(&config);
                let result = assistant.request_triage(&case.incident.description).await?;
                case.record_triage(result);
            }
            display::print_case(&case)?;
        }
        Command::Departments { count } => {
            let loads = views::aggregate_by_department(&mock::generate(count));
            for (department, load) in loads {
                display::print_department_card(department.info(), load);
            }
        }
        Command::Analytics { count } => {
            let list = mock::generate(count);
            display::print_series("Incidents by Severity", &views::severity_series(&list));
            display::print_series("Incidents by Status", &views::status_series(&list));
            display::print_series("Incidents over Time", &views::timeline_series(&list));
        }
        Command::Dashboard {
            count,
            feed,
            summary,
        } => {
            let list = mock::generate(count);
            display::print_kpis(&views::kpi_summary(&list));
            display::print_series("Incidents by Department", &views::department_series(&list));
            display::print_feed(views::live_feed(&list, feed));
            if summary {
                let assistant = build_assistant(&config);
                let mut memo = SummaryMemo::new();
                let summary = memo.get_or_request(assistant.as_ref(), &list).await?;
                display::print_city_summary(summary);
            }
        }
        Command::Triage { descriptions } => {
            triage_all(build_assistant(&config).as_ref(), &descriptions).await;
        }
        Command::Summary { count } => {
            let summary = build_assistant(&config)
                .request_city_summary(&mock::generate(count))
                .await?;
            display::print_city_summary(&summary);
        }
        Command::Map { count, mode } => {
            println!("{}", map_json(&mock::generate(count), mode.into())?);
        }
    }

    Ok(())
}

fn build_assistant(config: &AssistantConfig) -> Box<dyn Assistant> {
    let assistant = config.build();
    info!(mode = %assistant.mode(), "assistant ready");
    assistant
}

fn map_json(list: &[Incident], mode: MapMode) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&MapPayload {
        mode,
        points: views::map_points(list),
    })
}

/// Independent requests run concurrently; one failure does not stop the rest.
async fn triage_all(assistant: &dyn Assistant, descriptions: &[String]) {
    let requests = descriptions.iter().map(|d| assistant.request_triage(d));
    let results = futures::future::join_all(requests).await;

    for (description, result) in descriptions.iter().zip(results) {
        println!("> {description}");
        match result {
            Ok(triage) => display::print_triage(&triage),
            Err(e) => {
                tracing::warn!(error = ?e.cause(), "triage failed");
                println!("  {e}");
                println!();
            }
        }
    }
}

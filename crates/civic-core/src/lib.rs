pub mod mock;
pub mod model;
pub mod schema;
pub mod state;
pub mod views;

pub use model::{
    AiCitySummary, AiTriageResult, DEPARTMENT_DIRECTORY, Department, DepartmentInfo, Incident,
    Location, Media, MediaKind, Reporter, Severity, Status, UnknownLabel,
};
pub use schema::incidents;
pub use state::{IncidentCase, IncidentTableState};

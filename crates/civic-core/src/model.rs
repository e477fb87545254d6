//! Civic incident types shared by the generator, the derived views, and the
//! AI assistant.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A label that does not name a member of one of the fixed enumerations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} label: {value:?}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

/// Generates `label()`, `ALL`, `Display` and strict `FromStr` for a fixed
/// enumeration whose serialized form is its display label.
macro_rules! labelled_enum {
    ($name:ident, $kind:literal, [$($variant:ident => $label:literal),+ $(,)?]) => {
        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(Self::$variant),)+
                    other => Err(UnknownLabel {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

/// Municipal unit responsible for a class of incidents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "Traffic")]
    Traffic,
    #[serde(rename = "Sanitation")]
    Sanitation,
    #[serde(rename = "Water Works")]
    WaterWorks,
    #[serde(rename = "Power Grid")]
    PowerGrid,
    #[serde(rename = "Public Works")]
    PublicWorks,
    #[serde(rename = "Health Services")]
    HealthServices,
}

labelled_enum!(Department, "department", [
    Traffic => "Traffic",
    Sanitation => "Sanitation",
    WaterWorks => "Water Works",
    PowerGrid => "Power Grid",
    PublicWorks => "Public Works",
    HealthServices => "Health Services",
]);

/// Ordinal urgency: `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

labelled_enum!(Severity, "severity", [
    Low => "Low",
    Medium => "Medium",
    High => "High",
    Critical => "Critical",
]);

impl Severity {
    /// High and Critical incidents count as high-severity alerts.
    pub fn is_high(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

/// Lifecycle stage. The order is linear but transitions are not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Submitted")]
    Submitted,
    #[serde(rename = "AI Triaged")]
    AiTriaged,
    #[serde(rename = "Assigned")]
    Assigned,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Resolved")]
    Resolved,
    #[serde(rename = "Closed")]
    Closed,
}

labelled_enum!(Status, "status", [
    Submitted => "Submitted",
    AiTriaged => "AI Triaged",
    Assigned => "Assigned",
    InProgress => "In Progress",
    Resolved => "Resolved",
    Closed => "Closed",
]);

impl Status {
    /// Open means anything short of Resolved or Closed.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Resolved | Self::Closed)
    }
}

/// Where an incident was reported. Coordinates are not geofenced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

/// Citizen who filed the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reporter {
    pub name: String,
    /// 0-100, not validated.
    pub credibility: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
}

/// A single reported civic issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: Uuid,
    /// Free-text category, e.g. "Pothole".
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub department: Department,
    pub severity: Severity,
    pub status: Status,
    pub location: Location,
    pub reported_at: DateTime<Utc>,
    pub reporter: Reporter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
}

/// Contact card for a department. Static configuration, not domain state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DepartmentInfo {
    pub department: Department,
    pub email: &'static str,
    pub phone: &'static str,
    pub head: &'static str,
}

pub const DEPARTMENT_DIRECTORY: [DepartmentInfo; 6] = [
    DepartmentInfo {
        department: Department::Traffic,
        email: "traffic@city.gov",
        phone: "555-0101",
        head: "Capt. Eva Rostova",
    },
    DepartmentInfo {
        department: Department::Sanitation,
        email: "sanitation@city.gov",
        phone: "555-0102",
        head: "Marcus Thorne",
    },
    DepartmentInfo {
        department: Department::WaterWorks,
        email: "water@city.gov",
        phone: "555-0103",
        head: "Dr. Alani Vega",
    },
    DepartmentInfo {
        department: Department::PowerGrid,
        email: "power@city.gov",
        phone: "555-0104",
        head: "Kenji Tanaka",
    },
    DepartmentInfo {
        department: Department::PublicWorks,
        email: "works@city.gov",
        phone: "555-0105",
        head: "Priya Singh",
    },
    DepartmentInfo {
        department: Department::HealthServices,
        email: "health@city.gov",
        phone: "555-0106",
        head: "Dr. Ben Carter",
    },
];

impl Department {
    /// Directory entry for this department.
    pub fn info(&self) -> &'static DepartmentInfo {
        // The directory is declared in enumeration order.
        &DEPARTMENT_DIRECTORY[*self as usize]
    }
}

/// AI assessment of a single incident. Advisory only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiTriageResult {
    pub summary: String,
    pub priority: Severity,
    pub recommendations: Vec<String>,
}

/// AI assessment across the whole incident list. Advisory only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiCitySummary {
    pub situation: String,
    pub recommendations: Vec<String>,
}

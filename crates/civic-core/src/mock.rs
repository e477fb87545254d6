//! Mock incident generator standing in for a real reporting backend.
//!
//! Values are drawn uniformly and independently: severity and status do not
//! correlate with the template.

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

use crate::model::{Department, Incident, Location, Media, MediaKind, Reporter, Severity, Status};

/// Map center (Bengaluru).
pub const CITY_CENTER: (f64, f64) = (12.9716, 77.5946);

/// Maximum offset from [`CITY_CENTER`] in each axis, in degrees.
pub const LOCATION_JITTER: f64 = 0.15;

/// Reports are spread over the last seven days.
pub const REPORT_WINDOW_MS: i64 = 7 * 24 * 60 * 60 * 1000;

pub const MEDIA_PROBABILITY: f64 = 0.4;

struct Template {
    kind: &'static str,
    description: &'static str,
    department: Department,
    media_seed: &'static str,
}

const TEMPLATES: [Template; 9] = [
    Template {
        kind: "Pothole",
        description: "A large, dangerous pothole has formed in the middle of the road, causing issues for traffic.",
        department: Department::PublicWorks,
        media_seed: "pothole",
    },
    Template {
        kind: "Broken Streetlight",
        description: "The main streetlight at the intersection has been out for three days, creating a safety hazard at night.",
        department: Department::PowerGrid,
        media_seed: "streetlight",
    },
    Template {
        kind: "Garbage Overflow",
        description: "The public dustbin is overflowing with garbage, and waste is spilling onto the sidewalk.",
        department: Department::Sanitation,
        media_seed: "garbage",
    },
    Template {
        kind: "Water Leakage",
        description: "There is a constant stream of water leaking from a pipe under the pavement, flooding the street corner.",
        department: Department::WaterWorks,
        media_seed: "waterleak",
    },
    Template {
        kind: "Fallen Tree",
        description: "A large tree branch has fallen during the storm and is blocking the right lane of the road.",
        department: Department::PublicWorks,
        media_seed: "fallentree",
    },
    Template {
        kind: "Traffic Signal Malfunction",
        description: "The traffic lights are stuck on red in one direction, causing a major traffic jam during peak hours.",
        department: Department::Traffic,
        media_seed: "trafficsignal",
    },
    Template {
        kind: "Illegal Parking",
        description: "A car has been illegally parked in front of the fire hydrant for over 24 hours, blocking access.",
        department: Department::Traffic,
        media_seed: "parking",
    },
    Template {
        kind: "Stray Animal",
        description: "A pack of stray dogs is causing a nuisance and safety concern in the neighborhood park.",
        department: Department::HealthServices,
        media_seed: "straydog",
    },
    Template {
        kind: "Power Outage",
        description: "The entire block has been without power for the last 4 hours without any notification or update.",
        department: Department::PowerGrid,
        media_seed: "poweroutage",
    },
];

const ADDRESSES: [&str; 6] = [
    "123 MG Road, Ashok Nagar",
    "456 100 Feet Road, Indiranagar",
    "789 JNC Road, Koramangala",
    "321 Bannerghatta Road, Jayanagar",
    "654 Outer Ring Road, Marathahalli",
    "987 Palace Road, Vasanth Nagar",
];

const REPORTERS: [(&str, u8); 4] = [
    ("Arjun Kumar", 85),
    ("Priya Sharma", 92),
    ("Rohan Gupta", 78),
    ("Sneha Patel", 95),
];

/// Generate `count` incidents with the thread-local RNG, reported relative to now.
pub fn generate(count: usize) -> Vec<Incident> {
    generate_with(&mut rand::thread_rng(), count, Utc::now())
}

/// Generate `count` incidents from the given RNG, reported within the seven
/// days before `now`.
pub fn generate_with<R: Rng>(rng: &mut R, count: usize, now: DateTime<Utc>) -> Vec<Incident> {
    let incidents: Vec<Incident> = (0..count).map(|_| generate_one(rng, now)).collect();
    debug!(count = incidents.len(), "generated mock incidents");
    incidents
}

fn generate_one<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> Incident {
    let template = pick(rng, &TEMPLATES);
    let severity = *pick(rng, Severity::ALL);
    let status = *pick(rng, Status::ALL);

    let lat = CITY_CENTER.0 + rng.gen_range(-LOCATION_JITTER..LOCATION_JITTER);
    let lng = CITY_CENTER.1 + rng.gen_range(-LOCATION_JITTER..LOCATION_JITTER);
    let address = pick(rng, &ADDRESSES).to_string();

    let age = TimeDelta::milliseconds(rng.gen_range(0..REPORT_WINDOW_MS));
    let (name, credibility) = *pick(rng, &REPORTERS);

    let media = rng.gen_bool(MEDIA_PROBABILITY).then(|| Media {
        kind: MediaKind::Image,
        url: format!("https://picsum.photos/seed/{}/400/300", template.media_seed),
    });

    Incident {
        id: random_id(rng),
        kind: template.kind.to_string(),
        description: template.description.to_string(),
        department: template.department,
        severity,
        status,
        location: Location { lat, lng, address },
        reported_at: now - age,
        reporter: Reporter {
            name: name.to_string(),
            credibility,
        },
        media,
    }
}

fn pick<'a, T, R: Rng>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// UUID v4 drawn from `rng`, so seeded runs are reproducible.
fn random_id<R: Rng>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes[..]);
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

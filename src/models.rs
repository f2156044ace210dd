use serde::{Deserialize, Serialize};
use std::fmt;

/// One occupancy snapshot as served by `/api/status` and `/api/update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub total_spaces: u32,
    pub occupied_spaces: u32,
    pub available_spaces: u32,
    pub occupancy_rate: f64,
    pub timestamp: String,
    pub spaces: Vec<Space>,
}

impl StatusSnapshot {
    /// Available share of the lot, rounded to one decimal.
    ///
    /// Returns `None` for an empty lot instead of dividing by zero.
    pub fn availability_percentage(&self) -> Option<f64> {
        if self.total_spaces == 0 {
            return None;
        }
        Some(round_one(
            self.available_spaces as f64 / self.total_spaces as f64 * 100.0,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub id: SpaceId,
    pub occupied: bool,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

impl Space {
    /// Vehicle type of an occupied space, ignoring blank values.
    pub fn vehicle(&self) -> Option<&str> {
        if !self.occupied {
            return None;
        }
        self.vehicle_type.as_deref().filter(|v| !v.is_empty())
    }

    /// Occupancy duration of an occupied space, ignoring blank values.
    pub fn duration(&self) -> Option<&str> {
        if !self.occupied {
            return None;
        }
        self.time.as_deref().filter(|t| !t.is_empty())
    }

    pub fn status_word(&self) -> &'static str {
        if self.occupied {
            "Occupied"
        } else {
            "Available"
        }
    }

    /// Text shown when a grid cell is activated.
    pub fn detail(&self) -> String {
        let mut text = format!("Space {}\nStatus: {}", self.id, self.status_word());
        if let Some(vehicle) = self.vehicle() {
            text.push_str(&format!(" by {}", vehicle));
        }
        if let Some(time) = self.duration() {
            text.push_str(&format!(" ({})", time));
        }
        text
    }
}

/// Display label of a space. The backend may send it as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawSpaceId", into = "String")]
pub struct SpaceId(String);

impl SpaceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpaceId {
    fn from(value: &str) -> Self {
        SpaceId(value.to_string())
    }
}

impl From<SpaceId> for String {
    fn from(value: SpaceId) -> Self {
        value.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSpaceId {
    Number(i64),
    Text(String),
}

impl From<RawSpaceId> for SpaceId {
    fn from(raw: RawSpaceId) -> Self {
        match raw {
            RawSpaceId::Number(n) => SpaceId(n.to_string()),
            RawSpaceId::Text(s) => SpaceId(s),
        }
    }
}

/// Body of the backend's `/health` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

pub fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

use crate::models::{round_one, Space, SpaceId, StatusSnapshot};

pub const SPACES_PER_ROW: usize = 8;
pub const FREE_LABEL: &str = "Free";
pub const NO_VEHICLES: &str = "No vehicles parked";
pub const NOT_AVAILABLE: &str = "N/A";
pub const AVAILABILITY_THRESHOLD: f64 = 30.0;

/// One rendered parking space.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceCell {
    pub id: SpaceId,
    pub occupied: bool,
    pub label: String,
    pub detail: String,
}

impl SpaceCell {
    pub fn from_space(space: &Space) -> Self {
        let label = if space.occupied {
            space.vehicle().unwrap_or("-").to_string()
        } else {
            FREE_LABEL.to_string()
        };

        Self {
            id: space.id.clone(),
            occupied: space.occupied,
            label,
            detail: space.detail(),
        }
    }
}

pub fn build_grid(spaces: &[Space]) -> Vec<SpaceCell> {
    spaces.iter().map(SpaceCell::from_space).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleShare {
    pub vehicle_type: String,
    pub count: usize,
    /// Percentage of all listed spaces, rounded to one decimal.
    pub share: f64,
}

impl VehicleShare {
    pub fn label(&self) -> String {
        format!("{}: {} ({:.1}%)", self.vehicle_type, self.count, self.share)
    }
}

/// Occupied spaces grouped by vehicle type, in first-seen order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Distribution {
    pub rows: Vec<VehicleShare>,
}

impl Distribution {
    pub fn from_spaces(spaces: &[Space]) -> Self {
        let mut counts: Vec<(String, usize)> = Vec::new();

        for vehicle in spaces.iter().filter_map(Space::vehicle) {
            match counts.iter_mut().find(|(kind, _)| kind == vehicle) {
                Some((_, count)) => *count += 1,
                None => counts.push((vehicle.to_string(), 1)),
            }
        }

        // A row implies at least one space, so the division is safe.
        let total = spaces.len() as f64;
        let rows = counts
            .into_iter()
            .map(|(vehicle_type, count)| VehicleShare {
                vehicle_type,
                count,
                share: round_one(count as f64 / total * 100.0),
            })
            .collect();

        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_vehicles(&self) -> usize {
        self.rows.iter().map(|row| row.count).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityLevel {
    High,
    Low,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuickStats {
    pub availability: Option<f64>,
    pub level: AvailabilityLevel,
}

impl QuickStats {
    pub const STATIC_ROWS: [(&'static str, &'static str); 2] = [
        ("Spaces per row", "8 spaces"),
        ("System status", "Operational"),
    ];

    pub fn from_snapshot(snapshot: &StatusSnapshot) -> Self {
        let availability = snapshot.availability_percentage();
        let level = match availability {
            Some(value) if value > AVAILABILITY_THRESHOLD => AvailabilityLevel::High,
            _ => AvailabilityLevel::Low,
        };

        Self {
            availability,
            level,
        }
    }

    pub fn availability_text(&self) -> String {
        match self.availability {
            Some(value) => format!("{:.1}%", value),
            None => NOT_AVAILABLE.to_string(),
        }
    }
}

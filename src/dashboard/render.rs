use crate::models::StatusSnapshot;

use super::data::{build_grid, Distribution, QuickStats};
use super::view::{RenderError, Slot, SlotContent, ViewBinding};

/// Writes a snapshot into every data slot of `view`.
///
/// Slots are written in a fixed order (counters, grid, distribution, quick
/// stats, timestamp). The first failing write aborts the rest, leaving the
/// earlier slots updated.
pub fn render<V: ViewBinding + ?Sized>(
    view: &mut V,
    snapshot: &StatusSnapshot,
) -> Result<(), RenderError> {
    render_counters(view, snapshot)?;
    view.write(Slot::ParkingGrid, SlotContent::Grid(build_grid(&snapshot.spaces)))?;
    view.write(
        Slot::VehicleDistribution,
        SlotContent::Distribution(Distribution::from_spaces(&snapshot.spaces)),
    )?;
    view.write(
        Slot::QuickStats,
        SlotContent::QuickStats(Some(QuickStats::from_snapshot(snapshot))),
    )?;
    view.write(Slot::LastUpdate, SlotContent::Text(snapshot.timestamp.clone()))
}

fn render_counters<V: ViewBinding + ?Sized>(
    view: &mut V,
    snapshot: &StatusSnapshot,
) -> Result<(), RenderError> {
    view.write(Slot::TotalSpaces, SlotContent::Text(snapshot.total_spaces.to_string()))?;
    view.write(Slot::OccupiedSpaces, SlotContent::Text(snapshot.occupied_spaces.to_string()))?;
    view.write(Slot::AvailableSpaces, SlotContent::Text(snapshot.available_spaces.to_string()))?;
    view.write(Slot::OccupancyRate, SlotContent::Text(format!("{}%", snapshot.occupancy_rate)))
}

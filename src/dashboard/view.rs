//! Named view slots and the binding the renderer writes through.
//!
//! The renderer never touches the terminal directly: it writes
//! [`SlotContent`] into a [`ViewBinding`]. [`Screen`] is the binding the
//! terminal UI draws from; tests bind their own fakes.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use super::data::{Distribution, QuickStats, SpaceCell};
use super::scheduler::RefreshState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    RefreshButton,
    AutoRefreshButton,
    TotalSpaces,
    OccupiedSpaces,
    AvailableSpaces,
    OccupancyRate,
    ParkingGrid,
    VehicleDistribution,
    QuickStats,
    LastUpdate,
    CurrentTime,
}

impl Slot {
    pub const ALL: [Slot; 11] = [
        Slot::RefreshButton,
        Slot::AutoRefreshButton,
        Slot::TotalSpaces,
        Slot::OccupiedSpaces,
        Slot::AvailableSpaces,
        Slot::OccupancyRate,
        Slot::ParkingGrid,
        Slot::VehicleDistribution,
        Slot::QuickStats,
        Slot::LastUpdate,
        Slot::CurrentTime,
    ];

    fn accepts(&self, content: &SlotContent) -> bool {
        matches!(
            (self, content),
            (Slot::RefreshButton | Slot::AutoRefreshButton, SlotContent::Button(_))
                | (Slot::ParkingGrid, SlotContent::Grid(_))
                | (Slot::VehicleDistribution, SlotContent::Distribution(_))
                | (Slot::QuickStats, SlotContent::QuickStats(_))
                | (
                    Slot::TotalSpaces
                        | Slot::OccupiedSpaces
                        | Slot::AvailableSpaces
                        | Slot::OccupancyRate
                        | Slot::LastUpdate
                        | Slot::CurrentTime,
                    SlotContent::Text(_)
                )
        )
    }

    fn initial_content(&self) -> SlotContent {
        match self {
            Slot::RefreshButton => SlotContent::Button(ButtonFace::refresh()),
            Slot::AutoRefreshButton => SlotContent::Button(ButtonFace::auto_refresh(RefreshState::Idle)),
            Slot::ParkingGrid => SlotContent::Grid(Vec::new()),
            Slot::VehicleDistribution => SlotContent::Distribution(Distribution::default()),
            Slot::QuickStats => SlotContent::QuickStats(None),
            _ => SlotContent::Text("--".to_string()),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Slot::RefreshButton => "refresh-btn",
            Slot::AutoRefreshButton => "auto-refresh-btn",
            Slot::TotalSpaces => "total-spaces",
            Slot::OccupiedSpaces => "occupied-spaces",
            Slot::AvailableSpaces => "available-spaces",
            Slot::OccupancyRate => "occupancy-rate",
            Slot::ParkingGrid => "parking-grid",
            Slot::VehicleDistribution => "vehicle-distribution",
            Slot::QuickStats => "quick-stats",
            Slot::LastUpdate => "last-update",
            Slot::CurrentTime => "current-time",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Neutral,
    Start,
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonFace {
    pub label: String,
    pub style: ButtonStyle,
}

impl ButtonFace {
    pub fn refresh() -> Self {
        Self {
            label: "⟳ Refresh".to_string(),
            style: ButtonStyle::Neutral,
        }
    }

    pub fn auto_refresh(state: RefreshState) -> Self {
        match state {
            RefreshState::Idle => Self {
                label: "▶ Auto Refresh".to_string(),
                style: ButtonStyle::Start,
            },
            RefreshState::AutoRefreshing => Self {
                label: "■ Stop Auto".to_string(),
                style: ButtonStyle::Stop,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlotContent {
    Text(String),
    Grid(Vec<SpaceCell>),
    Distribution(Distribution),
    /// `None` until the first snapshot arrives.
    QuickStats(Option<QuickStats>),
    Button(ButtonFace),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("view slot `{0}` is not bound")]
    MissingSlot(Slot),

    #[error("view slot `{0}` cannot hold this kind of content")]
    ContentMismatch(Slot),
}

pub trait ViewBinding {
    fn write(&mut self, slot: Slot, content: SlotContent) -> Result<(), RenderError>;
}

/// In-memory view surface read by the terminal UI.
#[derive(Debug, Clone)]
pub struct Screen {
    slots: HashMap<Slot, SlotContent>,
}

impl Default for Screen {
    fn default() -> Self {
        Self::with_slots(&Slot::ALL)
    }
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    /// A screen exposing only the given slots.
    pub fn with_slots(slots: &[Slot]) -> Self {
        let slots = slots
            .iter()
            .map(|slot| (*slot, slot.initial_content()))
            .collect();
        Self { slots }
    }

    pub fn get(&self, slot: Slot) -> Option<&SlotContent> {
        self.slots.get(&slot)
    }

    pub fn text(&self, slot: Slot) -> &str {
        match self.slots.get(&slot) {
            Some(SlotContent::Text(text)) => text.as_str(),
            _ => "",
        }
    }

    pub fn grid(&self) -> &[SpaceCell] {
        match self.slots.get(&Slot::ParkingGrid) {
            Some(SlotContent::Grid(cells)) => cells.as_slice(),
            _ => &[],
        }
    }

    pub fn distribution(&self) -> Option<&Distribution> {
        match self.slots.get(&Slot::VehicleDistribution) {
            Some(SlotContent::Distribution(distribution)) => Some(distribution),
            _ => None,
        }
    }

    pub fn quick_stats(&self) -> Option<&QuickStats> {
        match self.slots.get(&Slot::QuickStats) {
            Some(SlotContent::QuickStats(stats)) => stats.as_ref(),
            _ => None,
        }
    }

    pub fn button(&self, slot: Slot) -> Option<&ButtonFace> {
        match self.slots.get(&slot) {
            Some(SlotContent::Button(face)) => Some(face),
            _ => None,
        }
    }
}

impl ViewBinding for Screen {
    fn write(&mut self, slot: Slot, content: SlotContent) -> Result<(), RenderError> {
        let target = self.slots.get_mut(&slot).ok_or(RenderError::MissingSlot(slot))?;
        if !slot.accepts(&content) {
            return Err(RenderError::ContentMismatch(slot));
        }
        *target = content;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_starts_with_placeholders() {
        let screen = Screen::new();
        assert_eq!(screen.text(Slot::TotalSpaces), "--");
        assert!(screen.grid().is_empty());
        assert!(screen.quick_stats().is_none());
        assert_eq!(
            screen.button(Slot::AutoRefreshButton),
            Some(&ButtonFace::auto_refresh(RefreshState::Idle))
        );
    }

    #[test]
    fn test_write_overwrites_slot() {
        let mut screen = Screen::new();
        screen.write(Slot::LastUpdate, SlotContent::Text("10:00:00".into())).unwrap();
        screen.write(Slot::LastUpdate, SlotContent::Text("10:00:03".into())).unwrap();
        assert_eq!(screen.text(Slot::LastUpdate), "10:00:03");
    }

    #[test]
    fn test_missing_slot_is_an_error() {
        let mut screen = Screen::with_slots(&[Slot::TotalSpaces]);
        let err = screen
            .write(Slot::LastUpdate, SlotContent::Text("10:00:00".into()))
            .unwrap_err();
        assert_eq!(err, RenderError::MissingSlot(Slot::LastUpdate));
        assert_eq!(err.to_string(), "view slot `last-update` is not bound");
    }

    #[test]
    fn test_content_kind_must_match_slot() {
        let mut screen = Screen::new();
        let err = screen
            .write(Slot::ParkingGrid, SlotContent::Text("oops".into()))
            .unwrap_err();
        assert_eq!(err, RenderError::ContentMismatch(Slot::ParkingGrid));
    }
}

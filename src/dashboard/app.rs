use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, warn};

use super::clock::{format_time, Clock, DEFAULT_CLOCK_PERIOD};
use super::data::SPACES_PER_ROW;
use super::events::{AppEvent, FetchOrigin};
use super::render::render;
use super::scheduler::{RefreshScheduler, RefreshState, DEFAULT_REFRESH_PERIOD};
use super::view::{ButtonFace, RenderError, Screen, Slot, SlotContent, ViewBinding};
use super::widgets::parking_grid::GridLayout;
use crate::client::{Endpoint, SnapshotSource, DEFAULT_BASE_URL};
use crate::models::StatusSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub base_url: String,
    pub refresh_period: Duration,
    pub clock_period: Duration,
    pub timeout: Option<Duration>,
    pub start_auto_refresh: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_period: DEFAULT_REFRESH_PERIOD,
            clock_period: DEFAULT_CLOCK_PERIOD,
            timeout: None,
            start_auto_refresh: false,
        }
    }
}

/// Owns the view, the refresh scheduler and the clock.
///
/// Background tasks report through an event channel; nothing touches the
/// screen until [`DashboardController::handle_event`] runs on the UI loop.
pub struct DashboardController {
    source: Arc<dyn SnapshotSource>,
    screen: Screen,
    scheduler: RefreshScheduler,
    clock: Clock,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    selected: usize,
    popup: Option<String>,
    grid_layout: Option<GridLayout>,
    grid_scroll: usize,
}

impl DashboardController {
    /// Must be called inside a tokio runtime. Starts the clock and issues
    /// the initial manual refresh.
    pub fn new(source: Arc<dyn SnapshotSource>, config: &DashboardConfig) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let clock = Clock::start(config.clock_period, events_tx.clone());

        let mut controller = Self {
            source,
            screen: Screen::new(),
            scheduler: RefreshScheduler::new(config.refresh_period),
            clock,
            events_tx,
            events_rx,
            selected: 0,
            popup: None,
            grid_layout: None,
            grid_scroll: 0,
        };

        controller.refresh();
        if config.start_auto_refresh {
            controller.toggle_auto_refresh();
        }
        controller
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn refresh_state(&self) -> RefreshState {
        self.scheduler.state()
    }

    pub fn refresh_period(&self) -> Duration {
        self.scheduler.period()
    }

    /// One-shot fetch of the current status. Leaves the scheduler alone.
    pub fn refresh(&self) {
        let source = Arc::clone(&self.source);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch(Endpoint::Status).await;
            let _ = events.send(AppEvent::Snapshot {
                origin: FetchOrigin::Manual,
                result,
            });
        });
    }

    pub fn toggle_auto_refresh(&mut self) -> RefreshState {
        let state = self
            .scheduler
            .toggle(Arc::clone(&self.source), self.events_tx.clone());

        if let Err(err) = self.screen.write(
            Slot::AutoRefreshButton,
            SlotContent::Button(ButtonFace::auto_refresh(state)),
        ) {
            error!(%err, "could not update auto refresh button");
        }
        state
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Snapshot { origin, result } => {
                if let FetchOrigin::Auto { generation } = origin {
                    if !self.scheduler.is_current(generation) {
                        debug!(generation, "discarding stale auto refresh response");
                        return;
                    }
                }

                match result {
                    Ok(snapshot) => {
                        if let Err(err) = self.apply_snapshot(&snapshot) {
                            error!(%err, "render aborted");
                        }
                    }
                    Err(err) => {
                        warn!(?origin, error = %err, "failed to load parking data");
                    }
                }
            }
            AppEvent::ClockTick(now) => {
                if let Err(err) = self
                    .screen
                    .write(Slot::CurrentTime, SlotContent::Text(format_time(&now)))
                {
                    error!(%err, "could not update clock");
                }
            }
        }
    }

    /// Handles every queued event without waiting. Returns how many ran.
    pub fn drain_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.events_rx.recv().await
    }

    pub fn apply_snapshot(&mut self, snapshot: &StatusSnapshot) -> Result<(), RenderError> {
        let result = render(&mut self.screen, snapshot);

        let cells = self.screen.grid().len();
        if self.selected >= cells {
            self.selected = cells.saturating_sub(1);
        }
        debug!(spaces = cells, timestamp = %snapshot.timestamp, "rendered snapshot");
        result
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Moves the grid selection by whole cells. Horizontal moves stay in
    /// the current row; moves off the grid are ignored.
    pub fn move_selection(&mut self, dx: isize, dy: isize) {
        let cells = self.screen.grid().len() as isize;
        let columns = SPACES_PER_ROW as isize;
        let current = self.selected as isize;

        if !(0..columns).contains(&(current % columns + dx)) {
            return;
        }
        let target = current + dx + dy * columns;
        if (0..cells).contains(&target) {
            self.selected = target as usize;
        }
    }

    /// Opens the detail popup for the cell at `index`.
    pub fn show_space_info(&mut self, index: usize) -> Option<&str> {
        let detail = self.screen.grid().get(index)?.detail.clone();
        self.selected = index;
        self.popup = Some(detail);
        self.popup.as_deref()
    }

    pub fn popup(&self) -> Option<&str> {
        self.popup.as_deref()
    }

    pub fn close_popup(&mut self) {
        self.popup = None;
    }

    /// First grid row on screen.
    pub fn grid_scroll(&self) -> usize {
        self.grid_scroll
    }

    pub fn grid_layout(&self) -> Option<GridLayout> {
        self.grid_layout
    }

    /// Records where the grid was last drawn, for hit testing and scrolling.
    pub fn set_grid_layout(&mut self, layout: GridLayout) {
        self.grid_scroll = layout.first_row;
        self.grid_layout = Some(layout);
    }

    /// Mouse click at terminal coordinates.
    pub fn click_at(&mut self, column: u16, row: u16) -> Option<&str> {
        if self.popup.is_some() {
            self.close_popup();
            return None;
        }
        let index = self.grid_layout?.hit_test(column, row)?;
        self.show_space_info(index)
    }

    /// Stops the auto refresh timer and the clock.
    pub fn shutdown(&mut self) {
        self.scheduler.stop();
        self.clock.stop();
    }
}

impl Drop for DashboardController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

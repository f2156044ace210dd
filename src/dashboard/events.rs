use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};

use super::app::DashboardController;
use crate::client::FetchError;
use crate::models::StatusSnapshot;

/// What triggered a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    Manual,
    Auto { generation: u64 },
}

/// Messages sent from background tasks to the controller.
#[derive(Debug)]
pub enum AppEvent {
    Snapshot {
        origin: FetchOrigin,
        result: Result<StatusSnapshot, FetchError>,
    },
    ClockTick(DateTime<Local>),
}

pub fn handle_key_event(key: KeyEvent, app: &mut DashboardController) {
    // The detail popup is modal: any key dismisses it.
    if app.popup().is_some() {
        app.close_popup();
        return;
    }

    match key.code {
        KeyCode::Char('r') => {
            app.refresh();
        }
        KeyCode::Char('a') => {
            app.toggle_auto_refresh();
        }
        KeyCode::Left => {
            app.move_selection(-1, 0);
        }
        KeyCode::Right => {
            app.move_selection(1, 0);
        }
        KeyCode::Up => {
            app.move_selection(0, -1);
        }
        KeyCode::Down => {
            app.move_selection(0, 1);
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.show_space_info(app.selected());
        }
        _ => {}
    }
}

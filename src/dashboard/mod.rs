pub mod app;
pub mod clock;
pub mod data;
pub mod events;
pub mod render;
pub mod runner;
pub mod scheduler;
pub mod ui;
pub mod view;
pub mod widgets;

// Re-export the main function
pub use app::{DashboardConfig, DashboardController};
pub use runner::run_dashboard;

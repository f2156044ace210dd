pub mod counters;
pub mod distribution;
pub mod parking_grid;
pub mod quick_stats;

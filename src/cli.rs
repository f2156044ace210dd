use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use crate::client::DEFAULT_BASE_URL;
use crate::dashboard::DashboardConfig;

fn parse_refresh_rate(s: &str) -> Result<f64, String> {
    s.parse::<f64>()
        .map_err(|_| "Invalid refresh rate".to_string())
        .and_then(|v| {
            if v > 0.0 && v <= 60.0 {
                Ok(v)
            } else {
                Err("Refresh rate must be between 0 and 60 seconds".to_string())
            }
        })
}

fn parse_timeout(s: &str) -> Result<f64, String> {
    s.parse::<f64>()
        .map_err(|_| "Invalid timeout".to_string())
        .and_then(|v| {
            if v > 0.0 && v.is_finite() {
                Ok(v)
            } else {
                Err("Timeout must be a positive number of seconds".to_string())
            }
        })
}

#[derive(Parser, Debug)]
#[command(name = "parking-dash")]
#[command(about = "Live terminal dashboard for parking-lot occupancy")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Base URL of the parking backend
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long, global = true, value_parser = parse_timeout)]
    pub timeout: Option<f64>,
}

impl ConnectionArgs {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs_f64)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch interactive dashboard (default)
    #[command(visible_aliases = &["dash", "d"])]
    Dashboard(DashboardArgs),

    /// Print one snapshot and exit
    #[command(visible_alias = "status")]
    Show(ShowArgs),

    /// Check that the backend is up
    Health,
}

#[derive(Args, Debug, Clone)]
pub struct DashboardArgs {
    /// Auto-refresh interval in seconds (supports decimals, e.g. 0.5)
    #[arg(short, long, default_value = "3", value_parser = parse_refresh_rate)]
    pub refresh: f64,

    /// Start with auto-refresh enabled
    #[arg(long)]
    pub auto: bool,

    /// Where to write logs while the dashboard owns the terminal
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for DashboardArgs {
    fn default() -> Self {
        Self {
            refresh: 3.0,
            auto: false,
            log_file: None,
        }
    }
}

impl DashboardArgs {
    pub fn to_config(&self, connection: &ConnectionArgs) -> DashboardConfig {
        DashboardConfig {
            base_url: connection.url.clone(),
            refresh_period: Duration::from_secs_f64(self.refresh),
            timeout: connection.timeout(),
            start_auto_refresh: self.auto,
            ..Default::default()
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Ask the backend to simulate a change first (uses /api/update)
    #[arg(long)]
    pub update: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Show summary statistics
    #[arg(long)]
    pub summary: bool,
}

#[derive(Debug, Clone, ValueEnum, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_dashboard() {
        let cli = Cli::try_parse_from(["parking-dash"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.connection.url, DEFAULT_BASE_URL);
        assert_eq!(cli.connection.timeout(), None);
    }

    #[test]
    fn test_dashboard_args() {
        let cli = Cli::try_parse_from([
            "parking-dash",
            "dash",
            "--refresh",
            "0.5",
            "--auto",
            "--url",
            "http://parking.local:8080",
        ])
        .unwrap();

        let Some(Commands::Dashboard(args)) = cli.command else {
            panic!("Expected dashboard command");
        };
        let config = args.to_config(&cli.connection);
        assert_eq!(config.refresh_period, Duration::from_millis(500));
        assert!(config.start_auto_refresh);
        assert_eq!(config.base_url, "http://parking.local:8080");
    }

    #[test]
    fn test_refresh_rate_bounds() {
        assert!(Cli::try_parse_from(["parking-dash", "dashboard", "--refresh", "0"]).is_err());
        assert!(Cli::try_parse_from(["parking-dash", "dashboard", "--refresh", "61"]).is_err());
        assert!(Cli::try_parse_from(["parking-dash", "dashboard", "--refresh", "abc"]).is_err());
    }

    #[test]
    fn test_show_args() {
        let cli = Cli::try_parse_from([
            "parking-dash",
            "status",
            "--update",
            "--format",
            "csv",
            "--timeout",
            "2.5",
        ])
        .unwrap();

        let Some(Commands::Show(args)) = cli.command else {
            panic!("Expected show command");
        };
        assert!(args.update);
        assert_eq!(args.format, OutputFormat::Csv);
        assert_eq!(cli.connection.timeout(), Some(Duration::from_millis(2500)));
    }

    #[test]
    fn test_default_dashboard_config() {
        let cli = Cli::try_parse_from(["parking-dash"]).unwrap();
        let config = DashboardArgs::default().to_config(&cli.connection);
        assert_eq!(config.refresh_period, Duration::from_secs(3));
        assert_eq!(config.clock_period, Duration::from_secs(1));
        assert!(!config.start_auto_refresh);
    }
}

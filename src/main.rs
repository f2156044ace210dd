use anyhow::Result;
use clap::Parser;
use parking_dash::{
    check_health,
    cli::{Cli, Commands, ConnectionArgs, DashboardArgs},
    dashboard::run_dashboard,
    logging::{default_log_path, init_logging, LogTarget},
    show_status,
};

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {
        connection,
        verbose,
        command,
    } = Cli::parse();

    match command {
        Some(Commands::Show(args)) => {
            init_logging(LogTarget::Stderr, verbose)?;
            show_status(&args, &connection).await?;
        }
        Some(Commands::Health) => {
            init_logging(LogTarget::Stderr, verbose)?;
            check_health(&connection).await?;
        }
        Some(Commands::Dashboard(args)) => run(args, &connection, verbose).await?,
        None => run(DashboardArgs::default(), &connection, verbose).await?,
    }

    Ok(())
}

async fn run(args: DashboardArgs, connection: &ConnectionArgs, verbose: bool) -> Result<()> {
    let log_path = args.log_file.clone().unwrap_or_else(default_log_path);
    init_logging(LogTarget::File(log_path), verbose)?;
    run_dashboard(args.to_config(connection)).await
}

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use super::app::{DashboardConfig, DashboardController};
use super::events::handle_key_event;
use super::ui;
use crate::client::HttpSnapshotClient;

/// How long to wait for terminal input before redrawing.
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

pub async fn run_dashboard(config: DashboardConfig) -> Result<()> {
    let client = HttpSnapshotClient::new(&config.base_url, config.timeout)?;
    info!(base_url = client.base_url(), "starting dashboard");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = DashboardController::new(Arc::new(client), &config);

    let res = run_app(&mut terminal, &mut app).await;
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(%err, "dashboard loop failed");
        eprintln!("Error: {:?}", err);
    }

    info!("dashboard closed");
    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut DashboardController,
) -> io::Result<()> {
    loop {
        app.drain_events();
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(FRAME_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') if app.popup().is_none() => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    _ => handle_key_event(key, app),
                },
                Event::Mouse(mouse) => {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        app.click_at(mouse.column, mouse.row);
                    }
                }
                _ => {}
            }
        }

        // Let spawned fetches and timers make progress between frames.
        tokio::task::yield_now().await;
    }
}

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::app::DashboardController;
use super::scheduler::RefreshState;
use super::view::{ButtonFace, ButtonStyle, Slot};
use super::widgets::{
    counters::draw_counters, distribution::draw_distribution, parking_grid::draw_parking_grid,
    quick_stats::draw_quick_stats,
};

pub fn draw(f: &mut Frame, app: &mut DashboardController) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),  // Header
                Constraint::Length(3),  // Counters
                Constraint::Min(10),    // Main content
                Constraint::Length(2),  // Help
            ]
            .as_ref(),
        )
        .split(f.size());

    draw_header(f, chunks[0], app);
    draw_counters(f, chunks[1], app);
    draw_main_content(f, chunks[2], app);
    draw_help(f, chunks[3], app);

    if let Some(detail) = app.popup() {
        draw_popup(f, detail);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &DashboardController) {
    let screen = app.screen();
    let auto_text = match app.refresh_state() {
        RefreshState::Idle => "off".to_string(),
        RefreshState::AutoRefreshing => format!("every {}s", app.refresh_period().as_secs_f64()),
    };

    let header_text = vec![
        Span::raw("Now: "),
        Span::styled(
            screen.text(Slot::CurrentTime).to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | Last Update: "),
        Span::raw(screen.text(Slot::LastUpdate).to_string()),
        Span::raw(" | Auto-refresh: "),
        Span::raw(auto_text),
    ];

    let header = Paragraph::new(Line::from(header_text))
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .title(" Parking Dashboard ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Cyan)),
        );

    f.render_widget(header, area);
}

fn draw_main_content(f: &mut Frame, area: Rect, app: &mut DashboardController) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(65),  // Parking grid
                Constraint::Percentage(35),  // Distribution + stats
            ]
            .as_ref(),
        )
        .split(area);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(5)].as_ref())
        .split(chunks[1]);

    draw_parking_grid(f, chunks[0], app);
    draw_distribution(f, right_chunks[0], app);
    draw_quick_stats(f, right_chunks[1], app);
}

fn button_span(face: Option<&ButtonFace>, key: &str) -> Vec<Span<'static>> {
    let Some(face) = face else {
        return Vec::new();
    };
    let color = match face.style {
        ButtonStyle::Neutral => Color::Blue,
        ButtonStyle::Start => Color::Green,
        ButtonStyle::Stop => Color::Red,
    };
    vec![
        Span::raw("["),
        Span::styled(key.to_string(), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw("] "),
        Span::styled(face.label.clone(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw("  "),
    ]
}

fn draw_help(f: &mut Frame, area: Rect, app: &DashboardController) {
    let screen = app.screen();
    let mut help_text = button_span(screen.button(Slot::RefreshButton), "r");
    help_text.extend(button_span(screen.button(Slot::AutoRefreshButton), "a"));
    help_text.extend([
        Span::raw("["),
        Span::styled("←↑↓→", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw("] select ["),
        Span::styled("enter", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw("] details ["),
        Span::styled("q", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw("]uit"),
    ]);

    let help = Paragraph::new(Line::from(help_text))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP))
        .alignment(Alignment::Center);

    f.render_widget(help, area);
}

fn draw_popup(f: &mut Frame, detail: &str) {
    let area = centered_rect(40, 7, f.size());
    let popup = Paragraph::new(detail.to_string())
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Space Details ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::White).bg(Color::Black)),
        );

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Endpoint, FetchError, SnapshotSource};
    use crate::dashboard::app::tests::lot;
    use crate::dashboard::app::DashboardConfig;
    use crate::dashboard::render::tests::two_space_snapshot;
    use crate::models::StatusSnapshot;
    use async_trait::async_trait;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    struct NeverSource;

    #[async_trait]
    impl SnapshotSource for NeverSource {
        async fn fetch(&self, _endpoint: Endpoint) -> Result<StatusSnapshot, FetchError> {
            std::future::pending().await
        }
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[tokio::test]
    async fn test_draw_renders_snapshot() {
        let mut app = DashboardController::new(Arc::new(NeverSource), &DashboardConfig::default());
        app.apply_snapshot(&two_space_snapshot()).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        let text = buffer_text(&terminal);

        assert!(text.contains("Parking Dashboard"));
        assert!(text.contains("A1"));
        assert!(text.contains("car"));
        assert!(text.contains("Free"));
        assert!(text.contains("50%"));
        assert!(text.contains("Availability: 50.0%"));
        assert!(text.contains("Auto Refresh"));
    }

    #[tokio::test]
    async fn test_draw_empty_distribution_placeholder() {
        let mut app = DashboardController::new(Arc::new(NeverSource), &DashboardConfig::default());
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        assert!(buffer_text(&terminal).contains("No vehicles parked"));
    }

    #[tokio::test]
    async fn test_draw_popup() {
        let mut app = DashboardController::new(Arc::new(NeverSource), &DashboardConfig::default());
        app.apply_snapshot(&two_space_snapshot()).unwrap();
        app.show_space_info(0);

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        let text = buffer_text(&terminal);

        assert!(text.contains("Space Details"));
        assert!(text.contains("Occupied by car (10m)"));
    }

    #[tokio::test]
    async fn test_large_lot_clicks_only_reach_drawn_cells() {
        let mut app = DashboardController::new(Arc::new(NeverSource), &DashboardConfig::default());
        app.apply_snapshot(&lot(40)).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        let text = buffer_text(&terminal);
        let layout = app.grid_layout().unwrap();

        let visible = layout.visible_rows();
        assert!(visible >= 1 && visible < layout.total_rows());
        assert!(text.contains(&format!("rows 1-{visible} of 5")));

        let inner = layout.inner;
        for y in inner.y..inner.y + inner.height {
            for x in inner.x..inner.x + inner.width {
                let Some(index) = layout.hit_test(x, y) else {
                    continue;
                };
                let id = format!("P{:02}", index + 1);
                assert!(text.contains(&id), "{id} clicked but not drawn");

                let detail = app.click_at(x, y).map(str::to_string);
                assert_eq!(detail, Some(format!("Space {id}\nStatus: Available")));
                app.close_popup();
            }
        }

        // Rows below the last drawn one are not clickable.
        let below = inner.y + visible as u16 * layout.cell_height;
        for y in below..inner.y + inner.height {
            assert!(app.click_at(inner.x + 1, y).is_none());
        }
        assert!(!text.contains(&format!("P{:02}", visible * 8 + 1)));
    }

    #[tokio::test]
    async fn test_grid_scrolls_to_selection() {
        let mut app = DashboardController::new(Arc::new(NeverSource), &DashboardConfig::default());
        app.apply_snapshot(&lot(40)).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        for _ in 0..4 {
            app.move_selection(0, 1);
        }
        assert_eq!(app.selected(), 32);
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        let text = buffer_text(&terminal);

        let layout = app.grid_layout().unwrap();
        assert!(app.grid_scroll() > 0);
        assert!(text.contains("P33"));
        assert!(!text.contains("P01"));

        let rect = layout.cell_rect(32).unwrap();
        assert_eq!(
            app.click_at(rect.x + 1, rect.y + 1),
            Some("Space P33\nStatus: Available")
        );
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 20, 5);
        assert_eq!(centered_rect(40, 7, area), Rect::new(0, 0, 20, 5));
        assert_eq!(centered_rect(10, 3, area), Rect::new(5, 1, 10, 3));
    }
}

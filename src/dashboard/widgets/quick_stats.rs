use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::dashboard::app::DashboardController;
use crate::dashboard::data::{AvailabilityLevel, QuickStats};

pub fn draw_quick_stats(f: &mut Frame, area: Rect, app: &DashboardController) {
    let mut lines = Vec::new();

    let (availability, color) = match app.screen().quick_stats() {
        Some(stats) => (stats.availability_text(), level_color(stats.level)),
        None => ("--".to_string(), Color::DarkGray),
    };
    lines.push(Line::from(vec![
        Span::raw("Availability: "),
        Span::styled(availability, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ]));

    for (label, value) in QuickStats::STATIC_ROWS {
        let style = if label == "System status" {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            Span::raw(format!("{}: ", label)),
            Span::styled(value, style),
        ]));
    }

    let stats = Paragraph::new(lines)
        .block(Block::default().title(" Quick Stats ").borders(Borders::ALL))
        .alignment(Alignment::Left);

    f.render_widget(stats, area);
}

pub fn level_color(level: AvailabilityLevel) -> Color {
    match level {
        AvailabilityLevel::High => Color::Green,
        AvailabilityLevel::Low => Color::Red,
    }
}

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::dashboard::app::DashboardController;
use crate::dashboard::view::Slot;

const COUNTERS: [(&str, Slot, Color); 4] = [
    (" Total Spaces ", Slot::TotalSpaces, Color::Cyan),
    (" Occupied ", Slot::OccupiedSpaces, Color::Red),
    (" Available ", Slot::AvailableSpaces, Color::Green),
    (" Occupancy ", Slot::OccupancyRate, Color::Yellow),
];

pub fn draw_counters(f: &mut Frame, area: Rect, app: &DashboardController) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4].as_ref())
        .split(area);

    for (chunk, (title, slot, color)) in chunks.iter().zip(COUNTERS) {
        let value = Paragraph::new(Line::from(Span::styled(
            app.screen().text(slot).to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().title(title).borders(Borders::ALL));

        f.render_widget(value, *chunk);
    }
}

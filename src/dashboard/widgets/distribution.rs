use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::dashboard::app::DashboardController;
use crate::dashboard::data::{VehicleShare, NO_VEHICLES};

const BAR_WIDTH: usize = 12;

pub fn draw_distribution(f: &mut Frame, area: Rect, app: &DashboardController) {
    let rows = app
        .screen()
        .distribution()
        .map(|d| d.rows.as_slice())
        .unwrap_or_default();

    let items: Vec<ListItem> = if rows.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            NO_VEHICLES,
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        rows.iter()
            .take((area.height as usize).saturating_sub(2)) // Account for borders
            .map(|row| {
                ListItem::new(Line::from(vec![
                    Span::raw(" ▪ "),
                    Span::styled(
                        format!("{:<10}", row.vehicle_type),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(bar(row), Style::default().fg(Color::Blue)),
                    Span::raw(format!(" {:>3} ", row.count)),
                    Span::styled(format!("({:.1}%)", row.share), Style::default().fg(Color::Gray)),
                ]))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .title(" Vehicle Distribution ")
            .borders(Borders::ALL),
    );

    f.render_widget(list, area);
}

fn bar(row: &VehicleShare) -> String {
    let filled = ((row.share / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

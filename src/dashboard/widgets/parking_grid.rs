use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::dashboard::app::DashboardController;
use crate::dashboard::data::{SpaceCell, SPACES_PER_ROW};

const CELL_HEIGHT: u16 = 4;

/// Maps grid cells to terminal rectangles and back.
///
/// Only whole rows are shown. `first_row` is the scroll offset, in rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub inner: Rect,
    pub columns: u16,
    pub cell_width: u16,
    pub cell_height: u16,
    pub cell_count: usize,
    pub first_row: usize,
}

impl GridLayout {
    pub fn new(inner: Rect, columns: usize, cell_count: usize) -> Self {
        let columns = columns.max(1) as u16;
        Self {
            inner,
            columns,
            cell_width: (inner.width / columns).max(1),
            cell_height: CELL_HEIGHT,
            cell_count,
            first_row: 0,
        }
    }

    pub fn visible_rows(&self) -> usize {
        (self.inner.height / self.cell_height) as usize
    }

    pub fn total_rows(&self) -> usize {
        self.cell_count.div_ceil(self.columns as usize)
    }

    /// Starts at `first_row`, scrolling just enough to keep `index` on screen.
    pub fn scrolled_to(mut self, first_row: usize, index: usize) -> Self {
        let visible = self.visible_rows().max(1);
        let row = index / self.columns as usize;

        let mut first = first_row.min(self.total_rows().saturating_sub(visible));
        if row < first {
            first = row;
        } else if row >= first + visible {
            first = row + 1 - visible;
        }
        self.first_row = first;
        self
    }

    /// Area of cell `index`, or `None` when it is not drawn.
    pub fn cell_rect(&self, index: usize) -> Option<Rect> {
        if index >= self.cell_count {
            return None;
        }
        let columns = self.columns as usize;
        let line = (index / columns).checked_sub(self.first_row)?;
        if line >= self.visible_rows() {
            return None;
        }

        let col = (index % columns) as u16;
        let x = self.inner.x + col * self.cell_width;
        let y = self.inner.y + line as u16 * self.cell_height;
        Some(Rect::new(x, y, self.cell_width, self.cell_height))
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<usize> {
        let inner = self.inner;
        if column < inner.x || row < inner.y {
            return None;
        }
        if column >= inner.x + inner.width || row >= inner.y + inner.height {
            return None;
        }

        let col = (column - inner.x) / self.cell_width;
        if col >= self.columns {
            return None;
        }
        let line = ((row - inner.y) / self.cell_height) as usize;
        let index = (self.first_row + line) * self.columns as usize + col as usize;
        self.cell_rect(index).map(|_| index)
    }

    fn title(&self) -> String {
        let total = self.total_rows();
        let last = (self.first_row + self.visible_rows()).min(total);
        if self.first_row == 0 && last == total {
            format!(" Parking Map ({} spaces) ", self.cell_count)
        } else {
            format!(
                " Parking Map ({} spaces, rows {}-{} of {}) ",
                self.cell_count,
                self.first_row + 1,
                last,
                total
            )
        }
    }
}

pub fn draw_parking_grid(f: &mut Frame, area: Rect, app: &mut DashboardController) {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let layout = GridLayout::new(inner, SPACES_PER_ROW, app.screen().grid().len())
        .scrolled_to(app.grid_scroll(), app.selected());

    let block = Block::default().title(layout.title()).borders(Borders::ALL);
    f.render_widget(block, area);

    let selected = app.selected();
    let first = layout.first_row * SPACES_PER_ROW;
    for (index, cell) in app.screen().grid().iter().enumerate().skip(first) {
        let Some(rect) = layout.cell_rect(index) else {
            break;
        };
        draw_cell(f, rect, cell, index == selected);
    }

    app.set_grid_layout(layout);
}

fn draw_cell(f: &mut Frame, area: Rect, cell: &SpaceCell, selected: bool) {
    let color = if cell.occupied { Color::Red } else { Color::Green };
    let mut border_style = Style::default().fg(color);
    if selected {
        border_style = border_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    }

    let width = area.width.saturating_sub(2) as usize;
    let lines = vec![
        Line::from(Span::styled(
            fit(cell.id.as_str(), width),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(fit(&cell.label, width), Style::default().fg(color))),
    ];

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border_style));

    f.render_widget(widget, area);
}

/// Truncates `text` to `width` terminal columns.
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_rects_wrap_rows() {
        let layout = GridLayout::new(Rect::new(1, 1, 80, 12), SPACES_PER_ROW, 40);
        assert_eq!(layout.visible_rows(), 3);
        assert_eq!(layout.total_rows(), 5);
        assert_eq!(layout.cell_rect(0), Some(Rect::new(1, 1, 10, 4)));
        assert_eq!(layout.cell_rect(9), Some(Rect::new(11, 5, 10, 4)));
        assert_eq!(layout.cell_rect(23), Some(Rect::new(71, 9, 10, 4)));
        assert_eq!(layout.cell_rect(24), None);
    }

    #[test]
    fn test_hit_test() {
        let layout = GridLayout::new(Rect::new(1, 1, 80, 12), SPACES_PER_ROW, 40);
        assert_eq!(layout.hit_test(1, 1), Some(0));
        assert_eq!(layout.hit_test(15, 6), Some(9));
        assert_eq!(layout.hit_test(0, 0), None);
        assert_eq!(layout.hit_test(81, 2), None);
    }

    #[test]
    fn test_hit_test_only_drawn_cells() {
        // Two leftover lines below the third row.
        let layout = GridLayout::new(Rect::new(0, 0, 80, 14), SPACES_PER_ROW, 40);
        assert_eq!(layout.hit_test(2, 11), Some(16));
        assert_eq!(layout.hit_test(2, 12), None);
        assert_eq!(layout.hit_test(2, 13), None);

        // Past the end of a short lot.
        let short = GridLayout::new(Rect::new(0, 0, 80, 14), SPACES_PER_ROW, 10);
        assert_eq!(short.hit_test(15, 5), Some(9));
        assert_eq!(short.hit_test(25, 5), None);
    }

    #[test]
    fn test_scrolled_to_keeps_index_visible() {
        let layout = GridLayout::new(Rect::new(0, 0, 80, 12), SPACES_PER_ROW, 40);

        let down = layout.scrolled_to(0, 33);
        assert_eq!(down.first_row, 2);
        assert_eq!(down.cell_rect(33), Some(Rect::new(10, 8, 10, 4)));
        assert_eq!(down.cell_rect(15), None);
        assert_eq!(down.hit_test(12, 9), Some(33));

        // Scrolling back up only moves as far as needed.
        let up = down.scrolled_to(down.first_row, 10);
        assert_eq!(up.first_row, 1);

        // A stale offset is clamped once the lot shrinks.
        let shrunk = GridLayout::new(Rect::new(0, 0, 80, 12), SPACES_PER_ROW, 16);
        assert_eq!(shrunk.scrolled_to(2, 0).first_row, 0);
    }

    #[test]
    fn test_title_shows_hidden_rows() {
        let all = GridLayout::new(Rect::new(0, 0, 80, 12), SPACES_PER_ROW, 20);
        assert_eq!(all.title(), " Parking Map (20 spaces) ");

        let partial = GridLayout::new(Rect::new(0, 0, 80, 12), SPACES_PER_ROW, 40).scrolled_to(0, 39);
        assert_eq!(partial.title(), " Parking Map (40 spaces, rows 3-5 of 5) ");
    }

    #[test]
    fn test_fit_truncates_wide_text() {
        assert_eq!(fit("Camioneta", 4), "Cami");
        assert_eq!(fit("car", 8), "car");
    }
}

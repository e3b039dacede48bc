use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::models::{Seat, SeatStatus};

pub const EMPTY_COLOR: Color = Color::Rgb(0x4C, 0xAF, 0x50);
pub const OCCUPIED_COLOR: Color = Color::Rgb(0xF4, 0x43, 0x36);
pub const RESERVED_COLOR: Color = Color::Rgb(0xFF, 0x98, 0x00);
pub const UNKNOWN_COLOR: Color = Color::Rgb(0x9E, 0x9E, 0x9E);

/// Высота ячейки в строках терминала.
pub const CELL_HEIGHT: u16 = 3;

pub fn status_color(status: &SeatStatus) -> Color {
    match status {
        SeatStatus::Empty => EMPTY_COLOR,
        SeatStatus::Occupied => OCCUPIED_COLOR,
        SeatStatus::Reserved => RESERVED_COLOR,
        SeatStatus::Unknown(_) => UNKNOWN_COLOR,
    }
}

/// Геометрия сетки для конкретной области экрана.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub area: Rect,
    pub cell_width: u16,
    pub columns: usize,
    pub visible_rows: usize,
}

impl GridLayout {
    pub fn new(area: Rect, cell_width: u16) -> Self {
        let cell_width = cell_width.max(1);
        let columns = (area.width / cell_width).max(1) as usize;
        let visible_rows = (area.height / CELL_HEIGHT) as usize;
        Self {
            area,
            cell_width,
            columns,
            visible_rows,
        }
    }

    pub fn rows_for(&self, count: usize) -> usize {
        count.div_ceil(self.columns)
    }

    /// Прямоугольник ячейки `index` с учётом прокрутки, `None` если она не видна.
    pub fn cell_rect(&self, index: usize, scroll_row: usize) -> Option<Rect> {
        let row = index / self.columns;
        let col = index % self.columns;
        if row < scroll_row || row >= scroll_row + self.visible_rows {
            return None;
        }

        let x = self.area.x + col as u16 * self.cell_width;
        let y = self.area.y + (row - scroll_row) as u16 * CELL_HEIGHT;
        // Последний столбец - зазор между ячейками
        let width = self.cell_width.saturating_sub(1).max(1).min(self.area.right() - x);
        Some(Rect::new(x, y, width, CELL_HEIGHT))
    }

    /// Индекс ячейки под точкой экрана (клик мышью).
    pub fn hit_test(&self, column: u16, row: u16, scroll_row: usize, count: usize) -> Option<usize> {
        if column < self.area.x || column >= self.area.right() || row < self.area.y || row >= self.area.bottom() {
            return None;
        }
        let col = ((column - self.area.x) / self.cell_width) as usize;
        if col >= self.columns {
            return None;
        }
        let grid_row = scroll_row + ((row - self.area.y) / CELL_HEIGHT) as usize;
        let index = grid_row * self.columns + col;
        (index < count).then_some(index)
    }
}

/// Курсор и прокрутка сетки. Переживает обновления снимка: привязка по позиции.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridState {
    pub cursor: usize,
    pub scroll_row: usize,
}

impl GridState {
    pub fn move_by(&mut self, d_col: isize, d_row: isize, layout: &GridLayout, count: usize) {
        if count == 0 {
            self.cursor = 0;
            return;
        }
        let columns = layout.columns as isize;
        let target = self.cursor as isize + d_col + d_row * columns;
        self.cursor = target.clamp(0, count as isize - 1) as usize;
        self.scroll_into_view(layout, count);
    }

    pub fn set_cursor(&mut self, index: usize, layout: &GridLayout, count: usize) {
        self.cursor = index;
        self.scroll_into_view(layout, count);
    }

    /// Держит курсор в пределах снимка и на экране.
    pub fn scroll_into_view(&mut self, layout: &GridLayout, count: usize) {
        self.cursor = self.cursor.min(count.saturating_sub(1));
        let row = self.cursor / layout.columns;
        let visible = layout.visible_rows.max(1);

        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + visible {
            self.scroll_row = row + 1 - visible;
        }

        let max_scroll = layout.rows_for(count).saturating_sub(visible);
        self.scroll_row = self.scroll_row.min(max_scroll);
    }
}

/// Рисует только видимые строки сетки.
pub struct SeatGrid<'a> {
    seats: &'a [Seat],
    state: GridState,
    cell_width: u16,
}

impl<'a> SeatGrid<'a> {
    pub fn new(seats: &'a [Seat], state: GridState, cell_width: u16) -> Self {
        Self {
            seats,
            state,
            cell_width,
        }
    }
}

impl Widget for SeatGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = GridLayout::new(area, self.cell_width);
        let first = self.state.scroll_row * layout.columns;
        let last = (first + layout.visible_rows * layout.columns).min(self.seats.len());

        for index in first..last {
            let Some(rect) = layout.cell_rect(index, self.state.scroll_row) else {
                continue;
            };
            let seat = &self.seats[index];
            let background = status_color(&seat.status);
            buf.set_style(rect, Style::default().bg(background));

            let mut label_style = Style::default().fg(Color::White).bg(background);
            if index == self.state.cursor {
                label_style = label_style
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }

            let label = seat.seat_number.to_string();
            let label_width = (label.len() as u16).min(rect.width);
            let x = rect.x + (rect.width - label_width) / 2;
            let y = rect.y + rect.height / 2;
            buf.set_stringn(x, y, &label, label_width as usize, label_style);
        }
    }
}

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::grid::{GridLayout, GridState, SeatGrid, EMPTY_COLOR, OCCUPIED_COLOR};
use crate::controller::{NoticeKind, SeatBoard};

const GRID_MIN_HEIGHT: u16 = 5;
const NOTICE_MAX_WIDTH: u16 = 48;

/// Рисует весь экран и возвращает геометрию сетки (нужна для кликов мышью).
pub fn draw(frame: &mut Frame, board: &SeatBoard, grid: &mut GridState, endpoint: &str, cell_width: u16) -> GridLayout {
    let locale = board.locale();
    let snapshot = board.snapshot();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(GRID_MIN_HEIGHT),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    // --- Шапка: адрес и время обновления ---
    let updated = snapshot
        .fetched_at()
        .map(|ts| locale.updated_at(&ts.format("%H:%M:%S").to_string()))
        .unwrap_or_else(|| locale.waiting().to_string());
    let header = Paragraph::new(Line::from(vec![
        Span::styled(endpoint.to_string(), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(updated, Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL).title(locale.title()));
    frame.render_widget(header, chunks[0]);

    // --- Сетка мест ---
    let grid_block = Block::default().borders(Borders::ALL);
    let grid_area = grid_block.inner(chunks[1]);
    frame.render_widget(grid_block, chunks[1]);

    let layout = GridLayout::new(grid_area, cell_width);
    grid.scroll_into_view(&layout, snapshot.len());
    frame.render_widget(SeatGrid::new(snapshot.seats(), *grid, cell_width), grid_area);

    // --- Три счётчика ---
    let [total, occupied, available] = locale.summary_labels(board.stats());
    let summary = Paragraph::new(Line::from(vec![
        Span::styled(total, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::styled(occupied, Style::default().fg(OCCUPIED_COLOR)),
        Span::raw("   "),
        Span::styled(available, Style::default().fg(EMPTY_COLOR)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(summary, chunks[2]);

    frame.render_widget(
        Paragraph::new(locale.help()).style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );

    // --- Уведомление поверх сетки ---
    if let Some(notice) = board.notice() {
        let color = match notice.kind {
            NoticeKind::Info => Color::White,
            NoticeKind::Error => Color::LightRed,
        };
        let text = Paragraph::new(notice.text.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(color));
        let area = notice_area(grid_area, &text);
        frame.render_widget(Clear, area);
        frame.render_widget(text.block(Block::default().borders(Borders::ALL)), area);
    }

    layout
}

// Уведомление внизу области сетки, как toast. Высота считается по строкам
// после переноса, чтобы длинное описание ошибки не обрезалось.
fn notice_area(grid_area: Rect, text: &Paragraph) -> Rect {
    let width = grid_area.width.saturating_sub(4).min(NOTICE_MAX_WIDTH);
    let inner_width = width.saturating_sub(2);
    let lines = u16::try_from(text.line_count(inner_width)).unwrap_or(u16::MAX);
    let height = lines.saturating_add(2).min(grid_area.height);
    let x = grid_area.x + (grid_area.width.saturating_sub(width)) / 2;
    let y = grid_area.bottom().saturating_sub(height);
    Rect::new(x, y, width, height)
}

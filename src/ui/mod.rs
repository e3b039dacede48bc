//! Терминальный интерфейс: одна задача владеет `SeatBoard` и терминалом,
//! результаты опросов приходят через канал и применяются по очереди.

pub mod grid;
pub mod view;

use anyhow::Context;
use crossterm::{
    cursor::Show,
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::{
    client::SeatApiClient,
    config::Config,
    controller::SeatBoard,
    services::Poller,
};
use grid::{GridLayout, GridState};

// Частота перерисовки для истечения уведомлений
const FRAME_INTERVAL: Duration = Duration::from_millis(250);

/// Состояние экрана поверх `SeatBoard`: курсор, геометрия, флаг выхода.
pub struct App {
    pub board: SeatBoard,
    pub grid: GridState,
    endpoint: String,
    cell_width: u16,
    layout: GridLayout,
    should_quit: bool,
}

impl App {
    pub fn new(board: SeatBoard, endpoint: impl Into<String>, cell_width: u16) -> Self {
        Self {
            board,
            grid: GridState::default(),
            endpoint: endpoint.into(),
            cell_width,
            layout: GridLayout::new(Rect::default(), cell_width),
            should_quit: false,
        }
    }

    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| {
            self.layout = view::draw(frame, &self.board, &mut self.grid, &self.endpoint, self.cell_width);
        })?;
        Ok(())
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let count = self.board.snapshot().len();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.should_quit = true,
            KeyCode::Left => self.grid.move_by(-1, 0, &self.layout, count),
            KeyCode::Right => self.grid.move_by(1, 0, &self.layout, count),
            KeyCode::Up => self.grid.move_by(0, -1, &self.layout, count),
            KeyCode::Down => self.grid.move_by(0, 1, &self.layout, count),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.board.select(self.grid.cursor);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let count = self.board.snapshot().len();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = self.layout.hit_test(mouse.column, mouse.row, self.grid.scroll_row, count) {
                    self.grid.set_cursor(index, &self.layout, count);
                    self.board.select(index);
                }
            }
            MouseEventKind::ScrollDown => self.grid.move_by(0, 1, &self.layout, count),
            MouseEventKind::ScrollUp => self.grid.move_by(0, -1, &self.layout, count),
            _ => {}
        }
    }
}

pub async fn run(config: &Config, client: SeatApiClient) -> anyhow::Result<()> {
    install_panic_hook();

    enable_raw_mode().context("Failed to enable raw mode")?;
    // с этого момента терминал восстанавливается при любом выходе
    let _restore = RestoreOnDrop(restore_terminal);
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture).context("Failed to initialise terminal")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout())).context("Failed to initialise terminal")?;

    let app = App::new(SeatBoard::from_config(&config.ui), client.url(), config.ui.cell_width);
    run_app(&mut terminal, app, config, client).await
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut app: App,
    config: &Config,
    client: SeatApiClient,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut poller = Poller::new(&config.poller);
    poller.start(client, tx);

    let mut events = EventStream::new();
    let mut frame_tick = tokio::time::interval(FRAME_INTERVAL);

    let result = loop {
        if let Err(e) = app.draw(terminal) {
            break Err(e.into());
        }

        tokio::select! {
            Some(outcome) = rx.recv() => {
                app.board.apply(outcome);
            }
            event = events.next() => match event {
                Some(Ok(event)) => app.handle_event(event),
                Some(Err(e)) => {
                    error!("Terminal event stream failed: {}", e);
                    break Err(e.into());
                }
                None => break Ok(()),
            },
            _ = frame_tick.tick() => {
                app.board.expire_notice(Instant::now());
            }
        }

        if app.should_quit() {
            info!("Quit requested");
            break Ok(());
        }
    };

    poller.stop();
    result
}

/// Вызывает `restore` при выходе из области видимости, в том числе при
/// раскрутке паники. Ошибка восстановления только логируется.
struct RestoreOnDrop<F: FnMut() -> io::Result<()>>(F);

impl<F: FnMut() -> io::Result<()>> Drop for RestoreOnDrop<F> {
    fn drop(&mut self) {
        if let Err(e) = (self.0)() {
            error!("Failed to restore terminal: {}", e);
        }
    }
}

// При panic = "abort" Drop не вызывается, поэтому терминал чинит хук
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show)
}

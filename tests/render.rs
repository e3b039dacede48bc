use std::time::Duration;

use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use seat_monitor::{
    config::{ApiConfig, ApiEnvironment},
    i18n::Locale,
    ui::{
        grid::{GridState, EMPTY_COLOR, OCCUPIED_COLOR, RESERVED_COLOR},
        view,
    },
    FetchOutcome, SeatApiClient, SeatBoard, SeatSource,
};
use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

fn render(board: &SeatBoard, width: u16, height: u16) -> (Buffer, seat_monitor::ui::grid::GridLayout) {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    let mut grid = GridState::default();
    let mut layout = None;
    terminal
        .draw(|frame| layout = Some(view::draw(frame, board, &mut grid, "http://seats.test/", 6)))
        .unwrap();
    (terminal.backend().buffer().clone(), layout.unwrap())
}

fn client(url: String) -> SeatApiClient {
    SeatApiClient::from_config(&ApiConfig {
        environment: ApiEnvironment::Local,
        url,
        timeout_secs: 5,
    })
    .unwrap()
}

fn text(buffer: &Buffer) -> String {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buffer.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn screen_shows_grid_and_three_counters() {
    let mut board = SeatBoard::new(Locale::English, Duration::from_secs(2));
    board.on_fetch_success(
        r#"[{"seat_number":1,"status":"empty"},{"seat_number":2,"status":"occupied","user_name":"A"},{"seat_number":3,"status":"reserved"}]"#,
    );

    let (buffer, layout) = render(&board, 60, 20);
    let screen = text(&buffer);

    assert!(screen.contains("Total: 3"));
    assert!(screen.contains("In use: 1"));
    assert!(screen.contains("Available: 2"));
    assert!(screen.contains("http://seats.test/"));

    let colors: Vec<_> = (0..3)
        .map(|i| {
            let rect = layout.cell_rect(i, 0).unwrap();
            buffer.cell((rect.x, rect.y)).unwrap().bg
        })
        .collect();
    assert_eq!(colors, vec![EMPTY_COLOR, OCCUPIED_COLOR, RESERVED_COLOR]);
}

#[test]
fn before_first_fetch_screen_is_waiting() {
    let board = SeatBoard::new(Locale::English, Duration::from_secs(2));
    let (buffer, _) = render(&board, 60, 20);
    let screen = text(&buffer);

    assert!(screen.contains("Loading seats..."));
    assert!(screen.contains("Total: 0"));
}

#[test]
fn error_notice_is_drawn_over_grid() {
    let mut board = SeatBoard::new(Locale::English, Duration::from_secs(2));
    board.on_fetch_success("[{\"seat_number\":1}]");

    let (buffer, _) = render(&board, 60, 20);
    assert!(text(&buffer).contains("Data parse error"));
}

#[tokio::test]
async fn network_error_description_fits_on_screen() {
    let client = client("http://127.0.0.1:9/api_root/Seat/".to_string());
    let result = client.fetch_payload().await;
    assert!(result.is_err());

    let mut board = SeatBoard::new(Locale::English, Duration::from_secs(2));
    board.apply(FetchOutcome { tick: 1, result });

    let (buffer, _) = render(&board, 60, 20);
    let screen = text(&buffer);
    assert!(screen.contains("Server connection failed"), "{screen}");
    assert!(screen.contains("127.0.0.1:9"), "{screen}");
}

#[tokio::test]
async fn http_status_error_description_fits_on_screen() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client(format!("{}/api_root/Seat/", server.uri()));
    let mut board = SeatBoard::new(Locale::English, Duration::from_secs(2));
    board.apply(FetchOutcome { tick: 1, result: client.fetch_payload().await });

    let (buffer, _) = render(&board, 60, 20);
    let screen = text(&buffer);
    assert!(screen.contains("/api_root/Seat/"), "{screen}");
}

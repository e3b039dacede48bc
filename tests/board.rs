use std::time::Duration;

use seat_monitor::{
    i18n::Locale,
    models::{SeatStats, SeatStatus},
    ui::grid::{status_color, EMPTY_COLOR, OCCUPIED_COLOR, RESERVED_COLOR, UNKNOWN_COLOR},
    Applied, FetchOutcome, NoticeKind, SeatBoard,
};

fn board(locale: Locale) -> SeatBoard {
    SeatBoard::new(locale, Duration::from_secs(2))
}

fn colors(board: &SeatBoard) -> Vec<ratatui::style::Color> {
    board.snapshot().seats().iter().map(|s| status_color(&s.status)).collect()
}

#[test]
fn empty_and_occupied_payload() {
    let mut board = board(Locale::Korean);
    let applied = board.on_fetch_success(
        r#"[{"seat_number":1,"status":"empty"},{"seat_number":2,"status":"occupied","user_name":"A"}]"#,
    );

    assert_eq!(applied, Applied::Updated);
    assert_eq!(board.stats(), SeatStats { total: 2, occupied: 1, available: 1 });
    assert_eq!(colors(&board), vec![EMPTY_COLOR, OCCUPIED_COLOR]);
    assert!(board.notice().is_none());
}

#[test]
fn reserved_seat_is_orange_and_available() {
    let mut board = board(Locale::Korean);
    board.on_fetch_success(r#"[{"seat_number":5,"status":"reserved"}]"#);

    assert_eq!(colors(&board), vec![RESERVED_COLOR]);
    assert_eq!(board.stats(), SeatStats { total: 1, occupied: 0, available: 1 });
}

#[test]
fn unknown_status_is_gray_and_not_occupied() {
    let mut board = board(Locale::English);
    board.on_fetch_success(r#"[{"seat_number":1,"status":"maintenance"}]"#);

    let seat = &board.snapshot().seats()[0];
    assert_eq!(seat.status, SeatStatus::Unknown("maintenance".into()));
    assert_eq!(status_color(&seat.status), UNKNOWN_COLOR);
    assert_eq!(board.stats(), SeatStats { total: 1, occupied: 0, available: 1 });
}

#[test]
fn malformed_payload_keeps_previous_snapshot() {
    let mut board = board(Locale::Korean);
    board.on_fetch_success(
        r#"[{"seat_number":1,"status":"empty"},{"seat_number":2,"status":"occupied","user_name":"A"}]"#,
    );
    let before: Vec<_> = board.snapshot().seats().to_vec();
    let fetched_at = board.snapshot().fetched_at();
    let stats = board.stats();

    let applied = board.on_fetch_success(
        r#"[{"seat_number":1,"status":"occupied"},{"seat_number":2,"user_name":"B"}]"#,
    );

    assert_eq!(applied, Applied::Rejected);
    assert_eq!(board.snapshot().seats(), before.as_slice());
    assert_eq!(board.snapshot().fetched_at(), fetched_at);
    assert_eq!(board.stats(), stats);

    let notice = board.notice().expect("parse error notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "데이터 파싱 오류");
}

#[test]
fn parse_failure_through_outcome_keeps_snapshot() {
    let mut board = board(Locale::English);
    board.apply(FetchOutcome {
        tick: 1,
        result: Ok(r#"[{"seat_number":4,"status":"empty"}]"#.to_string()),
    });
    let applied = board.apply(FetchOutcome {
        tick: 2,
        result: Ok(r#"{"detail":"Not found."}"#.to_string()),
    });

    assert_eq!(applied, Applied::Rejected);
    assert_eq!(board.snapshot().len(), 1);
    assert_eq!(board.notice().unwrap().text, "Data parse error");
}

#[test]
fn selecting_occupied_seat_shows_in_use_label() {
    let mut board = board(Locale::Korean);
    board.on_fetch_success(
        r#"[{"seat_number":1,"status":"empty"},{"seat_number":14,"status":"occupied","user_name":"Kim"}]"#,
    );

    let notice = board.select(1).expect("seat notice").clone();
    assert_eq!(notice.kind, NoticeKind::Info);
    assert!(notice.text.contains("14"));
    assert!(notice.text.contains("사용 중"));
    assert!(notice.text.contains("Kim"));

    let mut board_en = self::board(Locale::English);
    board_en.on_fetch_success(r#"[{"seat_number":14,"status":"occupied","user_name":"Kim"}]"#);
    let text = &board_en.select(0).unwrap().text;
    assert!(text.contains("14"));
    assert!(text.contains("In use"));
}

#[test]
fn selection_shows_reservation_time_when_known() {
    let mut board = board(Locale::English);
    board.on_fetch_success(
        r#"[{"seat_number":3,"status":"occupied","user_name":"Park","reserved_at":"2025-11-10T14:05:00"}]"#,
    );
    let text = &board.select(0).unwrap().text;
    assert!(text.contains("Reserved at: 2025-11-10 14:05"));
}

#[test]
fn empty_array_clears_the_grid() {
    let mut board = board(Locale::English);
    board.on_fetch_success(r#"[{"seat_number":1,"status":"occupied"}]"#);
    board.on_fetch_success("[]");

    assert!(board.snapshot().is_empty());
    assert_eq!(board.stats(), SeatStats::default());
    assert!(board.snapshot().fetched_at().is_some());
}

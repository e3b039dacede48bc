use std::str::FromStr;

use crate::models::{Seat, SeatStatus, SeatStats};

/// Язык интерфейса. По умолчанию корейский, как в мобильном клиенте.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Korean,
    English,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" | "kr" | "ko_kr" | "korean" => Ok(Locale::Korean),
            "en" | "en_us" | "english" => Ok(Locale::English),
            other => Err(format!("unsupported locale {other:?}")),
        }
    }
}

impl Locale {
    pub fn status_label(self, status: &SeatStatus) -> &'static str {
        match (self, status) {
            (Locale::Korean, SeatStatus::Empty) => "사용 가능",
            (Locale::Korean, SeatStatus::Occupied) => "사용 중",
            (Locale::Korean, SeatStatus::Reserved) => "예약됨",
            (Locale::Korean, SeatStatus::Unknown(_)) => "알 수 없음",
            (Locale::English, SeatStatus::Empty) => "Available",
            (Locale::English, SeatStatus::Occupied) => "In use",
            (Locale::English, SeatStatus::Reserved) => "Reserved",
            (Locale::English, SeatStatus::Unknown(_)) => "Unknown",
        }
    }

    /// Три подписи под сеткой: всего / занято / свободно.
    pub fn summary_labels(self, stats: SeatStats) -> [String; 3] {
        match self {
            Locale::Korean => [
                format!("전체: {}", stats.total),
                format!("사용 중: {}", stats.occupied),
                format!("사용 가능: {}", stats.available),
            ],
            Locale::English => [
                format!("Total: {}", stats.total),
                format!("In use: {}", stats.occupied),
                format!("Available: {}", stats.available),
            ],
        }
    }

    pub fn seat_notice(self, seat: &Seat) -> String {
        let status = self.status_label(&seat.status);
        let mut text = match self {
            Locale::Korean => format!("좌석 {}\n상태: {}", seat.seat_number, status),
            Locale::English => format!("Seat {}\nStatus: {}", seat.seat_number, status),
        };

        if seat.has_user() {
            let label = match self {
                Locale::Korean => "사용자",
                Locale::English => "User",
            };
            text.push_str(&format!("\n{label}: {}", seat.user_name));
        }
        if let Some(reserved_at) = seat.reserved_at_display() {
            let label = match self {
                Locale::Korean => "예약 시각",
                Locale::English => "Reserved at",
            };
            text.push_str(&format!("\n{label}: {reserved_at}"));
        }
        if let Some(detected_at) = seat.last_detected_display() {
            let label = match self {
                Locale::Korean => "마지막 감지",
                Locale::English => "Last detected",
            };
            text.push_str(&format!("\n{label}: {detected_at}"));
        }
        // сервер сам освободил место после долгого отсутствия
        if seat.auto_released == Some(true) {
            text.push_str(match self {
                Locale::Korean => "\n자동 반납됨",
                Locale::English => "\nAuto-released",
            });
        }
        text
    }

    pub fn parse_error_notice(self) -> String {
        match self {
            Locale::Korean => "데이터 파싱 오류".to_string(),
            Locale::English => "Data parse error".to_string(),
        }
    }

    pub fn network_error_notice(self, description: &str) -> String {
        match self {
            Locale::Korean => format!("서버 연결 실패: {description}"),
            Locale::English => format!("Server connection failed: {description}"),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Locale::Korean => "도서관 좌석 현황",
            Locale::English => "Library seats",
        }
    }

    pub fn waiting(self) -> &'static str {
        match self {
            Locale::Korean => "좌석 정보를 불러오는 중...",
            Locale::English => "Loading seats...",
        }
    }

    pub fn updated_at(self, time: &str) -> String {
        match self {
            Locale::Korean => format!("갱신: {time}"),
            Locale::English => format!("Updated: {time}"),
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            Locale::Korean => "←↑↓→ 이동  Enter 선택  마우스 클릭  q 종료",
            Locale::English => "←↑↓→ move  Enter select  click  q quit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_locale_names() {
        assert_eq!("ko".parse::<Locale>(), Ok(Locale::Korean));
        assert_eq!("EN".parse::<Locale>(), Ok(Locale::English));
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn seat_notice_lists_number_status_and_user() {
        let seat = Seat::new(12, SeatStatus::Occupied, "Kim");
        assert_eq!(Locale::Korean.seat_notice(&seat), "좌석 12\n상태: 사용 중\n사용자: Kim");
        assert_eq!(Locale::English.seat_notice(&seat), "Seat 12\nStatus: In use\nUser: Kim");
    }

    #[test]
    fn empty_seat_notice_has_no_user_line() {
        let seat = Seat::new(3, SeatStatus::Empty, "");
        assert_eq!(Locale::English.seat_notice(&seat), "Seat 3\nStatus: Available");
    }

    #[test]
    fn seat_notice_shows_detection_time_and_auto_release() {
        let mut seat = Seat::new(5, SeatStatus::Empty, "");
        seat.last_detected_at = Some("2025-11-10T09:10:00".to_string());
        seat.auto_released = Some(true);

        assert_eq!(
            Locale::English.seat_notice(&seat),
            "Seat 5\nStatus: Available\nLast detected: 2025-11-10 09:10\nAuto-released"
        );
        assert_eq!(
            Locale::Korean.seat_notice(&seat),
            "좌석 5\n상태: 사용 가능\n마지막 감지: 2025-11-10 09:10\n자동 반납됨"
        );
    }

    #[test]
    fn auto_release_hint_only_when_true() {
        let mut seat = Seat::new(5, SeatStatus::Empty, "");
        seat.auto_released = Some(false);
        assert_eq!(Locale::English.seat_notice(&seat), "Seat 5\nStatus: Available");
    }

    #[test]
    fn summary_labels_follow_stats() {
        let stats = SeatStats { total: 10, occupied: 4, available: 6 };
        assert_eq!(
            Locale::Korean.summary_labels(stats),
            ["전체: 10".to_string(), "사용 중: 4".to_string(), "사용 가능: 6".to_string()]
        );
    }
}

use chrono::Local;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use crate::{
    config::UiConfig,
    error::FetchError,
    i18n::Locale,
    models::{parse_seats, SeatStats, Snapshot},
    services::FetchOutcome,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Короткое сообщение поверх экрана (аналог toast).
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    shown_at: Instant,
}

impl Notice {
    fn new(text: String, kind: NoticeKind) -> Self {
        Self {
            text,
            kind,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.shown_at) >= ttl
    }
}

/// Что произошло с результатом опроса.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Updated,
    Rejected,
}

/// Состояние экрана: последний снимок мест и текущее уведомление.
///
/// Живёт в одной задаче (UI или headless), поэтому без блокировок.
pub struct SeatBoard {
    snapshot: Snapshot,
    locale: Locale,
    notice: Option<Notice>,
    notice_ttl: Duration,
}

impl SeatBoard {
    pub fn new(locale: Locale, notice_ttl: Duration) -> Self {
        Self {
            snapshot: Snapshot::default(),
            locale,
            notice: None,
            notice_ttl,
        }
    }

    pub fn from_config(config: &UiConfig) -> Self {
        Self::new(config.locale, config.notice_ttl())
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn stats(&self) -> SeatStats {
        self.snapshot.stats()
    }

    /// Пересчитывает счётчики по текущему снимку.
    pub fn compute_stats(&self) -> SeatStats {
        SeatStats::compute(self.snapshot.seats())
    }

    pub fn apply(&mut self, outcome: FetchOutcome) -> Applied {
        match outcome.result {
            Ok(payload) => self.on_fetch_success(&payload),
            Err(e) => {
                self.on_fetch_failure(&e);
                Applied::Rejected
            }
        }
    }

    /// Разбирает ответ и заменяет снимок целиком. При любой ошибке разбора
    /// старый снимок остаётся нетронутым.
    pub fn on_fetch_success(&mut self, payload: &str) -> Applied {
        match parse_seats(payload) {
            Ok(seats) => {
                self.snapshot = Snapshot::new(seats, Local::now());
                let stats = self.compute_stats();
                info!(
                    total = stats.total,
                    occupied = stats.occupied,
                    available = stats.available,
                    "Seat snapshot updated"
                );
                Applied::Updated
            }
            Err(e) => {
                error!(error = ?e, "Failed to parse seat payload");
                self.on_fetch_failure(&FetchError::Parse(e));
                Applied::Rejected
            }
        }
    }

    /// Логирует сбой и показывает уведомление. Снимок не меняется.
    pub fn on_fetch_failure(&mut self, error: &FetchError) {
        let text = match error {
            FetchError::Network(e) => {
                warn!(kind = error.kind(), error = %e, "Seat server unreachable");
                self.locale.network_error_notice(&e.to_string())
            }
            FetchError::Parse(_) => self.locale.parse_error_notice(),
        };
        self.show_notice(text, NoticeKind::Error);
    }

    /// Выбор ячейки: показывает номер места и его статус.
    pub fn select(&mut self, index: usize) -> Option<&Notice> {
        let text = self.locale.seat_notice(self.snapshot.get(index)?);
        self.show_notice(text, NoticeKind::Info);
        self.notice.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Убирает уведомление, если оно провисело дольше `notice_ttl`.
    pub fn expire_notice(&mut self, now: Instant) {
        if self
            .notice
            .as_ref()
            .is_some_and(|notice| notice.is_expired(now, self.notice_ttl))
        {
            self.notice = None;
        }
    }

    // Новое уведомление вытесняет старое
    fn show_notice(&mut self, text: String, kind: NoticeKind) {
        self.notice = Some(Notice::new(text, kind));
    }
}

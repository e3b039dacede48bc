use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Статус места в том виде, в каком его присылает сервер.
///
/// Всё, что не `empty` / `occupied` / `reserved`, превращается в `Unknown`
/// с сохранением исходной строки (для логов).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum SeatStatus {
    Empty,
    Occupied,
    Reserved,
    Unknown(String),
}

impl SeatStatus {
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "empty" => SeatStatus::Empty,
            "occupied" => SeatStatus::Occupied,
            "reserved" => SeatStatus::Reserved,
            other => SeatStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SeatStatus::Empty => "empty",
            SeatStatus::Occupied => "occupied",
            SeatStatus::Reserved => "reserved",
            SeatStatus::Unknown(raw) => raw,
        }
    }

    /// Только `occupied` считается занятым, `reserved` и неизвестные статусы - нет.
    pub fn is_occupied(&self) -> bool {
        matches!(self, SeatStatus::Occupied)
    }
}

impl From<String> for SeatStatus {
    fn from(raw: String) -> Self {
        match SeatStatus::from_wire(&raw) {
            SeatStatus::Unknown(_) => SeatStatus::Unknown(raw),
            known => known,
        }
    }
}

/// Одно место из ответа `GET /api_root/Seat/`.
///
/// Создаётся заново при каждом опросе, идентичность между опросами не хранится.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Seat {
    pub seat_number: u32,
    pub status: SeatStatus,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub user_name: String,
    #[serde(default)]
    pub reserved_at: Option<String>,
    #[serde(default)]
    pub last_detected_at: Option<String>,
    #[serde(default)]
    pub auto_released: Option<bool>,
}

impl Seat {
    pub fn new(seat_number: u32, status: SeatStatus, user_name: impl Into<String>) -> Self {
        Self {
            seat_number,
            status,
            user_name: user_name.into(),
            reserved_at: None,
            last_detected_at: None,
            auto_released: None,
        }
    }

    pub fn has_user(&self) -> bool {
        !self.user_name.is_empty()
    }

    pub fn reserved_at_display(&self) -> Option<String> {
        self.reserved_at.as_deref().map(format_timestamp)
    }

    pub fn last_detected_display(&self) -> Option<String> {
        self.last_detected_at.as_deref().map(format_timestamp)
    }
}

/// Разбирает тело ответа целиком. Любая ошибка в любом элементе - ошибка всего ответа.
pub fn parse_seats(payload: &str) -> Result<Vec<Seat>, serde_json::Error> {
    serde_json::from_str(payload)
}

// `user_name` может отсутствовать или быть null - в обоих случаях пустая строка
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// Django отдаёт либо RFC 3339 (USE_TZ=True), либо наивное время
fn format_timestamp(raw: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return ts.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}

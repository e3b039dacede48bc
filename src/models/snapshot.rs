use chrono::{DateTime, Local};
use std::sync::Arc;

use super::Seat;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeatStats {
    pub total: usize,
    pub occupied: usize,
    pub available: usize,
}

impl SeatStats {
    pub fn compute(seats: &[Seat]) -> Self {
        let total = seats.len();
        let occupied = seats.iter().filter(|seat| seat.status.is_occupied()).count();
        Self {
            total,
            occupied,
            available: total - occupied,
        }
    }
}

/// Последний успешно полученный список мест.
///
/// Заменяется целиком, на месте не меняется: рендер всегда видит
/// согласованные `seats` и `stats`.
#[derive(Debug, Clone)]
pub struct Snapshot {
    seats: Arc<[Seat]>,
    stats: SeatStats,
    fetched_at: Option<DateTime<Local>>,
}

impl Snapshot {
    pub fn new(seats: Vec<Seat>, fetched_at: DateTime<Local>) -> Self {
        let stats = SeatStats::compute(&seats);
        Self {
            seats: seats.into(),
            stats,
            fetched_at: Some(fetched_at),
        }
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn stats(&self) -> SeatStats {
        self.stats
    }

    /// `None` пока не было ни одного успешного опроса.
    pub fn fetched_at(&self) -> Option<DateTime<Local>> {
        self.fetched_at
    }

    pub fn get(&self, index: usize) -> Option<&Seat> {
        self.seats.get(index)
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            seats: Arc::from(Vec::new()),
            stats: SeatStats::default(),
            fetched_at: None,
        }
    }
}

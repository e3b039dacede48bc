pub mod seat;
pub mod snapshot;

pub use seat::{parse_seats, Seat, SeatStatus};
pub use snapshot::{SeatStats, Snapshot};

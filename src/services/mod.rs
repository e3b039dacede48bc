pub mod poller;

pub use poller::{FetchOutcome, Poller};

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod headless;
pub mod i18n;
pub mod models;
pub mod services;
pub mod ui;

pub use client::{SeatApiClient, SeatSource};
pub use config::Config;
pub use controller::{Applied, Notice, NoticeKind, SeatBoard};
pub use error::FetchError;
pub use services::{FetchOutcome, Poller};

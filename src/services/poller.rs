//! poller.rs
//!
//! Периодический опрос сервера с местами.
//!
//! Расписание таймерное: тик наступает через `interval` после *выдачи*
//! предыдущего тика, а не после завершения запроса. Каждый тик запускает
//! отдельную задачу "выстрелил и забыл", поэтому при медленной сети запросы
//! могут перекрываться. Опционально (`skip_when_busy`) тик пропускается,
//! пока предыдущий запрос ещё в полёте.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::{client::SeatSource, config::PollerConfig, error::FetchError};

/// Результат одного тика, доставляется в UI-задачу.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Номер тика, начиная с 1.
    pub tick: u64,
    pub result: Result<String, FetchError>,
}

pub struct Poller {
    interval: Duration,
    skip_when_busy: bool,
    handle: Option<JoinHandle<()>>,
    in_flight: Arc<AtomicUsize>,
}

impl Poller {
    pub fn new(config: &PollerConfig) -> Self {
        Self {
            interval: config.interval(),
            skip_when_busy: config.skip_when_busy,
            handle: None,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Первый запрос уходит сразу, дальше - каждые `interval` до `stop()`.
    pub fn start<S: SeatSource>(&mut self, source: S, outcomes: UnboundedSender<FetchOutcome>) {
        if self.is_running() {
            warn!("Poller already running, start ignored");
            return;
        }

        let interval = self.interval;
        let skip_when_busy = self.skip_when_busy;
        let in_flight = self.in_flight.clone();

        info!(interval_ms = interval.as_millis() as u64, skip_when_busy, "🔄 Seat polling started");

        self.handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // Пропущенные тики не догоняем пачкой
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut tick: u64 = 0;

            loop {
                ticker.tick().await;
                tick += 1;

                if outcomes.is_closed() {
                    debug!("Outcome receiver dropped, polling loop exits");
                    break;
                }

                if skip_when_busy && in_flight.load(Ordering::Acquire) > 0 {
                    debug!(tick, "Previous fetch still in flight, tick skipped");
                    continue;
                }

                in_flight.fetch_add(1, Ordering::AcqRel);
                let source = source.clone();
                let outcomes = outcomes.clone();
                let in_flight = in_flight.clone();

                tokio::spawn(async move {
                    let result = source.fetch_payload().await;
                    in_flight.fetch_sub(1, Ordering::AcqRel);

                    if outcomes.send(FetchOutcome { tick, result }).is_err() {
                        debug!(tick, "Fetch finished after shutdown, result dropped");
                    }
                });
            }
        }));
    }

    /// Отменяет все будущие тики. Уже запущенные запросы не прерываются.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("⏹️ Seat polling stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

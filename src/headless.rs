use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    client::{SeatApiClient, SeatSource},
    config::Config,
    controller::{Applied, SeatBoard},
    services::Poller,
};

/// Тот же цикл опроса без терминального UI: счётчики и уведомления идут в лог.
pub async fn run(config: &Config, client: SeatApiClient) -> anyhow::Result<()> {
    info!(url = %client.url(), "Running headless");
    let board = SeatBoard::from_config(&config.ui);
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };
    run_until(config, client, board, shutdown).await;
    Ok(())
}

/// Крутит опрос, пока не завершится `shutdown`. Возвращает доску в финальном состоянии.
pub async fn run_until<S, F>(config: &Config, source: S, mut board: SeatBoard, shutdown: F) -> SeatBoard
where
    S: SeatSource,
    F: std::future::Future<Output = ()>,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut poller = Poller::new(&config.poller);
    poller.start(source, tx);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            Some(outcome) = rx.recv() => {
                let tick = outcome.tick;
                match board.apply(outcome) {
                    Applied::Updated => {
                        let stats = board.stats();
                        info!(
                            tick,
                            total = stats.total,
                            occupied = stats.occupied,
                            available = stats.available,
                            "📊 Seats"
                        );
                    }
                    Applied::Rejected => debug!(tick, "Snapshot kept"),
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    poller.stop();
    board
}

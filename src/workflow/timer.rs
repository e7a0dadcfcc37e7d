use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// One-second heartbeat for an in-progress attempt. The spawned task only
/// emits ticks; all countdown arithmetic stays in the attempt workflow so it
/// can be tested without a clock.
pub(crate) struct Countdown {
    ticks: mpsc::Receiver<()>,
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Countdown {
    pub(crate) fn start() -> Self {
        let (tick_tx, tick_rx) = mpsc::channel(1);
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + Duration::from_secs(1);
            let mut interval = tokio::time::interval_at(start, Duration::from_secs(1));
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if tick_tx.send(()).await.is_err() {
                            break;
                        }
                    }
                    _ = stop_rx.changed() => {
                        if *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
        });

        Self { ticks: tick_rx, stop: stop_tx, handle }
    }

    pub(crate) async fn recv(&mut self) -> Option<()> {
        self.ticks.recv().await
    }

    pub(crate) fn stop(self) {
        let _ = self.stop.send(true);
        self.handle.abort();
    }
}

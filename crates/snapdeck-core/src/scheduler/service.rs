use std::time::{Duration, Instant};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::NavigationConfig;

/// Events emitted by the timer service to the UI loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Periodic watchdog tick; forward to `NavigationController::watchdog_tick`
    Watchdog(Instant),
}

/// Background service driving the navigation watchdog.
///
/// The controller itself is single-threaded, so the service never touches it:
/// ticks are sent over a channel and applied by the loop that owns the controller.
pub struct TimerService {
    watchdog_interval: Duration,
    event_tx: Option<mpsc::UnboundedSender<TimerEvent>>,
}

impl TimerService {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            watchdog_interval: config.watchdog_interval(),
            event_tx: None,
        }
    }

    /// Set the event sender for UI notifications
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Send an event; false once the receiver is gone
    fn send_event(&self, event: TimerEvent) -> bool {
        match self.event_tx {
            Some(ref tx) => tx.send(event).is_ok(),
            None => true,
        }
    }

    /// Run on the current tokio runtime until shutdown
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    /// Tick until the shutdown signal fires or the receiver is dropped
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Timer service started: watchdog={}ms",
            self.watchdog_interval.as_millis()
        );

        let mut watchdog = tokio::time::interval(self.watchdog_interval);
        watchdog.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        // Skip the first tick (fires immediately)
        watchdog.tick().await;

        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("Timer service received shutdown signal");
                        break;
                    }
                }

                tick = watchdog.tick() => {
                    debug!("Watchdog tick");
                    if !self.send_event(TimerEvent::Watchdog(tick.into_std())) {
                        warn!("Failed to send timer event: receiver dropped");
                        break;
                    }
                }
            }
        }

        info!("Timer service stopped");
    }
}

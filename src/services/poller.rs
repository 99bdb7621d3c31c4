use crate::controller::Dashboard;
use crate::view::DashboardView;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{Duration, MissedTickBehavior, interval};

/// Periodically refreshes the notification list.
///
/// Every tick issues its own request without waiting for earlier ones;
/// the reconciler's request tickets keep a slow, older response from
/// overwriting a newer one.
pub struct NotificationPoller<V: DashboardView + 'static> {
    dashboard: Arc<Mutex<Dashboard<V>>>,
    period: Duration,
    shutdown: watch::Receiver<bool>,
}

impl<V: DashboardView + 'static> NotificationPoller<V> {
    pub fn new(
        dashboard: Arc<Mutex<Dashboard<V>>>,
        period: Duration,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            dashboard,
            period,
            shutdown,
        }
    }

    pub async fn run(mut self) {
        tracing::info!("🔔 Notification poller started (every {:?})", self.period);

        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut in_flight = JoinSet::new();

        loop {
            tokio::select! {
                _ = self.shutdown.changed() => {
                    tracing::info!("🛑 Notification poller shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    in_flight.spawn(fetch_and_apply(Arc::clone(&self.dashboard)));
                }
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = joined {
                        tracing::error!("Notification fetch task failed: {}", e);
                    }
                }
            }
        }

        // Responses landing after shutdown would only be discarded
        in_flight.shutdown().await;
    }

    /// Starts one fetch in the background and applies it when it lands
    pub fn poll_once(&self) -> JoinHandle<()> {
        tokio::spawn(fetch_and_apply(Arc::clone(&self.dashboard)))
    }
}

async fn fetch_and_apply<V: DashboardView + 'static>(dashboard: Arc<Mutex<Dashboard<V>>>) {
    let (ticket, backend) = {
        let mut dashboard = dashboard.lock().await;
        (dashboard.begin_notification_fetch(), dashboard.backend())
    };

    let fetched = backend.fetch_notifications().await;

    // Failures are logged by the dashboard; the next tick retries
    let _ = dashboard.lock().await.apply_notification_fetch(ticket, fetched);
}

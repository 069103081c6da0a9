use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::dashboard::{build_view, DashboardView};
use crate::instant::ReferenceInstant;
use crate::store::{ScheduleStore, Snapshot};
use crate::time_of_day::TimeOfDay;

type Clock = Box<dyn Fn() -> ReferenceInstant + Send + Sync>;

/// Re-reads the store on a fixed interval and publishes a fresh
/// [`DashboardView`] whenever the data or the current minute changed.
///
/// Readers subscribe through the `watch` receiver returned by [`new`]; they
/// see at most one view per distinct (snapshot, minute) pair.
///
/// [`new`]: DashboardPoller::new
pub struct DashboardPoller {
    store: Arc<dyn ScheduleStore>,
    interval: Duration,
    clock: Clock,
    views_tx: watch::Sender<Option<DashboardView>>,
    last: Option<(Snapshot, NaiveDate, TimeOfDay)>,
}

impl DashboardPoller {
    /// Create a poller on the local wall clock.
    pub fn new(
        store: Arc<dyn ScheduleStore>,
        interval: Duration,
    ) -> (Self, watch::Receiver<Option<DashboardView>>) {
        Self::with_clock(store, interval, ReferenceInstant::now)
    }

    /// Create a poller reading "now" from `clock`.
    pub fn with_clock<C>(
        store: Arc<dyn ScheduleStore>,
        interval: Duration,
        clock: C,
    ) -> (Self, watch::Receiver<Option<DashboardView>>)
    where
        C: Fn() -> ReferenceInstant + Send + Sync + 'static,
    {
        let (views_tx, views_rx) = watch::channel(None);
        let poller = Self {
            store,
            // tokio rejects a zero period
            interval: interval.max(Duration::from_millis(1)),
            clock: Box::new(clock),
            views_tx,
            last: None,
        };
        (poller, views_rx)
    }

    /// Poll until `shutdown` broadcasts `true`.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(interval_secs = self.interval.as_secs_f64(), "dashboard poller started");

        let mut interval = tokio::time::interval(self.interval);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.tick();
                }
                res = shutdown.changed() => {
                    // a dropped sender counts as shutdown
                    if res.is_err() || *shutdown.borrow() {
                        info!("dashboard poller shutting down");
                        break;
                    }
                }
            }
        }
    }

    /// One poll. Returns true when a new view was published.
    pub fn tick(&mut self) -> bool {
        let snapshot = match self.store.snapshot() {
            Ok(s) => s,
            Err(e) => {
                error!("dashboard poll failed: {e}");
                return false;
            }
        };
        let at = (self.clock)();
        let key = (snapshot, at.date(), at.time_of_day());

        if self.last.as_ref() == Some(&key) {
            debug!("snapshot and minute unchanged; view reused");
            return false;
        }

        let view = build_view(&key.0, at);
        debug!(
            current = view.current.len(),
            past = view.past.len(),
            "publishing dashboard view"
        );
        self.views_tx.send_replace(Some(view));
        self.last = Some(key);
        true
    }
}

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::events::{AppEvent, FetchOrigin};
use crate::client::{Endpoint, SnapshotSource};

pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    AutoRefreshing,
}

/// Starts and stops the periodic auto-refresh timer.
///
/// Every start opens a new generation. Responses tagged with any other
/// generation are stale and must be dropped by the caller.
pub struct RefreshScheduler {
    period: Duration,
    generation: u64,
    timer: Option<CancellationToken>,
}

impl RefreshScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            generation: 0,
            timer: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn state(&self) -> RefreshState {
        if self.timer.is_some() {
            RefreshState::AutoRefreshing
        } else {
            RefreshState::Idle
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.timer.is_some() && generation == self.generation
    }

    /// Flips between idle and auto-refreshing, returning the new state.
    pub fn toggle(
        &mut self,
        source: Arc<dyn SnapshotSource>,
        events: UnboundedSender<AppEvent>,
    ) -> RefreshState {
        match self.state() {
            RefreshState::Idle => self.start(source, events),
            RefreshState::AutoRefreshing => self.stop(),
        }
        self.state()
    }

    fn start(&mut self, source: Arc<dyn SnapshotSource>, events: UnboundedSender<AppEvent>) {
        self.generation += 1;
        let generation = self.generation;
        let period = self.period;
        let token = CancellationToken::new();
        let timer_token = token.clone();

        tokio::spawn(async move {
            let mut ticks = time::interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = timer_token.cancelled() => break,
                    _ = ticks.tick() => {}
                }

                // Each tick fetches on its own so a slow response never delays the next one.
                let source = Arc::clone(&source);
                let events = events.clone();
                let fetch_token = timer_token.clone();
                tokio::spawn(async move {
                    tokio::select! {
                        _ = fetch_token.cancelled() => {
                            debug!(generation, "auto refresh cancelled while in flight");
                        }
                        result = source.fetch(Endpoint::Update) => {
                            let _ = events.send(AppEvent::Snapshot {
                                origin: FetchOrigin::Auto { generation },
                                result,
                            });
                        }
                    }
                });
            }
            debug!(generation, "auto refresh timer stopped");
        });

        info!(generation, period_ms = period.as_millis() as u64, "auto refresh started");
        self.timer = Some(token);
    }

    pub fn stop(&mut self) {
        if let Some(token) = self.timer.take() {
            token.cancel();
            info!(generation = self.generation, "auto refresh stopped");
        }
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FetchError;
    use crate::models::StatusSnapshot;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SnapshotSource for CountingSource {
        async fn fetch(&self, endpoint: Endpoint) -> Result<StatusSnapshot, FetchError> {
            assert_eq!(endpoint, Endpoint::Update);
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(crate::dashboard::render::tests::two_space_snapshot())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_every_period_until_stopped() {
        let source = Arc::new(CountingSource::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = RefreshScheduler::new(DEFAULT_REFRESH_PERIOD);

        let state = scheduler.toggle(source.clone(), tx.clone());
        assert_eq!(state, RefreshState::AutoRefreshing);

        time::sleep(Duration::from_millis(2900)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_millis(3200)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);

        match rx.try_recv() {
            Ok(AppEvent::Snapshot { origin, result }) => {
                assert_eq!(origin, FetchOrigin::Auto { generation: 1 });
                assert!(result.is_ok());
            }
            other => panic!("Expected snapshot event, got {:?}", other),
        }

        let state = scheduler.toggle(source.clone(), tx);
        assert_eq!(state, RefreshState::Idle);

        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generations_advance_per_start() {
        let source: Arc<dyn SnapshotSource> = Arc::new(CountingSource::default());
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut scheduler = RefreshScheduler::new(DEFAULT_REFRESH_PERIOD);

        scheduler.toggle(source.clone(), tx.clone());
        assert!(scheduler.is_current(1));

        scheduler.toggle(source.clone(), tx.clone());
        assert!(!scheduler.is_current(1));

        scheduler.toggle(source, tx);
        assert_eq!(scheduler.generation(), 2);
        assert!(scheduler.is_current(2));
        assert!(!scheduler.is_current(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timer() {
        let source = Arc::new(CountingSource::default());
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut scheduler = RefreshScheduler::new(Duration::from_millis(100));
        scheduler.toggle(source.clone(), tx);
        drop(scheduler);

        time::sleep(Duration::from_secs(1)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }
}

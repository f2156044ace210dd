use chrono::{DateTime, Local};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time;
use tokio_util::sync::CancellationToken;

use super::events::AppEvent;

pub const DEFAULT_CLOCK_PERIOD: Duration = Duration::from_millis(1000);

pub fn format_time(now: &DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}

/// Wall clock ticking independently of the refresh cycle.
pub struct Clock {
    token: CancellationToken,
}

impl Clock {
    /// The first tick is sent immediately.
    pub fn start(period: Duration, events: UnboundedSender<AppEvent>) -> Self {
        let token = CancellationToken::new();
        let task_token = token.clone();

        tokio::spawn(async move {
            let mut ticks = time::interval(period);
            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    _ = ticks.tick() => {
                        if events.send(AppEvent::ClockTick(Local::now())).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self { token }
    }

    pub fn stop(&self) {
        self.token.cancel();
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        self.stop();
    }
}

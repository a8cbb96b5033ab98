//! Daily schedule loop.
//!
//! Replaces the external timer trigger: sleep until the next occurrence of a
//! fixed UTC hour, run the pipeline once, repeat. Because each run is
//! awaited to completion before the next sleep starts, two runs can never
//! overlap.

use chrono::{DateTime, Duration as ChronoDuration, Timelike, Utc};
use tracing::info;

/// Default fire hour (05:00 UTC, matching the original daily trigger).
pub const DEFAULT_RUN_HOUR: u32 = 5;

/// Next occurrence of `hour:00:00 UTC` strictly after `now`.
pub fn next_run_after(now: DateTime<Utc>, hour: u32) -> DateTime<Utc> {
    let today = now
        .with_hour(hour)
        .and_then(|t| t.with_minute(0))
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .expect("valid wall-clock hour");

    if today > now {
        today
    } else {
        today + ChronoDuration::days(1)
    }
}

/// Sleep until the next scheduled fire time.
pub async fn wait_until_next_run(hour: u32) {
    let now = Utc::now();
    let next = next_run_after(now, hour);
    let wait = (next - now).to_std().unwrap_or_default();
    info!("Next run at {} (in {}s)", next.to_rfc3339(), wait.as_secs());
    tokio::time::sleep(wait).await;
}

//! Timer utilities backing the polling loops and self-reverting effects.

use time::OffsetDateTime;

/// Sleep for `ms` milliseconds on the platform timer. Zero resolves
/// immediately without touching a timer, which keeps headless tests free of a
/// runtime.
#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u64) {
    if ms == 0 {
        return;
    }
    let clamped = ms.min(u64::from(u32::MAX)) as u32;
    gloo_timers::future::TimeoutFuture::new(clamped).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(ms: u64) {
    if ms == 0 {
        return;
    }
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    let nanos = now().unix_timestamp_nanos();
    u64::try_from(nanos / 1_000_000).unwrap_or_default()
}

//! Single best-effort retry with a fixed delay.
//!
//! DESIGN
//! ======
//! The sleep function is injected so the same logic runs on browser timers
//! in the app and completes instantly under `block_on` in tests.

#[cfg(test)]
#[path = "retry_test.rs"]
mod retry_test;

use std::future::Future;
use std::time::Duration;

/// Delay before the notification fetch is retried.
pub const NOTIFICATION_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Run `op`; on failure wait `delay` once and return the second attempt.
///
/// # Errors
///
/// The error of the second attempt when both attempts fail.
pub async fn retry_once<T, E, Op, Fut, Sleep, SleepFut>(mut op: Op, delay: Duration, sleep: Sleep) -> Result<T, E>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    Sleep: FnOnce(Duration) -> SleepFut,
    SleepFut: Future<Output = ()>,
{
    match op().await {
        Ok(value) => Ok(value),
        Err(_) => {
            sleep(delay).await;
            op().await
        }
    }
}

/// Browser timer sleep; returns immediately outside the browser.
pub async fn sleep(delay: Duration) {
    #[cfg(feature = "hydrate")]
    {
        gloo_timers::future::sleep(delay).await;
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = delay;
    }
}

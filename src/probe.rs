use crate::error::Result;

use std::future::Future;
use std::time::Duration;

/// Waits for a service to become available, by running a liveness check
/// repeatedly with a fixed delay between attempts. There is no backoff or
/// jitter.
pub struct Prober {
    /// The delay between attempts.
    interval: Duration,
    /// The maximum number of attempts, or None to retry forever.
    max_attempts: Option<u32>,
}

impl Prober {
    /// Creates a new prober.
    pub fn new(interval: Duration, max_attempts: Option<u32>) -> Self {
        Self { interval, max_attempts }
    }

    /// Runs the check until it succeeds, returning its result. Failures are
    /// logged and retried after the interval. If max_attempts is set and
    /// exhausted, the last error is returned. Otherwise this never returns
    /// if the check keeps failing.
    pub async fn wait<T, F, Fut>(&self, mut check: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match check().await {
                Ok(value) => {
                    log::debug!("Probe succeeded after {attempt} attempt(s)");
                    return Ok(value);
                }
                Err(err) if self.max_attempts.is_some_and(|max| attempt >= max) => {
                    log::error!("Probe attempt {attempt} failed, giving up: {err}");
                    return Err(err);
                }
                Err(err) => {
                    log::warn!("Probe attempt {attempt} failed: {err}");
                    tokio::time::sleep(self.interval).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use tokio::time::Instant;

    /// Returns a check that fails the given number of times, then succeeds
    /// with the attempt number.
    fn flaky(failures: u32, attempts: &Cell<u32>) -> impl FnMut() -> std::future::Ready<Result<u32>> + '_ {
        move || {
            attempts.set(attempts.get() + 1);
            std::future::ready(match attempts.get() {
                n if n <= failures => Err(Error::Database(format!("attempt {n} refused"))),
                n => Ok(n),
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_immediately() -> Result<()> {
        let attempts = Cell::new(0);
        let start = Instant::now();
        let prober = Prober::new(Duration::from_secs(1), None);
        assert_eq!(prober.wait(flaky(0, &attempts)).await?, 1);
        assert_eq!(attempts.get(), 1);
        assert_eq!(start.elapsed().as_millis(), 0);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn retries_until_success() -> Result<()> {
        for failures in [1, 3, 10] {
            let attempts = Cell::new(0);
            let start = Instant::now();
            let prober = Prober::new(Duration::from_secs(1), None);
            assert_eq!(prober.wait(flaky(failures, &attempts)).await?, failures + 1);
            assert_eq!(attempts.get(), failures + 1);
            // One sleep between each pair of attempts.
            assert_eq!(start.elapsed().as_millis(), u128::from(failures) * 1000);
        }
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_attempts() {
        let attempts = Cell::new(0);
        let start = Instant::now();
        let prober = Prober::new(Duration::from_millis(500), Some(3));
        let result = prober.wait(flaky(5, &attempts)).await;
        assert_eq!(result, Err(Error::Database("attempt 3 refused".into())));
        assert_eq!(attempts.get(), 3);
        assert_eq!(start.elapsed().as_millis(), 1000);
    }

    #[tokio::test(start_paused = true)]
    async fn max_attempts_not_reached() -> Result<()> {
        let attempts = Cell::new(0);
        let prober = Prober::new(Duration::from_millis(500), Some(3));
        assert_eq!(prober.wait(flaky(2, &attempts)).await?, 3);
        Ok(())
    }
}

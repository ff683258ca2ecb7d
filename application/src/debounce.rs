//! [`Debouncer`] of rapidly changing values.

use std::time::Duration;

use tokio::time::{self, Instant};

/// Debouncer settling a value once it stops changing for a delay.
#[derive(Debug)]
pub struct Debouncer<T> {
    /// Delay a value must stay unchanged for to be settled.
    delay: Duration,

    /// Latest pushed value along with the moment it settles at.
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    /// Creates a new [`Debouncer`] with the provided `delay`.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Pushes a new `value`, restarting the delay.
    pub fn push(&mut self, value: T) {
        self.pending = Some((Instant::now() + self.delay, value));
    }

    /// Indicates whether there is a value awaiting to be settled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Waits for the latest pushed value to settle and returns it.
    ///
    /// Cancel safe: the value stays pending if the returned [`Future`] is
    /// dropped before completion. Never resolves if nothing is pending.
    pub async fn settled(&mut self) -> T {
        loop {
            match &self.pending {
                Some((deadline, _)) => time::sleep_until(*deadline).await,
                None => std::future::pending::<()>().await,
            }
            if let Some((_, value)) = self.pending.take() {
                return value;
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use tokio::time;

    use super::Debouncer;

    #[tokio::test(start_paused = true)]
    async fn settles_latest_value_after_delay() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.push("j");
        time::advance(Duration::from_millis(300)).await;
        debouncer.push("ja");
        time::advance(Duration::from_millis(300)).await;
        debouncer.push("jane");

        let start = time::Instant::now();
        assert_eq!(debouncer.settled().await, "jane");
        assert_eq!(start.elapsed(), Duration::from_millis(500));
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_value_when_cancelled() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        debouncer.push(1);

        let res =
            time::timeout(Duration::from_millis(100), debouncer.settled())
                .await;

        assert!(res.is_err());
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.settled().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn never_settles_without_value() {
        let mut debouncer = Debouncer::<()>::new(Duration::from_millis(10));

        let res =
            time::timeout(Duration::from_secs(60), debouncer.settled()).await;

        assert!(res.is_err());
    }
}

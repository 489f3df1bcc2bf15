//! Async request pacing: a cooldown between request starts plus a cap on requests in flight.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};
use tokio::time::sleep;

use crate::error::{JiraError, Result};

/// Shared limiter handed to every request of a client; clones share state.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    cooldown: Duration,
    max_in_flight: usize,
    last_call: Arc<Mutex<Option<Instant>>>,
    permits: Arc<Semaphore>,
}

/// Held for the lifetime of one request; releasing it frees an in-flight slot.
#[derive(Debug)]
pub struct RequestPermit {
    _permit: OwnedSemaphorePermit,
}

impl RateLimiter {
    pub fn new(cooldown: Duration, max_in_flight: usize) -> Self {
        let max_in_flight = max_in_flight.max(1);
        Self {
            cooldown,
            max_in_flight,
            last_call: Arc::new(Mutex::new(None)),
            permits: Arc::new(Semaphore::new(max_in_flight)),
        }
    }

    /// Waits for a free in-flight slot, then for the cooldown since the previous start.
    pub async fn hit(&self) -> Result<RequestPermit> {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|err| JiraError::Other(format!("rate limiter closed: {err}")))?;

        let mut guard = self.last_call.lock().await;
        if let Some(last) = *guard {
            let elapsed = last.elapsed();
            if elapsed < self.cooldown {
                sleep(self.cooldown - elapsed).await;
            }
        }
        *guard = Some(Instant::now());

        Ok(RequestPermit { _permit: permit })
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Slots not currently held by a request.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use super::RateLimiter;
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn second_hit_waits_for_cooldown_interval() {
        let limiter = RateLimiter::new(Duration::from_millis(40), 4);

        let _first = limiter.hit().await.unwrap();
        let start = Instant::now();
        let _second = limiter.hit().await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(35));
    }

    #[tokio::test]
    async fn in_flight_requests_are_capped() {
        let limiter = RateLimiter::new(Duration::ZERO, 2);
        let first = limiter.hit().await.unwrap();
        let _second = limiter.hit().await.unwrap();
        assert_eq!(limiter.available(), 0);

        let blocked = tokio::time::timeout(Duration::from_millis(30), limiter.hit()).await;
        assert!(blocked.is_err(), "third request must wait for a free slot");

        drop(first);
        let third = tokio::time::timeout(Duration::from_millis(200), limiter.hit()).await;
        assert!(third.is_ok());
    }

    #[test]
    fn zero_permits_is_raised_to_one() {
        let limiter = RateLimiter::new(Duration::from_millis(5), 0);
        assert_eq!(limiter.max_in_flight(), 1);
        assert_eq!(limiter.cooldown(), Duration::from_millis(5));
    }
}

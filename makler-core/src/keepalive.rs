use std::sync::Mutex;

use crate::broker::Broker;
use crate::error::MaklerError;

/// A nudge fires when `now` is within this many seconds of the tracked expiry.
pub const KEEPALIVE_LEAD_SECS: i64 = 60;
/// A successful nudge pushes the tracked expiry this far past `now`.
pub const KEEPALIVE_EXTEND_SECS: i64 = 600;

/// Periodic liveness nudge for an authenticated broker handle.
///
/// Tracks its own expiry (epoch seconds; 0 means "never nudged"), separate
/// from the session's sliding expiration. When the expiry is near, it forces
/// a portfolio query as the cheapest authenticated no-op. An external
/// scheduler drives [`Keepalive::check`]; this crate never spawns one.
pub struct Keepalive {
    expires_at: Mutex<i64>,
}

impl Keepalive {
    /// New tracker with an expiry of 0, so the first check always nudges.
    #[must_use]
    pub fn new() -> Self {
        Self {
            expires_at: Mutex::new(0),
        }
    }

    /// The currently tracked expiry, in epoch seconds.
    #[must_use]
    pub fn expires_at(&self) -> i64 {
        *self.expires_at.lock().expect("lock poisoned")
    }

    /// Nudge the broker if `now` is within the lead window of expiry.
    ///
    /// Returns whether a nudge was performed. On a failed portfolio query
    /// the expiry is left untouched, so the next check retries.
    pub async fn check(&self, broker: &dyn Broker, now: i64) -> Result<bool, MaklerError> {
        let expires = self.expires_at();
        if now + KEEPALIVE_LEAD_SECS <= expires {
            return Ok(false);
        }
        broker.portfolio().await?;
        let next = now + KEEPALIVE_EXTEND_SECS;
        *self.expires_at.lock().expect("lock poisoned") = next;
        tracing::debug!(broker = broker.name(), expires_at = next, "keepalive nudge");
        Ok(true)
    }

    /// [`Keepalive::check`] against the current wall clock.
    pub async fn check_now(&self, broker: &dyn Broker) -> Result<bool, MaklerError> {
        self.check(broker, chrono::Utc::now().timestamp()).await
    }
}

impl Default for Keepalive {
    fn default() -> Self {
        Self::new()
    }
}

//! Client-side rate limiting for remote API calls
//!
//! The SiteWise API enforces per-operation request quotas. Every tool paces
//! its calls through a [`Throttle`], which is either a fixed delay, a token
//! bucket, or disabled entirely (tests).

use crate::error::{Result, SiteWiseError};
use governor::clock::{Clock, DefaultClock};
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;

/// Serializable throttle settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum ThrottleConfig {
    None,
    Fixed { delay_ms: u64 },
    TokenBucket { per_second: u32 },
}

impl ThrottleConfig {
    /// Fixed delay giving at most `calls` per second
    pub fn fixed_per_second(calls: u32) -> Self {
        let calls = u64::from(calls.max(1));
        ThrottleConfig::Fixed {
            delay_ms: (1000 + calls - 1) / calls,
        }
    }

    pub fn build(&self) -> Result<Throttle> {
        match self {
            ThrottleConfig::None => Ok(Throttle::none()),
            ThrottleConfig::Fixed { delay_ms } => {
                Ok(Throttle::fixed(Duration::from_millis(*delay_ms)))
            }
            ThrottleConfig::TokenBucket { per_second } => Throttle::per_second(*per_second),
        }
    }
}

/// Blocking rate limiter applied between remote calls
pub enum Throttle {
    /// No pacing
    None,
    /// Sleep a fixed delay on every wait
    Fixed(Duration),
    /// Token bucket allowing bursts up to the per-second quota
    TokenBucket(RateLimiter<NotKeyed, InMemoryState, DefaultClock>),
}

impl Throttle {
    pub fn none() -> Self {
        Throttle::None
    }

    pub fn fixed(delay: Duration) -> Self {
        Throttle::Fixed(delay)
    }

    /// Token bucket allowing `calls` per second
    ///
    /// The bucket holds a single token, so calls are spread evenly across
    /// the second instead of bursting up to the full quota.
    pub fn per_second(calls: u32) -> Result<Self> {
        let rate = NonZeroU32::new(calls).ok_or_else(|| {
            SiteWiseError::ConfigError("token-bucket per_second must be positive".to_string())
        })?;
        let quota = Quota::per_second(rate).allow_burst(NonZeroU32::MIN);
        Ok(Throttle::TokenBucket(RateLimiter::direct(quota)))
    }

    /// Block until the next call is allowed
    pub fn wait(&self) {
        match self {
            Throttle::None => {}
            Throttle::Fixed(delay) => {
                if !delay.is_zero() {
                    thread::sleep(*delay);
                }
            }
            Throttle::TokenBucket(limiter) => {
                let clock = DefaultClock::default();
                while let Err(not_until) = limiter.check() {
                    thread::sleep(not_until.wait_time_from(clock.now()));
                }
            }
        }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Throttle::None
    }
}

impl fmt::Debug for Throttle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Throttle::None => write!(f, "Throttle::None"),
            Throttle::Fixed(delay) => write!(f, "Throttle::Fixed({:?})", delay),
            Throttle::TokenBucket(_) => write!(f, "Throttle::TokenBucket"),
        }
    }
}

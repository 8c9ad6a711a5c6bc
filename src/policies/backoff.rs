//! # Resolved backoff parameters and delay computation.
//!
//! [`Backoff`] pairs a [`Strategy`] with its fully-populated parameters and
//! computes the delay before the next attempt from the number of failed
//! attempts so far (1-based):
//!
//! - `FixedInterval`: `interval`
//! - `LinearBackoff`: `start + increment × (count - 1)`
//! - `ExponentialBackoff`: `min(max, round(random × (2^count × 1000 - min)))`
//!
//! [`BackoffParams`] holds the caller's overrides before resolution. A value of
//! `0` counts as "not supplied" and is replaced by the strategy default.
//!
//! # Example
//! ```rust
//! use pollvisor::{Backoff, BackoffParams, Strategy};
//!
//! let params = BackoffParams { start: Some(1000), increment: Some(500), ..Default::default() };
//! let backoff = Backoff::resolve(Strategy::LinearBackoff, &params);
//!
//! assert_eq!(backoff.next_delay_ms(1), 1000);
//! assert_eq!(backoff.next_delay_ms(2), 1500);
//! assert_eq!(backoff.next_delay_ms(3), 2000);
//! ```

use std::time::Duration;

use rand::Rng;

use crate::policies::{jitter::full_jitter, strategy::Strategy};

/// Caller-supplied strategy parameters, all optional.
///
/// Only the fields belonging to the selected strategy are read; the rest are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BackoffParams {
    /// `fixed-interval`: delay between attempts, ms.
    pub interval: Option<u64>,
    /// `linear-backoff`: first delay, ms.
    pub start: Option<u64>,
    /// `linear-backoff`: growth per failed attempt, ms.
    pub increment: Option<u64>,
    /// `exponential-backoff`: subtracted from the exponential ceiling, ms.
    pub min: Option<u64>,
    /// `exponential-backoff`: cap on any single delay, ms.
    pub max: Option<u64>,
}

/// A strategy together with its resolved parameters (milliseconds).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backoff {
    /// Constant delay.
    FixedInterval { interval: u64 },
    /// Linearly growing delay.
    LinearBackoff { start: u64, increment: u64 },
    /// Full jitter under `2^count × 1000 - min`, capped at `max`.
    ExponentialBackoff { min: u64, max: u64 },
}

impl Default for Backoff {
    /// Returns `fixed-interval` with its default interval.
    fn default() -> Self {
        Strategy::default().defaults()
    }
}

/// Zero and absent both fall back to the default.
#[inline]
fn pick(value: Option<u64>, default: u64) -> u64 {
    value.filter(|v| *v != 0).unwrap_or(default)
}

impl Backoff {
    /// Fills every parameter of `strategy` from `params`, falling back to the
    /// strategy default for fields that are absent or zero.
    pub fn resolve(strategy: Strategy, params: &BackoffParams) -> Self {
        match strategy.defaults() {
            Backoff::FixedInterval { interval } => Backoff::FixedInterval {
                interval: pick(params.interval, interval),
            },
            Backoff::LinearBackoff { start, increment } => Backoff::LinearBackoff {
                start: pick(params.start, start),
                increment: pick(params.increment, increment),
            },
            Backoff::ExponentialBackoff { min, max } => Backoff::ExponentialBackoff {
                min: pick(params.min, min),
                max: pick(params.max, max),
            },
        }
    }

    /// Returns the strategy these parameters belong to.
    pub fn strategy(&self) -> Strategy {
        match self {
            Backoff::FixedInterval { .. } => Strategy::FixedInterval,
            Backoff::LinearBackoff { .. } => Strategy::LinearBackoff,
            Backoff::ExponentialBackoff { .. } => Strategy::ExponentialBackoff,
        }
    }

    /// Delay in milliseconds before the next attempt, given `count` failed attempts so far.
    pub fn next_delay_ms(&self, count: u32) -> u64 {
        self.next_delay_ms_with(count, &mut rand::rng())
    }

    /// Same as [`Backoff::next_delay_ms`] as a [`Duration`].
    pub fn next(&self, count: u32) -> Duration {
        Duration::from_millis(self.next_delay_ms(count))
    }

    /// Computes the delay drawing randomness from `rng`.
    ///
    /// Only `ExponentialBackoff` consumes randomness.
    pub fn next_delay_ms_with<R: Rng + ?Sized>(&self, count: u32, rng: &mut R) -> u64 {
        match *self {
            Backoff::FixedInterval { interval } => interval,
            Backoff::LinearBackoff { start, increment } => {
                let steps = u64::from(count.saturating_sub(1));
                start.saturating_add(increment.saturating_mul(steps))
            }
            Backoff::ExponentialBackoff { min, max } => {
                let exp = count.min(i32::MAX as u32) as i32;
                let ceiling = 2f64.powi(exp) * 1000.0 - min as f64;
                let drawn = full_jitter(rng, ceiling);
                // `as` saturates, so anything past u64::MAX lands on it before the cap.
                (drawn.max(0.0) as u64).min(max)
            }
        }
    }
}

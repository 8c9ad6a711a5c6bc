//! # Full jitter for randomized delays.
//!
//! Draws a uniformly random delay in `[0, ceiling]` so that many pollers
//! backing off at once do not retry in lockstep.

use rand::Rng;

/// Full jitter: `round(random[0, 1) × ceiling)`.
///
/// A non-finite ceiling saturates to `f64::MAX` so that the product stays
/// finite. A negative ceiling yields a value in `(ceiling, 0]`; callers clamp.
pub(crate) fn full_jitter<R: Rng + ?Sized>(rng: &mut R, ceiling: f64) -> f64 {
    let ceiling = if ceiling.is_finite() { ceiling } else { f64::MAX };
    (rng.random::<f64>() * ceiling).round()
}

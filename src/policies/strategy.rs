//! # Built-in backoff strategies.
//!
//! [`Strategy`] is the closed set of strategy names a poller accepts. Each
//! strategy owns its default parameters, exposed as a fully-populated
//! [`Backoff`] via [`Strategy::defaults`].
//!
//! | Name                  | Defaults                          |
//! |-----------------------|-----------------------------------|
//! | `fixed-interval`      | `interval = 1000`                 |
//! | `linear-backoff`      | `start = 1000`, `increment = 1000`|
//! | `exponential-backoff` | `min = 1000`, `max = 30000`       |

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::policies::backoff::Backoff;

/// Name of a built-in backoff strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Constant delay between attempts.
    FixedInterval,
    /// Delay grows by a constant increment per failed attempt.
    LinearBackoff,
    /// Randomized delay under an exponentially growing ceiling.
    ExponentialBackoff,
}

impl Strategy {
    /// Every strategy, in the order they are listed in error messages.
    pub const ALL: [Strategy; 3] = [
        Strategy::FixedInterval,
        Strategy::LinearBackoff,
        Strategy::ExponentialBackoff,
    ];

    /// Returns the stable name used in options and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::FixedInterval => "fixed-interval",
            Strategy::LinearBackoff => "linear-backoff",
            Strategy::ExponentialBackoff => "exponential-backoff",
        }
    }

    /// Returns the strategy's parameters with every field at its default.
    pub fn defaults(&self) -> Backoff {
        match self {
            Strategy::FixedInterval => Backoff::FixedInterval { interval: 1000 },
            Strategy::LinearBackoff => Backoff::LinearBackoff {
                start: 1000,
                increment: 1000,
            },
            Strategy::ExponentialBackoff => Backoff::ExponentialBackoff {
                min: 1000,
                max: 30_000,
            },
        }
    }

    /// Comma-separated list of valid names.
    pub(crate) fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(Strategy::name)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for Strategy {
    /// Returns [`Strategy::FixedInterval`].
    fn default() -> Self {
        Strategy::FixedInterval
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| ConfigError::UnknownStrategy {
                name: s.to_string(),
                valid: Self::valid_names(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_unknown_name_lists_valid_strategies() {
        let err = "random-walk".parse::<Strategy>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("random-walk"));
        assert!(msg.contains("fixed-interval,linear-backoff,exponential-backoff"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!("Fixed-Interval".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_defaults_match_strategy() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.defaults().strategy(), strategy);
        }
    }
}

use scout_common::protocol::Locator;
use std::time::Duration;

/// Ordered element-location strategies. Earlier entries are tried first.
///
/// A list always holds at least one strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyList {
    locators: Vec<Locator>,
}

impl StrategyList {
    /// Build a list of CSS strategies.
    pub fn css<const N: usize>(selectors: [&str; N]) -> Self {
        const { assert!(N > 0, "a strategy list needs at least one selector") };
        Self {
            locators: selectors.into_iter().map(Locator::css).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Locator> {
        self.locators.iter()
    }
}

impl<'a> IntoIterator for &'a StrategyList {
    type Item = &'a Locator;
    type IntoIter = std::slice::Iter<'a, Locator>;

    fn into_iter(self) -> Self::IntoIter {
        self.locators.iter()
    }
}

/// How long a single strategy may wait for its element to appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

impl WaitPolicy {
    /// Query once, never wait.
    pub fn immediate() -> Self {
        Self {
            timeout: Duration::ZERO,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Poll every `poll_interval` until present or `timeout` has elapsed.
    pub fn bounded(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            // zero would spin
            poll_interval: if poll_interval.is_zero() {
                DEFAULT_POLL_INTERVAL
            } else {
                poll_interval
            },
        }
    }

    pub fn is_immediate(&self) -> bool {
        self.timeout.is_zero()
    }
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self::immediate()
    }
}

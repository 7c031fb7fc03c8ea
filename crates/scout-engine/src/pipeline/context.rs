use crate::config::schema::ResolverConfig;
use crate::driver::Driver;
use crate::resolution::{SelectorResolver, WaitPolicy};
use crate::scenario::ScenarioParams;
use std::time::Duration;

/// Wait bounds handed to steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// How long a required control may take to appear.
    pub element: Duration,
    /// How long to wait for the page to react to an interaction.
    pub settle: Duration,
    pub poll_interval: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::from(&ResolverConfig::default())
    }
}

impl From<&ResolverConfig> for Timeouts {
    fn from(config: &ResolverConfig) -> Self {
        Self {
            element: Duration::from_millis(config.element_timeout_ms),
            settle: Duration::from_millis(config.settle_timeout_ms),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }
}

/// Everything a step may touch while it runs.
pub struct StepContext<'a> {
    pub driver: &'a mut dyn Driver,
    pub params: &'a ScenarioParams,
    pub timeouts: Timeouts,
}

impl<'a> StepContext<'a> {
    pub fn new(driver: &'a mut dyn Driver, params: &'a ScenarioParams, timeouts: Timeouts) -> Self {
        Self {
            driver,
            params,
            timeouts,
        }
    }

    pub fn resolver(&mut self, wait: WaitPolicy) -> SelectorResolver<'_> {
        SelectorResolver::new(&mut *self.driver, wait)
    }

    pub fn element_wait(&self) -> WaitPolicy {
        WaitPolicy::bounded(self.timeouts.element, self.timeouts.poll_interval)
    }

    pub fn settle_wait(&self) -> WaitPolicy {
        WaitPolicy::bounded(self.timeouts.settle, self.timeouts.poll_interval)
    }
}

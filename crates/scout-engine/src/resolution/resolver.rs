use super::result::{Attempt, AttemptFailure, Match, NotFound, Resolution};
use super::strategy::{StrategyList, WaitPolicy};
use crate::driver::Driver;
use scout_common::protocol::{ElementRef, Locator, Scope};
use std::collections::HashSet;
use tokio::time::{Instant, sleep};
use tracing::debug;

/// Resolves strategy lists against a driver.
///
/// Each strategy is evaluated at most once, in list order, waiting up to the
/// policy's timeout for it to match. Nothing here returns an error: driver
/// failures are recorded on the attempt and the next strategy is tried.
pub struct SelectorResolver<'a> {
    driver: &'a mut dyn Driver,
    wait: WaitPolicy,
}

impl<'a> SelectorResolver<'a> {
    pub fn new(driver: &'a mut dyn Driver, wait: WaitPolicy) -> Self {
        Self { driver, wait }
    }

    pub fn wait_policy(&self) -> WaitPolicy {
        self.wait
    }

    /// First element of the first strategy that matches.
    pub async fn first(
        &mut self,
        strategies: &StrategyList,
        scope: &Scope,
    ) -> Resolution<ElementRef> {
        // first_all only reports non-empty collections
        self.first_all(strategies, scope)
            .await
            .map(|elements| elements[0])
    }

    /// Whole collection from the first strategy whose collection is non-empty.
    pub async fn first_all(
        &mut self,
        strategies: &StrategyList,
        scope: &Scope,
    ) -> Resolution<Vec<ElementRef>> {
        let mut attempted = Vec::new();

        for (index, locator) in strategies.iter().enumerate() {
            match self.poll(locator, scope, self.wait).await {
                Ok(elements) => {
                    debug!(strategy = index, %locator, count = elements.len(), "strategy matched");
                    return Resolution::Found(Match {
                        value: elements,
                        strategy: index,
                        locator: locator.clone(),
                    });
                }
                Err(failure) => {
                    debug!(strategy = index, %locator, %failure, "strategy failed");
                    attempted.push(Attempt {
                        locator: locator.clone(),
                        failure,
                    });
                }
            }
        }

        Resolution::NotFound(NotFound { attempted })
    }

    /// First element, in strategy order, whose text satisfies `accept`.
    pub async fn first_with_text<F>(
        &mut self,
        strategies: &StrategyList,
        scope: &Scope,
        accept: F,
    ) -> Resolution<ElementRef>
    where
        F: Fn(&str) -> bool + Send + Sync,
    {
        let mut attempted = Vec::new();

        for (index, locator) in strategies.iter().enumerate() {
            let candidates = match self.poll(locator, scope, self.wait).await {
                Ok(elements) => elements,
                Err(failure) => {
                    debug!(strategy = index, %locator, %failure, "strategy failed");
                    attempted.push(Attempt {
                        locator: locator.clone(),
                        failure,
                    });
                    continue;
                }
            };

            for element in &candidates {
                match self.driver.text(*element).await {
                    Ok(text) if accept(&text) => {
                        return Resolution::Found(Match {
                            value: *element,
                            strategy: index,
                            locator: locator.clone(),
                        });
                    }
                    Ok(_) => {}
                    Err(e) => debug!(%element, error = %e, "could not read candidate text"),
                }
            }

            attempted.push(Attempt {
                locator: locator.clone(),
                failure: AttemptFailure::Rejected {
                    candidates: candidates.len(),
                },
            });
        }

        Resolution::NotFound(NotFound { attempted })
    }

    /// Click the first element of each strategy in turn until a click lands.
    ///
    /// A strategy whose element is present but refuses the click counts as
    /// failed and the next strategy is tried.
    pub async fn click_first(
        &mut self,
        strategies: &StrategyList,
        scope: &Scope,
    ) -> Resolution<ElementRef> {
        let mut attempted = Vec::new();

        for (index, locator) in strategies.iter().enumerate() {
            let failure = match self.poll(locator, scope, self.wait).await {
                Ok(elements) => match self.driver.click(elements[0]).await {
                    Ok(()) => {
                        debug!(strategy = index, %locator, "clicked");
                        return Resolution::Found(Match {
                            value: elements[0],
                            strategy: index,
                            locator: locator.clone(),
                        });
                    }
                    Err(e) => AttemptFailure::Refused(e.to_string()),
                },
                Err(failure) => failure,
            };
            debug!(strategy = index, %locator, %failure, "strategy failed");
            attempted.push(Attempt {
                locator: locator.clone(),
                failure,
            });
        }

        Resolution::NotFound(NotFound { attempted })
    }

    /// Every element matched by any strategy, de-duplicated, first-seen order.
    ///
    /// Strategies are queried once each without waiting.
    pub async fn union(&mut self, strategies: &StrategyList, scope: &Scope) -> Vec<ElementRef> {
        let mut seen = HashSet::new();
        let mut elements = Vec::new();

        for locator in strategies {
            match self.poll(locator, scope, WaitPolicy::immediate()).await {
                Ok(found) => {
                    for element in found {
                        if seen.insert(element) {
                            elements.push(element);
                        }
                    }
                }
                Err(failure) => debug!(%locator, %failure, "union strategy contributed nothing"),
            }
        }

        elements
    }

    /// Number of distinct elements matched by any strategy.
    pub async fn count(&mut self, strategies: &StrategyList, scope: &Scope) -> usize {
        self.union(strategies, scope).await.len()
    }

    async fn poll(
        &mut self,
        locator: &Locator,
        scope: &Scope,
        wait: WaitPolicy,
    ) -> Result<Vec<ElementRef>, AttemptFailure> {
        let deadline = Instant::now() + wait.timeout;

        loop {
            match self.driver.find_elements(locator, scope).await {
                Ok(found) if !found.is_empty() => return Ok(found),
                Ok(_) => {}
                Err(e) => return Err(AttemptFailure::Driver(e.to_string())),
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(AttemptFailure::Absent {
                    waited: wait.timeout,
                });
            }
            sleep(wait.poll_interval.min(deadline - now)).await;
        }
    }
}

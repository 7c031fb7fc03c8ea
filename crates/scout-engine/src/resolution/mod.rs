//! Element resolution over ranked selector strategies.
//!
//! Page markup is not a stable contract, so every lookup is expressed as an
//! ordered [`StrategyList`]. The [`SelectorResolver`] tries each strategy at
//! most once, in order, bounded by a [`WaitPolicy`], and reports either the
//! first match or a [`NotFound`] describing every attempt. Driver failures are
//! swallowed per strategy; whether "not found" is fatal is the caller's call.

pub mod resolver;
pub mod result;
pub mod strategy;

pub use resolver::SelectorResolver;
pub use result::{Attempt, AttemptFailure, Match, NotFound, Resolution};
pub use strategy::{StrategyList, WaitPolicy};

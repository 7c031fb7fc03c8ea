use scout_common::protocol::Locator;
use std::fmt;
use std::time::Duration;

/// Outcome of resolving a strategy list.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    /// A strategy matched.
    Found(Match<T>),
    /// Every strategy was tried without a match.
    NotFound(NotFound),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Match<T> {
    pub value: T,
    /// Index of the strategy that matched.
    pub strategy: usize,
    pub locator: Locator,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotFound {
    /// One entry per strategy, in the order tried.
    pub attempted: Vec<Attempt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub locator: Locator,
    pub failure: AttemptFailure,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttemptFailure {
    /// Nothing matched within the wait bound.
    Absent { waited: Duration },
    /// Elements matched but none passed the caller's filter.
    Rejected { candidates: usize },
    /// The element was present but the driver refused the click.
    Refused(String),
    /// The driver failed while evaluating the strategy.
    Driver(String),
}

impl<T> Resolution<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Resolution::Found(m) => Some(m.value),
            Resolution::NotFound(_) => None,
        }
    }

    pub fn into_match(self) -> Result<Match<T>, NotFound> {
        match self {
            Resolution::Found(m) => Ok(m),
            Resolution::NotFound(nf) => Err(nf),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Resolution::Found(m) => Resolution::Found(Match {
                value: f(m.value),
                strategy: m.strategy,
                locator: m.locator,
            }),
            Resolution::NotFound(nf) => Resolution::NotFound(nf),
        }
    }
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.attempted.is_empty() {
            return write!(f, "no strategies to try");
        }
        write!(f, "none of {} strategies matched", self.attempted.len())?;
        for (i, attempt) in self.attempted.iter().enumerate() {
            let sep = if i == 0 { " (" } else { "; " };
            write!(f, "{}{}: {}", sep, attempt.locator, attempt.failure)?;
        }
        write!(f, ")")
    }
}

impl std::error::Error for NotFound {}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptFailure::Absent { waited } if waited.is_zero() => write!(f, "absent"),
            AttemptFailure::Absent { waited } => {
                write!(f, "absent after {}ms", waited.as_millis())
            }
            AttemptFailure::Rejected { candidates } => {
                write!(f, "{} candidates, none accepted", candidates)
            }
            AttemptFailure::Refused(msg) => write!(f, "click refused: {}", msg),
            AttemptFailure::Driver(msg) => write!(f, "driver error: {}", msg),
        }
    }
}

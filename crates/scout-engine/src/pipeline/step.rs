use super::context::StepContext;
use crate::driver::DriverError;
use crate::resolution::NotFound;
use async_trait::async_trait;
use scout_common::record::{ActionKind, StepOutcome, StepPayload};

/// One unit of work in a scenario.
///
/// `Ok` carries the step's own verdict, including logical failures such as a
/// control that was not on the page. `Err` is reserved for faults the step
/// could not handle; the pipeline turns those into failed records as well.
#[async_trait]
pub trait Step: Send + Sync {
    fn action(&self) -> ActionKind;

    async fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepReport, StepError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    #[error("Missing scenario parameter: {0}")]
    MissingParameter(&'static str),

    #[error("{0}")]
    Other(String),
}

/// What a step reports back to the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub outcome: StepOutcome,
    pub payload: Option<StepPayload>,
}

impl StepReport {
    pub fn succeeded() -> Self {
        Self {
            outcome: StepOutcome::Succeeded,
            payload: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            outcome: StepOutcome::failed(error),
            payload: None,
        }
    }

    /// Logical failure for a control the resolver could not find.
    pub fn not_found(what: &str, not_found: &NotFound) -> Self {
        Self::failed(format!("{} not found: {}", what, not_found))
    }

    pub fn with_payload(mut self, payload: StepPayload) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Whether a failed step stops the rest of the scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gating {
    /// Failure halts the scenario.
    Gate,
    /// Failure is recorded and the scenario carries on.
    Advisory,
}

/// A step together with its gating policy.
pub struct StepDef {
    pub step: Box<dyn Step>,
    pub gating: Gating,
}

impl StepDef {
    pub fn gate(step: impl Step + 'static) -> Self {
        Self {
            step: Box::new(step),
            gating: Gating::Gate,
        }
    }

    pub fn advisory(step: impl Step + 'static) -> Self {
        Self {
            step: Box::new(step),
            gating: Gating::Advisory,
        }
    }

    pub fn action(&self) -> ActionKind {
        self.step.action()
    }

    pub fn is_gating(&self) -> bool {
        self.gating == Gating::Gate
    }
}

impl std::fmt::Debug for StepDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepDef")
            .field("action", &self.step.action())
            .field("gating", &self.gating)
            .finish()
    }
}

//! Scenario step pipeline.
//!
//! A [`ScenarioPipeline`] owns one driver session and runs a scenario's steps
//! strictly in order. Every step, whatever happens inside it, ends up as a
//! single [`StepRecord`](scout_common::record::StepRecord). After each record
//! the pipeline checks the step's [`Gating`]: a failed gating step halts the
//! run, a failed advisory step does not.

pub mod context;
pub mod executor;
pub mod step;

pub use context::{StepContext, Timeouts};
pub use executor::{PipelineState, ScenarioPipeline};
pub use step::{Gating, Step, StepDef, StepError, StepReport};

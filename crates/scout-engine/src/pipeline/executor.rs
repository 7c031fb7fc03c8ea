use super::context::{StepContext, Timeouts};
use super::step::StepDef;
use crate::driver::Driver;
use crate::scenario::Scenario;
use chrono::Utc;
use futures::FutureExt;
use scout_common::record::{
    ScenarioRecorder, ScenarioResult, StepOutcome, StepRecord, Termination,
};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tokio::time::Instant;
use tracing::{Instrument, error, info, info_span, warn};

/// Where the pipeline is in its current (or last) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Pending,
    Running { step: usize },
    Halted { step: usize },
    Completed,
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Halted { .. } | PipelineState::Completed)
    }
}

/// Runs scenarios step by step against a driver it owns.
pub struct ScenarioPipeline<D: Driver> {
    driver: D,
    timeouts: Timeouts,
    state: PipelineState,
}

impl<D: Driver> ScenarioPipeline<D> {
    pub fn new(driver: D) -> Self {
        Self::with_timeouts(driver, Timeouts::default())
    }

    pub fn with_timeouts(driver: D, timeouts: Timeouts) -> Self {
        Self {
            driver,
            timeouts,
            state: PipelineState::Pending,
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Release the driver, e.g. to close the session.
    pub fn into_driver(self) -> D {
        self.driver
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    /// Run every step of `scenario` in order and return what happened.
    ///
    /// This never fails: step errors and panics become failed records. A failed
    /// gating step ends the run with [`Termination::Halted`].
    pub async fn run(&mut self, scenario: &Scenario) -> ScenarioResult {
        let span = info_span!("scenario", name = %scenario.name(), kind = ?scenario.kind());
        self.run_steps(scenario).instrument(span).await
    }

    async fn run_steps(&mut self, scenario: &Scenario) -> ScenarioResult {
        self.state = PipelineState::Pending;
        let mut recorder = ScenarioRecorder::new(scenario.name());
        info!(steps = scenario.steps().len(), "scenario started");

        for (index, def) in scenario.steps().iter().enumerate() {
            self.state = PipelineState::Running { step: index };

            let record = self.run_step(index, def, scenario).await;
            let halt = !record.success() && def.is_gating();
            let action = record.action.clone();
            recorder.record(record);

            if halt {
                error!(step = index, %action, "gating step failed, halting scenario");
                self.state = PipelineState::Halted { step: index };
                return recorder.finish(Termination::Halted {
                    step: index,
                    action,
                });
            }
        }

        self.state = PipelineState::Completed;
        let result = recorder.finish(Termination::Completed);
        info!(
            succeeded = result.success_count(),
            failed = result.failure_count(),
            "scenario completed"
        );
        result
    }

    async fn run_step(&mut self, index: usize, def: &StepDef, scenario: &Scenario) -> StepRecord {
        let action = def.action();
        info!(step = index, %action, "step started");

        let started_at = Utc::now();
        let clock = Instant::now();
        let mut ctx = StepContext::new(&mut self.driver, scenario.params(), self.timeouts);
        let outcome = AssertUnwindSafe(def.step.run(&mut ctx)).catch_unwind().await;
        let duration = clock.elapsed();

        let (outcome, payload) = match outcome {
            Ok(Ok(report)) => (report.outcome, report.payload),
            Ok(Err(e)) => {
                error!(step = index, %action, error = %e, "step faulted");
                (StepOutcome::failed(e.to_string()), None)
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(step = index, %action, panic = %message, "step panicked");
                (StepOutcome::failed(format!("step panicked: {}", message)), None)
            }
        };

        match outcome.error() {
            None => info!(step = index, %action, ?duration, "step succeeded"),
            Some(e) => warn!(step = index, %action, ?duration, error = %e, "step failed"),
        }

        StepRecord::new(action, outcome, started_at, duration, payload)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

use crate::driver::Driver;
use crate::formatter::format_result;
use crate::pipeline::ScenarioPipeline;
use crate::record::ScenarioResult;
use crate::scenario::{ScenarioError, ScenarioRegistry};
use tracing::warn;

#[derive(Clone, Copy)]
pub struct OutputHandlers {
    pub out: fn(&str),
    pub err: fn(&str),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Skip the remaining scenarios once one halts.
    pub stop_on_halt: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error("No scenarios to run")]
    NothingToRun,
}

/// Run the named scenarios one after another on the pipeline's session.
///
/// Every name is resolved before the first scenario starts, so a typo fails
/// the batch without touching the browser.
pub async fn run_scenarios<D: Driver, S: AsRef<str>>(
    pipeline: &mut ScenarioPipeline<D>,
    registry: &ScenarioRegistry,
    names: &[S],
    output: OutputHandlers,
    options: RunOptions,
) -> Result<Vec<ScenarioResult>, RunError> {
    if names.is_empty() {
        return Err(RunError::NothingToRun);
    }
    let scenarios = registry.build_all(names)?;

    let mut results = Vec::with_capacity(scenarios.len());
    for (index, scenario) in scenarios.iter().enumerate() {
        let result = pipeline.run(scenario).await;
        (output.out)(&format_result(&result));

        let halted = result.is_halted();
        results.push(result);

        let remaining = scenarios.len() - index - 1;
        if halted && options.stop_on_halt && remaining > 0 {
            warn!(scenario = scenario.name(), remaining, "stopping batch after halted scenario");
            (output.err)(&format!(
                "Scenario '{}' halted; skipping {} remaining scenario(s).",
                scenario.name(),
                remaining
            ));
            break;
        }
    }

    Ok(results)
}

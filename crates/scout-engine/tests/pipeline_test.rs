use async_trait::async_trait;
use pretty_assertions::assert_eq;
use scout_engine::driver::{Driver, DriverError};
use scout_engine::pipeline::{
    PipelineState, ScenarioPipeline, Step, StepContext, StepDef, StepError, StepReport,
};
use scout_engine::protocol::{ElementRef, Locator, NavigationResult, Scope};
use scout_engine::record::{ActionKind, StepPayload, Termination};
use scout_engine::scenario::{Scenario, ScenarioParams};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A driver with an empty page.
#[derive(Default)]
struct BlankDriver;

#[async_trait]
impl Driver for BlankDriver {
    async fn launch(&mut self) -> Result<(), DriverError> {
        Ok(())
    }
    async fn close(&mut self) -> Result<(), DriverError> {
        Ok(())
    }
    async fn is_ready(&self) -> bool {
        true
    }
    async fn navigate(&mut self, url: &str) -> Result<NavigationResult, DriverError> {
        Ok(NavigationResult {
            url: url.to_string(),
            title: "blank".into(),
            status: 200,
        })
    }
    async fn find_elements(
        &mut self,
        _locator: &Locator,
        _scope: &Scope,
    ) -> Result<Vec<ElementRef>, DriverError> {
        Ok(vec![])
    }
    async fn text(&mut self, element: ElementRef) -> Result<String, DriverError> {
        Err(DriverError::ElementNotFound { element })
    }
    async fn attribute(
        &mut self,
        element: ElementRef,
        _name: &str,
    ) -> Result<Option<String>, DriverError> {
        Err(DriverError::ElementNotFound { element })
    }
    async fn click(&mut self, element: ElementRef) -> Result<(), DriverError> {
        Err(DriverError::ElementNotFound { element })
    }
    async fn clear(&mut self, element: ElementRef) -> Result<(), DriverError> {
        Err(DriverError::ElementNotFound { element })
    }
    async fn send_keys(&mut self, element: ElementRef, _text: &str) -> Result<(), DriverError> {
        Err(DriverError::ElementNotFound { element })
    }
    async fn title(&mut self) -> Result<String, DriverError> {
        Ok("blank".into())
    }
    async fn current_url(&mut self) -> Result<String, DriverError> {
        Ok("about:blank".into())
    }
}

enum Behavior {
    Succeed,
    Fail(&'static str),
    Fault,
    Panic,
    Sleep(Duration),
}

type Log = Arc<Mutex<Vec<String>>>;

struct ScriptedStep {
    name: &'static str,
    behavior: Behavior,
    log: Log,
}

#[async_trait]
impl Step for ScriptedStep {
    fn action(&self) -> ActionKind {
        ActionKind::custom(self.name)
    }

    async fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepReport, StepError> {
        self.log.lock().unwrap().push(self.name.to_string());
        match &self.behavior {
            Behavior::Succeed => Ok(StepReport::succeeded().with_payload(StepPayload::Data {
                value: serde_json::json!({ "step": self.name }),
            })),
            Behavior::Fail(msg) => Ok(StepReport::failed(*msg)),
            Behavior::Fault => {
                ctx.driver.click(ElementRef(99)).await?;
                Ok(StepReport::succeeded())
            }
            Behavior::Panic => panic!("step {} blew up", self.name),
            Behavior::Sleep(d) => {
                tokio::time::sleep(*d).await;
                Ok(StepReport::succeeded())
            }
        }
    }
}

struct Builder {
    log: Log,
    scenario: Scenario,
}

impl Builder {
    fn new() -> Self {
        Self {
            log: Log::default(),
            scenario: Scenario::new("scripted", ScenarioParams::default()),
        }
    }

    fn gate(mut self, name: &'static str, behavior: Behavior) -> Self {
        let step = ScriptedStep {
            name,
            behavior,
            log: self.log.clone(),
        };
        self.scenario = self.scenario.step(StepDef::gate(step));
        self
    }

    fn advisory(mut self, name: &'static str, behavior: Behavior) -> Self {
        let step = ScriptedStep {
            name,
            behavior,
            log: self.log.clone(),
        };
        self.scenario = self.scenario.step(StepDef::advisory(step));
        self
    }
}

fn actions(result: &scout_engine::record::ScenarioResult) -> Vec<String> {
    result
        .steps()
        .iter()
        .map(|s| s.action.to_string())
        .collect()
}

#[tokio::test]
async fn test_gating_failure_halts_pipeline() {
    let b = Builder::new()
        .gate("one", Behavior::Succeed)
        .gate("two", Behavior::Fail("form missing"))
        .gate("three", Behavior::Succeed)
        .advisory("four", Behavior::Succeed)
        .gate("five", Behavior::Succeed);

    let mut pipeline = ScenarioPipeline::new(BlankDriver);
    let result = pipeline.run(&b.scenario).await;

    assert_eq!(result.steps().len(), 2);
    assert_eq!(result.success_count(), 1);
    assert_eq!(result.failure_count(), 1);
    assert_eq!(result.steps()[1].error(), Some("form missing"));
    assert_eq!(
        result.termination(),
        &Termination::Halted {
            step: 1,
            action: ActionKind::custom("two"),
        }
    );
    assert_eq!(*b.log.lock().unwrap(), vec!["one", "two"]);
    assert_eq!(pipeline.state(), PipelineState::Halted { step: 1 });
}

#[tokio::test]
async fn test_advisory_failure_does_not_halt() {
    let b = Builder::new()
        .gate("one", Behavior::Succeed)
        .advisory("two", Behavior::Fail("no price filter"))
        .gate("three", Behavior::Succeed);

    let mut pipeline = ScenarioPipeline::new(BlankDriver);
    let result = pipeline.run(&b.scenario).await;

    assert_eq!(result.steps().len(), 3);
    assert_eq!(result.success_count(), 2);
    assert_eq!(result.errors(), vec!["no price filter"]);
    assert_eq!(result.termination(), &Termination::Completed);
    assert_eq!(*b.log.lock().unwrap(), vec!["one", "two", "three"]);
    assert_eq!(pipeline.state(), PipelineState::Completed);
}

#[tokio::test]
async fn test_driver_fault_becomes_failed_record() {
    let b = Builder::new()
        .advisory("faulty", Behavior::Fault)
        .gate("after", Behavior::Succeed);

    let mut pipeline = ScenarioPipeline::new(BlankDriver);
    let result = pipeline.run(&b.scenario).await;

    let faulty = &result.steps()[0];
    assert!(!faulty.success());
    assert_eq!(
        faulty.error(),
        Some("Driver error: Element #99 not found")
    );
    assert!(faulty.payload.is_none());
    assert_eq!(result.steps().len(), 2);
    assert!(result.steps()[1].success());
}

#[tokio::test]
async fn test_panic_is_contained_and_halts_only_when_gating() {
    let b = Builder::new()
        .advisory("shaky", Behavior::Panic)
        .gate("steady", Behavior::Succeed)
        .gate("explodes", Behavior::Panic)
        .gate("never", Behavior::Succeed);

    let mut pipeline = ScenarioPipeline::new(BlankDriver);
    let result = pipeline.run(&b.scenario).await;

    assert_eq!(actions(&result), vec!["shaky", "steady", "explodes"]);
    let error = result.steps()[0].error().unwrap();
    assert!(error.contains("step shaky blew up"), "got: {}", error);
    assert!(result.is_halted());
    assert_eq!(*b.log.lock().unwrap(), vec!["shaky", "steady", "explodes"]);

    // the pipeline is still usable after a panic
    let again = Builder::new().gate("fine", Behavior::Succeed);
    let result = pipeline.run(&again.scenario).await;
    assert_eq!(result.success_count(), 1);
    assert_eq!(pipeline.state(), PipelineState::Completed);
}

#[tokio::test]
async fn test_empty_failure_message_is_normalized() {
    let b = Builder::new().advisory("silent", Behavior::Fail(""));

    let result = ScenarioPipeline::new(BlankDriver).run(&b.scenario).await;
    let error = result.steps()[0].error().unwrap();
    assert!(!error.is_empty());
}

#[tokio::test]
async fn test_records_preserve_invocation_order() {
    let b = Builder::new()
        .advisory("a", Behavior::Fail("x"))
        .advisory("b", Behavior::Succeed)
        .advisory("c", Behavior::Panic)
        .advisory("d", Behavior::Fault)
        .advisory("e", Behavior::Succeed);

    let result = ScenarioPipeline::new(BlankDriver).run(&b.scenario).await;

    assert_eq!(actions(&result), *b.log.lock().unwrap());
    assert_eq!(actions(&result), vec!["a", "b", "c", "d", "e"]);
    let timestamps: Vec<_> = result.steps().iter().map(|s| s.started_at).collect();
    assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test(start_paused = true)]
async fn test_durations_are_measured_and_aggregated() {
    let b = Builder::new()
        .gate("short", Behavior::Sleep(Duration::from_millis(300)))
        .advisory("fails", Behavior::Fail("nope"))
        .gate("long", Behavior::Sleep(Duration::from_secs(2)));

    let result = ScenarioPipeline::new(BlankDriver).run(&b.scenario).await;

    let short = result.steps()[0].duration;
    let long = result.steps()[2].duration;
    assert!(short >= Duration::from_millis(300) && short < Duration::from_millis(310));
    assert!(long >= Duration::from_secs(2) && long < Duration::from_millis(2010));
    assert_eq!(
        result.total_duration(),
        result.steps().iter().map(|s| s.duration).sum::<Duration>()
    );
    assert_eq!(
        result.success_count() + result.failure_count(),
        result.steps().len()
    );
}

#[tokio::test]
async fn test_empty_scenario_completes() {
    let b = Builder::new();
    let mut pipeline = ScenarioPipeline::new(BlankDriver);
    assert_eq!(pipeline.state(), PipelineState::Pending);

    let result = pipeline.run(&b.scenario).await;
    assert!(result.steps().is_empty());
    assert_eq!(result.termination(), &Termination::Completed);
    assert!(pipeline.state().is_terminal());
}

#[tokio::test]
async fn test_summary_reflects_halt() {
    let b = Builder::new()
        .gate("one", Behavior::Succeed)
        .gate("two", Behavior::Fault);

    let result = ScenarioPipeline::new(BlankDriver).run(&b.scenario).await;
    let summary = result.summary();

    assert_eq!(summary.scenario_name, "scripted");
    assert_eq!(summary.total_steps, 2);
    assert_eq!(summary.halted_at, Some(ActionKind::custom("two")));
    assert!(!summary.all_succeeded());
}

use async_trait::async_trait;
use scout_engine::cli::{OutputHandlers, RunError, RunOptions, run_scenarios};
use scout_engine::config::ScenarioConfig;
use scout_engine::driver::{Driver, DriverError};
use scout_engine::pipeline::ScenarioPipeline;
use scout_engine::protocol::{ElementRef, Locator, NavigationResult, Scope};
use scout_engine::scenario::{ScenarioError, ScenarioKind, ScenarioRegistry};
use serial_test::serial;
use std::sync::Mutex;

static OUT: Mutex<Vec<String>> = Mutex::new(Vec::new());
static ERR: Mutex<Vec<String>> = Mutex::new(Vec::new());

fn capture_out(s: &str) {
    OUT.lock().unwrap().push(s.to_string());
}

fn capture_err(s: &str) {
    ERR.lock().unwrap().push(s.to_string());
}

fn handlers() -> OutputHandlers {
    OUT.lock().unwrap().clear();
    ERR.lock().unwrap().clear();
    OutputHandlers {
        out: capture_out,
        err: capture_err,
    }
}

/// A page with a single hotel card and nothing else.
#[derive(Default)]
struct OneCardPage {
    navigations: usize,
}

#[async_trait]
impl Driver for OneCardPage {
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
        self.navigations += 1;
        Ok(NavigationResult {
            url: url.to_string(),
            title: "Островок".into(),
            status: 200,
        })
    }
    async fn find_elements(
        &mut self,
        locator: &Locator,
        _scope: &Scope,
    ) -> Result<Vec<ElementRef>, DriverError> {
        Ok(match locator.query() {
            ".hotel-card" => vec![ElementRef(1)],
            _ => vec![],
        })
    }
    async fn text(&mut self, _element: ElementRef) -> Result<String, DriverError> {
        Ok(String::new())
    }
    async fn attribute(
        &mut self,
        _element: ElementRef,
        _name: &str,
    ) -> Result<Option<String>, DriverError> {
        Ok(None)
    }
    async fn click(&mut self, _element: ElementRef) -> Result<(), DriverError> {
        Ok(())
    }
    async fn clear(&mut self, _element: ElementRef) -> Result<(), DriverError> {
        Ok(())
    }
    async fn send_keys(&mut self, _element: ElementRef, _text: &str) -> Result<(), DriverError> {
        Ok(())
    }
    async fn title(&mut self) -> Result<String, DriverError> {
        Ok("Островок".into())
    }
    async fn current_url(&mut self) -> Result<String, DriverError> {
        Ok("https://ostrovok.ru/".into())
    }
}

fn registry() -> ScenarioRegistry {
    let mut registry = ScenarioRegistry::new("https://ostrovok.ru");
    registry.register(ScenarioConfig::new("checkout", ScenarioKind::Booking));
    registry.register(ScenarioConfig::new("filters", ScenarioKind::Filtering));
    registry
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_runs_every_scenario_and_prints_results() {
    let mut pipeline = ScenarioPipeline::new(OneCardPage::default());

    let results = run_scenarios(
        &mut pipeline,
        &registry(),
        &["checkout", "filters"],
        handlers(),
        RunOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(results.len(), 2);
    assert!(results[0].is_halted());
    assert!(!results[1].is_halted());
    assert_eq!(pipeline.driver().navigations, 2);

    let out = OUT.lock().unwrap();
    assert_eq!(out.len(), 2);
    assert!(out[0].starts_with("Scenario: checkout"));
    assert!(out[0].contains("Halted at step 3 (select_room)"));
    assert!(out[1].starts_with("Scenario: filters"));
    assert!(ERR.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_stop_on_halt_skips_remaining_scenarios() {
    let mut pipeline = ScenarioPipeline::new(OneCardPage::default());

    let results = run_scenarios(
        &mut pipeline,
        &registry(),
        &["checkout", "filters"],
        handlers(),
        RunOptions { stop_on_halt: true },
    )
    .await
    .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].scenario_name(), "checkout");
    assert_eq!(pipeline.driver().navigations, 1);
    assert_eq!(
        *ERR.lock().unwrap(),
        vec!["Scenario 'checkout' halted; skipping 1 remaining scenario(s).".to_string()]
    );
}

#[tokio::test]
#[serial]
async fn test_unknown_scenario_fails_before_any_run() {
    let mut pipeline = ScenarioPipeline::new(OneCardPage::default());

    let result = run_scenarios(
        &mut pipeline,
        &registry(),
        &["filters", "sochi_winter"],
        handlers(),
        RunOptions::default(),
    )
    .await;

    match result {
        Err(RunError::Scenario(ScenarioError::Unknown(name))) => assert_eq!(name, "sochi_winter"),
        other => panic!("expected unknown scenario, got {:?}", other.map(|r| r.len())),
    }
    assert_eq!(pipeline.driver().navigations, 0);
    assert!(OUT.lock().unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn test_empty_batch_is_rejected() {
    let mut pipeline = ScenarioPipeline::new(OneCardPage::default());
    let names: [&str; 0] = [];

    let result = run_scenarios(
        &mut pipeline,
        &registry(),
        &names,
        handlers(),
        RunOptions::default(),
    )
    .await;

    assert!(matches!(result, Err(RunError::NothingToRun)));
}

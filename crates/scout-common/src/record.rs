//! Step records and scenario results.
//!
//! Every step a scenario runs is normalized into a [`StepRecord`], whatever it
//! did internally. A [`ScenarioResult`] is the ordered list of those records
//! plus how the run ended. Results are only assembled through a
//! [`ScenarioRecorder`]; once sealed they are read-only and every aggregate is
//! recomputed from the step list on demand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Identifier of the action a step performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    Navigate,
    SearchDestination,
    SelectDates,
    ConfigureGuests,
    SearchHotels,
    AnalyzeResults,
    AnalyzeAvailableFilters,
    ApplyPriceFilter,
    ApplyStarFilter,
    ApplyAmenityFilter,
    AnalyzeFilteredResults,
    SelectHotel,
    SelectRoom,
    FillGuestInfo,
    AnalyzePaymentProcess,
    /// Any action outside the built-in set.
    Custom(String),
}

impl ActionKind {
    const BUILT_IN: [ActionKind; 15] = [
        ActionKind::Navigate,
        ActionKind::SearchDestination,
        ActionKind::SelectDates,
        ActionKind::ConfigureGuests,
        ActionKind::SearchHotels,
        ActionKind::AnalyzeResults,
        ActionKind::AnalyzeAvailableFilters,
        ActionKind::ApplyPriceFilter,
        ActionKind::ApplyStarFilter,
        ActionKind::ApplyAmenityFilter,
        ActionKind::AnalyzeFilteredResults,
        ActionKind::SelectHotel,
        ActionKind::SelectRoom,
        ActionKind::FillGuestInfo,
        ActionKind::AnalyzePaymentProcess,
    ];

    pub fn custom(name: impl Into<String>) -> Self {
        Self::from(name.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            ActionKind::Navigate => "navigate",
            ActionKind::SearchDestination => "search_destination",
            ActionKind::SelectDates => "select_dates",
            ActionKind::ConfigureGuests => "configure_guests",
            ActionKind::SearchHotels => "search_hotels",
            ActionKind::AnalyzeResults => "analyze_results",
            ActionKind::AnalyzeAvailableFilters => "analyze_available_filters",
            ActionKind::ApplyPriceFilter => "apply_price_filter",
            ActionKind::ApplyStarFilter => "apply_star_filter",
            ActionKind::ApplyAmenityFilter => "apply_amenity_filter",
            ActionKind::AnalyzeFilteredResults => "analyze_filtered_results",
            ActionKind::SelectHotel => "select_hotel",
            ActionKind::SelectRoom => "select_room",
            ActionKind::FillGuestInfo => "fill_guest_info",
            ActionKind::AnalyzePaymentProcess => "analyze_payment_process",
            ActionKind::Custom(name) => name,
        }
    }
}

impl From<String> for ActionKind {
    fn from(name: String) -> Self {
        Self::BUILT_IN
            .iter()
            .find(|kind| kind.as_str() == name)
            .cloned()
            .unwrap_or(ActionKind::Custom(name))
    }
}

impl From<&str> for ActionKind {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<ActionKind> for String {
    fn from(kind: ActionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single step. The error message only exists on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Succeeded,
    /// Build through [`StepOutcome::failed`] so the message is never blank.
    Failed { error: String },
}

/// Wire shape of [`StepOutcome`]; decoded failures pass through `failed`.
#[derive(Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum OutcomeRepr {
    Succeeded,
    Failed { error: String },
}

impl<'de> Deserialize<'de> for StepOutcome {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match OutcomeRepr::deserialize(deserializer)? {
            OutcomeRepr::Succeeded => StepOutcome::Succeeded,
            OutcomeRepr::Failed { error } => StepOutcome::failed(error),
        })
    }
}

impl StepOutcome {
    pub fn failed(error: impl Into<String>) -> Self {
        let error = error.into();
        let error = if error.trim().is_empty() {
            "step failed without a diagnostic".to_string()
        } else {
            error
        };
        StepOutcome::Failed { error }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StepOutcome::Succeeded)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            StepOutcome::Succeeded => None,
            StepOutcome::Failed { error } => Some(error),
        }
    }
}

/// How date entry was performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateEntry {
    /// Typed into two date inputs.
    Inputs,
    /// Opened a calendar widget.
    Calendar,
    /// Neither inputs nor a calendar were present.
    Unavailable,
}

/// What started the hotel search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchTrigger {
    Button,
    EnterKey,
}

/// Action-specific data attached to a step record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepPayload {
    Navigation {
        url: String,
        title: String,
    },
    Destination {
        destination: String,
        suggestion_used: bool,
    },
    Dates {
        check_in: String,
        check_out: String,
        entry: DateEntry,
    },
    Guests {
        guests: u32,
        rooms: u32,
        selector_found: bool,
    },
    Search {
        trigger: SearchTrigger,
        results_visible: bool,
    },
    ResultsAnalysis {
        hotels_count: usize,
        filters_count: usize,
        sort_options_count: usize,
        page_title: String,
        current_url: String,
    },
    FilterCatalog {
        price_filters: Vec<String>,
        star_filters: Vec<String>,
        amenity_filters: Vec<String>,
        location_filters: Vec<String>,
    },
    FilterApplied {
        control: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    FilteredResults {
        filtered_hotels_count: usize,
        active_filters_count: usize,
        filter_effective: bool,
    },
    Selection {
        selected: bool,
    },
    GuestForm {
        fields_filled: usize,
    },
    PaymentAnalysis {
        payment_methods_count: usize,
        payment_buttons_count: usize,
        payment_available: bool,
    },
    /// Free-form data for custom actions.
    Data {
        value: serde_json::Value,
    },
}

/// The normalized outcome unit produced by every step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub action: ActionKind,
    #[serde(flatten)]
    pub outcome: StepOutcome,
    pub started_at: DateTime<Utc>,
    #[serde(rename = "duration_ms", with = "duration_ms")]
    pub duration: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<StepPayload>,
}

impl StepRecord {
    pub fn new(
        action: ActionKind,
        outcome: StepOutcome,
        started_at: DateTime<Utc>,
        duration: Duration,
        payload: Option<StepPayload>,
    ) -> Self {
        Self {
            action,
            outcome,
            started_at,
            duration,
            payload,
        }
    }

    pub fn success(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn error(&self) -> Option<&str> {
        self.outcome.error()
    }
}

/// How a scenario run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Termination {
    /// Every step ran.
    Completed,
    /// A gating step failed; `step` is its index in the step list.
    Halted { step: usize, action: ActionKind },
}

/// Appends step records for one run, then seals them into a [`ScenarioResult`].
#[derive(Debug)]
pub struct ScenarioRecorder {
    scenario_name: String,
    started_at: DateTime<Utc>,
    steps: Vec<StepRecord>,
}

impl ScenarioRecorder {
    pub fn new(scenario_name: impl Into<String>) -> Self {
        Self {
            scenario_name: scenario_name.into(),
            started_at: Utc::now(),
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, record: StepRecord) {
        self.steps.push(record);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn finish(self, termination: Termination) -> ScenarioResult {
        ScenarioResult {
            scenario_name: self.scenario_name,
            started_at: self.started_at,
            steps: self.steps,
            termination,
        }
    }
}

/// Ordered step records of one scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    scenario_name: String,
    started_at: DateTime<Utc>,
    steps: Vec<StepRecord>,
    termination: Termination,
}

impl ScenarioResult {
    pub fn scenario_name(&self) -> &str {
        &self.scenario_name
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Records in execution order.
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn termination(&self) -> &Termination {
        &self.termination
    }

    pub fn is_halted(&self) -> bool {
        matches!(self.termination, Termination::Halted { .. })
    }

    pub fn success_count(&self) -> usize {
        self.steps.iter().filter(|s| s.success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.steps.iter().filter(|s| !s.success()).count()
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Error messages of failed steps, in execution order.
    pub fn errors(&self) -> Vec<&str> {
        self.steps.iter().filter_map(|s| s.error()).collect()
    }

    pub fn failed_steps(&self) -> impl Iterator<Item = &StepRecord> {
        self.steps.iter().filter(|s| !s.success())
    }

    pub fn summary(&self) -> ScenarioSummary {
        ScenarioSummary {
            scenario_name: self.scenario_name.clone(),
            total_steps: self.steps.len(),
            succeeded: self.success_count(),
            failed: self.failure_count(),
            total_duration_ms: self.total_duration().as_millis() as u64,
            halted_at: match &self.termination {
                Termination::Completed => None,
                Termination::Halted { action, .. } => Some(action.clone()),
            },
            errors: self.errors().into_iter().map(str::to_string).collect(),
        }
    }
}

/// Point-in-time aggregate view of a [`ScenarioResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub scenario_name: String,
    pub total_steps: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub total_duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub halted_at: Option<ActionKind>,
    pub errors: Vec<String>,
}

impl ScenarioSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0 && self.halted_at.is_none()
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

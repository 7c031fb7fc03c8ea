//! Scenarios: named, ordered step lists with fixed gating.

pub mod builtin;
pub mod params;
pub mod registry;

pub use params::ScenarioParams;
pub use registry::ScenarioRegistry;

use crate::pipeline::StepDef;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("Unknown scenario: {0}")]
    Unknown(String),
    #[error("Scenario '{scenario}' is missing required parameter '{parameter}'")]
    MissingParameter {
        scenario: String,
        parameter: &'static str,
    },
}

/// The built-in scenario shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    #[default]
    HotelSearch,
    Filtering,
    Booking,
    FullJourney,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 4] = [
        ScenarioKind::HotelSearch,
        ScenarioKind::Filtering,
        ScenarioKind::Booking,
        ScenarioKind::FullJourney,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKind::HotelSearch => "hotel_search",
            ScenarioKind::Filtering => "filtering",
            ScenarioKind::Booking => "booking",
            ScenarioKind::FullJourney => "full_journey",
        }
    }

    /// Whether the kind types a destination and dates into the search form.
    pub fn searches(&self) -> bool {
        matches!(self, ScenarioKind::HotelSearch | ScenarioKind::FullJourney)
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A named, ordered list of steps plus the parameters they read.
#[derive(Debug)]
pub struct Scenario {
    name: String,
    kind: Option<ScenarioKind>,
    description: Option<String>,
    params: ScenarioParams,
    steps: Vec<StepDef>,
}

impl Scenario {
    /// An empty scenario; add steps with [`Scenario::step`].
    pub fn new(name: impl Into<String>, params: ScenarioParams) -> Self {
        Self {
            name: name.into(),
            kind: None,
            description: None,
            params,
            steps: Vec::new(),
        }
    }

    /// A scenario made of the built-in steps for `kind`.
    pub fn from_kind(name: impl Into<String>, kind: ScenarioKind, params: ScenarioParams) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind),
            description: None,
            params,
            steps: builtin::steps_for(kind),
        }
    }

    pub fn step(mut self, def: StepDef) -> Self {
        self.steps.push(def);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Option<ScenarioKind> {
        self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn params(&self) -> &ScenarioParams {
        &self.params
    }

    pub fn steps(&self) -> &[StepDef] {
        &self.steps
    }
}

//! Built-in hotel-site steps and the scenario shapes assembled from them.
//!
//! Gating is fixed here, per scenario kind. Steps that later steps depend on
//! (getting to the page, filling the search form, reaching the booking form)
//! gate; pure analysis and the optional filters are advisory.

use super::ScenarioKind;
use crate::driver::Driver;
use crate::pipeline::StepDef;
use scout_common::protocol::ElementRef;
use tracing::debug;

pub mod booking;
pub mod filtering;
pub mod navigate;
pub mod search;
pub mod selectors;

use booking::{AnalyzePaymentProcess, FillGuestInfo, SelectHotel, SelectRoom};
use filtering::{
    AnalyzeAvailableFilters, AnalyzeFilteredResults, ApplyAmenityFilter, ApplyPriceFilter,
    ApplyStarFilter,
};
use navigate::Navigate;
use search::{AnalyzeResults, ConfigureGuests, SearchDestination, SearchHotels, SelectDates};

/// The step list for a scenario kind, gating included.
pub fn steps_for(kind: ScenarioKind) -> Vec<StepDef> {
    match kind {
        ScenarioKind::HotelSearch => {
            let mut steps = vec![StepDef::gate(Navigate)];
            steps.extend(search_steps());
            steps
        }
        ScenarioKind::Filtering => {
            let mut steps = vec![StepDef::gate(Navigate)];
            steps.extend(filtering_steps());
            steps
        }
        ScenarioKind::Booking => {
            let mut steps = vec![StepDef::gate(Navigate)];
            steps.extend(booking_steps());
            steps
        }
        ScenarioKind::FullJourney => {
            let mut steps = vec![StepDef::gate(Navigate)];
            steps.extend(search_steps());
            steps.extend(filtering_steps());
            steps.extend(booking_steps());
            steps
        }
    }
}

fn search_steps() -> Vec<StepDef> {
    vec![
        StepDef::gate(SearchDestination),
        StepDef::gate(SelectDates),
        StepDef::gate(ConfigureGuests),
        StepDef::gate(SearchHotels),
        StepDef::advisory(AnalyzeResults),
    ]
}

fn filtering_steps() -> Vec<StepDef> {
    vec![
        StepDef::advisory(AnalyzeAvailableFilters),
        StepDef::advisory(ApplyPriceFilter),
        StepDef::advisory(ApplyStarFilter),
        StepDef::advisory(ApplyAmenityFilter),
        StepDef::advisory(AnalyzeFilteredResults),
    ]
}

fn booking_steps() -> Vec<StepDef> {
    vec![
        StepDef::gate(SelectHotel),
        StepDef::gate(SelectRoom),
        StepDef::gate(FillGuestInfo),
        StepDef::advisory(AnalyzePaymentProcess),
    ]
}

/// Clear a field and type into it. Returns false when the field refused input.
pub(crate) async fn fill_field(driver: &mut dyn Driver, field: ElementRef, value: &str) -> bool {
    let typed = match driver.clear(field).await {
        Ok(()) => driver.send_keys(field, value).await,
        Err(e) => Err(e),
    };
    match typed {
        Ok(()) => true,
        Err(e) => {
            debug!(%field, error = %e, "field refused input");
            false
        }
    }
}

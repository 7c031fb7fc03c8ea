//! Steps of the search form: destination, dates, guests, submit, results.

use super::{fill_field, selectors};
use crate::pipeline::{Step, StepContext, StepError, StepReport};
use crate::resolution::WaitPolicy;
use async_trait::async_trait;
use scout_common::protocol::{Key, Scope};
use scout_common::record::{ActionKind, DateEntry, SearchTrigger, StepPayload};
use tracing::{debug, info};

/// Types the destination and picks the first suggestion, or presses Enter.
pub struct SearchDestination;

#[async_trait]
impl Step for SearchDestination {
    fn action(&self) -> ActionKind {
        ActionKind::SearchDestination
    }

    async fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepReport, StepError> {
        let destination = ctx.params.destination()?.to_string();
        info!(%destination, "searching destination");

        let wait = ctx.element_wait();
        let field = match ctx
            .resolver(wait)
            .first(&selectors::search_field(), &Scope::Document)
            .await
            .into_match()
        {
            Ok(found) => found.value,
            Err(not_found) => {
                return Ok(StepReport::not_found("search field", &not_found).with_payload(
                    StepPayload::Destination {
                        destination,
                        suggestion_used: false,
                    },
                ));
            }
        };

        ctx.driver.clear(field).await?;
        ctx.driver.send_keys(field, &destination).await?;

        let settle = ctx.settle_wait();
        let suggestion_used = ctx
            .resolver(settle)
            .click_first(&selectors::suggestions(), &Scope::Document)
            .await
            .is_found();

        if !suggestion_used {
            debug!("no suggestion took the click, submitting with Enter");
            ctx.driver.press_key(field, Key::Enter).await?;
        }

        Ok(StepReport::succeeded().with_payload(StepPayload::Destination {
            destination,
            suggestion_used,
        }))
    }
}

/// Fills check-in and check-out, falling back to opening a calendar widget.
///
/// Succeeds when neither control exists; the payload says which path ran.
pub struct SelectDates;

#[async_trait]
impl Step for SelectDates {
    fn action(&self) -> ActionKind {
        ActionKind::SelectDates
    }

    async fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepReport, StepError> {
        let params = ctx.params;
        let (check_in, check_out) = params.dates()?;
        info!(check_in, check_out, "selecting dates");

        let inputs = ctx
            .resolver(WaitPolicy::immediate())
            .union(&selectors::date_inputs(), &Scope::Document)
            .await;

        let filled = match inputs.as_slice() {
            [first, second, ..] => {
                fill_field(&mut *ctx.driver, *first, check_in).await
                    && fill_field(&mut *ctx.driver, *second, check_out).await
            }
            _ => false,
        };

        let entry = if filled {
            DateEntry::Inputs
        } else {
            let calendar = ctx
                .resolver(WaitPolicy::immediate())
                .click_first(&selectors::calendar(), &Scope::Document)
                .await;
            if calendar.is_found() {
                DateEntry::Calendar
            } else {
                DateEntry::Unavailable
            }
        };

        Ok(StepReport::succeeded().with_payload(StepPayload::Dates {
            check_in: check_in.to_string(),
            check_out: check_out.to_string(),
            entry,
        }))
    }
}

/// Opens the guest selector and sets guest and room counts where inputs exist.
///
/// Succeeds when no selector can be opened.
pub struct ConfigureGuests;

#[async_trait]
impl Step for ConfigureGuests {
    fn action(&self) -> ActionKind {
        ActionKind::ConfigureGuests
    }

    async fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepReport, StepError> {
        let (guests, rooms) = (ctx.params.guests, ctx.params.rooms);
        info!(guests, rooms, "configuring guests");

        let selector_found = ctx
            .resolver(WaitPolicy::immediate())
            .click_first(&selectors::guest_selector(), &Scope::Document)
            .await
            .is_found();

        if selector_found {
            let settle = ctx.settle_wait();
            let guest_input = ctx
                .resolver(settle)
                .first(&selectors::guest_count(), &Scope::Document)
                .await
                .found();
            if let Some(input) = guest_input {
                fill_field(&mut *ctx.driver, input, &guests.to_string()).await;
            }

            let room_input = ctx
                .resolver(WaitPolicy::immediate())
                .first(&selectors::room_count(), &Scope::Document)
                .await
                .found();
            if let Some(input) = room_input {
                fill_field(&mut *ctx.driver, input, &rooms.to_string()).await;
            }
        }

        Ok(StepReport::succeeded().with_payload(StepPayload::Guests {
            guests,
            rooms,
            selector_found,
        }))
    }
}

/// Submits the search and waits for result cards.
pub struct SearchHotels;

#[async_trait]
impl Step for SearchHotels {
    fn action(&self) -> ActionKind {
        ActionKind::SearchHotels
    }

    async fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepReport, StepError> {
        let clicked = ctx
            .resolver(WaitPolicy::immediate())
            .click_first(&selectors::search_button(), &Scope::Document)
            .await
            .is_found();

        let trigger = if clicked {
            SearchTrigger::Button
        } else {
            let field = ctx
                .resolver(WaitPolicy::immediate())
                .first(&selectors::search_field(), &Scope::Document)
                .await;
            match field.into_match() {
                Ok(found) => {
                    ctx.driver.press_key(found.value, Key::Enter).await?;
                    SearchTrigger::EnterKey
                }
                Err(not_found) => {
                    return Ok(StepReport::not_found(
                        "search button or search field",
                        &not_found,
                    ));
                }
            }
        };

        let settle = ctx.settle_wait();
        let results_visible = ctx
            .resolver(settle)
            .first(&selectors::any_hotel_card(), &Scope::Document)
            .await
            .is_found();

        Ok(StepReport::succeeded().with_payload(StepPayload::Search {
            trigger,
            results_visible,
        }))
    }
}

/// Counts result cards, filters and sort options on the results page.
pub struct AnalyzeResults;

#[async_trait]
impl Step for AnalyzeResults {
    fn action(&self) -> ActionKind {
        ActionKind::AnalyzeResults
    }

    async fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepReport, StepError> {
        let mut resolver = ctx.resolver(WaitPolicy::immediate());
        let hotels_count = resolver.count(&selectors::hotel_cards(), &Scope::Document).await;
        let filters_count = resolver.count(&selectors::filters(), &Scope::Document).await;
        let sort_options_count = resolver
            .count(&selectors::sort_options(), &Scope::Document)
            .await;

        let page_title = ctx.driver.title().await?;
        let current_url = ctx.driver.current_url().await?;

        Ok(StepReport::succeeded().with_payload(StepPayload::ResultsAnalysis {
            hotels_count,
            filters_count,
            sort_options_count,
            page_title,
            current_url,
        }))
    }
}

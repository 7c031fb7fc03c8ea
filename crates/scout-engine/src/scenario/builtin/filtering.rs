//! Steps that inspect and apply result filters.

use super::{fill_field, selectors};
use crate::pipeline::{Step, StepContext, StepError, StepReport};
use crate::resolution::WaitPolicy;
use async_trait::async_trait;
use scout_common::protocol::Scope;
use scout_common::record::{ActionKind, StepPayload};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCategory {
    Price,
    Stars,
    Amenities,
    Location,
}

const CATEGORY_KEYWORDS: [(FilterCategory, &[&str]); 4] = [
    (FilterCategory::Price, &["цена", "стоимость", "price", "cost"]),
    (FilterCategory::Stars, &["звезд", "star", "рейтинг"]),
    (FilterCategory::Amenities, &["удобства", "amenity", "facility"]),
    (FilterCategory::Location, &["район", "location", "area"]),
];

/// Buckets a filter label by keyword. Earlier categories win.
pub fn classify_filter(label: &str) -> Option<FilterCategory> {
    let label = label.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| label.contains(w)))
        .map(|(category, _)| *category)
}

/// Reads every filter label on the page and sorts it into categories.
pub struct AnalyzeAvailableFilters;

#[async_trait]
impl Step for AnalyzeAvailableFilters {
    fn action(&self) -> ActionKind {
        ActionKind::AnalyzeAvailableFilters
    }

    async fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepReport, StepError> {
        let elements = ctx
            .resolver(WaitPolicy::immediate())
            .union(&selectors::filters(), &Scope::Document)
            .await;

        let mut price_filters = Vec::new();
        let mut star_filters = Vec::new();
        let mut amenity_filters = Vec::new();
        let mut location_filters = Vec::new();

        for element in elements {
            let label = ctx.driver.text(element).await?.trim().to_string();
            if label.is_empty() {
                continue;
            }
            match classify_filter(&label) {
                Some(FilterCategory::Price) => price_filters.push(label),
                Some(FilterCategory::Stars) => star_filters.push(label),
                Some(FilterCategory::Amenities) => amenity_filters.push(label),
                Some(FilterCategory::Location) => location_filters.push(label),
                None => debug!(%label, "unclassified filter"),
            }
        }

        Ok(StepReport::succeeded().with_payload(StepPayload::FilterCatalog {
            price_filters,
            star_filters,
            amenity_filters,
            location_filters,
        }))
    }
}

/// Opens the price filter and enters the maximum price if a range input shows up.
///
/// Each filter strategy is tried until one accepts the click.
pub struct ApplyPriceFilter;

#[async_trait]
impl Step for ApplyPriceFilter {
    fn action(&self) -> ActionKind {
        ActionKind::ApplyPriceFilter
    }

    async fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepReport, StepError> {
        let control = ctx
            .resolver(WaitPolicy::immediate())
            .click_first(&selectors::price_filter(), &Scope::Document)
            .await;
        let control = match control.into_match() {
            Ok(found) => found,
            Err(not_found) => return Ok(StepReport::not_found("price filter", &not_found)),
        };

        let settle = ctx.settle_wait();
        let input = ctx
            .resolver(settle)
            .first(&selectors::price_inputs(), &Scope::Document)
            .await
            .found();

        let mut value = None;
        if let Some(input) = input {
            let max_price = ctx.params.max_price.to_string();
            if fill_field(&mut *ctx.driver, input, &max_price).await {
                value = Some(max_price);
            }
        }

        Ok(StepReport::succeeded().with_payload(StepPayload::FilterApplied {
            control: control.locator.to_string(),
            value,
        }))
    }
}

/// Clicks the first star-rating filter.
pub struct ApplyStarFilter;

#[async_trait]
impl Step for ApplyStarFilter {
    fn action(&self) -> ActionKind {
        ActionKind::ApplyStarFilter
    }

    async fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepReport, StepError> {
        let control = ctx
            .resolver(WaitPolicy::immediate())
            .click_first(&selectors::star_filter(), &Scope::Document)
            .await;
        let control = match control.into_match() {
            Ok(found) => found,
            Err(not_found) => return Ok(StepReport::not_found("star filter", &not_found)),
        };

        Ok(StepReport::succeeded().with_payload(StepPayload::FilterApplied {
            control: control.locator.to_string(),
            value: None,
        }))
    }
}

/// Clicks the first amenity filter whose label mentions a wanted amenity.
pub struct ApplyAmenityFilter;

#[async_trait]
impl Step for ApplyAmenityFilter {
    fn action(&self) -> ActionKind {
        ActionKind::ApplyAmenityFilter
    }

    async fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepReport, StepError> {
        let params = ctx.params;
        if params.amenities.is_empty() {
            return Err(StepError::MissingParameter("amenities"));
        }

        let control = ctx
            .resolver(WaitPolicy::immediate())
            .first_with_text(&selectors::amenity_filter(), &Scope::Document, |text| {
                let text = text.to_lowercase();
                params.amenities.iter().any(|k| text.contains(k.as_str()))
            })
            .await;
        let control = match control.into_match() {
            Ok(found) => found,
            Err(not_found) => return Ok(StepReport::not_found("amenity filter", &not_found)),
        };
        ctx.driver.click(control.value).await?;

        Ok(StepReport::succeeded().with_payload(StepPayload::FilterApplied {
            control: control.locator.to_string(),
            value: Some(params.amenities.join(", ")),
        }))
    }
}

/// Waits for the result list to refresh, then counts cards and active filters.
pub struct AnalyzeFilteredResults;

#[async_trait]
impl Step for AnalyzeFilteredResults {
    fn action(&self) -> ActionKind {
        ActionKind::AnalyzeFilteredResults
    }

    async fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepReport, StepError> {
        let settle = ctx.settle_wait();
        // Only a wait; the count below covers every card strategy.
        ctx.resolver(settle)
            .first(&selectors::any_hotel_card(), &Scope::Document)
            .await;

        let mut resolver = ctx.resolver(WaitPolicy::immediate());
        let filtered_hotels_count = resolver.count(&selectors::hotel_cards(), &Scope::Document).await;
        let active_filters_count = resolver
            .count(&selectors::active_filters(), &Scope::Document)
            .await;

        Ok(StepReport::succeeded().with_payload(StepPayload::FilteredResults {
            filtered_hotels_count,
            active_filters_count,
            filter_effective: filtered_hotels_count > 0,
        }))
    }
}

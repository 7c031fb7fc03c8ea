//! Strategy lists for the hotel-search pages, most specific first.

use crate::resolution::StrategyList;

pub fn search_field() -> StrategyList {
    StrategyList::css([
        r#"input[name*="query"]"#,
        r#"input[placeholder*="поиск"]"#,
        r#"input[placeholder*="куда"]"#,
        ".search-input",
        "#search-input",
    ])
}

/// Autocomplete entries under the search field. One combined query so the
/// settle wait applies once.
pub fn suggestions() -> StrategyList {
    StrategyList::css([".suggestion, .autocomplete-item, .dropdown-item"])
}

pub fn date_inputs() -> StrategyList {
    StrategyList::css([
        r#"input[type="date"]"#,
        ".date-picker input",
        ".check-in input",
        ".check-out input",
    ])
}

pub fn calendar() -> StrategyList {
    StrategyList::css([".date-picker", ".calendar", ".date-selector"])
}

pub fn guest_selector() -> StrategyList {
    StrategyList::css([
        ".guest-selector",
        ".traveler-selector",
        ".guests-input",
        ".rooms-input",
    ])
}

pub fn guest_count() -> StrategyList {
    StrategyList::css([r#"input[type="number"]"#, ".guest-count"])
}

pub fn room_count() -> StrategyList {
    StrategyList::css([".room-count", ".rooms-count"])
}

pub fn search_button() -> StrategyList {
    StrategyList::css([
        r#"button[type="submit"]"#,
        ".search-button",
        ".find-button",
        ".search-btn",
    ])
}

pub fn hotel_cards() -> StrategyList {
    StrategyList::css([".hotel-card", ".hotel-item", ".result-item"])
}

/// Any result card, as one query. Used for "did results render" waits.
pub fn any_hotel_card() -> StrategyList {
    StrategyList::css([".hotel-card, .hotel-item, .result-item"])
}

pub fn filters() -> StrategyList {
    StrategyList::css([".filter", ".facet", ".filter-option"])
}

pub fn sort_options() -> StrategyList {
    StrategyList::css([".sort", ".sort-option", ".order-by"])
}

pub fn price_filter() -> StrategyList {
    StrategyList::css([".price-filter", ".cost-filter", r#"[data-filter="price"]"#])
}

pub fn price_inputs() -> StrategyList {
    StrategyList::css([r#"input[type="range"]"#, ".price-range input"])
}

pub fn star_filter() -> StrategyList {
    StrategyList::css([".star-filter", ".rating-filter", r#"[data-filter="stars"]"#])
}

pub fn amenity_filter() -> StrategyList {
    StrategyList::css([
        ".amenity-filter",
        ".facility-filter",
        r#"[data-filter="amenities"]"#,
    ])
}

pub fn active_filters() -> StrategyList {
    StrategyList::css([".active-filter", ".applied-filter"])
}

pub fn room_controls() -> StrategyList {
    StrategyList::css([".room-select", ".book-room", ".select-room", ".booking-button"])
}

/// Guest form inputs in document order, as one query.
pub fn guest_form_fields() -> StrategyList {
    StrategyList::css([r#"input[type="text"], input[type="email"]"#])
}

pub fn payment_methods() -> StrategyList {
    StrategyList::css([".payment", ".payment-method", ".payment-option"])
}

pub fn payment_buttons() -> StrategyList {
    StrategyList::css([".pay-button", ".payment-button", ".checkout-button"])
}

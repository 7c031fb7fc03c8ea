use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to an element held by a driver.
///
/// Drivers hand these out from `find_elements` and map them back to live
/// elements. The same DOM node yields the same handle for as long as the
/// driver keeps it registered, so handles can be compared and de-duplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementRef(pub u32);

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One element-location strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "query", rename_all = "snake_case")]
pub enum Locator {
    Css(String),
    XPath(String),
    Id(String),
    /// Matches the `name` attribute.
    Name(String),
    LinkText(String),
    PartialLinkText(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// The raw query string, without the strategy tag.
    pub fn query(&self) -> &str {
        match self {
            Locator::Css(q)
            | Locator::XPath(q)
            | Locator::Id(q)
            | Locator::Name(q)
            | Locator::LinkText(q)
            | Locator::PartialLinkText(q) => q,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(q) => write!(f, "css={}", q),
            Locator::XPath(q) => write!(f, "xpath={}", q),
            Locator::Id(q) => write!(f, "id={}", q),
            Locator::Name(q) => write!(f, "name={}", q),
            Locator::LinkText(q) => write!(f, "link={}", q),
            Locator::PartialLinkText(q) => write!(f, "partial_link={}", q),
        }
    }
}

/// Where a locator is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    #[default]
    Document,
    Within(ElementRef),
}

/// Special keys a driver can press on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Enter,
}

impl Key {
    /// W3C WebDriver code point for the key.
    pub fn code_point(self) -> char {
        match self {
            Key::Enter => '\u{E007}',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationResult {
    pub url: String,
    pub title: String,
    pub status: u16, // generic status code (e.g. 200)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn locator_serializes_with_strategy_tag() {
        let loc = Locator::css("input[name*=\"query\"]");
        let value = serde_json::to_value(&loc).unwrap();
        assert_eq!(value, json!({"by": "css", "query": "input[name*=\"query\"]"}));

        let back: Locator = serde_json::from_value(json!({"by": "x_path", "query": "//a"})).unwrap();
        assert_eq!(back, Locator::xpath("//a"));
    }

    #[test]
    fn locator_display_is_prefixed() {
        assert_eq!(Locator::css(".hotel-card").to_string(), "css=.hotel-card");
        assert_eq!(Locator::Name("query".into()).query(), "query");
    }

    #[test]
    fn enter_maps_to_webdriver_code_point() {
        assert_eq!(Key::Enter.code_point() as u32, 0xE007);
    }
}

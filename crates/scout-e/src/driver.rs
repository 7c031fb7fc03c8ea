use crate::webdriver::{SessionOptions, WebDriverClient};
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::{CmdError, ErrorStatus};
use scout_engine::driver::{Driver, DriverError};
use scout_engine::protocol::{ElementRef, Key, Locator, NavigationResult, Scope};
use std::collections::HashMap;
use tracing::{debug, info};

/// [`Driver`] over a W3C WebDriver endpoint (chromedriver, geckodriver).
pub struct WebDriverSession {
    options: SessionOptions,
    client: Option<WebDriverClient>,
    elements: ElementTable,
}

impl WebDriverSession {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            options,
            client: None,
            elements: ElementTable::default(),
        }
    }

    pub fn with_url(webdriver_url: impl Into<String>) -> Self {
        Self::new(SessionOptions {
            webdriver_url: webdriver_url.into(),
            ..SessionOptions::default()
        })
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    fn client(&self) -> Result<&WebDriverClient, DriverError> {
        self.client.as_ref().ok_or(DriverError::NotReady)
    }

    fn element(&self, handle: ElementRef) -> Result<&Element, DriverError> {
        self.elements
            .get(handle)
            .ok_or(DriverError::ElementNotFound { element: handle })
    }

    /// Drop every handle if the last action moved the browser to another page.
    async fn track_page(&mut self) {
        let Ok(client) = self.client() else {
            return;
        };
        let current = client.client.current_url().await;
        match current {
            Ok(url) => self.elements.on_page(url.as_str()),
            Err(e) => debug!(error = %e, "current url unavailable after action"),
        }
    }
}

#[async_trait]
impl Driver for WebDriverSession {
    async fn launch(&mut self) -> Result<(), DriverError> {
        info!("Connecting to WebDriver at {}...", self.options.webdriver_url);
        let client = WebDriverClient::connect(&self.options).await?;
        self.client = Some(client);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        self.elements.reset(None);
        if let Some(client) = self.client.take() {
            client.close().await?;
        }
        Ok(())
    }

    async fn is_ready(&self) -> bool {
        self.client.is_some()
    }

    async fn navigate(&mut self, url: &str) -> Result<NavigationResult, DriverError> {
        let client = self.client()?;
        info!("Navigating to: {}", url);
        client
            .client
            .goto(url)
            .await
            .map_err(|e| DriverError::Navigation(e.to_string()))?;

        let title = client.client.title().await.unwrap_or_default();
        let url = client
            .client
            .current_url()
            .await
            .map(|u| u.to_string())
            .unwrap_or_else(|_| url.to_string());

        self.elements.reset(Some(url.clone()));
        Ok(NavigationResult {
            url,
            title,
            status: 200,
        })
    }

    async fn find_elements(
        &mut self,
        locator: &Locator,
        scope: &Scope,
    ) -> Result<Vec<ElementRef>, DriverError> {
        let client = self.client()?;
        let query = WdQuery::from(locator);

        let found = match scope {
            Scope::Document => client.client.find_all(query.as_locator()).await,
            Scope::Within(parent) => self.element(*parent)?.find_all(query.as_locator()).await,
        }
        .map_err(|e| map_cmd_error(e, None, Some(locator)))?;

        debug!(%locator, count = found.len(), "find_elements");
        Ok(found
            .into_iter()
            .map(|element| self.elements.intern(element))
            .collect())
    }

    async fn text(&mut self, element: ElementRef) -> Result<String, DriverError> {
        self.element(element)?
            .text()
            .await
            .map_err(|e| map_cmd_error(e, Some(element), None))
    }

    async fn attribute(
        &mut self,
        element: ElementRef,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        self.element(element)?
            .attr(name)
            .await
            .map_err(|e| map_cmd_error(e, Some(element), None))
    }

    async fn click(&mut self, element: ElementRef) -> Result<(), DriverError> {
        self.element(element)?
            .click()
            .await
            .map_err(|e| map_cmd_error(e, Some(element), None))?;
        self.track_page().await;
        Ok(())
    }

    async fn clear(&mut self, element: ElementRef) -> Result<(), DriverError> {
        self.element(element)?
            .clear()
            .await
            .map_err(|e| map_cmd_error(e, Some(element), None))
    }

    async fn send_keys(&mut self, element: ElementRef, text: &str) -> Result<(), DriverError> {
        self.element(element)?
            .send_keys(text)
            .await
            .map_err(|e| map_cmd_error(e, Some(element), None))
    }

    async fn press_key(&mut self, element: ElementRef, key: Key) -> Result<(), DriverError> {
        self.send_keys(element, &key.code_point().to_string()).await?;
        self.track_page().await;
        Ok(())
    }

    async fn title(&mut self) -> Result<String, DriverError> {
        self.client()?
            .client
            .title()
            .await
            .map_err(|e| map_cmd_error(e, None, None))
    }

    async fn current_url(&mut self) -> Result<String, DriverError> {
        self.client()?
            .client
            .current_url()
            .await
            .map(|u| u.to_string())
            .map_err(|e| map_cmd_error(e, None, None))
    }
}

/// Live elements behind the handles given out by `find_elements`.
///
/// Handles are keyed by the WebDriver element id, so finding the same node
/// twice yields the same handle. Handles are dropped whenever the browser
/// lands on a different page; handle numbers are never reused.
#[derive(Default)]
struct ElementTable {
    by_id: HashMap<String, ElementRef>,
    live: HashMap<ElementRef, Element>,
    next: u32,
    page: Option<String>,
}

impl ElementTable {
    fn intern(&mut self, element: Element) -> ElementRef {
        let id = element.element_id().to_string();
        if let Some(handle) = self.by_id.get(&id) {
            return *handle;
        }
        let handle = ElementRef(self.next);
        self.next += 1;
        self.by_id.insert(id, handle);
        self.live.insert(handle, element);
        handle
    }

    fn get(&self, handle: ElementRef) -> Option<&Element> {
        self.live.get(&handle)
    }

    fn reset(&mut self, page: Option<String>) {
        self.by_id.clear();
        self.live.clear();
        self.page = page;
    }

    fn on_page(&mut self, url: &str) {
        if self.page.as_deref() != Some(url) {
            debug!(url, dropped = self.len(), "page changed, dropping element handles");
            self.reset(Some(url.to_string()));
        }
    }

    fn len(&self) -> usize {
        self.by_id.len()
    }
}

/// Owned query text for strategies WebDriver has no native locator for.
enum WdQuery {
    Css(String),
    XPath(String),
    Id(String),
    LinkText(String),
}

impl From<&Locator> for WdQuery {
    fn from(locator: &Locator) -> Self {
        match locator {
            Locator::Css(q) => WdQuery::Css(q.clone()),
            Locator::XPath(q) => WdQuery::XPath(q.clone()),
            Locator::Id(q) => WdQuery::Id(q.clone()),
            Locator::Name(q) => WdQuery::Css(format!("[name=\"{}\"]", css_escape(q))),
            Locator::LinkText(q) => WdQuery::LinkText(q.clone()),
            Locator::PartialLinkText(q) => {
                WdQuery::XPath(format!("//a[contains(normalize-space(.), {})]", xpath_literal(q)))
            }
        }
    }
}

impl WdQuery {
    fn as_locator(&self) -> fantoccini::Locator<'_> {
        match self {
            WdQuery::Css(q) => fantoccini::Locator::Css(q),
            WdQuery::XPath(q) => fantoccini::Locator::XPath(q),
            WdQuery::Id(q) => fantoccini::Locator::Id(q),
            WdQuery::LinkText(q) => fantoccini::Locator::LinkText(q),
        }
    }
}

fn css_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        format!("'{}'", value)
    } else if !value.contains('"') {
        format!("\"{}\"", value)
    } else {
        let parts: Vec<String> = value.split('\'').map(|p| format!("'{}'", p)).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}

fn map_cmd_error(err: CmdError, element: Option<ElementRef>, locator: Option<&Locator>) -> DriverError {
    match err {
        CmdError::Lost(_) => DriverError::ConnectionLost,
        CmdError::WaitTimeout => DriverError::Timeout {
            operation: err.to_string(),
        },
        CmdError::Standard(wd) => map_status(&wd.error, wd.message.into_owned(), element, locator),
        other => DriverError::Other(other.to_string()),
    }
}

/// Classify a W3C error status.
fn map_status(
    status: &ErrorStatus,
    message: String,
    element: Option<ElementRef>,
    locator: Option<&Locator>,
) -> DriverError {
    match (status, element, locator) {
        (ErrorStatus::StaleElementReference, Some(element), _) => {
            DriverError::ElementStale { element }
        }
        (
            ErrorStatus::ElementNotInteractable | ErrorStatus::ElementClickIntercepted,
            Some(element),
            _,
        ) => DriverError::ElementNotInteractable {
            element,
            reason: message,
        },
        (ErrorStatus::NoSuchElement, Some(element), _) => DriverError::ElementNotFound { element },
        (ErrorStatus::InvalidSelector, _, Some(locator)) => DriverError::SelectorInvalid {
            selector: locator.to_string(),
        },
        (ErrorStatus::Timeout | ErrorStatus::ScriptTimeout, _, _) => {
            DriverError::Timeout { operation: message }
        }
        (ErrorStatus::JavascriptError, _, _) => DriverError::Script(message),
        _ => DriverError::Other(message),
    }
}

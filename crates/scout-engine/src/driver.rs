use async_trait::async_trait;
pub use scout_common::error::DriverError;
use scout_common::protocol::{ElementRef, Key, Locator, NavigationResult, Scope};

/// The Driver trait is the browser/document capability every scenario runs against.
///
/// Lookups never wait: `find_elements` reports what is present right now, and
/// bounded waiting is layered on top by the selector resolver.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Launch the driver (start or connect to a browser session).
    async fn launch(&mut self) -> Result<(), DriverError>;

    /// Close the session and cleanup resources.
    async fn close(&mut self) -> Result<(), DriverError>;

    /// Check if the driver is ready to accept commands.
    async fn is_ready(&self) -> bool;

    /// Navigate to a specific URL.
    async fn navigate(&mut self, url: &str) -> Result<NavigationResult, DriverError>;

    /// All elements currently matching `locator` inside `scope`, in document order.
    async fn find_elements(
        &mut self,
        locator: &Locator,
        scope: &Scope,
    ) -> Result<Vec<ElementRef>, DriverError>;

    /// Visible text of an element.
    async fn text(&mut self, element: ElementRef) -> Result<String, DriverError>;

    /// Attribute value of an element, `None` if absent.
    async fn attribute(
        &mut self,
        element: ElementRef,
        name: &str,
    ) -> Result<Option<String>, DriverError>;

    async fn click(&mut self, element: ElementRef) -> Result<(), DriverError>;

    async fn clear(&mut self, element: ElementRef) -> Result<(), DriverError>;

    async fn send_keys(&mut self, element: ElementRef, text: &str) -> Result<(), DriverError>;

    /// Press a special key while `element` has focus.
    async fn press_key(&mut self, element: ElementRef, key: Key) -> Result<(), DriverError> {
        self.send_keys(element, &key.code_point().to_string()).await
    }

    /// Title of the current page.
    async fn title(&mut self) -> Result<String, DriverError>;

    /// URL of the current page.
    async fn current_url(&mut self) -> Result<String, DriverError>;
}

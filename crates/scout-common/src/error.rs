use crate::protocol::ElementRef;

/// Errors reported by a browser/document driver.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    // ============================================================
    // Navigation Errors
    // ============================================================
    #[error("Navigation failed: {0}")]
    Navigation(String),

    // ============================================================
    // Element Errors
    // ============================================================
    #[error("Element {element} not found")]
    ElementNotFound { element: ElementRef },

    #[error("Element {element} is stale (removed from DOM)")]
    ElementStale { element: ElementRef },

    #[error("Element {element} is not interactable: {reason}")]
    ElementNotInteractable { element: ElementRef, reason: String },

    #[error("Invalid selector: {selector}")]
    SelectorInvalid { selector: String },

    // ============================================================
    // Execution Errors
    // ============================================================
    #[error("Script execution error: {0}")]
    Script(String),

    #[error("Timeout: {operation}")]
    Timeout { operation: String },

    // ============================================================
    // System Errors
    // ============================================================
    #[error("Connection lost")]
    ConnectionLost,

    #[error("Not ready")]
    NotReady,

    #[error("IO error: {0}")]
    Io(String),

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Other: {0}")]
    Other(String),
}

impl From<std::io::Error> for DriverError {
    fn from(err: std::io::Error) -> Self {
        DriverError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_element_handle() {
        let err = DriverError::ElementNotInteractable {
            element: ElementRef(7),
            reason: "covered by overlay".into(),
        };
        assert_eq!(
            err.to_string(),
            "Element #7 is not interactable: covered by overlay"
        );
    }
}

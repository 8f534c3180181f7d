use thiserror::Error;

/// Genuine browser failures. Timeouts are never reported through this type.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("browser launch failed: {0}")]
    Launch(String),
    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },
    #[error("script evaluation failed: {0}")]
    Script(String),
    #[error("element interaction failed on `{selector}`: {message}")]
    Element { selector: String, message: String },
    #[error("browser session is closed")]
    Closed,
}

/// Observable state of an element matched by a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementState {
    /// The element, or the button enclosing it, is disabled.
    pub disabled: bool,
}

impl ElementState {
    pub fn clickable(&self) -> bool {
        !self.disabled
    }
}

/// The browser capability the crawler drives.
///
/// Every method is a single non-blocking interaction; waiting is layered on
/// top by polling (see [`crate::poll_until`]).
#[async_trait::async_trait]
pub trait PageController: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<(), ControllerError>;

    async fn current_location(&self) -> Result<String, ControllerError>;

    /// `None` when nothing matches `selector`.
    async fn probe_element(&self, selector: &str) -> Result<Option<ElementState>, ControllerError>;

    /// Scrolls the first match into view and clicks it. Returns `false` when
    /// nothing matches.
    async fn click(&self, selector: &str) -> Result<bool, ControllerError>;

    /// Sends an Escape key press to the element matched by `selector`.
    async fn press_escape(&self, selector: &str) -> Result<(), ControllerError>;

    /// Scrolls the document to its end and back to the top.
    async fn scroll_page(&self, pause: std::time::Duration) -> Result<(), ControllerError>;
}

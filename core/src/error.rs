use thiserror::Error;

/// Failures in the viewer's load and render paths.
///
/// The two load variants are terminal for the current document and get
/// a visible message in the loading area. A failed page render is
/// logged and the viewer stays interactive. A cancelled render is the
/// expected outcome of superseding it and is never surfaced.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("rendering engine failed to load")]
    EngineLoad,
    #[error("document failed to load")]
    DocumentLoad,
    #[error("page render failed: {0}")]
    Render(String),
    #[error("render cancelled")]
    Cancelled,
}

impl ViewerError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ViewerError::Cancelled)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ViewerError::EngineLoad | ViewerError::DocumentLoad)
    }

    /// Message shown in place of the loading indicator, for the
    /// failures that are surfaced at all.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            ViewerError::EngineLoad => Some("Error loading PDF viewer"),
            ViewerError::DocumentLoad => Some("Error loading PDF"),
            ViewerError::Render(_) | ViewerError::Cancelled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_is_silent() {
        let err = ViewerError::Cancelled;
        assert!(err.is_cancelled());
        assert!(!err.is_terminal());
        assert_eq!(err.user_message(), None);
    }

    #[test]
    fn load_failures_are_terminal_and_visible() {
        assert!(ViewerError::EngineLoad.is_terminal());
        assert!(ViewerError::DocumentLoad.is_terminal());
        assert!(ViewerError::DocumentLoad.user_message().is_some());
    }

    #[test]
    fn render_failure_is_diagnostic_only() {
        let err = ViewerError::Render("bad page".into());
        assert!(!err.is_terminal());
        assert_eq!(err.user_message(), None);
        assert_eq!(err.to_string(), "page render failed: bad page");
    }
}

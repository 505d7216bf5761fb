//! Status and error reporting hooks
//!
//! Notifications are fire-and-forget: a reporter failure is logged and never
//! affects the render loop.

/// Reporter errors
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error("Status reporter unavailable: {0}")]
    Unavailable(String),
}

/// Sink for lifecycle notifications
pub trait StatusReporter {
    /// Report a tagged event from `source`
    fn send_error(&self, tag: &str, source: &str) -> Result<(), StatusError>;

    /// Report whether the render loop is running
    fn send_status(&self, running: bool) -> Result<(), StatusError>;
}

/// Reporter that writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl StatusReporter for TracingReporter {
    fn send_error(&self, tag: &str, source: &str) -> Result<(), StatusError> {
        tracing::info!(tag, source, "status event");
        Ok(())
    }

    fn send_status(&self, running: bool) -> Result<(), StatusError> {
        tracing::info!(running, "status");
        Ok(())
    }
}

/// Announce that `source` has loaded
pub fn notify_loaded(reporter: &dyn StatusReporter, source: &str) {
    if let Err(e) = reporter.send_error("loaded", source) {
        tracing::warn!("Failed to report load of {}: {}", source, e);
    }
}

/// Announce the render loop's running state
pub fn notify_running(reporter: &dyn StatusReporter, running: bool) {
    if let Err(e) = reporter.send_status(running) {
        tracing::warn!("Failed to report running status: {}", e);
    }
}

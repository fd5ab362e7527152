//! Scope timer that logs elapsed time on drop

use std::time::{Duration, Instant};

/// Logs `"<operation>: <ms> ms"` at info level when dropped
#[derive(Debug)]
pub struct LogDuration {
    operation: String,
    start: Instant,
}

impl LogDuration {
    /// Start timing `operation`
    pub fn new(operation: impl Into<String>) -> Self {
        LogDuration {
            operation: operation.into(),
            start: Instant::now(),
        }
    }

    /// Name given at creation
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Time since creation
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for LogDuration {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        tracing::info!(
            operation = %self.operation,
            elapsed_ms,
            "{}: {} ms",
            self.operation,
            elapsed_ms
        );
    }
}

/// Time the rest of the enclosing scope.
///
/// ```
/// fn work() {
///     docsearch::log_duration!("work");
///     // ...
/// }
/// work();
/// ```
#[macro_export]
macro_rules! log_duration {
    ($operation:expr) => {
        let _log_duration_guard = $crate::LogDuration::new($operation);
    };
}

//! Mock command runner for testing.
//!
//! Captures every request and answers with scripted exit codes, so
//! dispatch behavior can be tested without a cluster.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{RunnerError, RunnerResult};
use crate::runner::{ApplyRequest, CommandRunner, ExecutionResult};

/// Captured call information for verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedCall {
    pub verb: String,
    pub context: String,
    pub document: String,
    pub source: PathBuf,
}

/// Mock runner returning scripted exit codes in call order.
///
/// Calls past the end of the script succeed.
#[derive(Clone, Default)]
pub struct MockRunner {
    /// Scripted results; `None` is a signal termination
    exit_codes: Arc<RwLock<Vec<Option<i32>>>>,
    /// Index of the next scripted result
    next: Arc<AtomicUsize>,
    /// Every request seen so far
    captured_calls: Arc<RwLock<Vec<CapturedCall>>>,
    /// Error returned instead of running, when set
    simulate_failure: Arc<RwLock<Option<String>>>,
}

impl MockRunner {
    /// Create a new mock runner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the exit code for the next unanswered call.
    pub fn add_exit_code(self, code: i32) -> Self {
        self.exit_codes.write().push(Some(code));
        self
    }

    /// Queue a signal termination for the next unanswered call.
    pub fn add_signal(self) -> Self {
        self.exit_codes.write().push(None);
        self
    }

    /// Make every call fail before "running".
    pub fn simulate_failure(self, message: impl Into<String>) -> Self {
        *self.simulate_failure.write() = Some(message.into());
        self
    }

    /// Get all captured calls.
    pub fn get_calls(&self) -> Vec<CapturedCall> {
        self.captured_calls.read().clone()
    }

    /// Get the number of calls made.
    pub fn call_count(&self) -> usize {
        self.captured_calls.read().len()
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn apply(&self, request: &ApplyRequest<'_>) -> RunnerResult<ExecutionResult> {
        if let Some(msg) = self.simulate_failure.read().clone() {
            return Err(RunnerError::ExecutionFailed(msg));
        }

        self.captured_calls.write().push(CapturedCall {
            verb: request.verb.to_string(),
            context: request.context.to_string(),
            document: request.document.to_string(),
            source: request.source.to_path_buf(),
        });

        let index = self.next.fetch_add(1, Ordering::SeqCst);
        let code = self.exit_codes.read().get(index).copied().unwrap_or(Some(0));
        Ok(ExecutionResult::exited(code))
    }
}

//! Tool lifecycle events and observers.
//!
//! Every [`Tool::run`](super::Tool::run) reports `start` and then exactly
//! one of `success` or `error` to the observer the tool was built with.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::ErrorKind;

/// A unique identifier for one tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationId(pub Uuid);

impl InvocationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InvocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InvocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What happened during an invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum ToolEventKind {
    /// The tool was called with this raw input.
    Start { input: Value },
    /// The tool produced a payload.
    Success { output: Value },
    /// The tool failed.
    Error { kind: ErrorKind, message: String },
}

/// A lifecycle event for one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolEvent {
    pub invocation: InvocationId,
    pub tool: String,
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: ToolEventKind,
}

impl ToolEvent {
    pub fn new(invocation: InvocationId, tool: impl Into<String>, kind: ToolEventKind) -> Self {
        Self {
            invocation,
            tool: tool.into(),
            at: Utc::now(),
            kind,
        }
    }

    pub fn phase(&self) -> &'static str {
        match self.kind {
            ToolEventKind::Start { .. } => "start",
            ToolEventKind::Success { .. } => "success",
            ToolEventKind::Error { .. } => "error",
        }
    }
}

/// Receives lifecycle events from tools.
///
/// Called inline on the invoking task, so implementations should not block.
pub trait ToolObserver: Send + Sync {
    fn on_event(&self, event: &ToolEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ToolObserver for NoopObserver {
    fn on_event(&self, _event: &ToolEvent) {}
}

/// Shared handle to the no-op observer.
pub fn noop() -> Arc<dyn ToolObserver> {
    Arc::new(NoopObserver)
}

/// Adapts a closure into an observer.
pub struct FnObserver<F>(pub F);

impl<F> ToolObserver for FnObserver<F>
where
    F: Fn(&ToolEvent) + Send + Sync,
{
    fn on_event(&self, event: &ToolEvent) {
        (self.0)(event)
    }
}

/// Forwards each event to several observers, in insertion order.
#[derive(Default, Clone)]
pub struct Observers {
    inner: Vec<Arc<dyn ToolObserver>>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, observer: Arc<dyn ToolObserver>) -> Self {
        self.inner.push(observer);
        self
    }
}

impl ToolObserver for Observers {
    fn on_event(&self, event: &ToolEvent) {
        for observer in &self.inner {
            observer.on_event(event);
        }
    }
}

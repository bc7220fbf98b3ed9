//! Tool and tool host traits.

use std::future::Future;

use serde::Serialize;
use serde_json::Value;

use super::events::{InvocationId, ToolEvent, ToolEventKind, ToolObserver};
use super::schema::{FieldSpec, SchemaError, json_schema};
use super::{ToolCall, ToolError, ToolResult, ToolSpec};

/// A schema-validated, single-purpose unit the orchestrator can call.
///
/// Implementors supply the description, the schema, input parsing, and the
/// side-effecting [`invoke`](Tool::invoke). [`run`](Tool::run) ties them
/// together: it validates first, so malformed input never reaches `invoke`.
pub trait Tool: Send + Sync {
    /// Validated request type.
    type Input: Send;
    /// Success payload.
    type Output: Serialize + Send;

    /// Capability name used for tool selection.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn input_schema(&self) -> &'static [FieldSpec];

    /// Turn raw JSON into a typed request. Pure and synchronous.
    fn parse_input(&self, input: &Value) -> Result<Self::Input, SchemaError>;

    /// Perform the lookup for an already validated request.
    fn invoke(
        &self,
        input: Self::Input,
    ) -> impl Future<Output = Result<Self::Output, ToolError>> + Send;

    fn observer(&self) -> &dyn ToolObserver;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: json_schema(self.input_schema()),
        }
    }

    /// Validate `input`, invoke the tool, and report the lifecycle.
    fn run(&self, input: &Value) -> impl Future<Output = Result<Self::Output, ToolError>> + Send {
        async move { self.run_traced(input).await.map(|(output, _)| output) }
    }

    /// Like [`run`](Tool::run), with the payload rendered as JSON.
    fn run_json(&self, input: &Value) -> impl Future<Output = Result<Value, ToolError>> + Send {
        async move { self.run_traced(input).await.map(|(_, json)| json) }
    }

    /// Shared body of [`run`](Tool::run) and [`run_json`](Tool::run_json).
    ///
    /// The payload is rendered once, and the same JSON goes to the observer
    /// and the caller. A payload without a JSON form fails the invocation
    /// with [`ErrorKind::Internal`](super::ErrorKind::Internal).
    fn run_traced(
        &self,
        input: &Value,
    ) -> impl Future<Output = Result<(Self::Output, Value), ToolError>> + Send {
        async move {
            let invocation = InvocationId::new();
            self.emit(
                invocation,
                ToolEventKind::Start {
                    input: input.clone(),
                },
            );

            let result = match self.parse_input(input) {
                Ok(request) => self.invoke(request).await,
                Err(e) => Err(ToolError::from(e)),
            }
            .and_then(|output| match serde_json::to_value(&output) {
                Ok(json) => Ok((output, json)),
                Err(e) => Err(ToolError::output(self.name(), e.to_string())),
            });

            let kind = match &result {
                Ok((_, json)) => ToolEventKind::Success {
                    output: json.clone(),
                },
                Err(e) => ToolEventKind::Error {
                    kind: e.kind(),
                    message: e.to_string(),
                },
            };
            self.emit(invocation, kind);

            result
        }
    }

    fn emit(&self, invocation: InvocationId, kind: ToolEventKind) {
        self.observer()
            .on_event(&ToolEvent::new(invocation, self.name(), kind));
    }
}

/// Trait for tool execution hosts.
///
/// A host maps capability names to tools. This is the boundary between the
/// orchestrator loop and side effects.
pub trait ToolHost: Send + Sync {
    /// Get available tool specifications.
    fn specs(&self) -> &[ToolSpec];

    /// Execute a tool call.
    fn execute(&self, call: &ToolCall) -> impl Future<Output = Result<Value, ToolError>> + Send;

    /// Execute a tool call and pair the outcome with its call id.
    fn dispatch(&self, call: ToolCall) -> impl Future<Output = ToolResult> + Send {
        async move {
            match self.execute(&call).await {
                Ok(output) => ToolResult::success(call.id, output),
                Err(e) => ToolResult::failure(call.id, &e),
            }
        }
    }
}

//! Flightdesk runtime — the contract between tools and their orchestrator.
//!
//! This crate defines what it means to be a tool: a named capability with a
//! natural-language description, a declared input schema, an async `run`
//! entry point, and lifecycle events reported to an injected observer.
//!
//! # Overview
//!
//! - **Tool**: validates raw JSON into a typed request, performs one side
//!   effect, and returns a payload or a [`ToolError`].
//! - **ToolHost**: maps capability names to tools and turns tool calls into
//!   [`ToolResult`]s for the orchestrator.
//! - **ToolObserver**: receives `start`, `success`, and `error` events for
//!   every invocation.
//! - **ErrorKind**: tag that separates validation failures from upstream
//!   outages and missing entities.
//!
//! # Example
//!
//! ```ignore
//! use runtime::{Tool, ToolCall, ToolHost};
//! use serde_json::json;
//!
//! # async fn example(host: impl ToolHost) {
//! for spec in host.specs() {
//!     println!("{}: {}", spec.name, spec.description);
//! }
//!
//! let call = ToolCall::new("AirlineStatus", json!({ "ident": "AA777" }));
//! let result = host.dispatch(call).await;
//! println!("{}", serde_json::to_string_pretty(&result).unwrap());
//! # }
//! ```

pub mod tools;

pub use tools::{
    ErrorKind, FieldSpec, InvocationId, LookupFailure, NoopObserver, SchemaError, Tool, ToolCall,
    ToolError, ToolEvent, ToolEventKind, ToolHost, ToolObserver, ToolOutcome, ToolResult,
    ToolSpec,
};

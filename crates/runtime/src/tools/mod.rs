//! Tool contract shared by every tool and host.

pub mod errors;
pub mod events;
pub mod schema;
mod tool;
mod types;

pub use errors::{ErrorKind, LookupFailure, ToolError};
pub use events::{
    FnObserver, InvocationId, NoopObserver, Observers, ToolEvent, ToolEventKind, ToolObserver,
};
pub use schema::{FieldKind, FieldSpec, Fields, SchemaError};
pub use tool::{Tool, ToolHost};
pub use types::{ToolCall, ToolOutcome, ToolResult, ToolSpec};

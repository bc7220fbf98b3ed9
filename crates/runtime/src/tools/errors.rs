use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::schema::SchemaError;

/// Coarse classification of a tool failure.
///
/// Callers branch on this instead of matching error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input did not match the tool's schema. No request was made.
    Validation,
    /// Upstream answered 404 for the requested entity.
    NotFound,
    /// Upstream could not be reached or answered with a non-2xx status.
    UpstreamUnavailable,
    /// Upstream answered 2xx but the body could not be decoded.
    MalformedResponse,
    /// No tool is registered under the requested name.
    UnknownTool,
    /// The tool produced a payload it cannot render as JSON.
    Internal,
}

/// Why an upstream lookup produced no payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "failure", rename_all = "snake_case")]
pub enum LookupFailure {
    #[error("transport: {message}")]
    Transport { message: String },
    #[error("upstream returned HTTP {status}")]
    Status { status: u16 },
    #[error("undecodable body: {message}")]
    Decode { message: String },
}

impl LookupFailure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Status { status: 404 } => ErrorKind::NotFound,
            Self::Transport { .. } | Self::Status { .. } => ErrorKind::UpstreamUnavailable,
            Self::Decode { .. } => ErrorKind::MalformedResponse,
        }
    }
}

/// Errors that can occur during tool execution.
///
/// `Lookup` renders only its public message. The underlying
/// [`LookupFailure`] stays reachable through [`ToolError::kind`] and
/// [`std::error::Error::source`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("tool not found: {name}")]
    UnknownTool { name: String },
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("{message}")]
    Lookup {
        message: String,
        #[source]
        cause: LookupFailure,
    },
    #[error("{tool}: payload has no JSON form: {message}")]
    Output { tool: String, message: String },
}

impl ToolError {
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool { name: name.into() }
    }

    pub fn lookup(message: impl Into<String>, cause: LookupFailure) -> Self {
        Self::Lookup {
            message: message.into(),
            cause,
        }
    }

    pub fn output(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Output {
            tool: tool.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownTool { .. } => ErrorKind::UnknownTool,
            Self::Output { .. } => ErrorKind::Internal,
            Self::Schema(_) => ErrorKind::Validation,
            Self::Lookup { cause, .. } => cause.kind(),
        }
    }
}

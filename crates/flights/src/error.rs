use thiserror::Error;

/// Errors raised while configuring flight tools.
///
/// Lookup failures are not represented here; they surface as
/// [`runtime::ToolError`] from the tools themselves.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The upstream base URL is unusable.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

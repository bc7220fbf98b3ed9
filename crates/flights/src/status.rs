//! Flight status lookup (`AirlineStatus`).

use std::sync::Arc;

use reqwest::Url;
use runtime::tools::Fields;
use runtime::{FieldSpec, SchemaError, Tool, ToolError, ToolObserver};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::{BaseUrl, FlightApi};

/// Capability name of the status tool.
pub const STATUS_TOOL: &str = "AirlineStatus";

const DESCRIPTION: &str = "If you provide the flight identification, this tool will return the flight status and destination info";

const SCHEMA: &[FieldSpec] = &[FieldSpec::non_empty_string(
    "ident",
    "Flight identifier, airline code plus flight number (e.g. AA777)",
)];

/// Validated input for a status lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRequest {
    pub ident: String,
}

impl StatusRequest {
    pub fn new(ident: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
        }
    }

    pub fn parse(input: &Value) -> Result<Self, SchemaError> {
        let mut fields = Fields::of(input)?;
        let ident = fields.non_empty_string("ident");
        fields.finish(ident.map(Self::new))
    }
}

/// `{base}/flights/{ident}`
pub fn status_url(base: &BaseUrl, request: &StatusRequest) -> Url {
    base.join(["flights", request.ident.as_str()])
}

/// Reported state of a flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlightState {
    Scheduled,
    Departed,
    Arrived,
    Delayed,
    Cancelled,
    /// Any other value, kept verbatim.
    Other(String),
}

impl From<&str> for FlightState {
    fn from(s: &str) -> Self {
        match s {
            "Scheduled" => Self::Scheduled,
            "Departed" => Self::Departed,
            "Arrived" => Self::Arrived,
            "Delayed" => Self::Delayed,
            "Cancelled" => Self::Cancelled,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Status, route and schedule of one flight, exactly as the backend sent it.
///
/// The body is kept whole so that fields and values added upstream reach
/// the caller unchanged. The accessors are a read-only view over the
/// commonly used fields and return `None` when a field is absent or has an
/// unexpected type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightStatus(Value);

impl FlightStatus {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn ident(&self) -> Option<&str> {
        self.0.get("ident")?.as_str()
    }

    pub fn state(&self) -> Option<FlightState> {
        self.0.get("status")?.as_str().map(FlightState::from)
    }

    /// Airport code of the origin.
    pub fn origin(&self) -> Option<&str> {
        self.airport_code("origin")
    }

    /// Airport code of the destination.
    pub fn destination(&self) -> Option<&str> {
        self.airport_code("destination")
    }

    fn airport_code(&self, end: &str) -> Option<&str> {
        self.0.get(end)?.get("code")?.as_str()
    }
}

/// Looks up the current status of a flight by its identifier.
pub struct AirlineStatusTool {
    api: FlightApi,
    observer: Arc<dyn ToolObserver>,
}

impl AirlineStatusTool {
    pub fn new(api: FlightApi, observer: Arc<dyn ToolObserver>) -> Self {
        Self { api, observer }
    }
}

impl Tool for AirlineStatusTool {
    type Input = StatusRequest;
    type Output = FlightStatus;

    fn name(&self) -> &str {
        STATUS_TOOL
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn input_schema(&self) -> &'static [FieldSpec] {
        SCHEMA
    }

    fn parse_input(&self, input: &Value) -> Result<StatusRequest, SchemaError> {
        StatusRequest::parse(input)
    }

    async fn invoke(&self, request: StatusRequest) -> Result<FlightStatus, ToolError> {
        let url = status_url(self.api.base(), &request);
        self.api.get_json(url).await.map_err(|failure| {
            warn!(tool = STATUS_TOOL, ident = %request.ident, error = %failure, "status lookup failed");
            ToolError::lookup(format!("({}) does not exist!", request.ident), failure)
        })
    }

    fn observer(&self) -> &dyn ToolObserver {
        self.observer.as_ref()
    }
}

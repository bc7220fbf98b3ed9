//! Flight lookup tools backed by a REST backend.
//!
//! Two independent tools, each a thin adapter from validated input to one
//! HTTP GET:
//!
//! - [`AirlineStatusTool`] (`AirlineStatus`): status, route and schedule of
//!   a flight, keyed by its identifier.
//! - [`FlightCostLookupTool`] (`FlightCostLookup`): itinerary pricing for a
//!   trip, always in USD.
//!
//! [`FlightToolHost`] exposes both to an orchestrator by capability name.
//!
//! # Example
//!
//! ```no_run
//! use flights::{BaseUrl, DEFAULT_BASE_URL, FlightApi, FlightToolHost};
//! use runtime::tools::events::noop;
//! use runtime::{ToolCall, ToolHost};
//! use serde_json::json;
//!
//! # async fn example() -> flights::Result<()> {
//! let api = FlightApi::new(BaseUrl::parse(DEFAULT_BASE_URL)?);
//! let host = FlightToolHost::new(api, noop());
//!
//! let call = ToolCall::new("AirlineStatus", json!({ "ident": "AA777" }));
//! let result = host.dispatch(call).await;
//! println!("{result:?}");
//! # Ok(())
//! # }
//! ```

mod api;
pub mod cost;
mod error;
mod host;
pub mod status;
#[cfg(test)]
mod stub;

pub use api::{BaseUrl, DEFAULT_BASE_URL, FlightApi};
pub use cost::{COST_TOOL, CostRequest, FlightCost, FlightCostLookupTool, cost_url};
pub use error::{Error, Result};
pub use host::FlightToolHost;
pub use status::{AirlineStatusTool, FlightStatus, STATUS_TOOL, StatusRequest, status_url};

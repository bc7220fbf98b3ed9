//! Tool host that exposes both flight tools by capability name.

use std::sync::Arc;

use runtime::{Tool, ToolCall, ToolError, ToolHost, ToolObserver, ToolSpec};
use serde_json::Value;

use crate::cost::{COST_TOOL, FlightCostLookupTool};
use crate::status::{AirlineStatusTool, STATUS_TOOL};
use crate::FlightApi;

/// Routes tool calls to the status and cost tools.
pub struct FlightToolHost {
    status: AirlineStatusTool,
    cost: FlightCostLookupTool,
    specs: Vec<ToolSpec>,
}

impl FlightToolHost {
    /// Build both tools against one backend, reporting to one observer.
    pub fn new(api: FlightApi, observer: Arc<dyn ToolObserver>) -> Self {
        let status = AirlineStatusTool::new(api.clone(), Arc::clone(&observer));
        let cost = FlightCostLookupTool::new(api, observer);
        let specs = vec![status.spec(), cost.spec()];
        Self {
            status,
            cost,
            specs,
        }
    }

    pub fn status(&self) -> &AirlineStatusTool {
        &self.status
    }

    pub fn cost(&self) -> &FlightCostLookupTool {
        &self.cost
    }
}

impl ToolHost for FlightToolHost {
    fn specs(&self) -> &[ToolSpec] {
        &self.specs
    }

    async fn execute(&self, call: &ToolCall) -> Result<Value, ToolError> {
        match call.name.as_str() {
            STATUS_TOOL => self.status.run_json(&call.input).await,
            COST_TOOL => self.cost.run_json(&call.input).await,
            other => Err(ToolError::unknown_tool(other)),
        }
    }
}

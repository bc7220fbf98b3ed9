//! Flight cost lookup (`FlightCostLookup`).

use std::sync::Arc;

use reqwest::Url;
use runtime::tools::Fields;
use runtime::{FieldSpec, SchemaError, Tool, ToolError, ToolObserver};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::warn;

use crate::{BaseUrl, FlightApi};

/// Capability name of the cost tool.
pub const COST_TOOL: &str = "FlightCostLookup";

/// Prices are always requested in this currency.
pub const CURRENCY: &str = "USD";

/// Message for every failed cost lookup. It does not say whether the
/// input or the backend was at fault; [`ToolError::kind`] does.
pub const COST_LOOKUP_FAILED: &str = "Invalid input schema.";

const DESCRIPTION: &str = "This tool will look up the cost and other information about flights you might want to book based on your details. Don't assume the missing details and ask the user for the details if missing.";

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::string("departure_airport_code", "IATA code of the departure airport"),
    FieldSpec::string("arrival_airport_code", "IATA code of the arrival airport"),
    FieldSpec::string("departure_date", "Departure date as YYYY-MM-DD"),
    FieldSpec::number("number_of_adults", "Number of adult passengers"),
    FieldSpec::number("number_of_children", "Number of child passengers"),
    FieldSpec::number("number_of_infants", "Number of infant passengers"),
    FieldSpec::number("cabin_class", "Cabin class code, e.g. 1 for economy"),
];

/// Validated input for a cost lookup.
///
/// Only types are checked. Counts and the cabin class keep the exact JSON
/// number they were given; ranges and airport codes are left to the
/// backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRequest {
    pub departure_airport_code: String,
    pub arrival_airport_code: String,
    pub departure_date: String,
    pub number_of_adults: Number,
    pub number_of_children: Number,
    pub number_of_infants: Number,
    pub cabin_class: Number,
}

impl CostRequest {
    pub fn parse(input: &Value) -> Result<Self, SchemaError> {
        let mut fields = Fields::of(input)?;
        let departure_airport_code = fields.string("departure_airport_code");
        let arrival_airport_code = fields.string("arrival_airport_code");
        let departure_date = fields.string("departure_date");
        let number_of_adults = fields.number("number_of_adults");
        let number_of_children = fields.number("number_of_children");
        let number_of_infants = fields.number("number_of_infants");
        let cabin_class = fields.number("cabin_class");

        let request = (|| {
            Some(Self {
                departure_airport_code: departure_airport_code?,
                arrival_airport_code: arrival_airport_code?,
                departure_date: departure_date?,
                number_of_adults: number_of_adults?,
                number_of_children: number_of_children?,
                number_of_infants: number_of_infants?,
                cabin_class: cabin_class?,
            })
        })();
        fields.finish(request)
    }
}

/// `{base}/cost/{departure}/{arrival}/{date}/{adults}/{children}/{infants}/{cabin_class}/USD`
pub fn cost_url(base: &BaseUrl, request: &CostRequest) -> Url {
    let adults = request.number_of_adults.to_string();
    let children = request.number_of_children.to_string();
    let infants = request.number_of_infants.to_string();
    let cabin_class = request.cabin_class.to_string();

    base.join([
        "cost",
        request.departure_airport_code.as_str(),
        request.arrival_airport_code.as_str(),
        request.departure_date.as_str(),
        adults.as_str(),
        children.as_str(),
        infants.as_str(),
        cabin_class.as_str(),
        CURRENCY,
    ])
}

/// Itineraries, legs and segments matching one trip query, exactly as the
/// backend sent them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightCost(Value);

impl FlightCost {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Priced itineraries. Empty when the field is absent or not an array.
    pub fn itineraries(&self) -> &[Value] {
        self.0
            .get("itineraries")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Looks up itinerary pricing for a trip.
pub struct FlightCostLookupTool {
    api: FlightApi,
    observer: Arc<dyn ToolObserver>,
}

impl FlightCostLookupTool {
    pub fn new(api: FlightApi, observer: Arc<dyn ToolObserver>) -> Self {
        Self { api, observer }
    }
}

impl Tool for FlightCostLookupTool {
    type Input = CostRequest;
    type Output = FlightCost;

    fn name(&self) -> &str {
        COST_TOOL
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn input_schema(&self) -> &'static [FieldSpec] {
        SCHEMA
    }

    fn parse_input(&self, input: &Value) -> Result<CostRequest, SchemaError> {
        CostRequest::parse(input)
    }

    async fn invoke(&self, request: CostRequest) -> Result<FlightCost, ToolError> {
        let url = cost_url(self.api.base(), &request);
        self.api.get_json(url).await.map_err(|failure| {
            warn!(
                tool = COST_TOOL,
                from = %request.departure_airport_code,
                to = %request.arrival_airport_code,
                date = %request.departure_date,
                error = %failure,
                "cost lookup failed"
            );
            ToolError::lookup(COST_LOOKUP_FAILED, failure)
        })
    }

    fn observer(&self) -> &dyn ToolObserver {
        self.observer.as_ref()
    }
}

//! Declarative input schemas and validation.
//!
//! A tool declares its input as a static list of [`FieldSpec`]s. The same
//! list renders the JSON Schema shown to the orchestrator and names the
//! fields that [`Fields`] reads when turning raw JSON into a typed request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value, json};
use thiserror::Error;

/// Type constraint on a single input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    NonEmptyString,
    Number,
}

impl FieldKind {
    fn json_type(self) -> &'static str {
        match self {
            Self::String | Self::NonEmptyString => "string",
            Self::Number => "number",
        }
    }
}

/// One required input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
}

impl FieldSpec {
    pub const fn string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::String,
            description,
        }
    }

    pub const fn non_empty_string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::NonEmptyString,
            description,
        }
    }

    pub const fn number(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Number,
            description,
        }
    }
}

/// Render a field list as a JSON Schema object. Every field is required.
pub fn json_schema(fields: &[FieldSpec]) -> Value {
    let properties: Map<String, Value> = fields
        .iter()
        .map(|field| {
            let mut property = json!({
                "type": field.kind.json_type(),
                "description": field.description,
            });
            if field.kind == FieldKind::NonEmptyString {
                property["minLength"] = json!(1);
            }
            (field.name.to_string(), property)
        })
        .collect();
    let required: Vec<&str> = fields.iter().map(|f| f.name).collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// What is wrong with one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "problem", rename_all = "snake_case")]
pub enum Problem {
    Missing,
    WrongType { expected: String, found: String },
    Empty,
}

/// A field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    #[serde(flatten)]
    pub problem: Problem,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.problem {
            Problem::Missing => write!(f, "`{}` is required", self.field),
            Problem::WrongType { expected, found } => {
                write!(f, "`{}` must be a {expected}, got {found}", self.field)
            }
            Problem::Empty => write!(f, "`{}` must not be empty", self.field),
        }
    }
}

/// Input rejected before any network I/O.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SchemaError {
    #[error("invalid input: expected a JSON object, got {found}")]
    NotAnObject { found: String },
    #[error("invalid input: {}", join(.fields))]
    Fields { fields: Vec<FieldError> },
}

impl SchemaError {
    /// Names of the offending fields, in schema order.
    pub fn field_names(&self) -> Vec<&str> {
        match self {
            Self::NotAnObject { .. } => Vec::new(),
            Self::Fields { fields } => fields.iter().map(|e| e.field.as_str()).collect(),
        }
    }
}

fn join(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reads typed fields out of one JSON object, collecting every problem.
///
/// ```
/// use runtime::tools::schema::Fields;
/// use serde_json::json;
///
/// let input = json!({ "ident": "AA777" });
/// let mut fields = Fields::of(&input)?;
/// let ident = fields.non_empty_string("ident");
/// assert_eq!(fields.finish(ident)?, "AA777");
/// # Ok::<(), runtime::tools::SchemaError>(())
/// ```
#[derive(Debug)]
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> Fields<'a> {
    pub fn of(input: &'a Value) -> Result<Self, SchemaError> {
        match input {
            Value::Object(map) => Ok(Self {
                map,
                errors: Vec::new(),
            }),
            other => Err(SchemaError::NotAnObject {
                found: type_name(other).to_string(),
            }),
        }
    }

    pub fn string(&mut self, name: &str) -> Option<String> {
        match self.require(name)? {
            Value::String(s) => Some(s.clone()),
            other => self.wrong_type(name, "string", other),
        }
    }

    /// A string that is not empty once surrounding whitespace is trimmed.
    pub fn non_empty_string(&mut self, name: &str) -> Option<String> {
        let value = self.string(name)?;
        if value.trim().is_empty() {
            self.reject(name, Problem::Empty);
            return None;
        }
        Some(value)
    }

    pub fn number(&mut self, name: &str) -> Option<Number> {
        match self.require(name)? {
            Value::Number(n) => Some(n.clone()),
            other => self.wrong_type(name, "number", other),
        }
    }

    /// Yield the typed request, or every recorded problem.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, SchemaError> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(SchemaError::Fields {
                fields: self.errors,
            }),
        }
    }

    fn require(&mut self, name: &str) -> Option<&'a Value> {
        let value = self.map.get(name);
        if value.is_none() {
            self.reject(name, Problem::Missing);
        }
        value
    }

    fn wrong_type<T>(&mut self, name: &str, expected: &str, found: &Value) -> Option<T> {
        self.reject(
            name,
            Problem::WrongType {
                expected: expected.to_string(),
                found: type_name(found).to_string(),
            },
        );
        None
    }

    fn reject(&mut self, name: &str, problem: Problem) {
        self.errors.push(FieldError {
            field: name.to_string(),
            problem,
        });
    }
}

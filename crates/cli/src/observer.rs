//! Console rendering of tool lifecycle events.

use chrono::Local;
use runtime::{ToolEvent, ToolEventKind, ToolObserver};
use tracing::debug;

const MAX_VALUE_CHARS: usize = 200;

/// Prints every tool event to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleObserver;

impl ToolObserver for ConsoleObserver {
    fn on_event(&self, event: &ToolEvent) {
        let time = event.at.with_timezone(&Local).format("%H:%M:%S");
        println!("[{time}] {}", render(event));
    }
}

/// Logs every tool event at `debug` level, keyed by invocation.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ToolObserver for TracingObserver {
    fn on_event(&self, event: &ToolEvent) {
        match &event.kind {
            ToolEventKind::Error { kind, message } => debug!(
                invocation = %event.invocation,
                tool = %event.tool,
                ?kind,
                message = %message,
                "tool error"
            ),
            _ => debug!(
                invocation = %event.invocation,
                tool = %event.tool,
                phase = event.phase(),
                "tool event"
            ),
        }
    }
}

/// `Agent 🤖 (tool:phase) : value`, with long values truncated.
pub fn render(event: &ToolEvent) -> String {
    let value = match &event.kind {
        ToolEventKind::Start { input } => input.to_string(),
        ToolEventKind::Success { output } => output.to_string(),
        ToolEventKind::Error { kind, message } => format!("{message} [{kind:?}]"),
    };
    format!(
        "Agent 🤖 ({}:{}) : {}",
        event.tool,
        event.phase(),
        truncate(&value, MAX_VALUE_CHARS)
    )
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runtime::{ErrorKind, InvocationId};
    use serde_json::json;

    #[test]
    fn renders_start() {
        let event = ToolEvent::new(
            InvocationId::new(),
            "AirlineStatus",
            ToolEventKind::Start {
                input: json!({ "ident": "AA777" }),
            },
        );
        assert_eq!(
            render(&event),
            r#"Agent 🤖 (AirlineStatus:start) : {"ident":"AA777"}"#
        );
    }

    #[test]
    fn renders_error_with_kind() {
        let event = ToolEvent::new(
            InvocationId::new(),
            "FlightCostLookup",
            ToolEventKind::Error {
                kind: ErrorKind::UpstreamUnavailable,
                message: "Invalid input schema.".into(),
            },
        );
        assert_eq!(
            render(&event),
            "Agent 🤖 (FlightCostLookup:error) : Invalid input schema. [UpstreamUnavailable]"
        );
    }

    #[test]
    fn fan_out_includes_tracing() {
        let observers = runtime::tools::Observers::new()
            .with(std::sync::Arc::new(TracingObserver))
            .with(std::sync::Arc::new(ConsoleObserver));
        observers.on_event(&ToolEvent::new(
            InvocationId::new(),
            "AirlineStatus",
            ToolEventKind::Error {
                kind: ErrorKind::NotFound,
                message: "(ZZ999) does not exist!".into(),
            },
        ));
    }

    #[test]
    fn truncates_on_char_boundary() {
        let long = "✈".repeat(250);
        let cut = truncate(&long, MAX_VALUE_CHARS);
        assert_eq!(cut.chars().count(), MAX_VALUE_CHARS + 3);
        assert!(cut.ends_with("..."));
        assert_eq!(truncate("short", MAX_VALUE_CHARS), "short");
    }
}

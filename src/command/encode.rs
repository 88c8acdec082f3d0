use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{BridgeError, BridgeResult};

use super::types::ViewCommand;

/// How structured arguments cross into native code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgEncoding {
    /// Command queue accepts JSON values as-is.
    Structured,
    /// Keyed RPC accepts scalars only; structures become one JSON string.
    JsonString,
}

/// Positional native arguments for `command`, excluding the view reference.
pub fn encode_args(command: &ViewCommand, encoding: ArgEncoding) -> BridgeResult<Vec<Value>> {
    let name = command.id().as_str();
    let args = match command {
        ViewCommand::EnterAnnotationCreationMode { annotation_type } => {
            vec![optional_string(annotation_type.as_deref())]
        }
        ViewCommand::ExitCurrentlyActiveMode
        | ViewCommand::ClearSelectedAnnotations
        | ViewCommand::GetMeasurementValueConfigurations
        | ViewCommand::GetConfiguration
        | ViewCommand::DestroyView => Vec::new(),
        ViewCommand::SelectAnnotations {
            annotations,
            show_context_menu,
        } => vec![
            structured(annotations, encoding, name)?,
            Value::Bool(*show_context_menu),
        ],
        ViewCommand::SetPageIndex { index, animated } => {
            vec![Value::from(*index), Value::Bool(*animated)]
        }
        ViewCommand::SetToolbar { toolbar } => vec![structured(toolbar, encoding, name)?],
        ViewCommand::GetToolbar { view_mode } => {
            vec![optional_string(view_mode.map(|mode| mode.as_str()))]
        }
        ViewCommand::SetMeasurementValueConfigurations { configurations } => {
            vec![structured(configurations, encoding, name)?]
        }
        ViewCommand::SetExcludedAnnotations { annotation_ids } => {
            vec![structured(annotation_ids, encoding, name)?]
        }
        ViewCommand::SetUserInterfaceVisible { visible } => vec![Value::Bool(*visible)],
    };
    Ok(args)
}

fn optional_string(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |value| Value::String(value.to_string()))
}

fn structured<T: Serialize + ?Sized>(
    value: &T,
    encoding: ArgEncoding,
    command: &str,
) -> BridgeResult<Value> {
    let encoded = match encoding {
        ArgEncoding::Structured => serde_json::to_value(value),
        ArgEncoding::JsonString => serde_json::to_string(value).map(Value::String),
    };
    encoded.map_err(|source| {
        BridgeError::serialization(source, format!("failed to encode arguments for {command}"))
    })
}

/// Decodes a native result that may arrive as a value or as a JSON string.
pub fn decode_result<T: DeserializeOwned>(value: Value, command: &str) -> BridgeResult<T> {
    let decoded = match value {
        Value::String(text) => serde_json::from_str(&text),
        other => serde_json::from_value(other),
    };
    decoded.map_err(|source| {
        BridgeError::serialization(source, format!("unexpected result from {command}"))
    })
}

pub fn decode_bool(value: Value, command: &str) -> BridgeResult<bool> {
    match value {
        Value::Bool(flag) => Ok(flag),
        other => Err(BridgeError::native(
            Some("INVALID_RESULT"),
            format!("{command} resolved with {other} instead of a boolean"),
        )),
    }
}

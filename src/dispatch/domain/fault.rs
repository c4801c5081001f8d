//! Mapping from dispatch failures to JSON-RPC 2.0 error objects.

use super::DispatchError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A JSON-RPC error object ready for a transport to serialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcFault {
    /// Stable fault code.
    pub code: i64,
    /// Short fault message.
    pub message: String,
    /// Optional structured detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcFault {
    /// The method does not exist.
    pub const METHOD_NOT_FOUND: i64 = -32_601;
    /// Invalid method parameters.
    pub const INVALID_PARAMS: i64 = -32_602;
    /// Internal server error.
    pub const INTERNAL_ERROR: i64 = -32_603;

    /// Creates a fault without detail.
    #[must_use]
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Builds a fault that also carries the error's diagnostic detail.
    ///
    /// Argument failures list every failing parameter with its violations;
    /// other kinds carry the error text.
    #[must_use]
    pub fn with_diagnostics(error: &DispatchError) -> Self {
        let mut fault = Self::from(error);
        fault.data = match error {
            DispatchError::Argument(argument) => Some(json!({
                "method": argument.method().as_str(),
                "parameters": argument
                    .failures()
                    .map(|failure| json!({
                        "parameter": failure.parameter,
                        "position": failure.position,
                        "violations": failure.violations,
                    }))
                    .collect::<Vec<_>>(),
            })),
            DispatchError::Handler(handler) => handler.data.clone(),
            DispatchError::Resolution(_)
            | DispatchError::Configuration(_)
            | DispatchError::MissingArgument(_) => Some(Value::String(error.to_string())),
        };
        fault
    }
}

impl From<&DispatchError> for RpcFault {
    fn from(error: &DispatchError) -> Self {
        match error {
            DispatchError::Resolution(_) => Self::new(Self::METHOD_NOT_FOUND, "Method not found"),
            DispatchError::Argument(_) | DispatchError::MissingArgument(_) => {
                Self::new(Self::INVALID_PARAMS, "Invalid params")
            }
            DispatchError::Configuration(_) => Self::new(Self::INTERNAL_ERROR, "Internal error"),
            DispatchError::Handler(handler) => Self {
                code: handler.code,
                message: handler.message.clone(),
                data: handler.data.clone(),
            },
        }
    }
}

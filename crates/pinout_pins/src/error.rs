//! Errors raised while parsing pin expressions or resolving connector pins.

/// Errors produced by the pin expression parser and the connector registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PinError {
    /// A pin expression or one of its tokens could not be classified.
    #[error("malformed pin expression '{expression}': {reason}")]
    MalformedPinExpression {
        /// The offending expression or token.
        expression: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A connector reference names a connector that is not registered.
    #[error("unknown connector '{0}'")]
    UnknownConnector(String),

    /// A connector reference indexes past the end of the connector.
    #[error("index {index} out of range for connector '{connector}' with {len} pins")]
    ConnectorIndexOutOfRange {
        /// The connector name.
        connector: String,
        /// The requested index.
        index: usize,
        /// The number of pins on the connector.
        len: usize,
    },

    /// A connector with the same name is already registered.
    #[error("connector '{0}' is already defined")]
    DuplicateConnector(String),
}

impl PinError {
    pub(crate) fn malformed(expression: impl Into<String>, reason: &'static str) -> Self {
        PinError::MalformedPinExpression {
            expression: expression.into(),
            reason,
        }
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;

#[derive(thiserror::Error, Debug)]
pub enum BridgeError {
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },
    #[error("JSON serialization failed: {context}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        context: String,
    },
    #[error("invalid config: {0}")]
    Config(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("page index {index} is out of range for a document with {page_count} pages")]
    PageIndexOutOfRange { index: i64, page_count: u32 },
    #[error("invalid measurement value configuration: {0}")]
    InvalidMeasurement(String),
    #[error("native view handle is not available yet")]
    NativeHandleUnavailable,
    #[error("view was destroyed")]
    ViewDestroyed,
    #[error("notification center was torn down")]
    NotificationCenterClosed,
    #[error("native operation failed: {message}")]
    Native {
        code: Option<String>,
        message: String,
    },
}

impl From<std::io::Error> for BridgeError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            context: "I/O operation failed".to_string(),
        }
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization {
            source,
            context: "JSON conversion failed".to_string(),
        }
    }
}

impl BridgeError {
    pub fn io_with_context(source: std::io::Error, context: impl Into<String>) -> Self {
        Self::Io {
            source,
            context: context.into(),
        }
    }

    pub fn serialization(source: serde_json::Error, context: impl Into<String>) -> Self {
        Self::Serialization {
            source,
            context: context.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn invalid_measurement(message: impl Into<String>) -> Self {
        Self::InvalidMeasurement(message.into())
    }

    /// Error reported by the native SDK. Carried to the caller as-is.
    pub fn native(code: Option<&str>, message: impl Into<String>) -> Self {
        Self::Native {
            code: code.map(str::to_string),
            message: message.into(),
        }
    }

    /// True for errors raised by this layer before any native call was made.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_)
                | Self::PageIndexOutOfRange { .. }
                | Self::InvalidMeasurement(_)
                | Self::ViewDestroyed
                | Self::NotificationCenterClosed
        )
    }
}

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorCode {
    InputNotFound,
    MalformedRecord,
    Decode,
    Encode,
    Io,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code:?}: {message}")]
pub struct CoreError {
    pub code: CoreErrorCode,
    pub message: String,
}

impl CoreError {
    pub fn new(code: CoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(CoreErrorCode::MalformedRecord, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(CoreErrorCode::Decode, message)
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClassboardError {
    /// Short, stable error code for logs and CLI exit messages.
    pub fn code(&self) -> &'static str {
        match self {
            ClassboardError::Config(_) => "CONFIG_ERROR",
            ClassboardError::Serialization(_) => "SERIALIZATION_ERROR",
            ClassboardError::Io(_) => "IO_ERROR",
            ClassboardError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, ClassboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ClassboardError::Config("x".into()).code(), "CONFIG_ERROR");
        assert_eq!(ClassboardError::Internal("x".into()).code(), "INTERNAL_ERROR");

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(ClassboardError::from(io).code(), "IO_ERROR");
    }

    #[test]
    fn serde_error_converts() {
        let err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let wrapped: ClassboardError = err.into();
        assert_eq!(wrapped.code(), "SERIALIZATION_ERROR");
        assert!(wrapped.to_string().starts_with("Serialization error"));
    }
}

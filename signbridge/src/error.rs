/// Error types for catalog loading and sign translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignError {
    /// Media directory could not be read while building the catalog or letter index
    CatalogIo(String),
    /// Word-vector table could not be read or is malformed
    Embedding(String),
    /// Request text is missing or empty
    InvalidInput(String),
    /// Input produced no sign clips at all
    NoMatch(String),
    /// Invalid startup configuration
    Config(String),
    /// Unexpected failure while segmenting a request
    Internal(String),
}

impl std::fmt::Display for SignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignError::CatalogIo(msg) => write!(f, "Catalog I/O error: {}", msg),
            SignError::Embedding(msg) => write!(f, "Embedding error: {}", msg),
            SignError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            SignError::NoMatch(msg) => write!(f, "No sign found: {}", msg),
            SignError::Config(msg) => write!(f, "Configuration error: {}", msg),
            SignError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for SignError {}

/// Result type for sign translation operations
pub type SignResult<T> = Result<T, SignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes_kind() {
        let err = SignError::CatalogIo("no such directory".to_string());
        assert_eq!(err.to_string(), "Catalog I/O error: no such directory");

        let err = SignError::NoMatch("'xyz'".to_string());
        assert_eq!(err.to_string(), "No sign found: 'xyz'");
    }

    #[test]
    fn test_boxes_as_std_error() {
        let boxed: Box<dyn std::error::Error> =
            Box::new(SignError::InvalidInput("Missing 'text' field".to_string()));
        assert!(boxed.to_string().contains("Missing 'text' field"));
    }
}

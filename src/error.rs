//! Error taxonomy for store operations
//!
//! Every failure is terminal per-request and carries a stable,
//! machine-checkable label surfaced verbatim to callers.

/// The main error type for store operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Missing or invalid token
    Authentication(String),
    /// Authenticated but insufficient role
    Permission(String),
    /// Malformed input shape, type, or content
    Validation(String),
    /// Unknown identifier, exact-match only
    NotFound(String),
    /// Referential-integrity or uniqueness violation
    Conflict(String),
    /// Underlying storage or serialization fault
    Storage(String),
}

impl StoreError {
    /// Stable label for the `error` field of API responses
    pub fn label(&self) -> &'static str {
        match self {
            StoreError::Authentication(_) => "Authentication Error",
            StoreError::Permission(_) => "Permission Denied",
            StoreError::Validation(_) => "Input Validation Error",
            StoreError::NotFound(_) => "Requested Content Not Available",
            StoreError::Conflict(_) => "Conflict",
            StoreError::Storage(_) => "Error",
        }
    }

    /// Human-readable detail message
    pub fn message(&self) -> &str {
        match self {
            StoreError::Authentication(m)
            | StoreError::Permission(m)
            | StoreError::Validation(m)
            | StoreError::NotFound(m)
            | StoreError::Conflict(m)
            | StoreError::Storage(m) => m,
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label(), self.message())
    }
}

impl std::error::Error for StoreError {}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Convert any foreign error to a storage fault
pub fn err<E: std::error::Error>(e: E) -> StoreError {
    StoreError::Storage(e.to_string())
}

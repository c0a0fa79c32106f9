//! Error types for Access Gate

use thiserror::Error;

/// Fixed message reported when the permission context is read outside a scope
pub const SCOPE_MISSING_MESSAGE: &str = "use_permissions must be used within a permission scope";

#[derive(Error, Debug)]
pub enum AccessError {
    /// Context access (or a gate) ran with no enclosing permission scope.
    /// This is a programming mistake, never a data condition.
    #[error("use_permissions must be used within a permission scope")]
    ScopeMissing,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid policy YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl AccessError {
    /// True for the usage error raised by context access outside a scope
    pub fn is_scope_missing(&self) -> bool {
        matches!(self, AccessError::ScopeMissing)
    }
}

pub type Result<T> = std::result::Result<T, AccessError>;

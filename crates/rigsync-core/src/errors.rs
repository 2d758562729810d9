use rigsync_core_types::RequestId;
use thiserror::Error;

use crate::scene::{ComponentId, NodeId};

/// Result type alias using SyncError
pub type Result<T> = std::result::Result<T, SyncError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// in rigsync. Each kind maps to a stable error code that can be used for
/// programmatic error handling, testing, and external reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,
    InvalidPattern,
    TypeMismatch,

    // Host mutation
    HostRejected,
    FieldCopyFailed,

    // Configuration
    InvalidSettings,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidPattern => "ERR_INVALID_PATTERN",
            ExErrorKind::TypeMismatch => "ERR_TYPE_MISMATCH",
            ExErrorKind::HostRejected => "ERR_HOST_REJECTED",
            ExErrorKind::FieldCopyFailed => "ERR_FIELD_COPY_FAILED",
            ExErrorKind::InvalidSettings => "ERR_INVALID_SETTINGS",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus whatever scene
/// context was known where the error surfaced.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    node: Option<String>,
    component_type: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            node: None,
            component_type: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add node context (display name or path)
    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    /// Add component type context
    pub fn with_component_type(mut self, component_type: impl Into<String>) -> Self {
        self.component_type = Some(component_type.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the node context, if any
    pub fn node(&self) -> Option<&str> {
        self.node.as_deref()
    }

    /// Get the component type context, if any
    pub fn component_type(&self) -> Option<&str> {
        self.component_type.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(node) = &self.node {
            write!(f, " (node: {})", node)?;
        }
        if let Some(component_type) = &self.component_type {
            write!(f, " (component_type: {})", component_type)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for scene host access and settings loading
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyncError {
    /// Node handle does not resolve to a live node
    #[error("Node not found: {node}")]
    NodeNotFound { node: NodeId },

    /// Component handle does not resolve to a live component
    #[error("Component not found: {component}")]
    ComponentNotFound { component: ComponentId },

    /// Component has no field with the given name
    #[error("Component {component} has no field '{field}'")]
    UnknownField { component: ComponentId, field: String },

    /// Value written to a field has a different shape than the field
    #[error("Field '{field}' expects {expected}, got {actual}")]
    FieldTypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// The host refused a structural mutation
    #[error("Host rejected operation: {reason}")]
    HostRejected { reason: String },

    /// Pattern rule search expression does not compile
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Settings document is malformed
    #[error("Invalid settings: {message}")]
    InvalidSettings { message: String },

    /// Document (de)serialization failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<SyncError> for ExError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::NodeNotFound { node } => ExError::new(ExErrorKind::NotFound)
                .with_node(node.to_string())
                .with_message("Node not found"),

            SyncError::ComponentNotFound { component } => ExError::new(ExErrorKind::NotFound)
                .with_message(format!("Component not found: {}", component)),

            SyncError::UnknownField { component, field } => ExError::new(ExErrorKind::NotFound)
                .with_message(format!("Component {} has no field '{}'", component, field)),

            SyncError::FieldTypeMismatch {
                field,
                expected,
                actual,
            } => ExError::new(ExErrorKind::TypeMismatch).with_message(format!(
                "Field '{}' expects {}, got {}",
                field, expected, actual
            )),

            SyncError::HostRejected { reason } => {
                ExError::new(ExErrorKind::HostRejected).with_message(reason)
            }

            SyncError::InvalidPattern { pattern, reason } => {
                ExError::new(ExErrorKind::InvalidPattern)
                    .with_message(format!("Invalid pattern '{}': {}", pattern, reason))
            }

            SyncError::InvalidSettings { message } => {
                ExError::new(ExErrorKind::InvalidSettings).with_message(message)
            }

            SyncError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to SyncError
impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Serialization {
            message: err.to_string(),
        }
    }
}

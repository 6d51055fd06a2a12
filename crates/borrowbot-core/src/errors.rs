use thiserror::Error;

/// Result type alias using the canonical ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling and testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Construction
    /// Construction input matched no source variant, or more than one
    InvalidSource,
    /// A required key is absent (or null) in a keyword or tabular source
    MissingField,
    /// A key is present but its value has the wrong shape
    InvalidField,

    // Store access
    /// The operation needs a store descriptor and none was supplied
    Configuration,
    /// Single-key lookup returned zero rows or more than one
    NotFound,

    // Consistency
    /// A hard invariant on an entity does not hold
    InvariantViolation,

    // Integration
    Persistence,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidSource => "ERR_INVALID_SOURCE",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::InvalidField => "ERR_INVALID_FIELD",
            ExErrorKind::Configuration => "ERR_CONFIGURATION",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvariantViolation => "ERR_INVARIANT_VIOLATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, entity key, field name) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_key: Option<String>,
    field: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_key: None,
            field: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity key context
    pub fn with_entity_key(mut self, key: impl Into<String>) -> Self {
        self.entity_key = Some(key.into());
        self
    }

    /// Add field name context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
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

    /// Get the entity key context, if any
    pub fn entity_key(&self) -> Option<&str> {
        self.entity_key.as_deref()
    }

    /// Get the field name context, if any
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
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
        if let Some(key) = &self.entity_key {
            write!(f, " (entity_key: {})", key)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Detailed error taxonomy for record construction and lookup
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    /// Construction input matched no source variant
    #[error("Invalid construction source: {reason}")]
    InvalidSource { reason: String },

    /// Required key absent from a keyword or tabular source
    #[error("Missing required field '{field}' for {entity}")]
    MissingField { entity: String, field: String },

    /// Key present but of the wrong shape
    #[error("Field '{field}' of {entity} is not a valid {expected} (found {found})")]
    InvalidField {
        entity: String,
        field: String,
        expected: String,
        found: String,
    },

    /// Operation requires a store descriptor that was not supplied
    #[error("Operation '{op}' requires a store descriptor")]
    NotConfigured { op: String },

    /// Single-key lookup did not return exactly one row
    #[error("Expected exactly one row in {table} for key {key}, found {count}")]
    RecordNotFound {
        table: String,
        key: String,
        count: usize,
    },

    /// Exactly one of author name / author id is populated
    #[error("{entity} {key} has unpaired author fields")]
    UnpairedAuthor { entity: String, key: String },

    /// Author fields populated with blank values
    #[error("{entity} {key} has a blank author {field}")]
    BlankAuthor {
        entity: String,
        key: String,
        field: String,
    },

    /// A hydrated child points at a different parent
    #[error("Comment {child_key} links to {link}, not to submission {parent_key}")]
    ForeignChild {
        parent_key: String,
        child_key: String,
        link: String,
    },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<RecordError> for ExError {
    fn from(err: RecordError) -> Self {
        let message = err.to_string();
        match err {
            RecordError::InvalidSource { .. } => {
                ExError::new(ExErrorKind::InvalidSource).with_message(message)
            }

            RecordError::MissingField { field, .. } => ExError::new(ExErrorKind::MissingField)
                .with_field(field)
                .with_message(message),

            RecordError::InvalidField { field, .. } => ExError::new(ExErrorKind::InvalidField)
                .with_field(field)
                .with_message(message),

            RecordError::NotConfigured { op } => ExError::new(ExErrorKind::Configuration)
                .with_op(op)
                .with_message(message),

            RecordError::RecordNotFound { key, .. } => ExError::new(ExErrorKind::NotFound)
                .with_op("lookup")
                .with_entity_key(key)
                .with_message(message),

            RecordError::UnpairedAuthor { key, .. } => {
                ExError::new(ExErrorKind::InvariantViolation)
                    .with_entity_key(key)
                    .with_message(message)
            }

            RecordError::BlankAuthor { key, field, .. } => {
                ExError::new(ExErrorKind::InvariantViolation)
                    .with_entity_key(key)
                    .with_field(field)
                    .with_message(message)
            }

            RecordError::ForeignChild { parent_key, .. } => {
                ExError::new(ExErrorKind::InvariantViolation)
                    .with_entity_key(parent_key)
                    .with_message(message)
            }

            RecordError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to ExError
impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        RecordError::Serialization {
            message: err.to_string(),
        }
        .into()
    }
}

use svcs_core_types::RequestId;
use thiserror::Error;

/// Result type alias using the canonical structured error
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every condition a command can end in is classified by one of these kinds.
/// User-facing conditions (`UserInputMissing`, `NotFound`, `PreconditionUnmet`)
/// are normally reported as command outcomes; `StorageFailure` and `Io` abort
/// the current command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// A required argument (message, path, commit id) was not supplied
    UserInputMissing,
    /// A referenced working file or commit does not exist
    NotFound,
    /// Author unset, nothing staged, or nothing changed since a recorded commit
    PreconditionUnmet,
    /// A persisted file could not be read, written or published
    StorageFailure,
    /// Persisted text exists but does not have the expected shape
    InvalidInput,
    /// Raw I/O failure outside the storage root
    Io,
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::UserInputMissing => "ERR_USER_INPUT_MISSING",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::PreconditionUnmet => "ERR_PRECONDITION_UNMET",
            ExErrorKind::StorageFailure => "ERR_STORAGE_FAILURE",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a stable kind plus optional context describing where the failure
/// happened (operation, working path, commit id).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    commit_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            commit_id: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add commit id context
    pub fn with_commit_id(mut self, id: impl Into<String>) -> Self {
        self.commit_id = Some(id.into());
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

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
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

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the commit id context, if any
    pub fn commit_id(&self) -> Option<&str> {
        self.commit_id.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
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
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(commit_id) = &self.commit_id {
            write!(f, " (commit: {})", commit_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised by the model and storage layers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SvcsError {
    /// Working file does not exist
    #[error("Working file not found: {path}")]
    PathNotFound { path: String },

    /// Identifier does not occur in the commit log
    #[error("Commit not found: {commit_id}")]
    CommitNotFound { commit_id: String },

    /// Log accepts the identifier but no snapshot directory carries that name
    #[error("Snapshot directory missing for commit {commit_id}")]
    SnapshotMissing { commit_id: String },

    /// Log text does not follow the record layout
    #[error("Malformed log at line {line}: {reason}")]
    MalformedLog { line: usize, reason: String },

    /// Tracked file name has no final path component to store it under
    #[error("Tracked path has no file name: {path}")]
    NoFileName { path: String },

    /// Underlying read or write failed
    #[error("Storage failure during {op} on {path}: {message}")]
    Storage {
        op: String,
        path: String,
        message: String,
    },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from SvcsError to ExError
impl From<SvcsError> for ExError {
    fn from(err: SvcsError) -> Self {
        match err {
            SvcsError::PathNotFound { path } => ExError::new(ExErrorKind::NotFound)
                .with_path(path)
                .with_message("Working file not found"),

            SvcsError::CommitNotFound { commit_id } => ExError::new(ExErrorKind::NotFound)
                .with_commit_id(commit_id)
                .with_message("Commit not found"),

            SvcsError::SnapshotMissing { commit_id } => ExError::new(ExErrorKind::NotFound)
                .with_op("read_snapshot")
                .with_commit_id(commit_id)
                .with_message("Snapshot directory missing"),

            SvcsError::MalformedLog { line, reason } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("parse_log")
                .with_message(format!("line {}: {}", line, reason)),

            SvcsError::NoFileName { path } => ExError::new(ExErrorKind::InvalidInput)
                .with_path(path)
                .with_message("Tracked path has no file name"),

            SvcsError::Storage { op, path, message } => ExError::new(ExErrorKind::StorageFailure)
                .with_op(op)
                .with_path(path)
                .with_message(message),

            SvcsError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

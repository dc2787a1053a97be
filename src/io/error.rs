//! Error types and context management for strand operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for graph, document and generator operations
#[derive(Debug)]
pub enum StrandError {
    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Handle refers to a strand that has been deleted
    StaleHandle {
        /// Debug rendering of the handle
        handle: String,
    },

    /// Handle refers to the wrong kind of strand for the operation
    WrongKind {
        /// Layer name of the strand found
        layer_name: String,
        /// Kind the operation needs
        expected: &'static str,
    },

    /// Another strand already uses this layer name
    DuplicateLayerName {
        /// The contested name
        layer_name: String,
    },

    /// The start of an attached strand cannot be moved independently
    PinnedEndpoint {
        /// Layer name of the attached strand
        layer_name: String,
    },

    /// Attachment was refused
    InvalidAttachment {
        /// Why the attachment was refused
        reason: String,
    },

    /// Mask creation was refused
    InvalidMask {
        /// Why the mask was refused
        reason: String,
    },

    /// A document references a layer name that never resolves
    ///
    /// Raised after the loader stops making progress; nothing from the
    /// document is kept.
    DanglingReference {
        /// Strand whose record holds the reference
        layer_name: String,
        /// Referenced layer name that was not found
        missing: String,
        /// Record field holding the reference
        field: &'static str,
    },

    /// A document could not be parsed or serialized
    Document {
        /// Path of the document, `<memory>` for in-memory data
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The generator failed for a reason other than validation
    Generation {
        /// Pipeline stage that failed
        stage: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for StrandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::StaleHandle { handle } => {
                write!(f, "Strand handle {handle} no longer refers to a live strand")
            }
            Self::WrongKind {
                layer_name,
                expected,
            } => {
                write!(f, "Strand '{layer_name}' is not a {expected}")
            }
            Self::DuplicateLayerName { layer_name } => {
                write!(f, "Layer name '{layer_name}' is already in use")
            }
            Self::PinnedEndpoint { layer_name } => {
                write!(
                    f,
                    "Start of attached strand '{layer_name}' is pinned to its parent"
                )
            }
            Self::InvalidAttachment { reason } => write!(f, "Attachment rejected: {reason}"),
            Self::InvalidMask { reason } => write!(f, "Mask rejected: {reason}"),
            Self::DanglingReference {
                layer_name,
                missing,
                field,
            } => {
                write!(
                    f,
                    "Strand '{layer_name}' references unknown strand '{missing}' in '{field}'"
                )
            }
            Self::Document { path, source } => {
                write!(f, "Invalid document '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Generation { stage, reason } => {
                write!(f, "Pattern generation failed during {stage}: {reason}")
            }
        }
    }
}

impl std::error::Error for StrandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Document { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for strand results
pub type Result<T> = std::result::Result<T, StrandError>;

/// Enriches foreign errors with the path and operation they concern
pub trait WithContext<T> {
    /// Attach the file path and operation to an I/O failure
    ///
    /// # Errors
    ///
    /// Propagates the original error wrapped as [`StrandError::FileSystem`]
    fn with_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T>;
}

impl<T> WithContext<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T> {
        self.map_err(|source| StrandError::FileSystem {
            path: path.into(),
            operation,
            source,
        })
    }
}

impl<T> WithContext<T> for std::result::Result<T, serde_json::Error> {
    fn with_path(self, path: impl Into<PathBuf>, _operation: &'static str) -> Result<T> {
        self.map_err(|source| StrandError::Document {
            path: path.into(),
            source,
        })
    }
}

impl From<std::io::Error> for StrandError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for StrandError {
    fn from(err: serde_json::Error) -> Self {
        Self::Document {
            path: PathBuf::from("<memory>"),
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> StrandError {
    StrandError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a generator failure error
pub fn generation_error(stage: &'static str, reason: &impl ToString) -> StrandError {
    StrandError::Generation {
        stage,
        reason: reason.to_string(),
    }
}

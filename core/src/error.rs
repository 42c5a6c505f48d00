use thiserror::Error;

/// Coarse classification of a [`DirectoryError`], used by callers that need
/// to branch on the outcome (HTTP status mapping, import accounting).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Duplicate,
    NotFound,
    Internal,
}

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Import error: {0}")]
    Import(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Bank already exists: {swift_code}")]
    Duplicate { swift_code: String },

    #[error("Bank with swift code '{swift_code}' not found in the database.")]
    NotFound { swift_code: String },

    #[error("Bank with swift code '{swift_code}' disappeared before it could be deleted")]
    DeleteRace { swift_code: String },

    #[error("Directory handle unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DirectoryError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation { field, reason: reason.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Duplicate { .. } => ErrorKind::Duplicate,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Database(_)
            | Self::Import(_)
            | Self::Workbook(_)
            | Self::DeleteRace { .. }
            | Self::Unavailable(_)
            | Self::Other(_) => ErrorKind::Internal,
        }
    }
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

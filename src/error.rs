use std::fmt;

use thiserror::Error;

/// The step of a draw that was running when storage failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStage {
    InsertAssignments,
    MarkDrawn,
}

impl fmt::Display for DrawStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawStage::InsertAssignments => write!(f, "writing new assignments"),
            DrawStage::MarkDrawn => write!(f, "marking the group as drawn"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SantaError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("{field} cannot be negative")]
    Negative { field: String },

    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    #[error("Invalid budget: minimum {min} is greater than maximum {max}")]
    InvalidBudget { min: f64, max: f64 },

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Invalid {entity_type} id {value:?}: {reason}")]
    InvalidId {
        entity_type: String,
        value: String,
        reason: String,
    },

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("{entity_type} already exists: {identifier}")]
    AlreadyExists {
        entity_type: String,
        identifier: String,
    },

    #[error("{entity_type} {id} belongs to another user")]
    NotOwner { entity_type: String, id: String },

    #[error("A draw needs at least {required} participants, found {found}")]
    InsufficientParticipants { required: usize, found: usize },

    #[error("Invalid draw: {0}")]
    InvalidDraw(String),

    #[error(
        "Draw failed while {stage}: old assignments may be gone and new assignments may be missing, re-run the draw ({source})"
    )]
    PartialFailure {
        stage: DrawStage,
        #[source]
        source: Box<SantaError>,
    },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Database error: {0}")]
    Database(rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl SantaError {
    pub fn not_found(entity_type: &str, id: impl fmt::Display) -> Self {
        SantaError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// True when a failed draw may have removed the previous assignment set.
    pub fn old_assignments_removed(&self) -> bool {
        matches!(self, SantaError::PartialFailure { .. })
    }

    /// True when a failed draw had already written the full new assignment set.
    pub fn new_assignments_written(&self) -> bool {
        matches!(
            self,
            SantaError::PartialFailure {
                stage: DrawStage::MarkDrawn,
                ..
            }
        )
    }
}

impl From<rusqlite::Error> for SantaError {
    /// Connection-level failures become `StorageUnavailable`; everything else
    /// stays a plain database error.
    fn from(e: rusqlite::Error) -> Self {
        use rusqlite::ErrorCode;

        match &e {
            rusqlite::Error::SqliteFailure(err, _)
                if matches!(
                    err.code,
                    ErrorCode::CannotOpen
                        | ErrorCode::DatabaseBusy
                        | ErrorCode::DatabaseLocked
                        | ErrorCode::NotADatabase
                        | ErrorCode::SystemIoFailure
                ) =>
            {
                SantaError::StorageUnavailable(e.to_string())
            }
            _ => SantaError::Database(e),
        }
    }
}

pub type SantaResult<T> = Result<T, SantaError>;

//! Error types for the agenda core
//!
//! Two families of failures exist: bad user input (`ValidationError`) and
//! file read/parse/write failures (`StorageError`). Both are recoverable;
//! callers render them as messages and keep going.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Rejected user input. Nothing was changed in memory or on disk.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    BlankField(&'static str),

    #[error("Invalid CPF '{0}': it must contain exactly 11 digits")]
    InvalidNationalId(String),

    #[error("CPF {national_id} is already registered to {holder}")]
    DuplicateNationalId { national_id: String, holder: String },

    #[error("Invalid process number '{0}'. Use the format 0000000-00.0000.0.00.0000")]
    InvalidProcessNumber(String),

    #[error("Expert '{0}' is not registered")]
    UnknownExpert(String),

    #[error("Process {process} is already scheduled for {date}")]
    DuplicateInBucket { process: String, date: String },

    #[error("Invalid date format '{0}'. Use YYYY-MM-DD (e.g., '2025-03-15')")]
    InvalidDate(String),

    #[error("Invalid priority '{0}'. Valid priorities: low, normal, high")]
    InvalidPriority(String),

    #[error("Invalid kind '{0}'. Valid kinds: deadline, examination")]
    InvalidKind(String),
}

/// Failure while reading or writing one of the JSON collections.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum AgendaError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T, E = AgendaError> = std::result::Result<T, E>;

//! Error types for playlist ownership changes.

use std::path::PathBuf;
use thiserror::Error;

pub type ChownResult<T> = Result<T, ChownError>;

/// The step of a run in which an error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Config,
    UserResolution,
    DatabaseOpen,
    Mutation,
}

#[derive(Debug, Error)]
pub enum ChownError {
    #[error(
        "Could not infer the library database location from the environment, \
         and no path to it was provided with --database."
    )]
    DatabasePathUnresolved,

    #[error("API key not found in environment ({0}).")]
    MissingApiKey(&'static str),

    #[error("Invalid server URL '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },

    #[error("Invalid playlist selection: {0}")]
    InvalidSelection(String),

    #[error("User '{0}' not found on server.")]
    UserNotFound(String),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} failed with status {status}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Could not parse the user list returned by {url}: {source}")]
    MalformedResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} doesn't exist.", .0.display())]
    DatabaseMissing(PathBuf),

    #[error("Could not open {}: {source}", path.display())]
    DatabaseOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Table {table} is missing the expected column(s): {}", missing_columns.join(", "))]
    UnexpectedSchema {
        table: &'static str,
        missing_columns: Vec<&'static str>,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("The data of playlist '{playlist}' is not a valid JSON document: {reason}")]
    MalformedDocument { playlist: String, reason: String },

    #[error("The playlist '{0}' was not found in the database as given.")]
    PlaylistNotFound(String),

    #[error("Could not find these playlists in the database as given: {}", missing.join(", "))]
    PlaylistsNotFound { missing: Vec<String> },
}

impl ChownError {
    pub fn phase(&self) -> Phase {
        match self {
            ChownError::DatabasePathUnresolved
            | ChownError::MissingApiKey(_)
            | ChownError::InvalidServerUrl { .. }
            | ChownError::InvalidSelection(_) => Phase::Config,
            ChownError::UserNotFound(_)
            | ChownError::Transport { .. }
            | ChownError::UnexpectedStatus { .. }
            | ChownError::MalformedResponse { .. } => Phase::UserResolution,
            ChownError::DatabaseMissing(_)
            | ChownError::DatabaseOpen { .. }
            | ChownError::UnexpectedSchema { .. } => Phase::DatabaseOpen,
            ChownError::Database(_)
            | ChownError::MalformedDocument { .. }
            | ChownError::PlaylistNotFound(_)
            | ChownError::PlaylistsNotFound { .. } => Phase::Mutation,
        }
    }

    pub fn malformed_document(playlist: impl Into<String>, reason: impl ToString) -> Self {
        ChownError::MalformedDocument {
            playlist: playlist.into(),
            reason: reason.to_string(),
        }
    }
}

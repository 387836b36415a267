//! Crate-wide error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::data::listing::ListingError;
use crate::editor::EditorError;
use crate::infrastructure::ControlError;
use crate::reconcile::{ExecError, PlanError};
use crate::types::config::ConfigError;
use crate::types::window::SnapshotError;


#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Listing(#[from] ListingError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Control(#[from] ControlError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("session '{session}': {source}")]
    Snapshot {
        session: String,
        source: SnapshotError,
    },

    #[error("cannot write plan: {0}")]
    Output(#[source] std::io::Error),

    #[error("cannot read listing file {path}: {source}")]
    ReadListing {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

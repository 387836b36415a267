use serde::{Deserialize, Serialize};


/// Result of dispatching a `Command` through `Sys`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Ok { output: String },
    Error { message: String },
}

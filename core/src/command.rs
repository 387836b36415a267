//! Command — the typed interface for all muxwin operations.

use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "command")]
pub enum Command {
    /// Open the session's listing in the editor and reconcile the result.
    #[serde(rename = "edit")]
    Edit {
        session: String,
        #[serde(default)]
        dry_run: bool,
    },

    /// Reconcile the session against a listing file.
    #[serde(rename = "apply")]
    Apply {
        session: String,
        path: String,
        #[serde(default)]
        dry_run: bool,
    },

    /// Print the session's listing.
    #[serde(rename = "list")]
    List {
        session: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },

    #[serde(rename = "help")]
    Help {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        topic: Option<String>,
    },
}

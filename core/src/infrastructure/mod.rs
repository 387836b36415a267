//! Live-session control — the primitives the executor drives.
//!
//! `tmux` talks to a real server through the `tmux` binary. `memory` keeps
//! sessions in process; it backs dry runs and tests.

use thiserror::Error;

use crate::types::window::{Window, WindowId};

pub mod memory;
pub mod tmux;


#[derive(Debug, Error)]
pub enum ControlError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` failed: {stderr}")]
    Failed { command: String, stderr: String },

    #[error("unexpected output from `{command}`: {detail}")]
    UnexpectedOutput { command: String, detail: String },

    #[error("no session named '{0}'")]
    NoSuchSession(String),

    #[error("no window {0} in session")]
    NoSuchWindow(WindowId),

    #[error("{0} rejected")]
    Rejected(String),
}


/// The five primitives reconciliation needs from a multiplexer.
///
/// Swaps exchange the positions of two windows; `create_window` always
/// appends at the tail of the session.
pub trait SessionControl {
    fn list_windows(&mut self, session: &str) -> Result<Vec<Window>, ControlError>;

    fn kill_window(&mut self, session: &str, id: &WindowId) -> Result<(), ControlError>;

    fn rename_window(
        &mut self,
        session: &str,
        id: &WindowId,
        name: &str,
    ) -> Result<(), ControlError>;

    fn swap_windows(
        &mut self,
        session: &str,
        a: &WindowId,
        b: &WindowId,
    ) -> Result<(), ControlError>;

    fn create_window(&mut self, session: &str, name: &str) -> Result<Window, ControlError>;
}

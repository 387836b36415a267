//! Window and snapshot types — the captured state of a tmux session.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Stable tmux window identifier (`@N`). Never reused by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> WindowId {
        WindowId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


/// One live window as reported by `list-windows`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub id: WindowId,
    pub index: u32,
    pub name: String,
}

impl Window {
    pub fn new(id: impl Into<String>, index: u32, name: impl Into<String>) -> Window {
        Window {
            id: WindowId::new(id),
            index,
            name: name.into(),
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("no windows")]
    Empty,

    #[error("window index {0} is reported twice")]
    DuplicateIndex(u32),
}


/// Windows of one session, ordered by index ascending.
///
/// Indexes are unique but need not be contiguous; the base index is the
/// smallest one present. Positions (0-based offsets into the snapshot)
/// are what the planner reasons about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowSnapshot {
    windows: Vec<Window>,
}

impl WindowSnapshot {
    /// Build a snapshot, sorting by index.
    pub fn new(mut windows: Vec<Window>) -> Result<WindowSnapshot, SnapshotError> {
        if windows.is_empty() {
            return Err(SnapshotError::Empty);
        }
        windows.sort_by_key(|w| w.index);
        if let Some(pair) = windows.windows(2).find(|pair| pair[0].index == pair[1].index) {
            return Err(SnapshotError::DuplicateIndex(pair[0].index));
        }
        Ok(WindowSnapshot { windows })
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn base_index(&self) -> u32 {
        self.windows[0].index
    }

    /// Position of the window holding `index`, if any.
    pub fn position_of(&self, index: u32) -> Option<usize> {
        self.windows.binary_search_by_key(&index, |w| w.index).ok()
    }

    pub fn get(&self, index: u32) -> Option<&Window> {
        self.position_of(index).map(|pos| &self.windows[pos])
    }
}

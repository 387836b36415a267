//! Target entries and edit steps — the planner's input and output.

use std::fmt;

use serde::Serialize;

use crate::types::window::Window;


/// Requested position of a target entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// Keep the window currently at this index. Wider than a window index
    /// so out-of-range numbers survive parsing and fail as unknown.
    Existing(u64),
    /// `_` in the listing: create a new window.
    New,
}


/// One parsed listing line. Entry order is the desired window order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetEntry {
    pub slot: Slot,
    pub name: String,
}

impl TargetEntry {
    pub fn existing(index: u64, name: impl Into<String>) -> TargetEntry {
        TargetEntry {
            slot: Slot::Existing(index),
            name: name.into(),
        }
    }

    pub fn new_window(name: impl Into<String>) -> TargetEntry {
        TargetEntry {
            slot: Slot::New,
            name: name.into(),
        }
    }
}


/// A single reconciliation step. Indexes are final (dense) indexes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum EditStep {
    Delete { window: Window },
    Rename { window: Window, name: String },
    Move { window: Window, target_index: u32 },
    Create { target_index: u32, name: String },
}

impl EditStep {
    pub fn kind(&self) -> &'static str {
        match self {
            EditStep::Delete { .. } => "delete",
            EditStep::Rename { .. } => "rename",
            EditStep::Move { .. } => "move",
            EditStep::Create { .. } => "create",
        }
    }
}

impl fmt::Display for EditStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditStep::Delete { window } => {
                write!(f, "delete {} ({}: {})", window.id, window.index, window.name)
            }
            EditStep::Rename { window, name } => {
                write!(f, "rename {} {:?} -> {:?}", window.id, window.name, name)
            }
            EditStep::Move { window, target_index } => {
                write!(f, "move {} ({}) -> {}", window.id, window.name, target_index)
            }
            EditStep::Create { target_index, name } => {
                write!(f, "create {:?} -> {}", name, target_index)
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_window_and_target() {
        let w = Window::new("@2", 1, "logs");
        let del = EditStep::Delete { window: w.clone() };
        assert_eq!(del.to_string(), "delete @2 (1: logs)");
        let mv = EditStep::Move { window: w.clone(), target_index: 0 };
        assert_eq!(mv.to_string(), "move @2 (logs) -> 0");
        let rn = EditStep::Rename { window: w, name: "B".into() };
        assert_eq!(rn.to_string(), "rename @2 \"logs\" -> \"B\"");
        let cr = EditStep::Create { target_index: 3, name: "new".into() };
        assert_eq!(cr.to_string(), "create \"new\" -> 3");
    }

    #[test]
    fn step_serializes_with_tag() {
        let step = EditStep::Create { target_index: 1, name: "x".into() };
        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step\":\"create\""));
        assert_eq!(step.kind(), "create");
    }
}

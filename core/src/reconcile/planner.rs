//! Reconciliation planner — diff a snapshot against target entries.
//!
//! Emits steps in four phases, always in this order: deletes, renames,
//! moves (highest target index first), creates (listing order). Later
//! phases assume the earlier ones have already been applied.

use std::collections::HashSet;

use thiserror::Error;

use crate::types::step::{EditStep, Slot, TargetEntry};
use crate::types::window::WindowSnapshot;


#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("index {0} does not exist, use \"_: name\" to create a new window")]
    UnknownIndex(u64),

    #[error("index {0} appears more than once")]
    DuplicateIndex(u64),

    #[error("listing keeps none of the existing windows; at least one must survive")]
    NoSurvivingWindow,
}


/// Ordered steps that turn one session snapshot into a listing's target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub session: String,
    pub snapshot: WindowSnapshot,
    pub steps: Vec<EditStep>,
}

impl Plan {
    pub fn build(
        session: &str,
        snapshot: WindowSnapshot,
        entries: &[TargetEntry],
    ) -> Result<Plan, PlanError> {
        let steps = plan_steps(&snapshot, entries)?;
        tracing::debug!(
            session,
            windows = snapshot.len(),
            entries = entries.len(),
            steps = steps.len(),
            "plan built"
        );
        Ok(Plan {
            session: session.to_string(),
            snapshot,
            steps,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Human-readable step list, one step per line.
    pub fn describe(&self) -> String {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{:>3}. {}", i + 1, s))
            .collect::<Vec<_>>()
            .join("\n")
    }
}


/// Compute the ordered edit steps. Pure; fails before emitting anything
/// if the entries reference unknown or repeated indexes.
pub fn plan_steps(
    snapshot: &WindowSnapshot,
    entries: &[TargetEntry],
) -> Result<Vec<EditStep>, PlanError> {
    let windows = snapshot.windows();
    let base = snapshot.base_index();

    // Target name per snapshot position; None means the window goes away.
    let mut kept: Vec<Option<&str>> = vec![None; windows.len()];
    // Snapshot positions of survivors, in desired order.
    let mut desired: Vec<usize> = Vec::new();
    let mut seen: HashSet<u64> = HashSet::new();

    for entry in entries {
        let Slot::Existing(index) = entry.slot else {
            continue;
        };
        let pos = u32::try_from(index)
            .ok()
            .and_then(|i| snapshot.position_of(i))
            .ok_or(PlanError::UnknownIndex(index))?;
        if !seen.insert(index) {
            return Err(PlanError::DuplicateIndex(index));
        }
        kept[pos] = Some(entry.name.as_str());
        desired.push(pos);
    }
    if desired.is_empty() {
        return Err(PlanError::NoSurvivingWindow);
    }

    let mut steps = Vec::new();

    // Delete. deleted[pos] counts removed windows at or before pos.
    let mut deleted = vec![0usize; windows.len()];
    let mut removed = 0;
    for (pos, w) in windows.iter().enumerate() {
        if kept[pos].is_none() {
            steps.push(EditStep::Delete { window: w.clone() });
            removed += 1;
        }
        deleted[pos] = removed;
    }

    // Rename
    for (pos, w) in windows.iter().enumerate() {
        if let Some(name) = kept[pos] {
            if name != w.name {
                steps.push(EditStep::Rename {
                    window: w.clone(),
                    name: name.to_string(),
                });
            }
        }
    }

    // Reorder. Placing the top slot first means a move only shifts the
    // still-unplaced windows down by one, keeping their relative order, so
    // each one's live position is its rank among `unplaced`.
    let mut unplaced: Vec<usize> = (0..desired.len()).collect();
    for (final_pos, &pos) in desired.iter().enumerate().rev() {
        let current = pos - deleted[pos];
        if unplaced.last() == Some(&current) {
            unplaced.pop();
            continue;
        }
        if let Ok(at) = unplaced.binary_search(&current) {
            unplaced.remove(at);
        }
        steps.push(EditStep::Move {
            window: windows[pos].clone(),
            target_index: base + final_pos as u32,
        });
    }

    // Create
    for (i, entry) in entries.iter().enumerate() {
        if entry.slot == Slot::New {
            steps.push(EditStep::Create {
                target_index: base + i as u32,
                name: entry.name.clone(),
            });
        }
    }

    Ok(steps)
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::listing::{parse_listing, render_listing};
    use crate::types::window::Window;

    fn snap(names: &[&str]) -> WindowSnapshot {
        snap_from(0, names)
    }

    fn snap_from(base: u32, names: &[&str]) -> WindowSnapshot {
        let windows = names
            .iter()
            .enumerate()
            .map(|(i, n)| Window::new(format!("@{}", i + 10), base + i as u32, *n))
            .collect();
        WindowSnapshot::new(windows).unwrap()
    }

    fn plan(snapshot: &WindowSnapshot, text: &str) -> Result<Vec<EditStep>, PlanError> {
        plan_steps(snapshot, &parse_listing(text).unwrap())
    }

    fn kinds(steps: &[EditStep]) -> Vec<&'static str> {
        steps.iter().map(|s| s.kind()).collect()
    }

    #[test]
    fn unchanged_listing_is_empty_plan() {
        let s = snap(&["a", "b", "c"]);
        let steps = plan(&s, &render_listing("work", &s)).unwrap();
        assert!(steps.is_empty());
    }

    #[test]
    fn unchanged_listing_with_gaps_is_empty_plan() {
        let s = WindowSnapshot::new(vec![
            Window::new("@1", 0, "shell"),
            Window::new("@2", 1, "logs"),
            Window::new("@4", 3, "build"),
        ])
        .unwrap();
        assert!(plan(&s, "0: shell\n1: logs\n3: build").unwrap().is_empty());
    }

    #[test]
    fn omitted_line_deletes_only_that_window() {
        let s = snap(&["a", "b", "c"]);
        let steps = plan(&s, "0: a\n2: c").unwrap();
        assert_eq!(kinds(&steps), vec!["delete"]);
        match &steps[0] {
            EditStep::Delete { window } => assert_eq!(window.index, 1),
            other => panic!("expected Delete, got {:?}", other),
        }
    }

    #[test]
    fn changed_name_renames_only() {
        let s = snap(&["a", "b"]);
        let steps = plan(&s, "0: a\n1: B").unwrap();
        assert_eq!(
            steps,
            vec![EditStep::Rename {
                window: s.windows()[1].clone(),
                name: "B".into()
            }]
        );
    }

    #[test]
    fn rotation_emits_moves_only() {
        let s = snap(&["a", "b", "c"]);
        let steps = plan(&s, "2: c\n0: a\n1: b").unwrap();
        assert_eq!(kinds(&steps), vec!["move", "move"]);
        let targets: Vec<(String, u32)> = steps
            .iter()
            .map(|s| match s {
                EditStep::Move { window, target_index } => (window.name.clone(), *target_index),
                other => panic!("expected Move, got {:?}", other),
            })
            .collect();
        assert_eq!(targets, vec![("b".into(), 2), ("a".into(), 1)]);
    }

    #[test]
    fn moving_last_to_front_is_one_move_per_displaced_window() {
        // Top-down placement moves every window above the one that sinks.
        let s = snap(&["a", "b", "c", "d"]);
        let steps = plan(&s, "3: d\n0: a\n1: b\n2: c").unwrap();
        assert_eq!(kinds(&steps), vec!["move", "move", "move"]);
    }

    #[test]
    fn moving_first_to_back_is_single_move() {
        let s = snap(&["a", "b", "c", "d"]);
        let steps = plan(&s, "1: b\n2: c\n3: d\n0: a").unwrap();
        assert_eq!(
            steps,
            vec![EditStep::Move {
                window: s.windows()[0].clone(),
                target_index: 3
            }]
        );
    }

    #[test]
    fn new_entry_creates_at_its_position() {
        let s = snap(&["a"]);
        let steps = plan(&s, "0: a\n_: new").unwrap();
        assert_eq!(
            steps,
            vec![EditStep::Create {
                target_index: 1,
                name: "new".into()
            }]
        );
    }

    #[test]
    fn create_index_counts_all_entries_and_base() {
        let s = snap_from(1, &["a", "b"]);
        let steps = plan(&s, "_: first\n1: a\n_: mid\n2: b").unwrap();
        let creates: Vec<(u32, &str)> = steps
            .iter()
            .filter_map(|s| match s {
                EditStep::Create { target_index, name } => Some((*target_index, name.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(creates, vec![(1, "first"), (3, "mid")]);
        assert_eq!(kinds(&steps), vec!["create", "create"]);
    }

    #[test]
    fn delete_offsets_avoid_spurious_moves() {
        // Deleting the first window shifts the rest down; nothing else moves.
        let s = snap(&["a", "b", "c"]);
        let steps = plan(&s, "1: b\n2: c").unwrap();
        assert_eq!(kinds(&steps), vec!["delete"]);
    }

    #[test]
    fn phases_are_ordered() {
        let s = snap(&["a", "b", "c", "d"]);
        let steps = plan(&s, "_: x\n3: D\n0: a\n2: c").unwrap();
        assert_eq!(kinds(&steps), vec!["delete", "rename", "move", "move", "create"]);
        match &steps[0] {
            EditStep::Delete { window } => assert_eq!(window.name, "b"),
            other => panic!("expected Delete, got {:?}", other),
        }
        match steps.last() {
            Some(EditStep::Create { target_index: 0, name }) => assert_eq!(name, "x"),
            other => panic!("expected Create at 0, got {:?}", other),
        }
    }

    #[test]
    fn unknown_index_rejected() {
        let s = snap(&["a", "b"]);
        assert_eq!(plan(&s, "0: a\n5: nope"), Err(PlanError::UnknownIndex(5)));
    }

    #[test]
    fn index_past_window_range_is_unknown() {
        let s = snap(&["a"]);
        assert_eq!(
            plan(&s, "0: a\n99999999999: x"),
            Err(PlanError::UnknownIndex(99_999_999_999))
        );
    }

    #[test]
    fn duplicate_index_rejected() {
        let s = snap(&["a", "b", "c"]);
        assert_eq!(plan(&s, "2: c\n0: a\n2: again"), Err(PlanError::DuplicateIndex(2)));
    }

    #[test]
    fn only_new_windows_rejected() {
        let s = snap(&["a"]);
        assert_eq!(plan(&s, "_: x\n_: y"), Err(PlanError::NoSurvivingWindow));
    }

    #[test]
    fn plan_describe_numbers_steps() {
        let s = snap(&["a", "b"]);
        let p = Plan::build("work", s, &parse_listing("1: b\n0: A").unwrap()).unwrap();
        let text = p.describe();
        assert!(text.contains("  1. rename @10 \"a\" -> \"A\""));
        assert!(text.contains("  2. move @10 (a) -> 1"));
    }
}

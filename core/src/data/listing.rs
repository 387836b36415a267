//! Window listing — the editable text form of a session's windows.
//!
//! Format: one `N: Title` line per window, in the desired left-to-right
//! order. `_: Title` asks for a new window. Lines starting with `#` and
//! blank lines are ignored. The slot is split from the title at the first
//! `:` only, so titles may themselves contain colons.

use thiserror::Error;

use crate::types::step::{Slot, TargetEntry};
use crate::types::window::WindowSnapshot;


#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    #[error("line {line_no}: '{line}' has no ':', expected \"N: name\" or \"_: name\"")]
    MalformedLine { line_no: usize, line: String },

    #[error("line {line_no}: '{line}' has an invalid slot, expected a number or _")]
    InvalidSlot { line_no: usize, line: String },

    #[error("listing has no windows; closing the session is not supported")]
    EmptyTargetRejected,
}


/// Render the editable listing for a session snapshot.
pub fn render_listing(session: &str, snapshot: &WindowSnapshot) -> String {
    let mut out = format!(
        "# Edit windows for session '{}'. Format: N: Title\n\
         # Use _: Title to create new windows. Comments (#) and blank lines are ignored.\n\
         \n",
        session
    );
    for w in snapshot.windows() {
        out.push_str(&format!("{}: {}\n", w.index, w.name));
    }
    out
}


/// Parse an edited listing into ordered target entries.
pub fn parse_listing(input: &str) -> Result<Vec<TargetEntry>, ListingError> {
    let mut entries = Vec::new();

    for (i, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_no = i + 1;
        let (slot_text, name_text) = line.split_once(':').ok_or_else(|| {
            ListingError::MalformedLine {
                line_no,
                line: line.to_string(),
            }
        })?;
        let slot = parse_slot(slot_text).ok_or_else(|| ListingError::InvalidSlot {
            line_no,
            line: line.to_string(),
        })?;
        entries.push(TargetEntry {
            slot,
            name: name_text.trim().to_string(),
        });
    }

    if entries.is_empty() {
        return Err(ListingError::EmptyTargetRejected);
    }
    Ok(entries)
}

fn parse_slot(text: &str) -> Option<Slot> {
    if text == "_" {
        return Some(Slot::New);
    }
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Numbers past u64 saturate; no window has that index either way.
    Some(Slot::Existing(text.parse::<u64>().unwrap_or(u64::MAX)))
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! In-process sessions with tmux's renumbering semantics.
//!
//! Window indexes are always dense from the session's base index, as with
//! tmux's `renumber-windows` option. Every primitive call is recorded, and
//! a primitive kind can be made to fail for exercising abort paths.

use std::collections::BTreeMap;

use crate::infrastructure::{ControlError, SessionControl};
use crate::types::window::{Window, WindowId, WindowSnapshot};


#[derive(Debug, Clone)]
struct MemorySession {
    base_index: u32,
    windows: Vec<(WindowId, String)>,
}


#[derive(Debug, Clone, Default)]
pub struct MemorySessions {
    sessions: BTreeMap<String, MemorySession>,
    next_id: u32,
    calls: Vec<String>,
    fail_on: Option<(&'static str, usize)>,
}

impl MemorySessions {
    pub fn new() -> MemorySessions {
        MemorySessions::default()
    }

    /// Add a session whose windows get fresh ids, in order from `base_index`.
    pub fn add_session(&mut self, session: &str, base_index: u32, names: &[&str]) {
        let windows = names
            .iter()
            .map(|n| (self.fresh_id(), n.to_string()))
            .collect();
        self.sessions
            .insert(session.to_string(), MemorySession { base_index, windows });
    }

    /// Mirror a captured snapshot, keeping its window ids. Gaps in the
    /// snapshot's indexes are closed.
    pub fn from_snapshot(session: &str, snapshot: &WindowSnapshot) -> MemorySessions {
        let mut sessions = MemorySessions::new();
        let windows = snapshot
            .windows()
            .iter()
            .map(|w| (w.id.clone(), w.name.clone()))
            .collect();
        sessions.sessions.insert(
            session.to_string(),
            MemorySession {
                base_index: snapshot.base_index(),
                windows,
            },
        );
        sessions.next_id = snapshot
            .windows()
            .iter()
            .filter_map(|w| w.id.as_str().trim_start_matches('@').parse::<u32>().ok())
            .max()
            .map_or(0, |max| max + 1);
        sessions
    }

    /// Make the `nth` (0-based) call of primitive `kind` fail, where kind is
    /// one of `list`, `kill`, `rename`, `swap`, `create`.
    pub fn fail_on(&mut self, kind: &'static str, nth: usize) {
        self.fail_on = Some((kind, nth));
    }

    /// Primitive calls made so far, e.g. `swap @1 @2`.
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    pub fn count_calls(&self, kind: &str) -> usize {
        self.calls
            .iter()
            .filter(|c| c.split(' ').next() == Some(kind))
            .count()
    }

    /// Current windows of a session, empty if it does not exist.
    pub fn windows(&self, session: &str) -> Vec<Window> {
        self.sessions
            .get(session)
            .map(|s| {
                s.windows
                    .iter()
                    .enumerate()
                    .map(|(pos, (id, name))| Window {
                        id: id.clone(),
                        index: s.base_index + pos as u32,
                        name: name.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn names(&self, session: &str) -> Vec<String> {
        self.windows(session).into_iter().map(|w| w.name).collect()
    }

    fn fresh_id(&mut self) -> WindowId {
        let id = WindowId(format!("@{}", self.next_id));
        self.next_id += 1;
        id
    }

    fn record(&mut self, kind: &'static str, call: String) -> Result<(), ControlError> {
        let seen = self.count_calls(kind);
        self.calls.push(call.clone());
        match self.fail_on {
            Some((k, nth)) if k == kind && nth == seen => Err(ControlError::Rejected(call)),
            _ => Ok(()),
        }
    }

    fn session_mut(&mut self, session: &str) -> Result<&mut MemorySession, ControlError> {
        self.sessions
            .get_mut(session)
            .ok_or_else(|| ControlError::NoSuchSession(session.to_string()))
    }

    fn position(&mut self, session: &str, id: &WindowId) -> Result<usize, ControlError> {
        self.session_mut(session)?
            .windows
            .iter()
            .position(|(w, _)| w == id)
            .ok_or_else(|| ControlError::NoSuchWindow(id.clone()))
    }
}

impl SessionControl for MemorySessions {
    fn list_windows(&mut self, session: &str) -> Result<Vec<Window>, ControlError> {
        self.record("list", format!("list {}", session))?;
        if !self.sessions.contains_key(session) {
            return Err(ControlError::NoSuchSession(session.to_string()));
        }
        Ok(self.windows(session))
    }

    fn kill_window(&mut self, session: &str, id: &WindowId) -> Result<(), ControlError> {
        self.record("kill", format!("kill {}", id))?;
        let pos = self.position(session, id)?;
        let s = self.session_mut(session)?;
        s.windows.remove(pos);
        if s.windows.is_empty() {
            self.sessions.remove(session);
        }
        Ok(())
    }

    fn rename_window(
        &mut self,
        session: &str,
        id: &WindowId,
        name: &str,
    ) -> Result<(), ControlError> {
        self.record("rename", format!("rename {} {}", id, name))?;
        let pos = self.position(session, id)?;
        self.session_mut(session)?.windows[pos].1 = name.to_string();
        Ok(())
    }

    fn swap_windows(
        &mut self,
        session: &str,
        a: &WindowId,
        b: &WindowId,
    ) -> Result<(), ControlError> {
        self.record("swap", format!("swap {} {}", a, b))?;
        let pa = self.position(session, a)?;
        let pb = self.position(session, b)?;
        self.session_mut(session)?.windows.swap(pa, pb);
        Ok(())
    }

    fn create_window(&mut self, session: &str, name: &str) -> Result<Window, ControlError> {
        self.record("create", format!("create {}", name))?;
        if !self.sessions.contains_key(session) {
            return Err(ControlError::NoSuchSession(session.to_string()));
        }
        let id = self.fresh_id();
        let s = self.session_mut(session)?;
        s.windows.push((id.clone(), name.to_string()));
        let index = s.base_index + (s.windows.len() - 1) as u32;
        Ok(Window {
            id,
            index,
            name: name.to_string(),
        })
    }
}

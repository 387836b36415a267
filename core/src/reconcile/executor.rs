//! Plan executor — applies steps to a live session through swaps.
//!
//! The multiplexer can only swap two windows, so a move is a walk of
//! adjacent swaps. The executor keeps its own ordered view of window ids
//! (position = index - base index) and updates it after every primitive;
//! it never trusts an index captured before the last mutation.
//!
//! Execution stops at the first failed primitive. Steps already applied
//! stay applied.

use thiserror::Error;

use crate::infrastructure::{ControlError, SessionControl};
use crate::reconcile::planner::Plan;
use crate::types::step::EditStep;
use crate::types::window::WindowId;


#[derive(Debug, Error)]
pub enum ExecError {
    #[error("cannot list windows of session '{session}': {source}")]
    Enumerate {
        session: String,
        source: ControlError,
    },

    #[error("session '{session}' changed since its windows were captured; nothing was applied")]
    StaleSnapshot { session: String },

    #[error("step {number} ({step}) failed: {source}; earlier steps were applied")]
    StepFailed {
        number: usize,
        step: String,
        source: ControlError,
    },

    #[error("step {number} ({step}) cannot be applied: {reason}")]
    InvalidStep {
        number: usize,
        step: String,
        reason: String,
    },
}


/// What an execution did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecReport {
    pub steps: usize,
    pub swaps: usize,
}


/// Apply every step of `plan` to the session behind `control`, in order.
pub fn execute<C: SessionControl>(plan: &Plan, control: &mut C) -> Result<ExecReport, ExecError> {
    let mut exec = Executor::start(plan, control)?;
    for (i, step) in plan.steps.iter().enumerate() {
        tracing::info!(session = %plan.session, step = %step, "applying");
        if let Err(e) = exec.apply(i + 1, step) {
            tracing::warn!(session = %plan.session, error = %e, "execution aborted");
            return Err(e);
        }
        exec.report.steps += 1;
    }
    Ok(exec.report)
}


struct Executor<'a, C: SessionControl> {
    control: &'a mut C,
    session: &'a str,
    base: u32,
    view: Vec<WindowId>,
    report: ExecReport,
}

impl<'a, C: SessionControl> Executor<'a, C> {
    /// Capture the live order and check it against the plan's snapshot.
    fn start(plan: &'a Plan, control: &'a mut C) -> Result<Executor<'a, C>, ExecError> {
        let mut live = control
            .list_windows(&plan.session)
            .map_err(|source| ExecError::Enumerate {
                session: plan.session.clone(),
                source,
            })?;
        live.sort_by_key(|w| w.index);
        let view: Vec<WindowId> = live.into_iter().map(|w| w.id).collect();
        let planned = plan.snapshot.windows().iter().map(|w| &w.id);
        if !view.iter().eq(planned) {
            return Err(ExecError::StaleSnapshot {
                session: plan.session.clone(),
            });
        }
        Ok(Executor {
            control,
            session: &plan.session,
            base: plan.snapshot.base_index(),
            view,
            report: ExecReport::default(),
        })
    }

    fn apply(&mut self, number: usize, step: &EditStep) -> Result<(), ExecError> {
        let failed = |source: ControlError| ExecError::StepFailed {
            number,
            step: step.to_string(),
            source,
        };
        match step {
            EditStep::Delete { window } => {
                let pos = self.locate(number, step, &window.id)?;
                self.control
                    .kill_window(self.session, &window.id)
                    .map_err(failed)?;
                self.view.remove(pos);
            }
            EditStep::Rename { window, name } => {
                self.control
                    .rename_window(self.session, &window.id, name)
                    .map_err(failed)?;
            }
            EditStep::Move { window, target_index } => {
                let from = self.locate(number, step, &window.id)?;
                let to = self.position_for(number, step, *target_index)?;
                self.walk(from, to).map_err(failed)?;
            }
            EditStep::Create { target_index, name } => {
                let created = self
                    .control
                    .create_window(self.session, name)
                    .map_err(failed)?;
                self.view.push(created.id);
                let from = self.view.len() - 1;
                let to = self.position_for(number, step, *target_index)?;
                self.walk(from, to).map_err(failed)?;
            }
        }
        Ok(())
    }

    fn locate(&self, number: usize, step: &EditStep, id: &WindowId) -> Result<usize, ExecError> {
        self.view
            .iter()
            .position(|w| w == id)
            .ok_or_else(|| ExecError::InvalidStep {
                number,
                step: step.to_string(),
                reason: format!("window {} is no longer in the session", id),
            })
    }

    fn position_for(&self, number: usize, step: &EditStep, index: u32) -> Result<usize, ExecError> {
        index
            .checked_sub(self.base)
            .map(|p| p as usize)
            .filter(|p| *p < self.view.len())
            .ok_or_else(|| ExecError::InvalidStep {
                number,
                step: step.to_string(),
                reason: format!(
                    "index {} is outside {}..{}",
                    index,
                    self.base,
                    self.base as usize + self.view.len()
                ),
            })
    }

    /// Carry the window at `from` to `to` one neighbour swap at a time.
    fn walk(&mut self, from: usize, to: usize) -> Result<(), ControlError> {
        let mut cur = from;
        while cur != to {
            let next = if cur > to { cur - 1 } else { cur + 1 };
            tracing::debug!(
                session = self.session,
                window = %self.view[cur],
                neighbour = %self.view[next],
                "swap"
            );
            self.control
                .swap_windows(self.session, &self.view[cur], &self.view[next])?;
            self.view.swap(cur, next);
            self.report.swaps += 1;
            cur = next;
        }
        Ok(())
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Reconciliation — plan the edit, then apply it.
//!
//! The `planner` module diffs a window snapshot against parsed listing
//! entries and produces an ordered `Plan`. It is pure. The `executor`
//! module replays a plan against a `SessionControl`, turning moves and
//! creates into adjacent swaps. `simulate` runs the executor against an
//! in-memory copy of the snapshot for dry runs.

pub mod executor;
pub mod planner;

use crate::infrastructure::memory::MemorySessions;
use crate::types::window::Window;

pub use executor::{execute, ExecError, ExecReport};
pub use planner::{plan_steps, Plan, PlanError};


/// Apply `plan` to an in-memory copy of its snapshot and return the
/// windows it would leave behind.
pub fn simulate(plan: &Plan) -> Result<Vec<Window>, ExecError> {
    let mut sessions = MemorySessions::from_snapshot(&plan.session, &plan.snapshot);
    execute(plan, &mut sessions)?;
    Ok(sessions.windows(&plan.session))
}

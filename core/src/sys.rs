use std::io::Write;
use std::path::Path;

use crate::command::Command;
use crate::data::listing::{parse_listing, render_listing};
use crate::editor;
use crate::error::{Error, Result};
use crate::infrastructure::SessionControl;
use crate::reconcile::{self, Plan};
use crate::types::config::Settings;
use crate::types::response::Response;
use crate::types::window::WindowSnapshot;


/// Central runtime for muxwin. Dispatches commands against one session backend.
///
/// Plans are written to `plan_out` before any step runs, so the operator
/// sees the whole plan even when execution stops partway.
pub struct Sys<C: SessionControl> {
    settings: Settings,
    control: C,
    plan_out: Box<dyn Write>,
}


impl<C: SessionControl> Sys<C> {
    pub fn new(settings: Settings, control: C) -> Sys<C> {
        Sys {
            settings,
            control,
            plan_out: Box::new(std::io::sink()),
        }
    }

    /// Where plans are printed ahead of execution.
    pub fn with_plan_output(mut self, out: impl Write + 'static) -> Sys<C> {
        self.plan_out = Box::new(out);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    /// The single dispatch method.
    pub fn execute(&mut self, cmd: Command) -> Response {
        let result = match cmd {
            Command::Edit { session, dry_run } => self.cmd_edit(&session, dry_run),
            Command::Apply { session, path, dry_run } => {
                self.cmd_apply(&session, Path::new(&path), dry_run)
            }
            Command::List { session, format } => self.cmd_list(&session, format.as_deref()),
            Command::Help { topic } => Ok(crate::help::help_text(topic.as_deref())),
        };
        match result {
            Ok(output) => Response::Ok { output },
            Err(e) => Response::Error {
                message: e.to_string(),
            },
        }
    }

    /// Capture the live windows of `session`.
    pub fn capture(&mut self, session: &str) -> Result<WindowSnapshot> {
        let windows = self.control.list_windows(session)?;
        WindowSnapshot::new(windows).map_err(|source| Error::Snapshot {
            session: session.to_string(),
            source,
        })
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    fn cmd_list(&mut self, session: &str, format: Option<&str>) -> Result<String> {
        let snapshot = self.capture(session)?;
        match format {
            Some("json") => Ok(serde_json::to_string_pretty(snapshot.windows())?),
            _ => Ok(render_listing(session, &snapshot)),
        }
    }

    fn cmd_edit(&mut self, session: &str, dry_run: bool) -> Result<String> {
        let snapshot = self.capture(session)?;
        let listing = render_listing(session, &snapshot);
        let edited = editor::edit_text(
            &listing,
            &self.settings.editor_command(),
            &self.settings.listing_suffix,
        )?;
        self.reconcile(session, snapshot, &edited, dry_run)
    }

    fn cmd_apply(&mut self, session: &str, path: &Path, dry_run: bool) -> Result<String> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ReadListing {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = self.capture(session)?;
        self.reconcile(session, snapshot, &text, dry_run)
    }

    // -----------------------------------------------------------------------
    // Reconcile
    // -----------------------------------------------------------------------

    fn reconcile(
        &mut self,
        session: &str,
        snapshot: WindowSnapshot,
        text: &str,
        dry_run: bool,
    ) -> Result<String> {
        let entries = parse_listing(text)?;
        let plan = Plan::build(session, snapshot, &entries)?;
        if plan.is_empty() {
            return Ok(format!("No changes for session '{}'", session));
        }
        tracing::info!(session, steps = plan.steps.len(), dry_run, "reconciling");

        if dry_run {
            let windows = reconcile::simulate(&plan)?;
            let result = WindowSnapshot::new(windows)
                .map(|snap| render_listing(session, &snap))
                .unwrap_or_default();
            return Ok(format!(
                "Plan for '{}' (dry run):\n{}\n\nResulting listing:\n{}",
                session,
                plan.describe(),
                result.trim_end()
            ));
        }

        writeln!(self.plan_out, "Plan for '{}':\n{}\n", session, plan.describe())
            .and_then(|_| self.plan_out.flush())
            .map_err(Error::Output)?;
        let report = reconcile::execute(&plan, &mut self.control)?;
        Ok(format!("Applied {} steps ({} swaps)", report.steps, report.swaps))
    }
}

//! tmux backend — builds tmux argument lists and runs them.

use std::process::Command;

use crate::infrastructure::{ControlError, SessionControl};
use crate::types::config::Settings;
use crate::types::window::{Window, WindowId};


/// Format string for window listings: id, index, name, tab separated.
pub const WINDOW_FORMAT: &str = "#{window_id}\t#{window_index}\t#{window_name}";


/// Builds argument vectors for the tmux commands muxwin issues.
#[derive(Debug, Clone, Default)]
pub struct TmuxCommandBuilder;

impl TmuxCommandBuilder {
    pub fn new() -> TmuxCommandBuilder {
        TmuxCommandBuilder
    }

    pub fn list_windows(&self, session: &str) -> Vec<String> {
        args(&["list-windows", "-t", &exact(session), "-F", WINDOW_FORMAT])
    }

    pub fn kill_window(&self, id: &WindowId) -> Vec<String> {
        args(&["kill-window", "-t", id.as_str()])
    }

    /// Renumber every window of the session in sequence.
    pub fn renumber(&self, session: &str) -> Vec<String> {
        args(&["move-window", "-r", "-t", &exact(session)])
    }

    pub fn rename_window(&self, id: &WindowId, name: &str) -> Vec<String> {
        args(&["rename-window", "-t", id.as_str(), "--", name])
    }

    /// Swap two windows without changing the active window.
    pub fn swap_window(&self, a: &WindowId, b: &WindowId) -> Vec<String> {
        args(&["swap-window", "-d", "-s", a.as_str(), "-t", b.as_str()])
    }

    /// Create a detached window right after the highest-numbered one and
    /// print its id, index and name.
    pub fn new_window(&self, session: &str, name: &str) -> Vec<String> {
        let target = format!("{}:{{end}}", exact(session));
        args(&[
            "new-window", "-d", "-a", "-t", &target, "-n", name, "-P", "-F", WINDOW_FORMAT,
        ])
    }
}

/// Session target matched by exact name; a bare name is a prefix match.
fn exact(session: &str) -> String {
    format!("={}", session)
}

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}


/// Parse `list-windows -F WINDOW_FORMAT` output.
pub fn parse_list_windows(raw: &str) -> Result<Vec<Window>, String> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_window_line)
        .collect()
}

fn parse_window_line(line: &str) -> Result<Window, String> {
    let mut parts = line.splitn(3, '\t');
    let id = parts.next().unwrap_or_default();
    let index = parts.next().ok_or_else(|| format!("missing index in '{}'", line))?;
    let name = parts.next().unwrap_or_default();
    if !id.starts_with('@') {
        return Err(format!("invalid window id in '{}'", line));
    }
    let index = index
        .parse::<u32>()
        .map_err(|_| format!("window index is not a number in '{}'", line))?;
    Ok(Window::new(id, index, name))
}


/// `SessionControl` over a tmux server reached through the tmux binary.
#[derive(Debug, Clone)]
pub struct Tmux {
    bin: String,
    renumber_after_kill: bool,
    builder: TmuxCommandBuilder,
}

impl Tmux {
    pub fn new(settings: &Settings) -> Tmux {
        Tmux {
            bin: settings.tmux_bin.clone(),
            renumber_after_kill: settings.renumber_after_kill,
            builder: TmuxCommandBuilder::new(),
        }
    }

    fn run(&self, args: Vec<String>) -> Result<String, ControlError> {
        let command = format!("{} {}", self.bin, args.join(" "));
        tracing::debug!(%command, "tmux");
        let output = Command::new(&self.bin)
            .args(&args)
            .output()
            .map_err(|source| ControlError::Spawn {
                command: command.clone(),
                source,
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ControlError::Failed { command, stderr });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl SessionControl for Tmux {
    fn list_windows(&mut self, session: &str) -> Result<Vec<Window>, ControlError> {
        let args = self.builder.list_windows(session);
        let command = args.join(" ");
        let raw = self.run(args)?;
        parse_list_windows(&raw).map_err(|detail| ControlError::UnexpectedOutput { command, detail })
    }

    fn kill_window(&mut self, session: &str, id: &WindowId) -> Result<(), ControlError> {
        self.run(self.builder.kill_window(id))?;
        if self.renumber_after_kill {
            self.run(self.builder.renumber(session))?;
        }
        Ok(())
    }

    fn rename_window(
        &mut self,
        _session: &str,
        id: &WindowId,
        name: &str,
    ) -> Result<(), ControlError> {
        self.run(self.builder.rename_window(id, name)).map(|_| ())
    }

    fn swap_windows(
        &mut self,
        _session: &str,
        a: &WindowId,
        b: &WindowId,
    ) -> Result<(), ControlError> {
        self.run(self.builder.swap_window(a, b)).map(|_| ())
    }

    fn create_window(&mut self, session: &str, name: &str) -> Result<Window, ControlError> {
        let args = self.builder.new_window(session, name);
        let command = args.join(" ");
        let raw = self.run(args)?;
        let mut windows = parse_list_windows(&raw)
            .map_err(|detail| ControlError::UnexpectedOutput { command: command.clone(), detail })?;
        match (windows.pop(), windows.is_empty()) {
            (Some(window), true) => Ok(window),
            _ => Err(ControlError::UnexpectedOutput {
                command,
                detail: format!("expected one window, got '{}'", raw.trim()),
            }),
        }
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_window_lines() {
        let raw = "@1\t0\tshell\n@4\t1\tlogs: tail\n@9\t3\t\n";
        let windows = parse_list_windows(raw).unwrap();
        assert_eq!(
            windows,
            vec![
                Window::new("@1", 0, "shell"),
                Window::new("@4", 1, "logs: tail"),
                Window::new("@9", 3, ""),
            ]
        );
    }

    #[test]
    fn name_with_tab_kept_whole() {
        let windows = parse_list_windows("@2\t5\ta\tb").unwrap();
        assert_eq!(windows[0].name, "a\tb");
    }

    #[test]
    fn bad_lines_rejected() {
        assert!(parse_list_windows("@1\tx\tname").is_err());
        assert!(parse_list_windows("1\t0\tname").is_err());
        assert!(parse_list_windows("@1").is_err());
    }

    #[test]
    fn blank_output_is_no_windows() {
        assert!(parse_list_windows("\n").unwrap().is_empty());
    }

    #[test]
    fn builder_targets_windows_by_id() {
        let b = TmuxCommandBuilder::new();
        let a = WindowId::new("@3");
        let z = WindowId::new("@7");
        assert_eq!(b.swap_window(&a, &z), vec!["swap-window", "-d", "-s", "@3", "-t", "@7"]);
        assert_eq!(b.kill_window(&a), vec!["kill-window", "-t", "@3"]);
        assert_eq!(
            b.rename_window(&a, "two words"),
            vec!["rename-window", "-t", "@3", "--", "two words"]
        );
    }

    #[test]
    fn dash_leading_name_is_not_a_flag() {
        let b = TmuxCommandBuilder::new();
        let cmd = b.rename_window(&WindowId::new("@1"), "-old a");
        let sep = cmd.iter().position(|a| a == "--").unwrap();
        assert_eq!(cmd[sep + 1], "-old a");
        assert_eq!(sep + 2, cmd.len());
    }

    #[test]
    fn sessions_are_targeted_by_exact_name() {
        let b = TmuxCommandBuilder::new();
        assert_eq!(
            b.list_windows("work"),
            vec!["list-windows", "-t", "=work", "-F", WINDOW_FORMAT]
        );
        assert_eq!(b.renumber("work"), vec!["move-window", "-r", "-t", "=work"]);
        assert_eq!(b.new_window("work", "x")[4], "=work:{end}");
    }

    #[test]
    fn new_window_appends_after_last() {
        let b = TmuxCommandBuilder::new();
        let cmd = b.new_window("work", "build");
        assert_eq!(&cmd[..5], &["new-window", "-d", "-a", "-t", "=work:{end}"]);
        assert!(cmd.contains(&"-P".to_string()));
        assert_eq!(cmd.last().map(|s| s.as_str()), Some(WINDOW_FORMAT));
    }

    #[test]
    fn missing_binary_is_spawn_error() {
        let settings = Settings {
            tmux_bin: "/nonexistent/muxwin-test-tmux".into(),
            ..Settings::default()
        };
        let mut tmux = Tmux::new(&settings);
        let err = tmux.list_windows("work").unwrap_err();
        assert!(matches!(err, ControlError::Spawn { .. }));
    }
}

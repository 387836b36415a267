//! External editor round trip for the window listing.

use std::io::Write;
use std::process::{Command, ExitStatus};

use thiserror::Error;


#[derive(Debug, Error)]
pub enum EditorError {
    #[error("no editor configured")]
    NoEditor,

    #[error("cannot prepare scratch file: {0}")]
    Scratch(#[source] std::io::Error),

    #[error("failed to launch editor '{editor}': {source}")]
    Launch {
        editor: String,
        source: std::io::Error,
    },

    #[error("editor '{editor}' exited with {status}; edit aborted")]
    Aborted { editor: String, status: ExitStatus },

    #[error("cannot read edited listing: {0}")]
    ReadBack(#[source] std::io::Error),
}


/// Write `content` to a scratch file, open it in `editor`, and return the
/// file's contents once the editor exits successfully.
///
/// `editor` may carry arguments (`code --wait`); the file path is appended.
/// The scratch file is removed on every return path.
pub fn edit_text(content: &str, editor: &str, suffix: &str) -> Result<String, EditorError> {
    let mut parts = editor.split_whitespace();
    let program = parts.next().ok_or(EditorError::NoEditor)?;

    let mut file = tempfile::Builder::new()
        .prefix("muxwin-")
        .suffix(suffix)
        .tempfile()
        .map_err(EditorError::Scratch)?;
    file.write_all(content.as_bytes())
        .and_then(|_| file.flush())
        .map_err(EditorError::Scratch)?;

    tracing::debug!(editor, path = %file.path().display(), "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(file.path())
        .status()
        .map_err(|source| EditorError::Launch {
            editor: editor.to_string(),
            source,
        })?;
    if !status.success() {
        return Err(EditorError::Aborted {
            editor: editor.to_string(),
            status,
        });
    }

    // Re-read by path: many editors replace the file rather than write in place.
    std::fs::read_to_string(file.path()).map_err(EditorError::ReadBack)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_file_returns_content() {
        let text = edit_text("0: shell\n", "true", ".tmux").unwrap();
        assert_eq!(text, "0: shell\n");
    }

    #[test]
    fn edits_are_read_back_and_scratch_removed() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("edit.sh");
        let seen = dir.path().join("seen");
        std::fs::write(
            &script,
            format!("printf '_: new\\n' >> \"$1\"\necho \"$1\" > '{}'\n", seen.display()),
        )
        .unwrap();
        let editor = format!("sh {}", script.display());

        let text = edit_text("0: shell\n", &editor, ".tmux").unwrap();
        assert_eq!(text, "0: shell\n_: new\n");

        let scratch = std::fs::read_to_string(&seen).unwrap();
        let scratch = std::path::Path::new(scratch.trim());
        assert!(scratch.to_string_lossy().ends_with(".tmux"));
        assert!(!scratch.exists());
    }

    #[test]
    fn failing_editor_aborts() {
        let err = edit_text("0: shell\n", "false", ".tmux").unwrap_err();
        assert!(matches!(err, EditorError::Aborted { .. }));
        assert!(err.to_string().contains("edit aborted"));
    }

    #[test]
    fn missing_editor_is_launch_error() {
        let err = edit_text("", "/nonexistent/muxwin-editor", ".tmux").unwrap_err();
        assert!(matches!(err, EditorError::Launch { .. }));
    }

    #[test]
    fn blank_editor_rejected() {
        assert!(matches!(edit_text("", "  ", ".tmux"), Err(EditorError::NoEditor)));
    }
}

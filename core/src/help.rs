//! Help system for muxwin commands.

pub fn help_text(topic: Option<&str>) -> String {
    match topic {
        None => overview(),
        Some(t) => match command_help(t) {
            Some(text) => text,
            None => format!(
                "Unknown help topic: '{}'. Run 'muxwin help' for a list of topics.",
                t
            ),
        },
    }
}


fn overview() -> String {
    "\
muxwin — edit the windows of a tmux session in your editor

Usage: muxwin [--dry-run] <session>
       muxwin <command> [args...]

Commands:
  <session>                      Edit the session's window listing
  list <session> [--json]        Print the session's window listing
  apply <session> <file>         Reconcile the session against a listing file
  help [topic]                   Show help

Topics: listing, edit, apply, list, config

Run 'muxwin help <topic>' for details."
        .into()
}


fn command_help(topic: &str) -> Option<String> {
    let text = match topic {
        "listing" => "\
Listing format

  N: Title    keep the window now at index N, titled Title
  _: Title    create a new window titled Title

  The order of lines is the new left-to-right order of windows.
  Leaving out an index closes that window. Lines starting with #
  and blank lines are ignored. At least one existing window must
  be kept.",
        "edit" => "\
muxwin [--dry-run] <session>

  Opens the session's listing in $VISUAL, $EDITOR or vi (or the
  editor set in config.yaml). After the editor exits successfully
  the session is changed to match: windows are closed, renamed,
  reordered and created. With --dry-run the plan and resulting
  listing are printed and tmux is left alone.",
        "apply" => "\
muxwin apply [--dry-run] <session> <file>

  Like edit, but reads the listing from <file> instead of opening
  an editor.",
        "list" => "\
muxwin list <session> [--json]

  Prints the session's listing, or its windows as JSON.",
        "config" => "\
Configuration: $MUXWIN_CONFIG_DIR/config.yaml
           or: ~/.config/muxwin/config.yaml

  editor: <command>             editor to open listings with
  tmux_bin: tmux                tmux executable
  renumber_after_kill: true     renumber windows after closing one
  listing_suffix: .tmux         suffix of the scratch listing file",
        _ => return None,
    };
    Some(text.into())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_lists_commands() {
        let text = help_text(None);
        assert!(text.contains("muxwin"));
        assert!(text.contains("apply <session> <file>"));
    }

    #[test]
    fn listing_topic_explains_new_windows() {
        assert!(help_text(Some("listing")).contains("_: Title"));
    }

    #[test]
    fn unknown_topic_reported() {
        assert!(help_text(Some("nope")).contains("Unknown help topic: 'nope'"));
    }
}

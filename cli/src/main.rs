//! muxwin CLI — edit the windows of a tmux session in your editor.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use muxwin_core::command::Command;
use muxwin_core::infrastructure::tmux::Tmux;
use muxwin_core::sys::Sys;
use muxwin_core::types::config::Settings;
use muxwin_core::types::response::Response;


#[derive(Debug, Parser)]
#[command(
    name = "muxwin",
    about = "Edit the windows of a tmux session in your editor",
    args_conflicts_with_subcommands = true,
    disable_help_subcommand = true
)]
struct Cli {
    /// Session to edit
    session: Option<String>,

    /// Print the plan and resulting listing without touching tmux
    #[arg(long)]
    dry_run: bool,

    /// Log every tmux call to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Sub>,
}

#[derive(Debug, Subcommand)]
enum Sub {
    /// Print the session's window listing
    List {
        session: String,
        #[arg(long)]
        json: bool,
    },
    /// Reconcile the session against a listing file
    Apply {
        session: String,
        path: PathBuf,
        #[arg(long)]
        dry_run: bool,
    },
    /// Show help on a topic
    Help { topic: Option<String> },
}

impl Cli {
    fn into_command(self) -> Result<Command, String> {
        match (self.command, self.session) {
            (Some(Sub::List { session, json }), _) => Ok(Command::List {
                session,
                format: json.then(|| "json".to_string()),
            }),
            (Some(Sub::Apply { session, path, dry_run }), _) => Ok(Command::Apply {
                session,
                path: path.to_string_lossy().into_owned(),
                dry_run,
            }),
            (Some(Sub::Help { topic }), _) => Ok(Command::Help { topic }),
            (None, Some(session)) => Ok(Command::Edit {
                session,
                dry_run: self.dry_run,
            }),
            (None, None) => Err("No session specified. Run 'muxwin help' for usage.".into()),
        }
    }
}


fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cmd = match cli.into_command() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("muxwin: {}", e);
            process::exit(1);
        }
    };

    let config_dir = resolve_config_dir();
    let settings = match Settings::load(&config_dir) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("muxwin: {}", e);
            process::exit(1);
        }
    };

    let tmux = Tmux::new(&settings);
    let mut sys = Sys::new(settings, tmux).with_plan_output(std::io::stdout());
    match sys.execute(cmd) {
        Response::Ok { output } => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Response::Error { message } => {
            eprintln!("muxwin error: {}", message);
            process::exit(1);
        }
    }
}


fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}


fn resolve_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MUXWIN_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(home).join(".config").join("muxwin")
}

//! vedit entrypoint: runs one modal editing session on the real terminal.
//!
//! The saved text goes to stdout (or `--output`); a discarded session exits
//! with status 1 and prints nothing.
use anyhow::{Context, Result};
use clap::Parser;
use core_config::load_from;
use core_input::{ListenerGate, TerminalInput};
use core_session::run_editor;
use core_terminal::CrosstermBackend;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "vedit.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "vedit", version, about = "Modal text editor for composing prompts")]
struct Args {
    /// Optional file whose contents seed the buffer. It is never written back.
    pub path: Option<PathBuf>,
    /// Name shown in the title row (defaults to the file name of PATH).
    #[arg(long = "name")]
    pub name: Option<String>,
    /// Optional configuration file path (overrides discovery of `vedit.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Write the saved text to this file instead of stdout.
    #[arg(long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Saved,
    Discarded,
}

impl Outcome {
    fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Saved => ExitCode::SUCCESS,
            Outcome::Discarded => ExitCode::from(1),
        }
    }
}

struct AppStartup {
    _log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self { _log_guard: None }
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        if tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_ansi(false)
            .with_writer(nb_writer)
            .try_init()
            .is_ok()
        {
            self._log_guard = Some(guard);
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

/// Initial buffer text and display name.
fn load_initial(args: &Args) -> Result<(String, Option<String>)> {
    let initial = match args.path.as_ref() {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => String::new(),
    };
    let name = args.name.clone().or_else(|| {
        args.path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
            .map(str::to_owned)
    });
    info!(
        target: "runtime.startup",
        bytes = initial.len(),
        from_file = args.path.is_some(),
        "initial_text_loaded"
    );
    Ok((initial, name))
}

fn deliver<W: Write>(result: Option<&str>, output: Option<&Path>, stdout: &mut W) -> Result<Outcome> {
    let Some(text) = result else {
        info!(target: "runtime", "session_discarded");
        return Ok(Outcome::Discarded);
    };
    match output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            writeln!(stdout, "{text}")?;
            stdout.flush()?;
        }
    }
    info!(target: "runtime", bytes = text.len(), to_file = output.is_some(), "session_saved");
    Ok(Outcome::Saved)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    startup.configure_logging()?;
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let (initial, name) = load_initial(&args)?;
    let config = load_from(args.config.clone())?;

    let mut input = TerminalInput::new(ListenerGate::new());
    let mut terminal = CrosstermBackend::new(config.file.display.alternate_screen);
    let mut screen = std::io::stdout();
    let result = run_editor(
        &initial,
        name.as_deref(),
        &mut input,
        &mut terminal,
        &mut screen,
        &config,
    )
    .await?;
    drop(terminal);

    let outcome = deliver(result.as_deref(), args.output.as_deref(), &mut std::io::stdout())?;
    info!(target: "runtime", ?outcome, "shutdown");
    Ok(outcome.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let args = Args::try_parse_from([
            "vedit", "draft.md", "--name", "Prompt", "--config", "c.toml", "--output", "out.txt",
        ])
        .unwrap();
        assert_eq!(args.path, Some(PathBuf::from("draft.md")));
        assert_eq!(args.name.as_deref(), Some("Prompt"));
        assert_eq!(args.config, Some(PathBuf::from("c.toml")));
        assert_eq!(args.output, Some(PathBuf::from("out.txt")));
    }

    #[test]
    fn name_defaults_to_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.txt");
        std::fs::write(&path, "line one\nline two").unwrap();
        let args = Args::try_parse_from(["vedit".into(), path.clone().into_os_string()]).unwrap();
        let (initial, name) = load_initial(&args).unwrap();
        assert_eq!(initial, "line one\nline two");
        assert_eq!(name.as_deref(), Some("seed.txt"));
    }

    #[test]
    fn missing_seed_file_is_an_error() {
        let args = Args::try_parse_from(["vedit", "__no_such_seed__.txt"]).unwrap();
        let err = load_initial(&args).unwrap_err();
        assert!(format!("{err:#}").contains("__no_such_seed__.txt"));
    }

    #[test]
    fn saved_text_goes_to_stdout_or_file() {
        let mut out = Vec::new();
        assert_eq!(deliver(Some("a\nb"), None, &mut out).unwrap(), Outcome::Saved);
        assert_eq!(String::from_utf8(out).unwrap(), "a\nb\n");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.txt");
        let mut out = Vec::new();
        assert_eq!(
            deliver(Some("text"), Some(&path), &mut out).unwrap(),
            Outcome::Saved
        );
        assert!(out.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "text");
    }

    #[test]
    fn discard_writes_nothing() {
        let mut out = Vec::new();
        assert_eq!(deliver(None, None, &mut out).unwrap(), Outcome::Discarded);
        assert!(out.is_empty());
    }
}

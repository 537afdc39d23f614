//! Raw-mode session controller.
//!
//! `run_editor` owns one editing session: it acquires the input and terminal
//! through a `SessionGuard`, renders a frame, then feeds keys one at a time
//! to the mode state machine and redraws after each, until a handler stops
//! the session or the input ends. The result is the joined buffer text after
//! a deliberate save (`:w` then `:q`, `:wq`, `:x`, `ZZ`) and `None` after a
//! discard (`:q!`, `Ctrl+C`, end of input).

use core_actions::handle_key;
use core_config::{Config, ConfigContext};
use core_input::InputSource;
use core_render::{RenderOptions, compose_frame, emit_frame};
use core_state::EditorState;
use core_terminal::TerminalBackend;
use std::io::Write;
use tracing::{debug, info};

mod guard;
pub use guard::SessionGuard;

const FALLBACK_SIZE: (u16, u16) = (80, 24);

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to acquire terminal: {0:#}")]
    Acquire(anyhow::Error),
    #[error("failed to read input: {0:#}")]
    Input(anyhow::Error),
    #[error("failed to render: {0:#}")]
    Render(anyhow::Error),
}

/// Run one editing session. Resolves to the final text on save, `None` on discard.
pub async fn run_editor<I, T, W>(
    initial: &str,
    file_name: Option<&str>,
    input: &mut I,
    terminal: &mut T,
    out: &mut W,
    config: &Config,
) -> Result<Option<String>, SessionError>
where
    I: InputSource,
    T: TerminalBackend,
    W: Write,
{
    let mut config = config.clone();
    let mut state = EditorState::with_undo_limit(
        initial,
        file_name.map(str::to_owned),
        config.undo_history(),
    );
    info!(
        target: "session",
        lines = state.buffer.line_count(),
        named = state.file_name.is_some(),
        "session_started"
    );

    let mut guard = SessionGuard::acquire(input, terminal)?;
    render(&mut guard, &state, &mut config, out)?;

    let mut keys = 0u64;
    while !state.is_stopped() {
        let Some(key) = guard.input().next_key().await.map_err(SessionError::Input)? else {
            info!(target: "session", "input_ended_discarding");
            state.force_quit();
            break;
        };
        keys += 1;
        handle_key(&mut state, &key);
        if !state.is_stopped() {
            render(&mut guard, &state, &mut config, out)?;
        }
    }
    drop(guard);

    let outcome = state.outcome();
    info!(
        target: "session",
        keys,
        saved = outcome.is_some(),
        lines = state.buffer.line_count(),
        "session_finished"
    );
    Ok(outcome)
}

fn render<I, T, W>(
    guard: &mut SessionGuard<'_, I, T>,
    state: &EditorState,
    config: &mut Config,
    out: &mut W,
) -> Result<(), SessionError>
where
    I: InputSource,
    T: TerminalBackend,
    W: Write,
{
    let (columns, rows) = guard.terminal().size().unwrap_or_else(|e| {
        debug!(target: "session", error = %e, "terminal_size_unavailable");
        FALLBACK_SIZE
    });
    config.recompute_with_context(ConfigContext::new(columns, rows));
    let opts = RenderOptions {
        max_lines: config.effective_max_lines,
        columns,
        line_numbers: config.file.display.line_numbers,
        hints: config.file.display.hints,
    };
    let frame = compose_frame(state, &opts);
    emit_frame(&frame, out).map_err(SessionError::Render)
}

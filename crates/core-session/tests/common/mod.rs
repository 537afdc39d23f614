#![allow(dead_code)] // Shared across several integration tests; each test binary uses a subset of helpers.

use anyhow::{Result, bail};
use core_config::Config;
use core_input::{ChannelInput, ListenerGate};
use core_terminal::TerminalBackend;
use tokio::sync::mpsc;

/// In-memory terminal recording every state transition.
#[derive(Debug, Default)]
pub struct FakeTerminal {
    pub raw: bool,
    pub on_screen: bool,
    pub calls: Vec<&'static str>,
    pub fail_enter: bool,
    pub size: (u16, u16),
}

impl FakeTerminal {
    pub fn new() -> Self {
        Self {
            size: (60, 30),
            ..Self::default()
        }
    }

    /// Terminal that starts in raw mode (the host was already raw).
    pub fn already_raw() -> Self {
        Self {
            raw: true,
            ..Self::new()
        }
    }
}

impl TerminalBackend for FakeTerminal {
    fn raw_mode_enabled(&self) -> Result<bool> {
        Ok(self.raw)
    }

    fn set_raw_mode(&mut self, enabled: bool) -> Result<()> {
        self.calls.push(if enabled { "raw_on" } else { "raw_off" });
        self.raw = enabled;
        Ok(())
    }

    fn enter_screen(&mut self) -> Result<()> {
        if self.fail_enter {
            bail!("screen unavailable");
        }
        self.calls.push("enter");
        self.on_screen = true;
        Ok(())
    }

    fn leave_screen(&mut self) -> Result<()> {
        self.calls.push("leave");
        self.on_screen = false;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        Ok(self.size)
    }
}

pub struct Harness {
    pub input: ChannelInput,
    pub gate: ListenerGate,
    pub terminal: FakeTerminal,
    pub out: Vec<u8>,
    pub config: Config,
}

impl Harness {
    /// Harness whose input yields `chunks` and then ends.
    pub fn with_chunks(chunks: &[&str]) -> Self {
        let (tx, rx) = mpsc::channel(chunks.len().max(1));
        for chunk in chunks {
            tx.try_send(chunk.to_string()).unwrap();
        }
        drop(tx);
        Self::from_receiver(rx)
    }

    pub fn from_receiver(rx: mpsc::Receiver<String>) -> Self {
        let gate = ListenerGate::new();
        Self {
            input: ChannelInput::new(rx, gate.clone()),
            gate,
            terminal: FakeTerminal::new(),
            out: Vec::new(),
            config: Config::default(),
        }
    }

    pub async fn run(&mut self, initial: &str, name: Option<&str>) -> Option<String> {
        core_session::run_editor(
            initial,
            name,
            &mut self.input,
            &mut self.terminal,
            &mut self.out,
            &self.config,
        )
        .await
        .unwrap()
    }

    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }

    pub fn assert_restored(&self) {
        assert!(!self.gate.is_suspended(), "listeners not resumed");
        assert!(!self.terminal.raw, "raw mode not restored");
        assert!(!self.terminal.on_screen, "screen not left");
    }
}

//! Input sources for the editing session.
//!
//! The session consumes keys through the `InputSource` capability, which
//! also owns the suspend/resume contract: while a session runs, every other
//! listener on the shared input (the host REPL's line reader, its own key
//! handlers) must stay detached so keys are seen exactly once. Hosts observe
//! that through a shared `ListenerGate`.
//!
//! Two sources are provided:
//! * `ChannelInput` receives raw text chunks (as a terminal in raw mode would
//!   deliver them) over a tokio channel and decodes them with `KeyDecoder`.
//! * `TerminalInput` reads crossterm events from an `EventStream`.
//!
//! Logs carry chunk lengths only, never typed text.

use core_events::{Key, KeyDecoder};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::mpsc::Receiver;
use tracing::{debug, trace};

mod key_map;
mod terminal;

pub use terminal::TerminalInput;

pub static CHUNKS_RECEIVED: AtomicU64 = AtomicU64::new(0);

#[allow(async_fn_in_trait)]
pub trait InputSource {
    /// Detach other listeners from the shared input.
    fn suspend(&mut self) -> anyhow::Result<()>;
    /// Reattach the listeners detached by `suspend`.
    fn resume(&mut self) -> anyhow::Result<()>;
    /// Next decoded key; `None` once the input is exhausted.
    async fn next_key(&mut self) -> anyhow::Result<Option<Key>>;
}

/// Shared flag telling host listeners to stand down while an editor owns input.
#[derive(Debug, Clone, Default)]
pub struct ListenerGate {
    suspended: Arc<AtomicBool>,
}

impl ListenerGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the gate was already suspended.
    pub fn suspend(&self) -> bool {
        let was = self.suspended.swap(true, Ordering::SeqCst);
        debug!(target: "input.gate", already = was, "listeners_suspended");
        was
    }

    pub fn resume(&self) {
        self.suspended.store(false, Ordering::SeqCst);
        debug!(target: "input.gate", "listeners_resumed");
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended.load(Ordering::SeqCst)
    }
}

/// An input source's hold on the gate. Remembers whether the host had
/// already suspended its listeners so `release` leaves them that way.
#[derive(Debug, Clone)]
pub(crate) struct GateHold {
    gate: ListenerGate,
    found_suspended: bool,
}

impl GateHold {
    pub(crate) fn new(gate: ListenerGate) -> Self {
        Self {
            gate,
            found_suspended: false,
        }
    }

    pub(crate) fn gate(&self) -> &ListenerGate {
        &self.gate
    }

    pub(crate) fn acquire(&mut self) {
        self.found_suspended = self.gate.suspend();
    }

    pub(crate) fn release(&mut self) {
        if self.found_suspended {
            debug!(target: "input.gate", "listeners_left_suspended");
        } else {
            self.gate.resume();
        }
        self.found_suspended = false;
    }
}

#[inline]
pub(crate) fn log_chunk(chunk: &str) {
    CHUNKS_RECEIVED.fetch_add(1, Ordering::Relaxed);
    trace!(target: "input.chunk", chunk_len = chunk.len(), "chunk_received");
}

/// Keys decoded from raw text chunks delivered over a channel.
pub struct ChannelInput {
    rx: Receiver<String>,
    decoder: KeyDecoder,
    pending: VecDeque<Key>,
    gate: GateHold,
}

impl ChannelInput {
    pub fn new(rx: Receiver<String>, gate: ListenerGate) -> Self {
        Self {
            rx,
            decoder: KeyDecoder::new(),
            pending: VecDeque::new(),
            gate: GateHold::new(gate),
        }
    }

    pub fn gate(&self) -> &ListenerGate {
        self.gate.gate()
    }
}

impl InputSource for ChannelInput {
    fn suspend(&mut self) -> anyhow::Result<()> {
        self.gate.acquire();
        Ok(())
    }

    fn resume(&mut self) -> anyhow::Result<()> {
        self.gate.release();
        Ok(())
    }

    async fn next_key(&mut self) -> anyhow::Result<Option<Key>> {
        loop {
            if let Some(key) = self.pending.pop_front() {
                return Ok(Some(key));
            }
            match self.rx.recv().await {
                Some(chunk) => {
                    log_chunk(&chunk);
                    self.pending.extend(self.decoder.decode(&chunk));
                }
                None => {
                    debug!(target: "input.chunk", "channel_closed");
                    return Ok(None);
                }
            }
        }
    }
}

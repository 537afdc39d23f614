//! Keys read from the real terminal through crossterm's `EventStream`.
//!
//! The stream type is generic so tests can drive the mapping with a
//! synthetic `tokio_stream::iter`.

use crate::key_map::{Mapped, map_event};
use crate::{GateHold, InputSource, ListenerGate, log_chunk};
use anyhow::Context as _;
use core_events::{Key, paste_keys};
use crossterm::event::{Event as CEvent, EventStream};
use std::collections::VecDeque;
use std::io;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, warn};

pub struct TerminalInput<S = EventStream> {
    stream: S,
    gate: GateHold,
    pending: VecDeque<Key>,
}

impl TerminalInput<EventStream> {
    pub fn new(gate: ListenerGate) -> Self {
        Self::with_stream(EventStream::new(), gate)
    }
}

impl<S> TerminalInput<S>
where
    S: Stream<Item = io::Result<CEvent>> + Unpin,
{
    pub fn with_stream(stream: S, gate: ListenerGate) -> Self {
        Self {
            stream,
            gate: GateHold::new(gate),
            pending: VecDeque::new(),
        }
    }
}

impl<S> InputSource for TerminalInput<S>
where
    S: Stream<Item = io::Result<CEvent>> + Unpin,
{
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
            let Some(result) = self.stream.next().await else {
                debug!(target: "input.terminal", "event_stream_ended");
                return Ok(None);
            };
            let event = result.inspect_err(|e| {
                warn!(target: "input.terminal", error_kind = ?e.kind(), "event_stream_error");
            });
            match map_event(event.context("reading terminal event")?) {
                Mapped::Key(key) => return Ok(Some(key)),
                Mapped::Paste(data) => {
                    log_chunk(&data);
                    self.pending.extend(paste_keys(&data));
                }
                Mapped::Ignored => {}
            }
        }
    }
}

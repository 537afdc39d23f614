//! Linear undo/redo history of whole-buffer snapshots.
//!
//! One snapshot is pushed before each discrete Normal/Visual mutation. Insert
//! mode coalesces a run of edits into a single snapshot taken lazily at the
//! first mutation; leaving Insert mode ends the run. Successive snapshots of an
//! identical buffer are skipped. Any new snapshot clears the redo stack.

use core_text::{Buffer, Position};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::trace;

/// Default maximum number of snapshots retained in undo history.
pub const UNDO_HISTORY_MAX: usize = 200;

#[derive(Clone, Debug)]
pub struct EditSnapshot {
    pub buffer: Buffer,
    pub position: Position,
    hash: u64,
}

/// Insert run state tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertRun {
    Inactive,
    Active { edits: u32 },
}

#[derive(Debug)]
pub struct UndoEngine {
    undo_stack: Vec<EditSnapshot>,
    redo_stack: Vec<EditSnapshot>,
    insert_run: InsertRun,
    limit: usize,
    skipped: u64,
}

impl Default for UndoEngine {
    fn default() -> Self {
        Self::new(UNDO_HISTORY_MAX)
    }
}

impl UndoEngine {
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            insert_run: InsertRun::Inactive,
            limit: limit.max(1),
            skipped: 0,
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
    pub fn insert_run(&self) -> InsertRun {
        self.insert_run
    }
    pub fn snapshots_skipped(&self) -> u64 {
        self.skipped
    }

    pub fn push_snapshot(&mut self, cursor: Position, buffer: &Buffer) {
        let hash = buffer_hash(buffer);
        if let Some(last) = self.undo_stack.last()
            && last.hash == hash
            && last.buffer == *buffer
        {
            self.skipped += 1;
            trace!(target: "state.undo", undo_depth = self.undo_stack.len(), "snapshot_dedupe_skip");
            return;
        }
        self.undo_stack.push(EditSnapshot {
            buffer: buffer.clone(),
            position: cursor,
            hash,
        });
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), lines = buffer.line_count(), "push_snapshot");
        if self.undo_stack.len() > self.limit {
            self.undo_stack.remove(0);
            trace!(target: "state.undo", "undo_stack_trimmed");
        }
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
    }

    /// Take the run snapshot if no insert run is active. Call before every insert-mode edit.
    pub fn begin_insert_coalescing(&mut self, cursor: Position, buffer: &Buffer) {
        if self.insert_run == InsertRun::Inactive {
            self.push_snapshot(cursor, buffer);
            self.insert_run = InsertRun::Active { edits: 0 };
        }
    }

    pub fn note_insert_edit(&mut self) {
        if let InsertRun::Active { edits } = &mut self.insert_run {
            *edits += 1;
        }
    }

    pub fn end_insert_coalescing(&mut self) {
        self.insert_run = InsertRun::Inactive;
    }

    pub fn undo(&mut self, cursor: &mut Position, buffer: &mut Buffer) -> bool {
        let Some(last) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(EditSnapshot {
            buffer: buffer.clone(),
            position: *cursor,
            hash: buffer_hash(buffer),
        });
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "undo_pop");
        *buffer = last.buffer;
        *cursor = last.position;
        true
    }

    pub fn redo(&mut self, cursor: &mut Position, buffer: &mut Buffer) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(EditSnapshot {
            buffer: buffer.clone(),
            position: *cursor,
            hash: buffer_hash(buffer),
        });
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "redo_pop");
        *buffer = next.buffer;
        *cursor = next.position;
        true
    }
}

fn buffer_hash(buf: &Buffer) -> u64 {
    let mut h = DefaultHasher::new();
    buf.lines().hash(&mut h);
    h.finish()
}

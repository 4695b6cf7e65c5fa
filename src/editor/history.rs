// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Undo/redo history.
//!
//! Two bounded stacks of labelled document snapshots. Each entry holds a
//! full deep copy of the document, so restoring it is exact: undo puts
//! back the document as it was before the operation, redo the document
//! as it was before the undo.

use crate::models::Document;
use std::collections::VecDeque;
use std::fmt;

/// Default capacity of each stack.
pub const DEFAULT_HISTORY_DEPTH: usize = 10;

/// Editor operation recorded in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Insert,
    Delete,
    Move,
    Cut,
    Paste,
    BringToFront,
    SendToBack,
}

impl Operation {
    /// Label shown in the Undo/Redo menu entries.
    ///
    /// Both reorder operations share the "bring forward" label.
    pub fn label(self) -> &'static str {
        match self {
            Operation::Insert => "insert",
            Operation::Delete => "delete",
            Operation::Move => "move",
            Operation::Cut => "cut",
            Operation::Paste => "paste",
            Operation::BringToFront | Operation::SendToBack => "bring forward",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A labelled document snapshot.
#[derive(Debug)]
pub struct HistoryEntry {
    pub operation: Operation,
    pub document: Document,
}

/// History system for undo/redo functionality.
#[derive(Debug)]
pub struct History {
    /// Undo stack, most recent at the front
    undo_stack: VecDeque<HistoryEntry>,
    /// Redo stack, most recent at the front
    redo_stack: VecDeque<HistoryEntry>,
    /// Maximum entries per stack
    max_size: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl History {
    pub fn new(max_size: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_size: max_size.max(1),
        }
    }

    /// Record the document as it was before `operation`.
    pub fn push_undo(&mut self, operation: Operation, before: Document) {
        Self::push_bounded(&mut self.undo_stack, self.max_size, operation, before);
    }

    /// Record the document as it was before undoing `operation`.
    pub fn push_redo(&mut self, operation: Operation, after: Document) {
        Self::push_bounded(&mut self.redo_stack, self.max_size, operation, after);
    }

    fn push_bounded(
        stack: &mut VecDeque<HistoryEntry>,
        max_size: usize,
        operation: Operation,
        document: Document,
    ) {
        stack.push_front(HistoryEntry { operation, document });
        stack.truncate(max_size);
    }

    /// Undo: swap the newest undo snapshot into `current`, saving the
    /// replaced document on the redo stack under the same operation.
    ///
    /// Observers registered on `current` stay with the live document and
    /// are notified of the restored state.
    pub fn undo(&mut self, current: &mut Document) -> Option<Operation> {
        let entry = self.undo_stack.pop_front()?;
        let replaced = Self::swap_live(current, entry.document);
        self.push_redo(entry.operation, replaced);
        Some(entry.operation)
    }

    /// Redo: the inverse of [`History::undo`].
    pub fn redo(&mut self, current: &mut Document) -> Option<Operation> {
        let entry = self.redo_stack.pop_front()?;
        let replaced = Self::swap_live(current, entry.document);
        self.push_undo(entry.operation, replaced);
        Some(entry.operation)
    }

    fn swap_live(current: &mut Document, snapshot: Document) -> Document {
        let observers = current.take_observers();
        let replaced = std::mem::replace(current, snapshot);
        current.attach_observers(observers);
        replaced
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Operation that the next undo would revert.
    pub fn next_undo(&self) -> Option<Operation> {
        self.undo_stack.front().map(|e| e.operation)
    }

    /// Operation that the next redo would reapply.
    pub fn next_redo(&self) -> Option<Operation> {
        self.redo_stack.front().map(|e| e.operation)
    }

    /// Menu text for Undo, e.g. "Undo insert".
    pub fn undo_label(&self) -> String {
        match self.next_undo() {
            Some(op) => format!("Undo {}", op),
            None => "Undo".to_string(),
        }
    }

    /// Menu text for Redo, e.g. "Redo insert".
    pub fn redo_label(&self) -> String {
        match self.next_redo() {
            Some(op) => format!("Redo {}", op),
            None => "Redo".to_string(),
        }
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Iterate the undo stack, newest first.
    pub fn undo_entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.undo_stack.iter()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

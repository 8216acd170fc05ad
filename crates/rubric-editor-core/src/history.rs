//! Undo/redo history for edit transactions.
//!
//! Each transaction is recorded as position + deleted text + inserted
//! text against the flattened value. The editor replays the inverse (or
//! the original) as a programmatic replacement transaction, so undone
//! and redone content goes back through the transform engine like any
//! other edit.

use smol_str::{SmolStr, ToSmolStr};

/// A recorded edit transaction.
#[derive(Debug, Clone)]
pub struct EditOp {
    /// Char offset where the edit occurred.
    pub pos: usize,
    /// Text that was deleted (empty for pure insertions).
    pub deleted: SmolStr,
    /// Text that was inserted (empty for pure deletions).
    pub inserted: SmolStr,
}

/// Bounded undo/redo stacks for one editor.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<EditOp>,
    redo_stack: Vec<EditOp>,
    max_steps: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(100)
    }
}

impl History {
    /// Create a history keeping at most `max_steps` undoable edits.
    pub fn new(max_steps: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_steps,
        }
    }

    /// Record a new edit. Clears the redo stack.
    pub fn record(&mut self, pos: usize, deleted: &str, inserted: &str) {
        if deleted.is_empty() && inserted.is_empty() {
            return;
        }
        self.redo_stack.clear();
        self.undo_stack.push(EditOp {
            pos,
            deleted: deleted.to_smolstr(),
            inserted: inserted.to_smolstr(),
        });
        while self.undo_stack.len() > self.max_steps {
            self.undo_stack.remove(0);
        }
    }

    /// Pop the most recent edit for undoing. The caller applies the
    /// inverse and then pushes the op back with [`History::push_redo`].
    pub fn pop_undo(&mut self) -> Option<EditOp> {
        self.undo_stack.pop()
    }

    /// Pop the most recently undone edit for redoing.
    pub fn pop_redo(&mut self) -> Option<EditOp> {
        self.redo_stack.pop()
    }

    /// Park an undone op so it can be redone.
    pub fn push_redo(&mut self, op: EditOp) {
        self.redo_stack.push(op);
    }

    /// Park a redone op so it can be undone again.
    pub fn push_undo(&mut self, op: EditOp) {
        self.undo_stack.push(op);
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Drop all history (used when the document is rebuilt from an
    /// external value; offsets recorded against the old value would be
    /// meaningless).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

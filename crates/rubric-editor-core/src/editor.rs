//! One field's live editor instance.
//!
//! An `Editor` owns a `Document`, the field's candidate words, and the
//! bookkeeping the form layer needs: registry id, cursor/selection,
//! the last value synced with the outside, and undo history. Every edit
//! runs as one synchronous transaction: mutate the document, then run
//! the transform engine to its fixpoint before control returns.

use std::ops::Range;

use smol_str::SmolStr;

use crate::document::{Document, EditError};
use crate::history::History;
use crate::transform::run_to_fixpoint;
use crate::types::{CandidateWords, EditInfo, Selection};

/// A live variable-annotation editor for one field.
#[derive(Debug, Clone)]
pub struct Editor {
    id: SmolStr,
    document: Document,
    words: CandidateWords,
    single_line: bool,
    cursor: usize,
    selection: Option<Selection>,
    last_synced_value: String,
    history: History,
}

impl Editor {
    /// Create an empty editor.
    pub fn new(id: impl Into<SmolStr>, words: CandidateWords, single_line: bool) -> Self {
        Self {
            id: id.into(),
            document: Document::new(),
            words,
            single_line,
            cursor: 0,
            selection: None,
            last_synced_value: String::new(),
            history: History::default(),
        }
    }

    /// Build the document from an initial external value and annotate it.
    pub fn with_value(mut self, value: &str) -> Self {
        self.document = Document::from_text(value);
        run_to_fixpoint(&mut self.document, &self.words);
        self.last_synced_value = value.to_string();
        self
    }

    // === Accessors ===

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The flattened plain-text value of the field.
    pub fn value(&self) -> String {
        self.document.flatten()
    }

    pub fn len_chars(&self) -> usize {
        self.document.len_chars()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn candidate_words(&self) -> &CandidateWords {
        &self.words
    }

    pub fn is_single_line(&self) -> bool {
        self.single_line
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = offset.min(self.document.len_chars());
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
    }

    /// Selected text, if a selection exists.
    pub fn selected_text(&self) -> Option<String> {
        let sel = self.selection?;
        if sel.is_collapsed() {
            return None;
        }
        Some(self.document.slice_chars(sel.to_range()))
    }

    /// The value last reconciled with the external owner (the sync
    /// controller's loop guard).
    pub fn last_synced_value(&self) -> &str {
        &self.last_synced_value
    }

    /// Record that the external owner now holds `value`.
    pub fn mark_synced(&mut self, value: &str) {
        self.last_synced_value = value.to_string();
    }

    // === Candidate words ===

    /// Replace the candidate-word set and immediately re-scan the whole
    /// document, so settled text and existing tokens pick up the change
    /// without waiting for the next edit.
    pub fn set_candidate_words(&mut self, words: CandidateWords) {
        if self.words == words {
            return;
        }
        self.words = words;
        let stats = crate::transform::rescan(&mut self.document, &self.words);
        tracing::debug!(
            id = %self.id,
            promotions = stats.promotions,
            demotions = stats.demotions,
            "candidate words changed; document re-scanned"
        );
    }

    // === Edit transactions ===

    /// Insert text (may contain line breaks) at a char offset.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<EditInfo, EditError> {
        self.replace(offset..offset, text)
    }

    /// Delete a char range.
    pub fn delete(&mut self, range: Range<usize>) -> Result<EditInfo, EditError> {
        self.replace(range, "")
    }

    /// Insert a line break. On single-line fields the break is consumed
    /// without effect: no block is created and nothing becomes dirty.
    pub fn insert_line_break(&mut self, offset: usize) -> Result<EditInfo, EditError> {
        if self.single_line {
            return Ok(EditInfo::noop(offset, self.document.len_chars()));
        }
        self.replace(offset..offset, "\n")
    }

    /// Replace a char range with text: the general edit transaction.
    ///
    /// Records history, runs the transform engine to its fixpoint, and
    /// places the cursor after the inserted text.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Result<EditInfo, EditError> {
        let len = self.document.len_chars();
        if range.start > range.end || range.end > len {
            return Err(EditError::OutOfBounds {
                offset: range.end,
                len,
            });
        }
        let text = if self.single_line {
            // The line-break constraint also covers pasted newlines.
            text.replace('\n', "")
        } else {
            text.to_string()
        };

        let deleted = self.document.slice_chars(range.clone());
        let info = self.document.replace_range(range.clone(), &text)?;
        self.history.record(range.start, &deleted, &text);
        run_to_fixpoint(&mut self.document, &self.words);

        self.cursor = range.start + info.inserted_len;
        self.selection = None;
        Ok(info)
    }

    /// Throw away the current document and rebuild it from an external
    /// value (sync controller step for external divergence). History is
    /// cleared: recorded offsets would be meaningless against the new
    /// value.
    pub fn rebuild_from(&mut self, value: &str) {
        self.document = Document::from_text(value);
        run_to_fixpoint(&mut self.document, &self.words);
        self.history.clear();
        self.cursor = self.cursor.min(self.document.len_chars());
        self.selection = None;
        self.last_synced_value = value.to_string();
    }

    // === Undo/redo ===

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Undo the most recent transaction. Returns true if one was undone.
    pub fn undo(&mut self) -> bool {
        let Some(op) = self.history.pop_undo() else {
            return false;
        };
        let inserted_chars = op.inserted.chars().count();
        let range = op.pos..op.pos + inserted_chars;
        if self.document.replace_range(range, &op.deleted).is_err() {
            self.history.push_undo(op);
            return false;
        }
        run_to_fixpoint(&mut self.document, &self.words);
        self.cursor = op.pos + op.deleted.chars().count();
        self.selection = None;
        self.history.push_redo(op);
        true
    }

    /// Redo the most recently undone transaction.
    pub fn redo(&mut self) -> bool {
        let Some(op) = self.history.pop_redo() else {
            return false;
        };
        let deleted_chars = op.deleted.chars().count();
        let range = op.pos..op.pos + deleted_chars;
        if self.document.replace_range(range, &op.inserted).is_err() {
            self.history.push_redo(op);
            return false;
        }
        run_to_fixpoint(&mut self.document, &self.words);
        self.cursor = op.pos + op.inserted.chars().count();
        self.selection = None;
        self.history.push_undo(op);
        true
    }
}

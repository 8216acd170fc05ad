//! Core editor types: candidate words, selection, and edit tracking.
//!
//! These types are framework-agnostic and shared by the document model,
//! the transform engine, and the form-layer wiring.

use std::ops::Range;

use smol_str::SmolStr;

/// The set of words eligible for annotation in one field.
///
/// Context-variable names come first, in caller order, followed by the
/// single response-variable name. The matcher iterates candidates in
/// exactly this order, so an earlier context variable wins over the
/// response variable when both occur in a text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateWords {
    /// Context-variable names, in the order supplied by the form layer.
    pub context_variables: Vec<SmolStr>,
    /// The designated response-variable name.
    pub response_variable: SmolStr,
}

impl CandidateWords {
    /// Create a candidate set from context-variable names and the
    /// response-variable name.
    pub fn new<I, S>(context_variables: I, response_variable: impl Into<SmolStr>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self {
            context_variables: context_variables.into_iter().map(Into::into).collect(),
            response_variable: response_variable.into(),
        }
    }

    /// Iterate candidates in match-precedence order.
    ///
    /// Yields `(word, is_response_variable)` pairs. Empty and
    /// whitespace-only words are skipped; they never match.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.context_variables
            .iter()
            .map(|w| (w.as_str(), false))
            .chain(std::iter::once((self.response_variable.as_str(), true)))
            .filter(|(w, _)| !w.trim().is_empty())
    }

    /// Check whether no usable candidate exists.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Text selection with anchor and head positions, in char offsets over
/// the flattened field value.
///
/// The anchor is where the selection started, the head is where the cursor
/// is now. They may be in any order - use `start()` and `end()` for ordered
/// bounds.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Where selection started
    pub anchor: usize,
    /// Where cursor is now
    pub head: usize,
}

impl Selection {
    /// Create a new selection.
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (cursor position).
    pub fn collapsed(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    /// Get the start (lower bound) of the selection.
    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// Get the end (upper bound) of the selection.
    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// Check if the selection is collapsed (empty, cursor only).
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    /// Get the selection length.
    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    /// Check if empty (same as is_collapsed).
    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }

    /// Convert to a Range<usize> (ordered).
    pub fn to_range(&self) -> Range<usize> {
        self.start()..self.end()
    }
}

/// Information about one applied edit transaction.
///
/// Returned by document edits so callers (history, sync, tests) can see
/// what changed without diffing the flattened value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditInfo {
    /// Character offset where the edit occurred
    pub edit_char_pos: usize,
    /// Number of characters inserted (line breaks count as one char)
    pub inserted_len: usize,
    /// Number of characters deleted
    pub deleted_len: usize,
    /// Whether the edit inserted or removed a block boundary
    pub contains_line_break: bool,
    /// Flattened value length (in chars) after this edit was applied
    pub value_len_after: usize,
}

impl EditInfo {
    /// An edit that changed nothing (e.g. a suppressed line break).
    pub fn noop(offset: usize, value_len: usize) -> Self {
        Self {
            edit_char_pos: offset,
            inserted_len: 0,
            deleted_len: 0,
            contains_line_break: false,
            value_len_after: value_len,
        }
    }

    /// Check whether this edit changed the document.
    pub fn is_noop(&self) -> bool {
        self.inserted_len == 0 && self.deleted_len == 0
    }

    /// Get the range occupied by inserted text after the edit.
    pub fn affected_range(&self) -> Range<usize> {
        self.edit_char_pos..self.edit_char_pos + self.inserted_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_order() {
        let words = CandidateWords::new(["document", "question"], "answer");
        let collected: Vec<_> = words.iter().collect();
        assert_eq!(
            collected,
            vec![("document", false), ("question", false), ("answer", true)]
        );
    }

    #[test]
    fn test_candidate_skips_blank_words() {
        let words = CandidateWords::new(["", "  ", "document"], " ");
        let collected: Vec<_> = words.iter().collect();
        assert_eq!(collected, vec![("document", false)]);
        assert!(!words.is_empty());

        let none = CandidateWords::new(Vec::<&str>::new(), "");
        assert!(none.is_empty());
    }

    #[test]
    fn test_selection_bounds() {
        let sel = Selection::new(10, 5);
        assert_eq!(sel.start(), 5);
        assert_eq!(sel.end(), 10);
        assert_eq!(sel.to_range(), 5..10);
        assert!(!sel.is_collapsed());

        let sel = Selection::collapsed(7);
        assert!(sel.is_empty());
        assert_eq!(sel.len(), 0);
    }

    #[test]
    fn test_edit_info_noop() {
        let info = EditInfo::noop(3, 12);
        assert!(info.is_noop());
        assert_eq!(info.affected_range(), 3..3);
    }
}

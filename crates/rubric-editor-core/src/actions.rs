//! Editor actions and input types.
//!
//! Platform-agnostic definitions for editor operations. `EditorAction`
//! represents semantic editing operations; `InputType` represents the
//! semantic intent of a platform input event (browser `beforeinput`
//! strings and the like) and lowers to an `EditorAction`.

/// A range in the flattened value, measured in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Normalize range so start <= end.
    pub fn normalize(self) -> Self {
        if self.start <= self.end {
            self
        } else {
            Self {
                start: self.end,
                end: self.start,
            }
        }
    }
}

impl From<std::ops::Range<usize>> for Range {
    fn from(r: std::ops::Range<usize>) -> Self {
        Self::new(r.start, r.end)
    }
}

impl From<Range> for std::ops::Range<usize> {
    fn from(r: Range) -> Self {
        r.start..r.end
    }
}

/// Semantic input types, following the W3C Input Events names.
///
/// Browser `beforeinput` events, native input methods, and programmatic
/// input can all produce these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputType {
    /// Insert typed text.
    InsertText,
    /// Insert a line break (Shift+Enter).
    InsertLineBreak,
    /// Insert a paragraph break (Enter).
    InsertParagraph,
    /// Insert from paste operation.
    InsertFromPaste,
    /// Insert from drop operation.
    InsertFromDrop,
    /// Insert replacement text (e.g., spell check correction).
    InsertReplacementText,
    /// Delete content backward (Backspace).
    DeleteContentBackward,
    /// Delete content forward (Delete key).
    DeleteContentForward,
    /// Delete by cut operation.
    DeleteByCut,
    /// Generic content deletion.
    DeleteContent,
    /// Undo.
    HistoryUndo,
    /// Redo.
    HistoryRedo,
    /// Unrecognized input type.
    Unknown(String),
}

impl InputType {
    /// Lower an input event to a semantic action.
    ///
    /// `text` carries the event's data payload (typed/pasted text) and
    /// `range` the target range reported by the platform. Returns `None`
    /// for inputs this editor does not handle.
    pub fn to_action(&self, text: Option<&str>, range: Range) -> Option<EditorAction> {
        match self {
            Self::InsertText | Self::InsertFromPaste | Self::InsertFromDrop => {
                Some(EditorAction::Insert {
                    text: text.unwrap_or_default().to_string(),
                    range,
                })
            }
            Self::InsertReplacementText => Some(EditorAction::Replace {
                text: text.unwrap_or_default().to_string(),
                range,
            }),
            Self::InsertLineBreak | Self::InsertParagraph => {
                Some(EditorAction::InsertLineBreak { range })
            }
            Self::DeleteContentBackward | Self::DeleteByCut | Self::DeleteContent => {
                Some(EditorAction::DeleteBackward { range })
            }
            Self::DeleteContentForward => Some(EditorAction::DeleteForward { range }),
            Self::HistoryUndo => Some(EditorAction::Undo),
            Self::HistoryRedo => Some(EditorAction::Redo),
            Self::Unknown(_) => None,
        }
    }
}

/// Parse a browser inputType string to an InputType enum.
pub fn parse_input_type(s: &str) -> InputType {
    match s {
        "insertText" => InputType::InsertText,
        "insertLineBreak" => InputType::InsertLineBreak,
        "insertParagraph" => InputType::InsertParagraph,
        "insertFromPaste" => InputType::InsertFromPaste,
        "insertFromDrop" => InputType::InsertFromDrop,
        "insertReplacementText" => InputType::InsertReplacementText,
        "deleteContentBackward" => InputType::DeleteContentBackward,
        "deleteContentForward" => InputType::DeleteContentForward,
        "deleteByCut" => InputType::DeleteByCut,
        "deleteContent" => InputType::DeleteContent,
        "historyUndo" => InputType::HistoryUndo,
        "historyRedo" => InputType::HistoryRedo,
        other => InputType::Unknown(other.to_string()),
    }
}

/// Semantic editing operations on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// Insert text, replacing the range if it is not a caret.
    Insert { text: String, range: Range },
    /// Insert a line break. Consumed without effect on single-line fields.
    InsertLineBreak { range: Range },
    /// Delete backward from a caret, or delete the range.
    DeleteBackward { range: Range },
    /// Delete forward from a caret, or delete the range.
    DeleteForward { range: Range },
    /// Programmatic replacement of a range (AI rewrite, spell check).
    Replace { text: String, range: Range },
    /// Select the whole value.
    SelectAll,
    /// Move the cursor, collapsing any selection.
    MoveCursor { offset: usize },
    /// Extend the selection to an offset.
    ExtendSelection { offset: usize },
    Undo,
    Redo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_normalize() {
        let r = Range::new(7, 3).normalize();
        assert_eq!((r.start, r.end), (3, 7));
        assert_eq!(r.len(), 4);
        assert!(!r.is_caret());
        assert!(Range::caret(5).is_caret());
    }

    #[test]
    fn test_parse_known_input_types() {
        assert_eq!(parse_input_type("insertText"), InputType::InsertText);
        assert_eq!(parse_input_type("insertParagraph"), InputType::InsertParagraph);
        assert_eq!(
            parse_input_type("deleteContentBackward"),
            InputType::DeleteContentBackward
        );
        assert_eq!(
            parse_input_type("insertHorizontalRule"),
            InputType::Unknown("insertHorizontalRule".to_string())
        );
    }

    #[test]
    fn test_lowering_to_actions() {
        let range = Range::caret(4);
        assert_eq!(
            InputType::InsertText.to_action(Some("x"), range),
            Some(EditorAction::Insert {
                text: "x".to_string(),
                range
            })
        );
        assert_eq!(
            InputType::InsertParagraph.to_action(None, range),
            Some(EditorAction::InsertLineBreak { range })
        );
        assert_eq!(
            InputType::Unknown("formatBold".into()).to_action(None, range),
            None
        );
        assert_eq!(
            InputType::DeleteByCut.to_action(None, range),
            Some(EditorAction::DeleteBackward { range })
        );
    }
}

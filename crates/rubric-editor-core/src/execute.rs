//! Action execution for editors.
//!
//! `execute_action` is the central dispatch point: it lowers semantic
//! `EditorAction`s to edit transactions on an `Editor`. Ranges coming
//! from the platform layer are normalized and clamped here, so a stale
//! event range never turns into an error mid-keystroke.

use crate::actions::{EditorAction, Range};
use crate::editor::Editor;
use crate::types::Selection;

/// Execute an editor action.
///
/// Returns true if the action was handled (including a consumed
/// single-line line break, which is handled but changes nothing).
pub fn execute_action(editor: &mut Editor, action: &EditorAction) -> bool {
    match action {
        EditorAction::Insert { text, range } => execute_insert(editor, text, *range),
        EditorAction::InsertLineBreak { range } => execute_insert_line_break(editor, *range),
        EditorAction::DeleteBackward { range } => execute_delete_backward(editor, *range),
        EditorAction::DeleteForward { range } => execute_delete_forward(editor, *range),
        EditorAction::Replace { text, range } => execute_insert(editor, text, *range),
        EditorAction::SelectAll => execute_select_all(editor),
        EditorAction::MoveCursor { offset } => execute_move_cursor(editor, *offset),
        EditorAction::ExtendSelection { offset } => execute_extend_selection(editor, *offset),
        EditorAction::Undo => editor.undo(),
        EditorAction::Redo => editor.redo(),
    }
}

/// Normalize and clamp a platform range to the current value length.
fn clamp(editor: &Editor, range: Range) -> std::ops::Range<usize> {
    let len = editor.len_chars();
    let r = range.normalize();
    r.start.min(len)..r.end.min(len)
}

fn execute_insert(editor: &mut Editor, text: &str, range: Range) -> bool {
    let range = clamp(editor, range);
    editor.replace(range, text).is_ok()
}

fn execute_insert_line_break(editor: &mut Editor, range: Range) -> bool {
    let range = clamp(editor, range);
    if !range.is_empty() && editor.delete(range.clone()).is_err() {
        return false;
    }
    editor.insert_line_break(range.start).is_ok()
}

fn execute_delete_backward(editor: &mut Editor, range: Range) -> bool {
    let range = clamp(editor, range);
    if !range.is_empty() {
        return editor.delete(range).is_ok();
    }
    if range.start == 0 {
        return false;
    }
    editor.delete(range.start - 1..range.start).is_ok()
}

fn execute_delete_forward(editor: &mut Editor, range: Range) -> bool {
    let range = clamp(editor, range);
    if !range.is_empty() {
        return editor.delete(range).is_ok();
    }
    if range.start >= editor.len_chars() {
        return false;
    }
    editor.delete(range.start..range.start + 1).is_ok()
}

fn execute_select_all(editor: &mut Editor) -> bool {
    let len = editor.len_chars();
    editor.set_selection(Some(Selection::new(0, len)));
    editor.set_cursor(len);
    true
}

fn execute_move_cursor(editor: &mut Editor, offset: usize) -> bool {
    editor.set_cursor(offset);
    editor.set_selection(None);
    true
}

fn execute_extend_selection(editor: &mut Editor, offset: usize) -> bool {
    let offset = offset.min(editor.len_chars());
    let anchor = editor
        .selection()
        .map(|s| s.anchor)
        .unwrap_or_else(|| editor.cursor());
    editor.set_selection(Some(Selection::new(anchor, offset)));
    editor.set_cursor(offset);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CandidateWords;

    fn make_editor(value: &str, single_line: bool) -> Editor {
        Editor::new(
            "test-field",
            CandidateWords::new(["document"], "answer"),
            single_line,
        )
        .with_value(value)
    }

    #[test]
    fn test_insert() {
        let mut editor = make_editor("hello", false);
        let action = EditorAction::Insert {
            text: " world".to_string(),
            range: Range::caret(5),
        };
        assert!(execute_action(&mut editor, &action));
        assert_eq!(editor.value(), "hello world");
    }

    #[test]
    fn test_insert_replaces_selection_range() {
        let mut editor = make_editor("hello world", false);
        let action = EditorAction::Insert {
            text: "there".to_string(),
            range: Range::new(6, 11),
        };
        assert!(execute_action(&mut editor, &action));
        assert_eq!(editor.value(), "hello there");
    }

    #[test]
    fn test_delete_backward_at_start_is_unhandled() {
        let mut editor = make_editor("hello", false);
        let action = EditorAction::DeleteBackward {
            range: Range::caret(0),
        };
        assert!(!execute_action(&mut editor, &action));
        assert_eq!(editor.value(), "hello");
    }

    #[test]
    fn test_delete_backward() {
        let mut editor = make_editor("hello", false);
        let action = EditorAction::DeleteBackward {
            range: Range::caret(5),
        };
        assert!(execute_action(&mut editor, &action));
        assert_eq!(editor.value(), "hell");
    }

    #[test]
    fn test_delete_forward_at_end_is_unhandled() {
        let mut editor = make_editor("hi", false);
        let action = EditorAction::DeleteForward {
            range: Range::caret(2),
        };
        assert!(!execute_action(&mut editor, &action));
    }

    #[test]
    fn test_stale_range_is_clamped() {
        let mut editor = make_editor("hi", false);
        let action = EditorAction::Insert {
            text: "!".to_string(),
            range: Range::caret(99),
        };
        assert!(execute_action(&mut editor, &action));
        assert_eq!(editor.value(), "hi!");
    }

    #[test]
    fn test_line_break_consumed_on_single_line() {
        let mut editor = make_editor("one line", true);
        let action = EditorAction::InsertLineBreak {
            range: Range::caret(3),
        };
        assert!(execute_action(&mut editor, &action));
        assert_eq!(editor.value(), "one line");
        assert_eq!(editor.document().block_count(), 1);
    }

    #[test]
    fn test_line_break_with_selection_still_deletes_selection() {
        let mut editor = make_editor("one line", true);
        let action = EditorAction::InsertLineBreak {
            range: Range::new(3, 8),
        };
        assert!(execute_action(&mut editor, &action));
        assert_eq!(editor.value(), "one");
        assert_eq!(editor.document().block_count(), 1);
    }

    #[test]
    fn test_multi_line_break_splits_block() {
        let mut editor = make_editor("one line", false);
        let action = EditorAction::InsertLineBreak {
            range: Range::caret(3),
        };
        assert!(execute_action(&mut editor, &action));
        assert_eq!(editor.value(), "one\n line");
    }

    #[test]
    fn test_select_all_then_replace() {
        let mut editor = make_editor("old text", false);
        assert!(execute_action(&mut editor, &EditorAction::SelectAll));
        let sel = editor.selection().unwrap();
        assert_eq!((sel.start(), sel.end()), (0, 8));

        let action = EditorAction::Insert {
            text: "answer".to_string(),
            range: sel.to_range().into(),
        };
        assert!(execute_action(&mut editor, &action));
        assert_eq!(editor.value(), "answer");
        let doc = editor.document();
        assert!(doc.leaves().iter().any(|&k| doc.node(k).unwrap().is_token()));
    }

    #[test]
    fn test_undo_via_action() {
        let mut editor = make_editor("hello", false);
        execute_action(
            &mut editor,
            &EditorAction::Insert {
                text: "!".to_string(),
                range: Range::caret(5),
            },
        );
        assert!(execute_action(&mut editor, &EditorAction::Undo));
        assert_eq!(editor.value(), "hello");
        assert!(execute_action(&mut editor, &EditorAction::Redo));
        assert_eq!(editor.value(), "hello!");
    }

    #[test]
    fn test_extend_selection_tracks_anchor() {
        let mut editor = make_editor("hello", false);
        execute_action(&mut editor, &EditorAction::MoveCursor { offset: 1 });
        execute_action(&mut editor, &EditorAction::ExtendSelection { offset: 4 });
        let sel = editor.selection().unwrap();
        assert_eq!((sel.anchor, sel.head), (1, 4));
    }
}

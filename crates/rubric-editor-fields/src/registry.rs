//! Flat registry mapping field ids to live editors.
//!
//! Editors register under a caller-chosen id. Registration is
//! first-wins: a second editor arriving under an id that is already
//! live is rejected and the original keeps the slot. Operations
//! addressed to an id that is not registered are safe no-ops, so
//! callers may fire-and-forget against fields that have already
//! unmounted.

use std::collections::HashMap;
use std::ops::Range;

use rubric_editor_core::{EditInfo, Editor};
use smol_str::SmolStr;
use tracing::{debug, warn};

/// Id-keyed collection of live editors.
#[derive(Debug, Default)]
pub struct EditorRegistry {
    editors: HashMap<SmolStr, Editor>,
}

impl EditorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an editor under its id. Returns `false` (and keeps the
    /// existing editor) when the id is already taken.
    pub fn register(&mut self, editor: Editor) -> bool {
        let id = SmolStr::from(editor.id());
        if self.editors.contains_key(id.as_str()) {
            warn!(%id, "duplicate editor id, keeping first registration");
            return false;
        }
        debug!(%id, "editor registered");
        self.editors.insert(id, editor);
        true
    }

    /// Remove and return the editor for `id`, if registered.
    pub fn unregister(&mut self, id: &str) -> Option<Editor> {
        let removed = self.editors.remove(id);
        if removed.is_some() {
            debug!(%id, "editor unregistered");
        }
        removed
    }

    pub fn contains(&self, id: &str) -> bool {
        self.editors.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Editor> {
        self.editors.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Editor> {
        self.editors.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.editors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }

    /// Ids of all registered editors, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &SmolStr> {
        self.editors.keys()
    }

    /// Current flattened value of the field, or `None` when the id is
    /// not registered.
    pub fn value_of(&self, id: &str) -> Option<String> {
        self.editors.get(id).map(|e| e.value())
    }

    /// Replace the entire content of the field. No-op returning `None`
    /// when the id is not registered.
    pub fn replace_value(&mut self, id: &str, text: &str) -> Option<EditInfo> {
        let Some(editor) = self.editors.get_mut(id) else {
            debug!(%id, "replace_value on unregistered id ignored");
            return None;
        };
        let len = editor.len_chars();
        editor.replace(0..len, text).ok()
    }

    /// Replace a char range of the field. No-op returning `None` when
    /// the id is not registered or the range is out of bounds.
    pub fn replace_range(&mut self, id: &str, range: Range<usize>, text: &str) -> Option<EditInfo> {
        let Some(editor) = self.editors.get_mut(id) else {
            debug!(%id, "replace_range on unregistered id ignored");
            return None;
        };
        editor.replace(range, text).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rubric_editor_core::CandidateWords;

    fn words() -> CandidateWords {
        CandidateWords::new(["document"], "answer")
    }

    fn editor(id: &str, value: &str) -> Editor {
        Editor::new(id, words(), false).with_value(value)
    }

    #[test]
    fn test_register_and_lookup() {
        let mut reg = EditorRegistry::new();
        assert!(reg.register(editor("a", "hello")));
        assert!(reg.contains("a"));
        assert_eq!(reg.value_of("a").as_deref(), Some("hello"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_duplicate_id_keeps_first() {
        let mut reg = EditorRegistry::new();
        assert!(reg.register(editor("a", "first")));
        assert!(!reg.register(editor("a", "second")));
        assert_eq!(reg.value_of("a").as_deref(), Some("first"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_unregister_frees_id() {
        let mut reg = EditorRegistry::new();
        reg.register(editor("a", "first"));
        let removed = reg.unregister("a");
        assert_eq!(removed.map(|e| e.value()).as_deref(), Some("first"));
        assert!(!reg.contains("a"));
        // The id can be reused after removal.
        assert!(reg.register(editor("a", "second")));
        assert_eq!(reg.value_of("a").as_deref(), Some("second"));
    }

    #[test]
    fn test_operations_on_unregistered_id_are_noops() {
        let mut reg = EditorRegistry::new();
        assert!(reg.unregister("ghost").is_none());
        assert!(reg.value_of("ghost").is_none());
        assert!(reg.replace_value("ghost", "text").is_none());
        assert!(reg.replace_range("ghost", 0..0, "text").is_none());
    }

    #[test]
    fn test_replace_value_reannotates() {
        let mut reg = EditorRegistry::new();
        reg.register(editor("a", "plain"));
        let info = reg.replace_value("a", "see the document");
        assert!(info.is_some());
        assert_eq!(reg.value_of("a").as_deref(), Some("see the document"));
    }

    #[test]
    fn test_replace_range_out_of_bounds_is_noop() {
        let mut reg = EditorRegistry::new();
        reg.register(editor("a", "abc"));
        assert!(reg.replace_range("a", 2..99, "x").is_none());
        assert_eq!(reg.value_of("a").as_deref(), Some("abc"));
    }
}

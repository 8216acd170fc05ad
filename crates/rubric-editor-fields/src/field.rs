//! Field lifecycle: mount, input routing, unmount.
//!
//! A [`FieldBinding`] is the handle a host component keeps for the
//! lifetime of one rendered field. Mounting registers an editor in the
//! shared [`EditorRegistry`]; when the id is already live the binding
//! comes back un-owned, and its unmount leaves the original editor in
//! place. That keeps a transiently double-rendered field from tearing
//! down its sibling's state.

use rubric_editor_core::{CandidateWords, Editor, Range, execute_action, parse_input_type};
use smol_str::SmolStr;
use tracing::{debug, warn};

use crate::registry::EditorRegistry;
use crate::sync::{SyncOutcome, sync_value};

/// Everything needed to mount one field.
#[derive(Debug, Clone)]
pub struct FieldConfig {
    pub editor_id: SmolStr,
    /// Initial value, annotated on mount.
    pub value: String,
    pub candidate_words: CandidateWords,
    pub single_line: bool,
    /// Shown by the host when the field is empty. Carried here so the
    /// host can read it back per id; the core never renders it.
    pub placeholder: Option<SmolStr>,
}

/// Live handle to a mounted field.
#[derive(Debug)]
pub struct FieldBinding {
    id: SmolStr,
    placeholder: Option<SmolStr>,
    /// Whether this binding registered the editor. Only the owning
    /// binding removes it on unmount.
    owned: bool,
}

impl FieldBinding {
    /// Register an editor for `config` and return the binding. If the
    /// id is already registered the existing editor is kept and the
    /// returned binding does not own it.
    pub fn mount(registry: &mut EditorRegistry, config: FieldConfig) -> Self {
        let FieldConfig {
            editor_id,
            value,
            candidate_words,
            single_line,
            placeholder,
        } = config;
        let editor =
            Editor::new(editor_id.clone(), candidate_words, single_line).with_value(&value);
        let owned = registry.register(editor);
        if !owned {
            warn!(id = %editor_id, "field mounted over live id, binding is read-along");
        }
        Self {
            id: editor_id,
            placeholder,
            owned,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn is_owned(&self) -> bool {
        self.owned
    }

    /// Current field value, or `None` once the editor is gone.
    pub fn value(&self, registry: &EditorRegistry) -> Option<String> {
        registry.value_of(&self.id)
    }

    /// Route one `beforeinput`-shaped event to the editor. Returns
    /// `true` when the event changed editor state. Unknown input types
    /// and events for an unregistered id are ignored.
    pub fn input(
        &self,
        registry: &mut EditorRegistry,
        input_type: &str,
        text: Option<&str>,
        range: Range,
    ) -> bool {
        let Some(editor) = registry.get_mut(&self.id) else {
            debug!(id = %self.id, input_type, "input for unregistered field ignored");
            return false;
        };
        let Some(action) = parse_input_type(input_type).to_action(text, range) else {
            debug!(id = %self.id, input_type, "unhandled input type");
            return false;
        };
        execute_action(editor, &action)
    }

    /// Reconcile the host's copy of the value. See [`sync_value`].
    pub fn observe(
        &self,
        registry: &mut EditorRegistry,
        external: &str,
        on_change: impl FnMut(&str),
    ) -> Option<SyncOutcome> {
        let editor = registry.get_mut(&self.id)?;
        Some(sync_value(editor, external, on_change))
    }

    /// Swap the candidate word set and re-annotate. No-op when the
    /// words are unchanged or the editor is gone.
    pub fn set_candidate_words(&self, registry: &mut EditorRegistry, words: CandidateWords) {
        if let Some(editor) = registry.get_mut(&self.id) {
            editor.set_candidate_words(words);
        }
    }

    /// Tear the field down. Only the binding that registered the editor
    /// removes it; a read-along binding leaves the registry untouched.
    pub fn unmount(self, registry: &mut EditorRegistry) -> Option<Editor> {
        if !self.owned {
            debug!(id = %self.id, "read-along binding unmounted, editor kept");
            return None;
        }
        registry.unregister(&self.id)
    }
}

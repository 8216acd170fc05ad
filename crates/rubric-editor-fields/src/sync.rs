//! External-value reconciliation.
//!
//! The host holds the field value in its own state and hands it back on
//! every render. Comparing the incoming value against the last value the
//! host *acknowledged* (rather than against current editor content)
//! distinguishes a genuine external update from the host echoing an
//! edit the editor itself produced, so the two state holders never
//! rebuild each other in a loop.

use rubric_editor_core::Editor;
use tracing::{debug, trace};

/// What a [`sync_value`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Both sides already agree.
    Unchanged,
    /// The host carried a value the editor had not seen: the document
    /// was rebuilt and re-annotated from it.
    Rebuilt,
    /// The editor carried edits the host had not seen: the change
    /// callback was invoked with the current content.
    Emitted,
}

/// Reconcile `external` (the host's copy of the value) with the editor.
///
/// Exactly one of three things happens:
/// - values already agree: nothing.
/// - `external` differs from the last value the host acknowledged: the
///   host made a programmatic update, so the editor rebuilds from it.
/// - otherwise the difference originated in the editor: `on_change` is
///   called with the current content and the acknowledgement recorded.
pub fn sync_value(
    editor: &mut Editor,
    external: &str,
    mut on_change: impl FnMut(&str),
) -> SyncOutcome {
    let current = editor.value();
    if current == external {
        trace!(id = editor.id(), "sync: values already agree");
        return SyncOutcome::Unchanged;
    }

    if external != editor.last_synced_value() {
        debug!(id = editor.id(), "sync: external update, rebuilding");
        editor.rebuild_from(external);
        return SyncOutcome::Rebuilt;
    }

    debug!(id = editor.id(), "sync: local edits, notifying host");
    on_change(&current);
    editor.mark_synced(&current);
    SyncOutcome::Emitted
}

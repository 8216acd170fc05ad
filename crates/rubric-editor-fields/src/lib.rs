//! Field registry and host-sync layer for the rubric editor.
//!
//! This crate sits between `rubric-editor-core` and whatever host UI
//! embeds the editors. It owns the set of mounted fields, routes input
//! events to the right editor by id, and reconciles externally-held
//! values with editor state without echo loops.
//!
//! # Architecture
//!
//! - `registry`: flat id -> editor map, first mount wins
//! - `sync`: external-value reconciliation with loop guard
//! - `field`: mount/unmount lifecycle and input routing
//!
//! # Re-exports
//!
//! This crate re-exports `rubric-editor-core` for convenience, so hosts
//! only need to depend on `rubric-editor-fields`.

// Re-export core crate
pub use rubric_editor_core;
pub use rubric_editor_core::*;

pub mod field;
pub mod registry;
pub mod sync;

pub use field::{FieldBinding, FieldConfig};
pub use registry::EditorRegistry;
pub use sync::{SyncOutcome, sync_value};

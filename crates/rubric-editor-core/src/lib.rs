//! rubric-editor-core: Pure Rust editor logic without framework dependencies.
//!
//! This crate provides the core of the variable-annotation text editor used
//! by criteria description fields:
//! - `Document` - arena-backed block/leaf document model
//! - `find_first_variable` - candidate-word matching over plain text
//! - `run_to_fixpoint` - the promote/demote annotation transform engine
//! - `Editor` - one field's document plus candidate words and edit history
//! - Actions and input-type mapping - all platform-agnostic

pub mod actions;
pub mod document;
pub mod editor;
pub mod execute;
pub mod history;
pub mod matcher;
pub mod transform;
pub mod types;

pub use actions::{EditorAction, InputType, Range, parse_input_type};
pub use document::{Document, EditError, Node, NodeKey};
pub use editor::Editor;
pub use execute::execute_action;
pub use history::History;
pub use matcher::{VariableMatch, find_first_variable};
pub use smol_str::SmolStr;
pub use transform::{TransformStats, rescan, run_to_fixpoint};
pub use types::{CandidateWords, EditInfo, Selection};

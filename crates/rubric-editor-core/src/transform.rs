//! The promote/demote annotation transform engine.
//!
//! After every edit transaction the engine revisits dirty leaves in
//! document order and re-derives annotation boundaries:
//!
//! - a run containing a candidate word is split around the first match
//!   and the match promoted to a token;
//! - a token whose content is no longer exactly a candidate is demoted
//!   back to a run and merged with its run neighbors.
//!
//! The engine iterates until a pass leaves the dirty set empty.
//! Termination: promotion converts run characters into clean tokens and
//! only re-dirties the strictly shorter prefix/suffix runs; demotion
//! consumes a dirty token and leaves the merged run settled. Tokens only
//! become dirty through edits or a candidate-list change, never through
//! the engine itself, so each invocation strictly shrinks the unverified
//! text and must reach a fixpoint.

use crate::document::{Document, Node, NodeKey};
use crate::matcher::{VariableMatch, find_first_variable};
use crate::types::CandidateWords;

/// Pass ceiling for a single invocation. Annotation fields are short;
/// hitting this means the promote/demote state machine is oscillating.
const MAX_PASSES: usize = 64;

/// Counters from one fixpoint invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransformStats {
    /// Number of passes over the dirty set.
    pub passes: usize,
    /// Runs (or run spans) promoted to tokens.
    pub promotions: usize,
    /// Tokens demoted to plain runs.
    pub demotions: usize,
}

/// Run the transform engine until no dirty leaf remains.
///
/// Runs synchronously inside the caller's edit transaction; never
/// yields mid-pass. Structural changes only: the flattened value is
/// identical before and after.
pub fn run_to_fixpoint(doc: &mut Document, words: &CandidateWords) -> TransformStats {
    let mut stats = TransformStats::default();

    while doc.has_dirty() {
        if stats.passes >= MAX_PASSES {
            tracing::warn!(
                passes = stats.passes,
                "transform engine did not converge; abandoning dirty leaves"
            );
            break;
        }
        let dirty = doc.take_dirty_in_order();
        for key in dirty {
            // The leaf may have been consumed by an earlier merge or
            // split in this same pass.
            let Some(node) = doc.node(key).cloned() else {
                continue;
            };
            match node {
                Node::Run { text } => {
                    if let Some(m) = find_first_variable(&text, words) {
                        promote(doc, key, &text, m);
                        stats.promotions += 1;
                    }
                }
                Node::Token { text, .. } => revisit_token(doc, key, &text, words, &mut stats),
            }
        }
        stats.passes += 1;
    }

    tracing::trace!(
        passes = stats.passes,
        promotions = stats.promotions,
        demotions = stats.demotions,
        "transform fixpoint reached"
    );
    stats
}

/// Mark every leaf dirty and run to fixpoint.
///
/// Used when the candidate-word list changes: settled text is re-scanned
/// immediately instead of waiting for the next edit to touch it, and
/// existing tokens are re-validated (demoted if their word was removed,
/// response flags refreshed if the response variable was renamed).
pub fn rescan(doc: &mut Document, words: &CandidateWords) -> TransformStats {
    doc.mark_all_dirty();
    run_to_fixpoint(doc, words)
}

/// Split a run around its first match and promote the match to a token.
///
/// Empty prefix/suffix pieces are discarded. The new prefix and suffix
/// runs are re-dirtied so later matches in the same string are caught on
/// the next pass; the token itself is created clean.
fn promote(doc: &mut Document, key: NodeKey, text: &str, m: VariableMatch) {
    let total = text.chars().count();
    if m.position == 0 && m.length == total {
        doc.set_node(key, Node::token(m.text, m.is_response_variable));
        return;
    }

    let prefix: String = text.chars().take(m.position).collect();
    let suffix: String = text.chars().skip(m.end()).collect();

    let mut pieces = Vec::with_capacity(3);
    let mut dirty_piece_indices = Vec::with_capacity(2);
    if !prefix.is_empty() {
        dirty_piece_indices.push(pieces.len());
        pieces.push(Node::run(prefix));
    }
    let token_index = pieces.len();
    pieces.push(Node::token(m.text, m.is_response_variable));
    if !suffix.is_empty() {
        dirty_piece_indices.push(pieces.len());
        pieces.push(Node::run(suffix));
    }

    let keys = doc.replace_leaf(key, pieces);
    for i in dirty_piece_indices {
        if i != token_index {
            doc.mark_dirty(keys[i]);
        }
    }
}

/// Re-check a token whose content changed.
///
/// A token stays a token only while its whole content still matches a
/// candidate. Anything else demotes the full content to a plain run:
/// `"documents"` contains the candidate `"document"` as a sub-span, but
/// the user turned the word into a different one, so re-splitting around
/// the sub-span here would resurrect an annotation the user just
/// destroyed. The demoted run is left settled; the next edit that
/// touches it (or a candidate-list rescan) re-runs matching over it.
fn revisit_token(
    doc: &mut Document,
    key: NodeKey,
    text: &str,
    words: &CandidateWords,
    stats: &mut TransformStats,
) {
    let total = text.chars().count();
    match find_first_variable(text, words) {
        // Still a full match; refresh the response flag in case the
        // candidate set changed which bucket this word sits in.
        Some(m) if m.position == 0 && m.length == total => {
            doc.set_node(key, Node::token(m.text, m.is_response_variable));
        }
        _ => {
            doc.set_node(key, Node::run(text));
            if let Some((block, index)) = doc.position_of(key) {
                let kept = doc.merge_run_neighbors(block, index);
                doc.clear_dirty(kept);
            }
            stats.demotions += 1;
        }
    }
}

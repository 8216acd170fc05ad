//! Arena-backed document model for one annotation field.
//!
//! A `Document` is an ordered sequence of blocks (paragraphs); each block
//! holds an ordered sequence of inline leaves that are either plain-text
//! runs or atomic variable tokens. Leaves live in a slotmap arena and are
//! addressed by stable `NodeKey`s, so splits and replacements performed
//! mid-transaction never leave dangling references.
//!
//! All edit operations are addressed in char offsets over the flattened
//! value (leaf contents concatenated, one `\n` between blocks). Edits only
//! mutate content and structure; annotation happens afterwards in the
//! transform engine, driven by the dirty set maintained here.

use std::collections::HashSet;
use std::ops::Range;

use slotmap::{SlotMap, new_key_type};
use smol_str::{SmolStr, format_smolstr};
use thiserror::Error;

use crate::types::EditInfo;

new_key_type! {
    /// Stable arena key for an inline leaf.
    pub struct NodeKey;
}

/// An inline leaf: freely editable text, or an atomic variable token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// A contiguous span of ordinary editable text.
    Run { text: SmolStr },
    /// A recognized variable reference. Atomic: never subdivided by
    /// edits, only mutated as a whole and then demoted or re-split by
    /// the transform engine.
    Token {
        text: SmolStr,
        is_response_variable: bool,
    },
}

impl Node {
    /// Create a plain-text run.
    pub fn run(text: impl Into<SmolStr>) -> Self {
        Self::Run { text: text.into() }
    }

    /// Create a variable token.
    pub fn token(text: impl Into<SmolStr>, is_response_variable: bool) -> Self {
        Self::Token {
            text: text.into(),
            is_response_variable,
        }
    }

    /// The leaf's text content.
    pub fn text(&self) -> &str {
        match self {
            Self::Run { text } => text,
            Self::Token { text, .. } => text,
        }
    }

    /// Content length in chars.
    pub fn len_chars(&self) -> usize {
        self.text().chars().count()
    }

    pub fn is_token(&self) -> bool {
        matches!(self, Self::Token { .. })
    }

    pub fn is_run(&self) -> bool {
        matches!(self, Self::Run { .. })
    }
}

/// One paragraph: an ordered list of leaf keys. A block with no leaves
/// is an empty line.
#[derive(Clone, Debug, Default)]
pub struct Block {
    children: Vec<NodeKey>,
}

/// Error raised by edit operations on degenerate caller input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("edit offset {offset} is past the end of the document (len {len})")]
    OutOfBounds { offset: usize, len: usize },
    #[error("plain insert text may not contain a line break")]
    UnexpectedLineBreak,
}

/// Where a char offset lands for insertion purposes.
enum InsertPoint {
    /// Strictly inside a leaf's content.
    InChild {
        block: usize,
        index: usize,
        key: NodeKey,
        offset_in_child: usize,
    },
    /// Between leaves (or at a block edge): before `children[before]`.
    Boundary { block: usize, before: usize },
}

/// One field's content tree plus its dirty set.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: SlotMap<NodeKey, Node>,
    blocks: Vec<Block>,
    dirty: HashSet<NodeKey>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document: a single block with no leaves.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            blocks: vec![Block::default()],
            dirty: HashSet::new(),
        }
    }

    /// Build a document from an external plain-text value.
    ///
    /// Splits on `\n` into blocks; each non-empty line becomes a single
    /// run, marked dirty so the next transform pass annotates it. Empty
    /// lines become blocks with no leaves. Total over arbitrary strings.
    pub fn from_text(value: &str) -> Self {
        let mut doc = Self {
            nodes: SlotMap::with_key(),
            blocks: Vec::new(),
            dirty: HashSet::new(),
        };
        for line in value.split('\n') {
            let mut block = Block::default();
            if !line.is_empty() {
                let key = doc.nodes.insert(Node::run(line));
                doc.dirty.insert(key);
                block.children.push(key);
            }
            doc.blocks.push(block);
        }
        doc
    }

    // === Reading ===

    /// Flatten the document back to its plain-text value.
    ///
    /// Concatenates leaf contents block by block with `\n` between
    /// blocks. Promotion and demotion never gain or lose characters, so
    /// this always reconstructs the logical field value exactly.
    pub fn flatten(&self) -> String {
        let mut out = String::new();
        for (b, block) in self.blocks.iter().enumerate() {
            if b > 0 {
                out.push('\n');
            }
            for &key in &block.children {
                out.push_str(self.nodes[key].text());
            }
        }
        out
    }

    /// Flattened length in chars, including block separators.
    pub fn len_chars(&self) -> usize {
        let leaves: usize = self
            .blocks
            .iter()
            .flat_map(|b| &b.children)
            .map(|&k| self.nodes[k].len_chars())
            .sum();
        leaves + self.blocks.len().saturating_sub(1)
    }

    /// Char-addressed slice of the flattened value.
    pub fn slice_chars(&self, range: Range<usize>) -> String {
        self.flatten()
            .chars()
            .skip(range.start)
            .take(range.end.saturating_sub(range.start))
            .collect()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Leaf keys of one block, in order.
    pub fn block_leaves(&self, block: usize) -> &[NodeKey] {
        &self.blocks[block].children
    }

    /// All leaf keys in document order.
    pub fn leaves(&self) -> Vec<NodeKey> {
        self.blocks
            .iter()
            .flat_map(|b| b.children.iter().copied())
            .collect()
    }

    /// Look up a leaf by key.
    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    // === Dirty tracking ===

    pub(crate) fn mark_dirty(&mut self, key: NodeKey) {
        if self.nodes.contains_key(key) {
            self.dirty.insert(key);
        }
    }

    /// Mark every leaf dirty, forcing a full re-scan on the next
    /// transform pass. Used when the candidate-word list changes.
    pub fn mark_all_dirty(&mut self) {
        let keys = self.leaves();
        self.dirty.extend(keys);
    }

    /// Withdraw a pending dirty mark (used when a demoted run should
    /// stay settled instead of being re-scanned).
    pub(crate) fn clear_dirty(&mut self, key: NodeKey) {
        self.dirty.remove(&key);
    }

    pub fn has_dirty(&self) -> bool {
        // Removed leaves may linger in the set; only live keys count.
        self.dirty.iter().any(|k| self.nodes.contains_key(*k))
    }

    /// Drain the dirty set, returning live keys in document order.
    pub(crate) fn take_dirty_in_order(&mut self) -> Vec<NodeKey> {
        let ordered: Vec<NodeKey> = self
            .blocks
            .iter()
            .flat_map(|b| b.children.iter().copied())
            .filter(|k| self.dirty.contains(k))
            .collect();
        self.dirty.clear();
        ordered
    }

    // === Structural operations (used by the transform engine) ===

    /// Locate a leaf's (block, index) position.
    pub(crate) fn position_of(&self, key: NodeKey) -> Option<(usize, usize)> {
        for (b, block) in self.blocks.iter().enumerate() {
            if let Some(i) = block.children.iter().position(|&k| k == key) {
                return Some((b, i));
            }
        }
        None
    }

    /// Replace a leaf in place, preserving its key and dirty state.
    pub(crate) fn set_node(&mut self, key: NodeKey, node: Node) {
        if let Some(slot) = self.nodes.get_mut(key) {
            *slot = node;
        }
    }

    /// Replace one leaf with an ordered sequence of new leaves.
    ///
    /// The old key is removed from the arena; the returned keys occupy
    /// its position in the block.
    pub(crate) fn replace_leaf(&mut self, key: NodeKey, pieces: Vec<Node>) -> Vec<NodeKey> {
        let Some((block, index)) = self.position_of(key) else {
            return Vec::new();
        };
        self.nodes.remove(key);
        self.dirty.remove(&key);
        let keys: Vec<NodeKey> = pieces.into_iter().map(|n| self.nodes.insert(n)).collect();
        self.blocks[block]
            .children
            .splice(index..index + 1, keys.iter().copied());
        keys
    }

    /// Merge the run at `children[index]` with any adjacent runs.
    ///
    /// Returns the surviving key. The merged run is marked dirty when a
    /// merge actually happened: the seam may now contain a match that
    /// neither piece had on its own.
    pub(crate) fn merge_run_neighbors(&mut self, block: usize, index: usize) -> NodeKey {
        let children = self.blocks[block].children.clone();
        let mut start = index;
        while start > 0 && self.nodes[children[start - 1]].is_run() {
            start -= 1;
        }
        let mut end = index + 1;
        while end < children.len() && self.nodes[children[end]].is_run() {
            end += 1;
        }
        if end - start == 1 {
            return children[index];
        }

        let merged: String = children[start..end]
            .iter()
            .map(|&k| self.nodes[k].text())
            .collect();
        let kept = children[start];
        self.set_node(kept, Node::run(merged));
        for &key in &children[start + 1..end] {
            self.nodes.remove(key);
            self.dirty.remove(&key);
        }
        self.blocks[block].children.drain(start + 1..end);
        self.mark_dirty(kept);
        kept
    }

    // === Edit transactions ===

    /// Insert line-break-free text at a char offset.
    pub fn insert_plain(&mut self, offset: usize, text: &str) -> Result<EditInfo, EditError> {
        if text.contains('\n') {
            return Err(EditError::UnexpectedLineBreak);
        }
        let len = self.len_chars();
        if offset > len {
            return Err(EditError::OutOfBounds { offset, len });
        }
        if text.is_empty() {
            return Ok(EditInfo::noop(offset, len));
        }

        match self.locate_insert(offset) {
            InsertPoint::InChild {
                key,
                offset_in_child,
                ..
            } => {
                // Inserting inside a token mutates its content wholesale;
                // the dirty mark lets the transform engine demote it if
                // the new content no longer matches.
                let spliced = splice_chars(
                    self.nodes[key].text(),
                    offset_in_child..offset_in_child,
                    text,
                );
                self.set_text(key, spliced);
            }
            InsertPoint::Boundary { block, before } => {
                // A boundary edit merges into the preceding leaf when one
                // exists (token or run alike; a token that stops matching
                // is demoted by the transform engine), else into the
                // following leaf, else it opens a fresh run.
                let children = &self.blocks[block].children;
                let prev = (before > 0).then(|| children[before - 1]);
                let next = children.get(before).copied();
                if let Some(prev) = prev {
                    let spliced =
                        splice_chars(self.nodes[prev].text(), usize::MAX..usize::MAX, text);
                    self.set_text(prev, spliced);
                } else if let Some(next) = next {
                    let spliced = splice_chars(self.nodes[next].text(), 0..0, text);
                    self.set_text(next, spliced);
                } else {
                    let key = self.nodes.insert(Node::run(text));
                    self.blocks[block].children.insert(before, key);
                    self.mark_dirty(key);
                }
            }
        }

        Ok(EditInfo {
            edit_char_pos: offset,
            inserted_len: text.chars().count(),
            deleted_len: 0,
            contains_line_break: false,
            value_len_after: self.len_chars(),
        })
    }

    /// Split the block containing `offset` in two: the line-break edit.
    ///
    /// Splitting inside a token demotes both halves to plain runs, since
    /// a token cannot span a block boundary.
    pub fn split_block_at(&mut self, offset: usize) -> Result<EditInfo, EditError> {
        let len = self.len_chars();
        if offset > len {
            return Err(EditError::OutOfBounds { offset, len });
        }

        match self.locate_insert(offset) {
            InsertPoint::Boundary { block, before } => {
                let tail = self.blocks[block].children.split_off(before);
                self.blocks.insert(block + 1, Block { children: tail });
            }
            InsertPoint::InChild {
                block,
                index,
                key,
                offset_in_child,
            } => {
                let (left, right) = split_chars(self.nodes[key].text(), offset_in_child);
                self.set_node(key, Node::run(left));
                self.mark_dirty(key);
                let right_key = self.nodes.insert(Node::run(right));
                self.mark_dirty(right_key);

                let mut tail = self.blocks[block].children.split_off(index + 1);
                tail.insert(0, right_key);
                self.blocks.insert(block + 1, Block { children: tail });
            }
        }

        Ok(EditInfo {
            edit_char_pos: offset,
            inserted_len: 1,
            deleted_len: 0,
            contains_line_break: true,
            value_len_after: len + 1,
        })
    }

    /// Delete a char range, merging blocks whose separator falls inside it.
    pub fn delete_range(&mut self, range: Range<usize>) -> Result<EditInfo, EditError> {
        let len = self.len_chars();
        if range.start > range.end || range.end > len {
            return Err(EditError::OutOfBounds {
                offset: range.end,
                len,
            });
        }
        if range.is_empty() {
            return Ok(EditInfo::noop(range.start, len));
        }

        // First pass: collect leaf trims and separator deletions against
        // the pre-edit layout, so offsets stay valid while we read.
        enum Trim {
            Remove(NodeKey),
            Splice(NodeKey, Range<usize>),
        }
        let mut trims = Vec::new();
        let mut merged_blocks = Vec::new();
        let mut pos = 0;
        for (b, block) in self.blocks.iter().enumerate() {
            for &key in &block.children {
                let l = self.nodes[key].len_chars();
                let (start, end) = (pos, pos + l);
                let s = range.start.max(start);
                let e = range.end.min(end);
                if s < e {
                    if s == start && e == end {
                        trims.push(Trim::Remove(key));
                    } else {
                        trims.push(Trim::Splice(key, (s - start)..(e - start)));
                    }
                }
                pos = end;
            }
            if b + 1 < self.blocks.len() {
                // The separator between block b and b+1 sits at `pos`.
                if range.contains(&pos) {
                    merged_blocks.push(b);
                }
                pos += 1;
            }
        }

        // Second pass: apply.
        for trim in trims {
            match trim {
                Trim::Remove(key) => self.remove_leaf(key),
                Trim::Splice(key, r) => {
                    let spliced = splice_chars(self.nodes[key].text(), r, "");
                    self.set_text(key, spliced);
                }
            }
        }
        for &b in merged_blocks.iter().rev() {
            let tail = self.blocks.remove(b + 1);
            self.blocks[b].children.extend(tail.children);
        }
        self.normalize();

        Ok(EditInfo {
            edit_char_pos: range.start,
            inserted_len: 0,
            deleted_len: range.end - range.start,
            contains_line_break: !merged_blocks.is_empty(),
            value_len_after: self.len_chars(),
        })
    }

    /// Replace a char range with arbitrary text (may contain line breaks).
    ///
    /// This is the general transaction: plain typing, paste, and
    /// programmatic replacement all lower to it.
    pub fn replace_range(&mut self, range: Range<usize>, text: &str) -> Result<EditInfo, EditError> {
        let len = self.len_chars();
        if range.start > range.end || range.end > len {
            return Err(EditError::OutOfBounds {
                offset: range.end,
                len,
            });
        }

        let deleted_len = range.end - range.start;
        let removed_line_break = if deleted_len > 0 {
            self.delete_range(range.clone())?.contains_line_break
        } else {
            false
        };

        let mut pos = range.start;
        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                self.split_block_at(pos)?;
                pos += 1;
            }
            if !segment.is_empty() {
                self.insert_plain(pos, segment)?;
                pos += segment.chars().count();
            }
        }

        Ok(EditInfo {
            edit_char_pos: range.start,
            inserted_len: text.chars().count(),
            deleted_len,
            contains_line_break: removed_line_break || text.contains('\n'),
            value_len_after: self.len_chars(),
        })
    }

    // === Internals ===

    fn locate_insert(&self, offset: usize) -> InsertPoint {
        let mut pos = 0;
        for (b, block) in self.blocks.iter().enumerate() {
            let block_len: usize = block
                .children
                .iter()
                .map(|&k| self.nodes[k].len_chars())
                .sum();
            if offset <= pos + block_len {
                let mut rel = offset - pos;
                for (i, &key) in block.children.iter().enumerate() {
                    if rel == 0 {
                        return InsertPoint::Boundary {
                            block: b,
                            before: i,
                        };
                    }
                    let l = self.nodes[key].len_chars();
                    if rel < l {
                        return InsertPoint::InChild {
                            block: b,
                            index: i,
                            key,
                            offset_in_child: rel,
                        };
                    }
                    rel -= l;
                }
                return InsertPoint::Boundary {
                    block: b,
                    before: block.children.len(),
                };
            }
            pos += block_len + 1;
        }
        unreachable!("offset validated against document length before locate")
    }

    /// Set a leaf's text, removing the leaf entirely when it would
    /// become empty. Marks the survivor dirty.
    fn set_text(&mut self, key: NodeKey, text: SmolStr) {
        if text.is_empty() {
            self.remove_leaf(key);
            return;
        }
        if let Some(node) = self.nodes.get_mut(key) {
            match node {
                Node::Run { text: t } => *t = text,
                Node::Token { text: t, .. } => *t = text,
            }
        }
        self.mark_dirty(key);
    }

    fn remove_leaf(&mut self, key: NodeKey) {
        if let Some((block, index)) = self.position_of(key) {
            self.blocks[block].children.remove(index);
        }
        self.nodes.remove(key);
        self.dirty.remove(&key);
    }

    /// Merge adjacent runs in every block. Deletions can bring two runs
    /// together (e.g. after the token between them was removed); leaving
    /// them split would grow the leaf count without bound.
    fn normalize(&mut self) {
        for b in 0..self.blocks.len() {
            let mut i = 0;
            while i < self.blocks[b].children.len() {
                let key = self.blocks[b].children[i];
                if self.nodes[key].is_run() {
                    let kept = self.merge_run_neighbors(b, i);
                    let pos = self.blocks[b]
                        .children
                        .iter()
                        .position(|&k| k == kept)
                        .unwrap_or(i);
                    i = pos + 1;
                } else {
                    i += 1;
                }
            }
        }
    }
}

fn split_chars(s: &str, at: usize) -> (SmolStr, SmolStr) {
    let byte = byte_of_char(s, at);
    (SmolStr::new(&s[..byte]), SmolStr::new(&s[byte..]))
}

fn byte_of_char(s: &str, char_offset: usize) -> usize {
    s.char_indices()
        .nth(char_offset)
        .map(|(b, _)| b)
        .unwrap_or(s.len())
}

/// Replace a char range of `s` with `insert`. A start of `usize::MAX`
/// means append at the end.
fn splice_chars(s: &str, range: Range<usize>, insert: &str) -> SmolStr {
    let start = byte_of_char(s, range.start.min(s.chars().count()));
    let end = byte_of_char(s, range.end.min(s.chars().count()));
    format_smolstr!("{}{}{}", &s[..start], insert, &s[end..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let doc = Document::new();
        assert_eq!(doc.block_count(), 1);
        assert_eq!(doc.flatten(), "");
        assert_eq!(doc.len_chars(), 0);
    }

    #[test]
    fn test_from_text_round_trip() {
        for value in ["", "one line", "a\nb", "\n", "\n\n", "x\n\ny", "trailing\n"] {
            let doc = Document::from_text(value);
            assert_eq!(doc.flatten(), value, "round trip failed for {value:?}");
            assert_eq!(doc.len_chars(), value.chars().count());
        }
    }

    #[test]
    fn test_from_text_blocks() {
        let doc = Document::from_text("a\n\nb");
        assert_eq!(doc.block_count(), 3);
        assert_eq!(doc.block_leaves(0).len(), 1);
        assert_eq!(doc.block_leaves(1).len(), 0);
        assert_eq!(doc.block_leaves(2).len(), 1);
    }

    #[test]
    fn test_insert_plain_into_empty() {
        let mut doc = Document::new();
        doc.insert_plain(0, "hello").unwrap();
        assert_eq!(doc.flatten(), "hello");
        assert_eq!(doc.leaves().len(), 1);
    }

    #[test]
    fn test_insert_plain_inside_run() {
        let mut doc = Document::from_text("helo");
        let info = doc.insert_plain(3, "l").unwrap();
        assert_eq!(doc.flatten(), "hello");
        assert_eq!(info.inserted_len, 1);
        assert_eq!(info.value_len_after, 5);
    }

    #[test]
    fn test_insert_plain_rejects_line_break() {
        let mut doc = Document::from_text("ab");
        assert_eq!(
            doc.insert_plain(1, "x\ny"),
            Err(EditError::UnexpectedLineBreak)
        );
    }

    #[test]
    fn test_insert_out_of_bounds() {
        let mut doc = Document::from_text("ab");
        assert_eq!(
            doc.insert_plain(3, "x"),
            Err(EditError::OutOfBounds { offset: 3, len: 2 })
        );
    }

    #[test]
    fn test_insert_inside_token_mutates_token() {
        let mut doc = Document::new();
        let key = doc.nodes.insert(Node::token("document", false));
        doc.blocks[0].children.push(key);

        doc.insert_plain(8, "s").unwrap();
        assert_eq!(doc.flatten(), "documents");
        // Same leaf, now dirty, still a token until the transform runs.
        let node = doc.node(key).unwrap();
        assert!(node.is_token());
        assert_eq!(node.text(), "documents");
        assert!(doc.has_dirty());
    }

    #[test]
    fn test_boundary_insert_merges_into_preceding_leaf() {
        let mut doc = Document::new();
        let run = doc.nodes.insert(Node::run("see "));
        let token = doc.nodes.insert(Node::token("answer", true));
        doc.blocks[0].children.extend([run, token]);

        // Boundary between run and token goes into the run.
        doc.insert_plain(4, "the ").unwrap();
        assert_eq!(doc.flatten(), "see the answer");
        assert_eq!(doc.leaves().len(), 2);

        // End boundary after the token merges into the token; the
        // transform engine demotes it on its next pass.
        doc.insert_plain(14, "!").unwrap();
        assert_eq!(doc.flatten(), "see the answer!");
        assert_eq!(doc.leaves().len(), 2);
        assert_eq!(doc.node(token).unwrap().text(), "answer!");
        assert!(doc.has_dirty());
    }

    #[test]
    fn test_split_block() {
        let mut doc = Document::from_text("hello world");
        doc.split_block_at(5).unwrap();
        assert_eq!(doc.flatten(), "hello\n world");
        assert_eq!(doc.block_count(), 2);
    }

    #[test]
    fn test_split_block_inside_token_demotes_both_halves() {
        let mut doc = Document::new();
        let key = doc.nodes.insert(Node::token("document", false));
        doc.blocks[0].children.push(key);

        doc.split_block_at(4).unwrap();
        assert_eq!(doc.flatten(), "docu\nment");
        let leaves = doc.leaves();
        assert_eq!(leaves.len(), 2);
        assert!(leaves.iter().all(|&k| doc.node(k).unwrap().is_run()));
    }

    #[test]
    fn test_delete_inside_run() {
        let mut doc = Document::from_text("hello world");
        let info = doc.delete_range(5..11).unwrap();
        assert_eq!(doc.flatten(), "hello");
        assert_eq!(info.deleted_len, 6);
    }

    #[test]
    fn test_delete_across_blocks_merges() {
        let mut doc = Document::from_text("hello\nworld");
        let info = doc.delete_range(4..7).unwrap();
        assert_eq!(doc.flatten(), "hellorld");
        assert_eq!(doc.block_count(), 1);
        assert!(info.contains_line_break);
        // The two trimmed runs are merged back into one leaf.
        assert_eq!(doc.leaves().len(), 1);
    }

    #[test]
    fn test_delete_whole_token_merges_neighbors() {
        let mut doc = Document::new();
        let a = doc.nodes.insert(Node::run("ab "));
        let t = doc.nodes.insert(Node::token("answer", true));
        let b = doc.nodes.insert(Node::run(" cd"));
        doc.blocks[0].children.extend([a, t, b]);

        doc.delete_range(3..9).unwrap();
        assert_eq!(doc.flatten(), "ab  cd");
        assert_eq!(doc.leaves().len(), 1);
        assert!(doc.node(doc.leaves()[0]).unwrap().is_run());
    }

    #[test]
    fn test_delete_separator_only() {
        let mut doc = Document::from_text("a\nb");
        doc.delete_range(1..2).unwrap();
        assert_eq!(doc.flatten(), "ab");
        assert_eq!(doc.block_count(), 1);
    }

    #[test]
    fn test_delete_to_empty_line_keeps_block() {
        let mut doc = Document::from_text("abc\ndef");
        doc.delete_range(0..3).unwrap();
        assert_eq!(doc.flatten(), "\ndef");
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.block_leaves(0).len(), 0);
    }

    #[test]
    fn test_replace_range_with_multiline_text() {
        let mut doc = Document::from_text("one three");
        let info = doc.replace_range(4..4, "two\n").unwrap();
        assert_eq!(doc.flatten(), "one two\nthree");
        assert!(info.contains_line_break);
        assert_eq!(info.inserted_len, 4);
    }

    #[test]
    fn test_replace_range_full_rewrite() {
        let mut doc = Document::from_text("old\ncontent");
        let len = doc.len_chars();
        doc.replace_range(0..len, "brand new").unwrap();
        assert_eq!(doc.flatten(), "brand new");
        assert_eq!(doc.block_count(), 1);
    }

    #[test]
    fn test_slice_chars() {
        let doc = Document::from_text("hello\nworld");
        assert_eq!(doc.slice_chars(3..8), "lo\nwo");
    }

    #[test]
    fn test_take_dirty_in_order() {
        let mut doc = Document::from_text("a\nb\nc");
        let leaves = doc.leaves();
        assert_eq!(doc.take_dirty_in_order(), leaves);
        assert!(!doc.has_dirty());
    }
}

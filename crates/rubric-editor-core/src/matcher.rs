//! Candidate-word matching over plain text.
//!
//! The matcher is a pure function: given a text and the field's candidate
//! words, it reports the first occurrence of any candidate. Precedence is
//! by candidate-list order first, then by leftmost position - NOT the
//! globally leftmost match across all candidates. When two candidates both
//! occur, the one earlier in the list wins even if it occurs later in the
//! text. This mirrors the behavior the form layer depends on and is
//! covered by tests below.

use smol_str::SmolStr;

use crate::types::CandidateWords;

/// A candidate-word occurrence inside one leaf's text.
///
/// `position` and `length` are char offsets into the original-case text;
/// `text` is the matched slice with its source casing preserved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableMatch {
    /// Char offset of the match start.
    pub position: usize,
    /// Match length in chars.
    pub length: usize,
    /// The matched substring, case preserved from the source text.
    pub text: SmolStr,
    /// Whether the matched candidate is the response-variable name.
    pub is_response_variable: bool,
}

impl VariableMatch {
    /// Char offset one past the end of the match.
    pub fn end(&self) -> usize {
        self.position + self.length
    }
}

/// Find the first candidate-word occurrence in `text`.
///
/// Candidates are tried in list order; the first candidate that occurs
/// anywhere wins, at its leftmost occurrence. Comparison is
/// case-insensitive, the reported offsets index the original text.
/// Returns `None` when no candidate occurs. Total and side-effect free.
pub fn find_first_variable(text: &str, words: &CandidateWords) -> Option<VariableMatch> {
    if text.is_empty() {
        return None;
    }
    let haystack: Vec<char> = text.chars().collect();

    for (word, is_response_variable) in words.iter() {
        let needle: Vec<char> = word.chars().collect();
        if let Some(position) = find_ignore_case(&haystack, &needle) {
            let matched: SmolStr = haystack[position..position + needle.len()].iter().copied().collect();
            return Some(VariableMatch {
                position,
                length: needle.len(),
                text: matched,
                is_response_variable,
            });
        }
    }
    None
}

/// Leftmost case-insensitive occurrence of `needle` in `haystack`,
/// as a char offset.
fn find_ignore_case(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&start| {
        needle
            .iter()
            .zip(&haystack[start..])
            .all(|(a, b)| chars_eq_ignore_case(*a, *b))
    })
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

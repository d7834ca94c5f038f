//! Answer matching for typed translations.
//!
//! A learner's input is accepted when it equals one of the word's glosses
//! verbatim, or when it equals a single token of a gloss once bracketed
//! annotations are removed. `"hi"` matches `"hi (informal)"` and `"go"`
//! matches `"to go"`. Matching is case-sensitive.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Characters trimmed from both ends of a gloss token.
const TOKEN_PUNCTUATION: &[char] = &[',', ';', '.', ' '];

/// How an accepted answer matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Input equals a whole gloss.
    Exact,
    /// Input equals one token of a bracket-stripped gloss.
    Token,
}

/// An accepted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerMatch {
    pub kind: MatchKind,
    /// The gloss that satisfied the input.
    pub translation: String,
}

/// Check a learner's input against the acceptable translations.
pub fn is_correct<S: AsRef<str>>(input: &str, translations: &[S]) -> bool {
    match_answer(input, translations).is_some()
}

/// Find the first translation that accepts `input`.
///
/// Exact matches are tried across every translation before any token match,
/// so the result reports [`MatchKind::Exact`] whenever one exists.
pub fn match_answer<S: AsRef<str>>(input: &str, translations: &[S]) -> Option<AnswerMatch> {
    if input.is_empty() {
        return None;
    }

    if let Some(t) = translations.iter().find(|t| t.as_ref() == input) {
        return Some(AnswerMatch {
            kind: MatchKind::Exact,
            translation: t.as_ref().to_string(),
        });
    }

    translations.iter().find_map(|t| {
        let translation = t.as_ref();
        let matched = gloss_tokens(translation).any(|token| token == input);
        if matched {
            debug!(input, translation, "matched on gloss token");
            Some(AnswerMatch {
                kind: MatchKind::Token,
                translation: translation.to_string(),
            })
        } else {
            None
        }
    })
}

/// Tokens a gloss offers for partial matching.
pub fn gloss_tokens(translation: &str) -> impl Iterator<Item = String> {
    strip_brackets(translation)
        .split_whitespace()
        .map(|token| token.trim_matches(TOKEN_PUNCTUATION).to_string())
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .into_iter()
}

/// Remove every bracketed span. Each opener is closed by the next closer of
/// the same family; brackets do not nest. An opener with no closer is kept.
pub fn strip_brackets(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some((start, opener, closer)) = find_opener(rest) {
        out.push_str(&rest[..start]);
        let after_opener = &rest[start + opener.len_utf8()..];

        match after_opener.find(closer) {
            Some(end) => rest = &after_opener[end + closer.len_utf8()..],
            None => {
                out.push(opener);
                rest = after_opener;
            }
        }
    }

    out.push_str(rest);
    out
}

fn find_opener(text: &str) -> Option<(usize, char, char)> {
    text.char_indices()
        .find_map(|(i, c)| closing_bracket(c).map(|closer| (i, c, closer)))
}

/// The closer for a bracket opener, `None` for any other character.
pub(crate) fn closing_bracket(opener: char) -> Option<char> {
    match opener {
        '(' => Some(')'),
        '{' => Some('}'),
        '[' => Some(']'),
        _ => None,
    }
}

//! Dictionary parser for tab-separated word lists.
//!
//! # Format
//! ```text
//! Number	Spanish	in English
//! 1	ir	to go
//! 2	casa	house, home
//! ```
//!
//! The header is required. Blank lines are ignored; rows that do not have
//! three fields, or whose Spanish or English field is empty, are skipped and
//! reported by line number.

use crate::error::{ParseError, Result};
use crate::matching::closing_bracket;
use crate::types::NewWord;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

const HEADER: [&str; 3] = ["Number", "Spanish", "in English"];

/// Supported dictionary file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DictionaryFormat {
    /// `Number<TAB>Spanish<TAB>in English` word list.
    Tsv,
    /// `<l><w><c/><d/><t/></w></l>` dictionary.
    Xml,
}

impl DictionaryFormat {
    /// Pick the format from a file extension. Anything other than `.xml` is
    /// read as TSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xml") => Self::Xml,
            _ => Self::Tsv,
        }
    }

    pub fn parse(self, content: &str) -> Result<ParsedDictionary> {
        match self {
            Self::Tsv => parse(content),
            Self::Xml => crate::xml::parse_xml(content),
        }
    }
}

/// Words read from a dictionary file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDictionary {
    pub words: Vec<NewWord>,
    /// Line numbers of rows that were skipped.
    pub skipped: Vec<usize>,
}

/// Parse TSV content into new words, in file order.
pub fn parse(content: &str) -> Result<ParsedDictionary> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_line, header) = lines.next().ok_or(ParseError::EmptyFile)?;
    let header: Vec<&str> = header.trim_start_matches('\u{feff}').split('\t').collect();
    if header != HEADER {
        return Err(ParseError::InvalidHeader { line: header_line });
    }

    let mut parsed = ParsedDictionary::default();
    for (line_num, line) in lines {
        match parse_row(line, line_num) {
            Some(word) => parsed.words.push(word),
            None => {
                warn!(line = line_num, row = line, "skipping malformed dictionary row");
                parsed.skipped.push(line_num);
            }
        }
    }

    Ok(parsed)
}

fn parse_row(line: &str, line_num: usize) -> Option<NewWord> {
    let fields: Vec<&str> = line.split('\t').collect();
    let [_, spanish, english] = fields.as_slice() else {
        return None;
    };

    let spanish = spanish.trim();
    let english = english.trim();
    if spanish.is_empty() || english.is_empty() {
        return None;
    }

    Some(NewWord {
        spanish: spanish.to_string(),
        english_primary: english.to_string(),
        english_translations: split_glosses(english),
        word_type: None,
        line_number: line_num,
    })
}

/// Split a comma-separated English field into individual glosses.
///
/// Commas inside a bracketed annotation belong to the annotation, so
/// `to be (tired, sick)` stays one gloss. Brackets pair up the same way
/// [`strip_brackets`](crate::matching::strip_brackets) pairs them.
pub fn split_glosses(english: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut open_until: Option<char> = None;

    for (i, c) in english.char_indices() {
        match open_until {
            Some(closer) if c == closer => open_until = None,
            Some(_) => {}
            None if c == ',' => {
                parts.push(&english[start..i]);
                start = i + 1;
            }
            None => {
                open_until = closing_bracket(c)
                    .filter(|closer| english[i + c.len_utf8()..].contains(*closer));
            }
        }
    }
    parts.push(&english[start..]);

    parts
        .into_iter()
        .map(str::trim)
        .filter(|gloss| !gloss.is_empty())
        .map(String::from)
        .collect()
}

//! Parser for the XML Spanish-English dictionary.
//!
//! # Format
//! ```text
//! <dic from="es" to="en">
//!   <l char="A">
//!     <w><c>abeja</c><d>bee</d><t>{f}</t></w>
//!   </l>
//! </dic>
//! ```
//!
//! `<c>` holds the Spanish headword, `<d>` the English definition and `<t>`
//! the word type. Unknown elements and attributes are ignored. Entries with
//! an empty headword or definition are skipped and reported by their
//! position in the file.

use crate::error::Result;
use crate::parser::{split_glosses, ParsedDictionary};
use crate::types::NewWord;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct XmlDictionary {
    #[serde(rename = "l", default)]
    letters: Vec<XmlLetter>,
}

#[derive(Debug, Deserialize)]
struct XmlLetter {
    #[serde(rename = "w", default)]
    entries: Vec<XmlEntry>,
}

#[derive(Debug, Deserialize)]
struct XmlEntry {
    #[serde(rename = "c", default)]
    spanish: String,
    #[serde(rename = "d", default)]
    english: String,
    #[serde(rename = "t", default)]
    word_type: Option<String>,
}

/// Parse XML dictionary content into new words, in file order.
///
/// `line_number` on each word is the 1-based position of its entry.
pub fn parse_xml(content: &str) -> Result<ParsedDictionary> {
    let dictionary: XmlDictionary = quick_xml::de::from_str(content)?;

    let mut parsed = ParsedDictionary::default();
    let entries = dictionary.letters.into_iter().flat_map(|letter| letter.entries);
    for (idx, entry) in entries.enumerate() {
        let position = idx + 1;
        let spanish = entry.spanish.trim();
        let english = entry.english.trim();
        if spanish.is_empty() || english.is_empty() {
            warn!(entry = position, spanish, "skipping incomplete dictionary entry");
            parsed.skipped.push(position);
            continue;
        }

        parsed.words.push(NewWord {
            spanish: spanish.to_string(),
            english_primary: english.to_string(),
            english_translations: split_glosses(english),
            word_type: entry
                .word_type
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            line_number: position,
        });
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<dic from="es" to="en">
  <l char="A">
    <w><c>abeja</c><d>bee</d><t>{f}</t></w>
    <w><c>abrir</c><d>to open, to unlock</d><t>{v}</t></w>
  </l>
  <l char="E">
    <w><c>estar</c><d>to be (tired, sick)</d><t>{v}</t></w>
    <w><c>y</c><d>and &amp; plus</d></w>
  </l>
</dic>"#;

    #[test]
    fn parse_entries_across_letters() {
        let parsed = parse_xml(SAMPLE).unwrap();
        let spanish: Vec<&str> = parsed.words.iter().map(|w| w.spanish.as_str()).collect();
        assert_eq!(spanish, vec!["abeja", "abrir", "estar", "y"]);
        assert!(parsed.skipped.is_empty());

        let abrir = &parsed.words[1];
        assert_eq!(abrir.english_primary, "to open, to unlock");
        assert_eq!(abrir.english_translations, vec!["to open", "to unlock"]);
        assert_eq!(abrir.word_type.as_deref(), Some("{v}"));
        assert_eq!(abrir.line_number, 2);
    }

    #[test]
    fn annotation_commas_stay_in_one_gloss() {
        let parsed = parse_xml(SAMPLE).unwrap();
        assert_eq!(parsed.words[2].english_translations, vec!["to be (tired, sick)"]);
    }

    #[test]
    fn missing_type_and_entities() {
        let parsed = parse_xml(SAMPLE).unwrap();
        let y = &parsed.words[3];
        assert_eq!(y.word_type, None);
        assert_eq!(y.english_primary, "and & plus");
    }

    #[test]
    fn empty_type_is_none() {
        let parsed = parse_xml("<dic><l><w><c>sí</c><d>yes</d><t></t></w></l></dic>").unwrap();
        assert_eq!(parsed.words[0].word_type, None);
    }

    #[test]
    fn incomplete_entries_skipped() {
        let content = "<dic><l><w><c>uno</c><d>one</d></w><w><c></c><d>two</d></w><w><c>tres</c></w></l></dic>";
        let parsed = parse_xml(content).unwrap();
        assert_eq!(parsed.words.len(), 1);
        assert_eq!(parsed.skipped, vec![2, 3]);
    }

    #[test]
    fn empty_dictionary() {
        assert_eq!(parse_xml("<dic></dic>").unwrap(), ParsedDictionary::default());
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let result = parse_xml("<dic><l><w><c>uno</c></l></dic>");
        assert!(matches!(result, Err(ParseError::Xml(_))));
    }
}

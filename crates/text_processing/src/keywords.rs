//! Ordered keyword matching
//!
//! Used for state names, language names and yes/no replies. Tables keep
//! their configured order and the first entry with a matching variant
//! wins, so overlapping variants resolve deterministically.

use scheme_voice_config::{ConfirmationWords, KeywordEntry};
use std::ops::Range;

/// Result of a keyword lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatch<T> {
    pub value: T,
    /// The variant that matched
    pub variant: String,
    /// Byte range of the variant in the lowercased text
    pub span: Range<usize>,
}

/// Ordered table of values and their spellings
#[derive(Debug, Clone)]
pub struct KeywordTable<T> {
    entries: Vec<KeywordEntry<T>>,
}

impl<T: Copy> KeywordTable<T> {
    pub fn new(entries: Vec<KeywordEntry<T>>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| KeywordEntry {
                value: entry.value,
                variants: entry
                    .variants
                    .into_iter()
                    .map(|v| v.to_lowercase())
                    .filter(|v| !v.trim().is_empty())
                    .collect(),
            })
            .collect();
        Self { entries }
    }

    /// First entry, in table order, with a variant contained in `text`
    pub fn first_match(&self, text: &str) -> Option<KeywordMatch<T>> {
        let haystack = text.to_lowercase();
        self.entries.iter().find_map(|entry| {
            entry.variants.iter().find_map(|variant| {
                haystack.find(variant.as_str()).map(|start| KeywordMatch {
                    value: entry.value,
                    variant: variant.clone(),
                    span: start..start + variant.len(),
                })
            })
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Interpretation of a reply to a yes/no question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
    Unclear,
}

/// Classify a reply against one language's yes/no words
///
/// Negative words are checked first: some affirmative words are substrings
/// of negative ones (`ha` in `nahi`).
pub fn classify_confirmation(words: &ConfirmationWords, text: &str) -> Confirmation {
    let haystack = text.to_lowercase();
    let contains_any = |list: &[String]| {
        list.iter()
            .filter(|w| !w.trim().is_empty())
            .any(|w| haystack.contains(&w.to_lowercase()))
    };

    if contains_any(&words.no) {
        Confirmation::No
    } else if contains_any(&words.yes) {
        Confirmation::Yes
    } else {
        Confirmation::Unclear
    }
}

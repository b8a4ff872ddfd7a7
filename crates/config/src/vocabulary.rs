//! Keyword vocabularies for language, state and yes/no recognition
//!
//! Tables are ordered: when several entries match the same utterance the
//! earlier entry wins. Variants are stored lowercased.

use scheme_voice_core::{Language, StateCode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::ConfigError;

/// One recognizable value and the spellings that identify it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry<T> {
    pub value: T,
    pub variants: Vec<String>,
}

impl<T> KeywordEntry<T> {
    pub fn new(value: T, variants: &[&str]) -> Self {
        Self {
            value,
            variants: variants.iter().map(|v| v.to_lowercase()).collect(),
        }
    }
}

/// Yes/no words for a single language
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationWords {
    #[serde(default)]
    pub yes: Vec<String>,
    #[serde(default)]
    pub no: Vec<String>,
}

/// Keyword tables used by the extractor and language bootstrap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    #[serde(default = "default_languages")]
    pub languages: Vec<KeywordEntry<Language>>,
    #[serde(default = "default_states")]
    pub states: Vec<KeywordEntry<StateCode>>,
    #[serde(default = "default_confirmations")]
    pub confirmations: HashMap<Language, ConfirmationWords>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            states: default_states(),
            confirmations: default_confirmations(),
        }
    }
}

fn default_languages() -> Vec<KeywordEntry<Language>> {
    vec![
        KeywordEntry::new(Language::Hindi, &["hindi", "हिंदी", "हिन्दी"]),
        KeywordEntry::new(Language::Telugu, &["telugu", "తెలుగు"]),
        KeywordEntry::new(Language::Marathi, &["marathi", "मराठी"]),
        KeywordEntry::new(Language::Tamil, &["tamil", "தமிழ்"]),
        KeywordEntry::new(Language::Bengali, &["bengali", "bangla", "বাংলা"]),
    ]
}

fn default_states() -> Vec<KeywordEntry<StateCode>> {
    vec![
        KeywordEntry::new(
            StateCode::Telangana,
            &["telangana", "तेलंगाना", "తెలంగాణ", "தெலுங்கானா", "তেলেঙ্গানা"],
        ),
        KeywordEntry::new(
            StateCode::Maharashtra,
            &["maharashtra", "महाराष्ट्र", "మహారాష్ట్ర", "மகாராஷ்டிரா", "মহারাষ্ট্র"],
        ),
        KeywordEntry::new(
            StateCode::AndhraPradesh,
            &["andhra", "आंध्र", "ఆంధ్ర", "ஆந்திர", "অন্ধ্র"],
        ),
        KeywordEntry::new(
            StateCode::TamilNadu,
            &["tamil nadu", "tamilnadu", "तमिलनाडु", "तमिल नाडु", "తమిళనాడు", "தமிழ்நாடு", "তামিলনাড়ু"],
        ),
        KeywordEntry::new(
            StateCode::WestBengal,
            &["west bengal", "bengal", "पश्चिम बंगाल", "బెంగాల్", "வங்காளம்", "পশ্চিমবঙ্গ"],
        ),
    ]
}

fn default_confirmations() -> HashMap<Language, ConfirmationWords> {
    let table: [(Language, &[&str], &[&str]); 5] = [
        (Language::Hindi, &["हाँ", "हां", "haan", "ha"], &["नहीं", "nahin", "nahi"]),
        (Language::Telugu, &["అవును"], &["కాదు"]),
        (Language::Tamil, &["ஆம்"], &["இல்லை"]),
        (Language::Marathi, &["हो"], &["नको", "नाही"]),
        (Language::Bengali, &["হ্যাঁ"], &["না"]),
    ];

    table
        .into_iter()
        .map(|(lang, yes, no)| {
            let words = ConfirmationWords {
                yes: yes.iter().map(|w| w.to_string()).collect(),
                no: no.iter().map(|w| w.to_string()).collect(),
            };
            (lang, words)
        })
        .collect()
}

impl Vocabulary {
    /// Load from a YAML file; omitted tables keep their built-in values
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;
        let mut vocabulary: Vocabulary = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        vocabulary.normalize();
        vocabulary.validate()?;
        tracing::debug!(
            path = %path.display(),
            languages = vocabulary.languages.len(),
            states = vocabulary.states.len(),
            "Loaded vocabulary"
        );
        Ok(vocabulary)
    }

    fn normalize(&mut self) {
        for entry in &mut self.languages {
            entry.variants.iter_mut().for_each(|v| *v = v.to_lowercase());
        }
        for entry in &mut self.states {
            entry.variants.iter_mut().for_each(|v| *v = v.to_lowercase());
        }
        for words in self.confirmations.values_mut() {
            words.yes.iter_mut().for_each(|w| *w = w.to_lowercase());
            words.no.iter_mut().for_each(|w| *w = w.to_lowercase());
        }
    }

    /// Reject empty variants, which would match every utterance
    pub fn validate(&self) -> Result<(), ConfigError> {
        let language_variants = self.languages.iter().flat_map(|e| e.variants.iter());
        let state_variants = self.states.iter().flat_map(|e| e.variants.iter());
        if language_variants
            .chain(state_variants)
            .any(|v| v.trim().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                field: "vocabulary".to_string(),
                message: "Keyword variants must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Yes/no words for a language (empty when none are configured)
    pub fn confirmation_words(&self, language: Language) -> ConfirmationWords {
        self.confirmations.get(&language).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_language_order() {
        let vocab = Vocabulary::default();
        let order: Vec<Language> = vocab.languages.iter().map(|e| e.value).collect();
        assert_eq!(order, Language::ALL.to_vec());
        assert!(vocab.languages[0].variants.contains(&"हिंदी".to_string()));
    }

    #[test]
    fn test_state_variants_cover_scripts() {
        let vocab = Vocabulary::default();
        let telangana = &vocab.states[0];
        assert_eq!(telangana.value, StateCode::Telangana);
        for variant in ["telangana", "तेलंगाना", "తెలంగాణ"] {
            assert!(telangana.variants.iter().any(|v| v == variant));
        }
    }

    #[test]
    fn test_confirmation_words() {
        let vocab = Vocabulary::default();
        let marathi = vocab.confirmation_words(Language::Marathi);
        assert_eq!(marathi.yes, vec!["हो"]);
        assert_eq!(marathi.no, vec!["नको", "नाही"]);
    }

    #[test]
    fn test_load_partial_yaml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "states:\n  - value: telangana\n    variants: [Telangana, Hyderabad]"
        )
        .unwrap();

        let vocab = Vocabulary::load(file.path()).unwrap();
        assert_eq!(vocab.states.len(), 1);
        assert_eq!(vocab.states[0].variants, vec!["telangana", "hyderabad"]);
        assert_eq!(vocab.languages.len(), 5);
    }

    #[test]
    fn test_load_rejects_empty_variant() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "states:\n  - value: telangana\n    variants: [\"\"]").unwrap();
        assert!(matches!(
            Vocabulary::load(file.path()),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}

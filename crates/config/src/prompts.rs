//! Localized prompt catalog
//!
//! Every line the assistant speaks is looked up here by [`PromptKey`] and
//! [`Language`]. Missing translations fall back to the default language.
//! A YAML file can override or extend individual entries:
//!
//! ```yaml
//! ask_age:
//!   hi: "आपकी उम्र कितनी है?"
//! thanks:
//!   ta: "மிக்க நன்றி."
//! ```

use scheme_voice_core::Language;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::ConfigError;

/// Identifies a spoken line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKey {
    LanguageSelection,
    LanguageConfirmation,
    Greeting,
    AskAge,
    AskIncome,
    AskState,
    /// Contains `{schemes}`
    Eligible,
    /// Contains `{error}`
    Apology,
    NoScheme,
    Thanks,
}

/// Per-key, per-language prompt texts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptCatalog {
    #[serde(default)]
    default_language: Language,
    #[serde(flatten)]
    entries: HashMap<PromptKey, HashMap<Language, String>>,
}

impl Default for PromptCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PromptCatalog {
    /// Catalog with the built-in texts for all supported languages
    pub fn builtin() -> Self {
        use Language::*;
        use PromptKey::*;

        let table: &[(PromptKey, &[(Language, &str)])] = &[
            (
                LanguageSelection,
                &[(
                    Hindi,
                    "Please say Hindi, Telugu, Marathi, Tamil, or Bengali to choose your language.",
                )],
            ),
            (
                LanguageConfirmation,
                &[
                    (Hindi, "आपने हिंदी चुनी है। क्या हम हिंदी में आगे बढ़ें? हाँ या नहीं कहें।"),
                    (Telugu, "మీరు తెలుగు ఎంచుకున్నారు. మనం తెలుగులో కొనసాగాలా? అవును లేదా కాదు చెప్పండి."),
                    (Tamil, "நீங்கள் தமிழை தேர்ந்தெடுத்துள்ளீர்கள். தமிழில் தொடரலாமா? ஆம் அல்லது இல்லை சொல்லுங்கள்."),
                    (Marathi, "तुम्ही मराठी निवडली आहे. आपण मराठीत पुढे जाऊ का? हो किंवा नाही सांगा."),
                    (Bengali, "আপনি বাংলা নির্বাচন করেছেন। আমরা কি বাংলায় এগিয়ে যাব? হ্যাঁ বা না বলুন।"),
                ],
            ),
            (
                Greeting,
                &[
                    (Hindi, "नमस्ते, कृपया अपना प्रश्न बताएं।"),
                    (Telugu, "నమస్కారం, దయచేసి మీ ప్రశ్న చెప్పండి."),
                    (Marathi, "नमस्कार, कृपया तुमचा प्रश्न सांगा."),
                    (Tamil, "வணக்கம், தயவுசெய்து உங்கள் கேள்வியை கூறுங்கள்."),
                    (Bengali, "নমস্কার, অনুগ্রহ করে আপনার প্রশ্ন বলুন।"),
                ],
            ),
            (
                AskAge,
                &[
                    (Hindi, "आपकी उम्र क्या है?"),
                    (Telugu, "మీ వయస్సు ఎంత?"),
                    (Marathi, "तुमचे वय किती आहे?"),
                    (Tamil, "உங்கள் வயது என்ன?"),
                    (Bengali, "আপনার বয়স কত?"),
                ],
            ),
            (
                AskIncome,
                &[
                    (Hindi, "आपकी वार्षिक आय क्या है?"),
                    (Telugu, "మీ వార్షిక ఆదాయం ఎంత?"),
                    (Marathi, "तुमचे वार्षिक उत्पन्न किती आहे?"),
                    (Tamil, "உங்கள் ஆண்டு வருமானம் என்ன?"),
                    (Bengali, "আপনার বার্ষিক আয় কত?"),
                ],
            ),
            (
                AskState,
                &[
                    (Hindi, "आप किस राज्य में रहते हैं?"),
                    (Telugu, "మీరు ఏ రాష్ట్రంలో నివసిస్తున్నారు?"),
                    (Marathi, "तुम्ही कोणत्या राज्यात राहता?"),
                    (Tamil, "நீங்கள் எந்த மாநிலத்தில் வசிக்கிறீர்கள்?"),
                    (Bengali, "আপনি কোন রাজ্যে থাকেন?"),
                ],
            ),
            (
                Eligible,
                &[
                    (Hindi, "आप {schemes} के लिए पात्र हैं।"),
                    (Telugu, "మీరు {schemes}కు అర్హులు."),
                    (Marathi, "तुम्ही {schemes} साठी पात्र आहात."),
                    (Tamil, "நீங்கள் {schemes} திட்டத்திற்கு தகுதியானவர்."),
                    (Bengali, "আপনি {schemes} এর জন্য যোগ্য।"),
                ],
            ),
            (
                Apology,
                &[
                    (Hindi, "क्षमा करें: {error}"),
                    (Telugu, "క్షమించండి: {error}"),
                    (Marathi, "क्षमस्व: {error}"),
                    (Tamil, "மன்னிக்கவும்: {error}"),
                    (Bengali, "দুঃখিত: {error}"),
                ],
            ),
            (
                NoScheme,
                &[
                    (Hindi, "कोई योजना नहीं मिली"),
                    (Telugu, "ఏ పథకం కనుగొనబడలేదు"),
                    (Marathi, "कोणतीही योजना सापडली नाही"),
                    (Tamil, "எந்த திட்டமும் கிடைக்கவில்லை"),
                    (Bengali, "কোনো প্রকল্প পাওয়া যায়নি"),
                ],
            ),
            (
                Thanks,
                &[
                    (Hindi, "धन्यवाद।"),
                    (Telugu, "ధన్యవాదాలు."),
                    (Marathi, "धन्यवाद."),
                    (Tamil, "நன்றி."),
                    (Bengali, "ধন্যবাদ।"),
                ],
            ),
        ];

        let entries = table
            .iter()
            .map(|(key, texts)| {
                let by_language = texts
                    .iter()
                    .map(|(lang, text)| (*lang, text.to_string()))
                    .collect();
                (*key, by_language)
            })
            .collect();

        Self {
            default_language: Language::default(),
            entries,
        }
    }

    /// Built-in catalog with entries from a YAML file layered on top
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;
        let overrides: PromptCatalog = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

        let mut catalog = Self::builtin();
        catalog.merge(overrides);
        tracing::debug!(path = %path.display(), "Loaded prompt overrides");
        Ok(catalog)
    }

    /// Overlay another catalog's entries onto this one
    pub fn merge(&mut self, other: PromptCatalog) {
        for (key, texts) in other.entries {
            self.entries.entry(key).or_default().extend(texts);
        }
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }

    /// Text for `key` in `language`, falling back to the default language
    pub fn get(&self, key: PromptKey, language: Language) -> &str {
        let texts = match self.entries.get(&key) {
            Some(texts) => texts,
            None => return "",
        };
        texts
            .get(&language)
            .or_else(|| texts.get(&self.default_language))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Whether `language` has its own text for `key`
    pub fn has(&self, key: PromptKey, language: Language) -> bool {
        self.entries
            .get(&key)
            .map(|texts| texts.contains_key(&language))
            .unwrap_or(false)
    }

    /// Text with a `{placeholder}` substituted
    pub fn render(
        &self,
        key: PromptKey,
        language: Language,
        placeholder: &str,
        value: &str,
    ) -> String {
        self.get(key, language)
            .replace(&format!("{{{}}}", placeholder), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_covers_all_languages() {
        let catalog = PromptCatalog::builtin();
        for key in [
            PromptKey::Greeting,
            PromptKey::AskAge,
            PromptKey::AskIncome,
            PromptKey::AskState,
            PromptKey::Thanks,
        ] {
            for lang in Language::ALL {
                assert!(catalog.has(key, lang), "{:?} missing for {}", key, lang);
            }
        }
        assert_eq!(catalog.get(PromptKey::AskAge, Language::Telugu), "మీ వయస్సు ఎంత?");
    }

    #[test]
    fn test_fallback_to_default_language() {
        let catalog = PromptCatalog::builtin();
        assert!(!catalog.has(PromptKey::LanguageSelection, Language::Tamil));
        assert_eq!(
            catalog.get(PromptKey::LanguageSelection, Language::Tamil),
            catalog.get(PromptKey::LanguageSelection, Language::Hindi)
        );
    }

    #[test]
    fn test_render_placeholder() {
        let catalog = PromptCatalog::builtin();
        assert_eq!(
            catalog.render(PromptKey::Eligible, Language::Hindi, "schemes", "SchemeA"),
            "आप SchemeA के लिए पात्र हैं।"
        );
        assert_eq!(
            catalog.render(PromptKey::Apology, Language::Telugu, "error", "x"),
            "క్షమించండి: x"
        );
    }

    #[test]
    fn test_load_overrides_from_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "ask_age:\n  hi: \"आपकी उम्र कितनी है?\"\nthanks:\n  ta: \"மிக்க நன்றி.\""
        )
        .unwrap();

        let catalog = PromptCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.get(PromptKey::AskAge, Language::Hindi), "आपकी उम्र कितनी है?");
        assert_eq!(catalog.get(PromptKey::AskAge, Language::Telugu), "మీ వయస్సు ఎంత?");
        assert_eq!(catalog.get(PromptKey::Thanks, Language::Tamil), "மிக்க நன்றி.");
    }

    #[test]
    fn test_load_missing_file() {
        let result = PromptCatalog::load("/nonexistent/prompts.yaml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}

//! Text processing for the scheme intake assistant
//!
//! This crate provides:
//! - **Numerals**: Indic digit normalization and number extraction
//! - **Keywords**: ordered keyword tables and yes/no classification
//! - **Slot Extraction**: typed slot candidates from transcripts
//!
//! # Example
//!
//! ```ignore
//! use scheme_voice_core::SlotName;
//! use scheme_voice_text_processing::SlotExtractor;
//!
//! let extractor = SlotExtractor::default();
//! let found = extractor.extract(SlotName::Age, "मेरी उम्र 22 है");
//! ```

pub mod keywords;
pub mod numerals;
pub mod slot_extraction;

pub use keywords::{classify_confirmation, Confirmation, KeywordMatch, KeywordTable};
pub use numerals::{digit_value, extract_numbers, normalize_digits, NumberMatch};
pub use slot_extraction::{Extraction, SlotExtractor};

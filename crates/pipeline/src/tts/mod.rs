//! Text-to-speech adapters

mod cloud;

pub use cloud::{CloudTts, CloudTtsConfig};

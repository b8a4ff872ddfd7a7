//! Speech-to-text adapters

mod cloud;

pub use cloud::{CloudSpeechStt, CloudSttConfig};

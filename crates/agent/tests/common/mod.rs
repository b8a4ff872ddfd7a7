//! Scripted speech collaborators for dialogue tests

#![allow(dead_code)]

use async_trait::async_trait;
use scheme_voice_agent::VoiceChannel;
use scheme_voice_core::{
    AudioCapture, Error, Language, Result, SpeechToText, SttError, TextToSpeech, Transcript,
};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Records the requested destinations and returns them unchanged
#[derive(Default)]
pub struct RecordingCapture {
    pub turns: Mutex<Vec<PathBuf>>,
}

impl RecordingCapture {
    /// File stems of every captured turn, in order
    pub fn turn_names(&self) -> Vec<String> {
        self.turns
            .lock()
            .unwrap()
            .iter()
            .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect()
    }
}

#[async_trait]
impl AudioCapture for RecordingCapture {
    async fn capture(&self, destination: &Path) -> Result<PathBuf> {
        self.turns.lock().unwrap().push(destination.to_path_buf());
        Ok(destination.to_path_buf())
    }
}

/// Fails every capture
pub struct BrokenCapture;

#[async_trait]
impl AudioCapture for BrokenCapture {
    async fn capture(&self, _destination: &Path) -> Result<PathBuf> {
        Err(Error::Audio("no input device".to_string()))
    }
}

/// Replies from a fixed script; an exhausted script yields no speech
pub struct ScriptedStt {
    replies: Mutex<VecDeque<std::result::Result<String, SttError>>>,
    pub languages: Mutex<Vec<Language>>,
}

impl ScriptedStt {
    pub fn new(replies: Vec<std::result::Result<&str, SttError>>) -> Self {
        Self {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|r| r.map(str::to_string))
                    .collect(),
            ),
            languages: Mutex::new(Vec::new()),
        }
    }

    pub fn says(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Ok(*r)).collect())
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

#[async_trait]
impl SpeechToText for ScriptedStt {
    async fn transcribe(
        &self,
        _audio: &Path,
        language: Language,
    ) -> std::result::Result<Transcript, SttError> {
        self.languages.lock().unwrap().push(language);
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(text)) => Ok(Transcript::new(text, 0.9, language)),
            Some(Err(e)) => Err(e),
            None => Err(SttError::NoSpeechDetected),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Keeps every spoken line
#[derive(Default)]
pub struct RecordingTts {
    pub spoken: Mutex<Vec<(String, Language)>>,
    pub fail: bool,
}

impl RecordingTts {
    pub fn failing() -> Self {
        Self {
            spoken: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.spoken
            .lock()
            .unwrap()
            .iter()
            .map(|(text, _)| text.clone())
            .collect()
    }
}

#[async_trait]
impl TextToSpeech for RecordingTts {
    async fn speak(&self, text: &str, language: Language) -> Result<()> {
        self.spoken.lock().unwrap().push((text.to_string(), language));
        if self.fail {
            return Err(Error::Synthesis("speaker unplugged".to_string()));
        }
        Ok(())
    }
}

pub struct Harness {
    pub capture: Arc<RecordingCapture>,
    pub stt: Arc<ScriptedStt>,
    pub tts: Arc<RecordingTts>,
    pub voice: VoiceChannel,
}

impl Harness {
    pub fn new(stt: ScriptedStt) -> Self {
        Self::with_tts(stt, RecordingTts::default())
    }

    pub fn with_tts(stt: ScriptedStt, tts: RecordingTts) -> Self {
        let capture = Arc::new(RecordingCapture::default());
        let stt = Arc::new(stt);
        let tts = Arc::new(tts);
        let voice = VoiceChannel::new(capture.clone(), stt.clone(), tts.clone(), "audio");
        Self {
            capture,
            stt,
            tts,
            voice,
        }
    }
}

//! Slot-filling controller against scripted speech

mod common;

use common::{BrokenCapture, Harness, RecordingTts, ScriptedStt};
use scheme_voice_agent::{
    ContradictionHandler, ConversationMemory, SlotFillingConfig, SlotFillingController,
    SlotOutcome, VoiceChannel,
};
use scheme_voice_config::{PromptCatalog, PromptKey, Vocabulary};
use scheme_voice_core::{
    Contradiction, Language, SlotName, SlotValue, SpeakerRole, StateCode, SttError,
};
use scheme_voice_text_processing::SlotExtractor;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct CountingHandler {
    seen: Mutex<Vec<Contradiction>>,
}

impl ContradictionHandler for CountingHandler {
    fn on_contradiction(&self, contradiction: &Contradiction, _language: Language) {
        self.seen.lock().unwrap().push(*contradiction);
    }
}

fn controller(voice: VoiceChannel, max_attempts: u32) -> SlotFillingController {
    SlotFillingController::new(
        SlotFillingConfig { max_attempts },
        voice,
        Arc::new(PromptCatalog::builtin()),
        Arc::new(SlotExtractor::new(&Vocabulary::default())),
    )
}

#[tokio::test]
async fn test_fills_all_slots_first_try() {
    let harness = Harness::new(ScriptedStt::says(&[
        "నా వయస్సు 22",
        "1,50,000",
        "నేను తెలంగాణ లో ఉంటాను",
    ]));
    let mut memory = ConversationMemory::new(Language::Telugu);

    let report = controller(harness.voice.clone(), 3).run(&mut memory).await;

    assert_eq!(
        report.outcome(SlotName::Age),
        Some(SlotOutcome::Filled {
            value: SlotValue::Number(22),
            attempts: 1
        })
    );
    assert_eq!(
        report.outcome(SlotName::Income),
        Some(SlotOutcome::Filled {
            value: SlotValue::Number(150000),
            attempts: 1
        })
    );
    assert_eq!(memory.profile().state, Some(StateCode::Telangana));
    assert!(memory.profile().is_complete());
    assert_eq!(report.total_attempts(), 3);

    assert_eq!(
        harness.capture.turn_names(),
        vec!["age_retry_0", "income_retry_0", "state_retry_0"]
    );
    assert!(harness
        .stt
        .languages
        .lock()
        .unwrap()
        .iter()
        .all(|l| *l == Language::Telugu));

    let history = memory.history();
    assert_eq!(history.len(), 6);
    assert_eq!(history[0].role, SpeakerRole::Agent);
    assert_eq!(history[0].text, "మీ వయస్సు ఎంత?");
    assert_eq!(history[1].role, SpeakerRole::User);
    assert_eq!(history[1].text, "నా వయస్సు 22");
}

#[tokio::test]
async fn test_slot_exhausted_after_three_attempts() {
    let harness = Harness::new(ScriptedStt::new(vec![
        Ok("पता नहीं"),
        Err(SttError::NoSpeechDetected),
        Ok("बहुत ज़्यादा"),
        Ok("50000"),
        Ok("महाराष्ट्र"),
    ]));
    let mut memory = ConversationMemory::new(Language::Hindi);

    let report = controller(harness.voice.clone(), 3).run(&mut memory).await;

    assert_eq!(
        report.outcome(SlotName::Age),
        Some(SlotOutcome::Exhausted { attempts: 3 })
    );
    assert_eq!(memory.profile().age, None);
    assert_eq!(memory.profile().income, Some(50000));
    assert_eq!(memory.profile().state, Some(StateCode::Maharashtra));

    assert_eq!(
        harness.capture.turn_names(),
        vec![
            "age_retry_0",
            "age_retry_1",
            "age_retry_2",
            "income_retry_0",
            "state_retry_0"
        ]
    );

    let ask_age = PromptCatalog::builtin()
        .get(PromptKey::AskAge, Language::Hindi)
        .to_string();
    let asked = harness
        .tts
        .lines()
        .iter()
        .filter(|line| **line == ask_age)
        .count();
    assert_eq!(asked, 3);
}

#[tokio::test]
async fn test_filled_slot_is_never_prompted() {
    let harness = Harness::new(ScriptedStt::says(&["30", "40000"]));
    let mut memory = ConversationMemory::new(Language::Marathi);
    memory
        .update(SlotName::State, SlotValue::State(StateCode::Maharashtra))
        .unwrap();

    let report = controller(harness.voice.clone(), 3).run(&mut memory).await;

    assert_eq!(report.outcome(SlotName::State), Some(SlotOutcome::AlreadyFilled));
    assert_eq!(memory.profile().age, Some(30));
    assert_eq!(memory.profile().income, Some(40000));

    let ask_state = PromptCatalog::builtin()
        .get(PromptKey::AskState, Language::Marathi)
        .to_string();
    assert!(!harness.tts.lines().contains(&ask_state));
    assert_eq!(harness.capture.turn_names().len(), 2);
}

#[tokio::test]
async fn test_capture_failures_consume_attempts() {
    let stt = Arc::new(ScriptedStt::says(&["25"]));
    let tts = Arc::new(RecordingTts::default());
    let voice = VoiceChannel::new(Arc::new(BrokenCapture), stt.clone(), tts.clone(), "audio");
    let mut memory = ConversationMemory::new(Language::Bengali);

    let report = controller(voice, 3).run(&mut memory).await;

    for slot in SlotName::ORDER {
        assert_eq!(
            report.outcome(slot),
            Some(SlotOutcome::Exhausted { attempts: 3 })
        );
    }
    assert_eq!(report.total_attempts(), 9);
    assert_eq!(tts.lines().len(), 9);
    // Nothing reached the transcriber
    assert_eq!(stt.remaining(), 1);
    assert!(memory
        .history()
        .iter()
        .all(|u| u.role == SpeakerRole::Agent));
}

#[tokio::test]
async fn test_synthesis_failure_does_not_stop_filling() {
    let harness = Harness::with_tts(
        ScriptedStt::says(&["வயது 40", "90000", "தமிழ்நாடு"]),
        RecordingTts::failing(),
    );
    let mut memory = ConversationMemory::new(Language::Tamil);

    controller(harness.voice.clone(), 3).run(&mut memory).await;

    assert_eq!(memory.profile().age, Some(40));
    assert_eq!(memory.profile().income, Some(90000));
    assert_eq!(memory.profile().state, Some(StateCode::TamilNadu));
}

#[tokio::test]
async fn test_max_attempts_is_configurable() {
    let harness = Harness::new(ScriptedStt::says(&["no idea", "12000", "bengal"]));
    let mut memory = ConversationMemory::new(Language::Bengali);

    let report = controller(harness.voice.clone(), 1).run(&mut memory).await;

    assert_eq!(
        report.outcome(SlotName::Age),
        Some(SlotOutcome::Exhausted { attempts: 1 })
    );
    assert_eq!(memory.profile().income, Some(12000));
    assert_eq!(memory.profile().state, Some(StateCode::WestBengal));
}

#[tokio::test]
async fn test_zero_answer_is_asked_again() {
    let harness = Harness::new(ScriptedStt::says(&["0", "मेरी उम्र 30", "०", "45000", "तेलंगाना"]));
    let mut memory = ConversationMemory::new(Language::Hindi);

    let report = controller(harness.voice.clone(), 3).run(&mut memory).await;

    assert_eq!(
        report.outcome(SlotName::Age),
        Some(SlotOutcome::Filled {
            value: SlotValue::Number(30),
            attempts: 2
        })
    );
    assert_eq!(
        report.outcome(SlotName::Income),
        Some(SlotOutcome::Filled {
            value: SlotValue::Number(45000),
            attempts: 2
        })
    );
    assert_eq!(
        harness.capture.turn_names(),
        vec![
            "age_retry_0",
            "age_retry_1",
            "income_retry_0",
            "income_retry_1",
            "state_retry_0"
        ]
    );
}

#[tokio::test]
async fn test_prefilled_slots_are_never_contradicted() {
    let harness = Harness::new(ScriptedStt::says(&["55000"]));
    let handler = Arc::new(CountingHandler::default());
    let mut memory = ConversationMemory::new(Language::Telugu);
    memory.update(SlotName::Age, SlotValue::Number(40)).unwrap();
    memory
        .update(SlotName::State, SlotValue::State(StateCode::AndhraPradesh))
        .unwrap();

    let report = controller(harness.voice.clone(), 3)
        .with_contradiction_handler(handler.clone())
        .run(&mut memory)
        .await;

    assert_eq!(report.outcome(SlotName::Age), Some(SlotOutcome::AlreadyFilled));
    assert_eq!(memory.profile().age, Some(40));
    assert_eq!(memory.profile().income, Some(55000));
    assert_eq!(harness.capture.turn_names(), vec!["income_retry_0"]);
    assert!(handler.seen.lock().unwrap().is_empty());
}

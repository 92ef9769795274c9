//! Voice assistant state machine against fake speech capabilities.

use chrono::NaiveTime;

use super::fakes::{FakeMic, FakeSpeaker};
use crate::ai::{AssistantError, Intent, VoiceAssistant};
use crate::config::CompanionConfig;
use crate::notify::NotificationVariant;
use crate::stt::{SttError, Transcript, UnsupportedInput};
use crate::tts::SilentSpeech;

fn noon() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap()
}

fn setup() -> (VoiceAssistant, FakeSpeaker, FakeMic) {
    setup_with(FakeMic::new(), &CompanionConfig::default())
}

fn setup_with(mic: FakeMic, config: &CompanionConfig) -> (VoiceAssistant, FakeSpeaker, FakeMic) {
    let speaker = FakeSpeaker::default();
    let assistant = VoiceAssistant::new(Box::new(speaker.clone()), Box::new(mic.clone()), config);
    (assistant, speaker, mic)
}

// ── Start / stop ────────────────────────────────────────────

#[test]
fn starts_active_and_idle() {
    let (assistant, _, _) = setup();
    assert!(assistant.is_enabled());
    assert!(assistant.is_active());
    assert!(!assistant.is_listening());
    assert_eq!(assistant.quick_commands().len(), 4);
}

#[test]
fn stop_assistant_cancels_speech_and_mutes() {
    let (mut assistant, speaker, _) = setup();
    assistant.stop_assistant();

    assert!(!assistant.is_active());
    assert_eq!(speaker.cancels(), 1);
    assert_eq!(
        assistant.notifications().latest().unwrap().title,
        "Voice Assistant Stopped"
    );

    assistant.speak("anyone there?");
    assert!(speaker.spoken().is_empty());
}

#[test]
fn start_assistant_greets() {
    let (mut assistant, speaker, _) = setup();
    assistant.stop_assistant();
    assistant.start_assistant();

    assert!(assistant.is_active());
    assert_eq!(speaker.spoken().len(), 1);
    assert!(speaker.spoken()[0].contains("now active"));
    let params = speaker.last_params().unwrap();
    assert_eq!(params.rate, 0.8);
    assert_eq!(params.volume, 0.8);
}

// ── Listening ───────────────────────────────────────────────

#[test]
fn listening_flow_handles_first_final_transcript() {
    let (mut assistant, speaker, mic) = setup();
    assistant.start_listening().unwrap();
    assert!(assistant.is_listening());
    assert_eq!(mic.starts(), 1);
    assert_eq!(speaker.spoken(), vec!["I'm listening. How can I help you?"]);

    let options = mic.last_options().unwrap();
    assert!(options.continuous && options.interim_results);
    assert_eq!(options.language, "en-US");

    mic.hear(Transcript::interim("what are my"));
    assert!(assistant.pump(noon()).is_none());
    assert!(assistant.is_listening());

    mic.hear(Transcript::final_("What are my Medications"));
    let response = assistant.pump(noon()).expect("command handled");

    assert_eq!(response.matched_intent, Intent::Medication);
    assert_eq!(assistant.transcript(), Some("What are my Medications"));
    assert!(!assistant.is_listening());
    assert_eq!(mic.stops(), 1);
    assert_eq!(speaker.spoken().last().unwrap(), &response.response_text);
    assert_eq!(
        assistant.notifications().latest().unwrap().description,
        "Heard: \"what are my medications\""
    );
}

#[test]
fn events_after_stop_are_ignored() {
    let (mut assistant, _, mic) = setup();
    assistant.start_listening().unwrap();
    assistant.stop_listening();
    assert_eq!(mic.stops(), 1);

    mic.hear(Transcript::final_("family"));
    assert!(assistant.pump(noon()).is_none());
    assert_eq!(assistant.transcript(), None);
}

#[test]
fn restart_discards_commands_from_stopped_session() {
    let (mut assistant, speaker, mic) = setup();
    assistant.start_listening().unwrap();
    mic.hear(Transcript::final_("family"));
    assistant.stop_listening();
    assistant.start_listening().unwrap();

    assert!(assistant.pump(noon()).is_none());
    assert!(assistant.is_listening());
    assert_eq!(assistant.transcript(), None);
    assert!(speaker.spoken().iter().all(|s| !s.contains("Your family loves you")));

    mic.hear(Transcript::final_("what time is it"));
    let response = assistant.pump(noon()).expect("new session command handled");
    assert_eq!(response.matched_intent, Intent::Time);
}

#[test]
fn unsupported_platform_is_reported() {
    let (mut assistant, _, mic) = setup_with(FakeMic::unsupported(), &CompanionConfig::default());
    assert!(!assistant.is_supported());
    assert_eq!(assistant.start_listening(), Err(AssistantError::Unsupported));
    assert_eq!(mic.starts(), 0);

    let note = assistant.notifications().latest().unwrap();
    assert_eq!(note.title, "Voice not supported");
    assert_eq!(note.variant, NotificationVariant::Destructive);
}

#[test]
fn listening_requires_running_assistant() {
    let (mut assistant, _, mic) = setup();
    assistant.stop_assistant();
    assert_eq!(assistant.start_listening(), Err(AssistantError::Inactive));
    assert_eq!(mic.starts(), 0);
}

#[test]
fn listening_requires_voice_switch() {
    let mut config = CompanionConfig::default();
    config.voice.enabled = false;
    let (mut assistant, _, _) = setup_with(FakeMic::new(), &config);
    assert_eq!(assistant.start_listening(), Err(AssistantError::Disabled));
}

#[test]
fn recognition_error_notifies_and_stops_listening() {
    let (mut assistant, _, mic) = setup();
    assistant.start_listening().unwrap();
    mic.fail(SttError::NoSpeech);

    assert!(assistant.pump(noon()).is_none());
    assert!(!assistant.is_listening());
    let note = assistant.notifications().latest().unwrap();
    assert_eq!(note.title, "Voice error");
    assert_eq!(note.variant, NotificationVariant::Destructive);
}

#[test]
fn session_end_is_silent() {
    let (mut assistant, _, mic) = setup();
    assistant.start_listening().unwrap();
    let before = assistant.notifications().len();
    mic.fail(SttError::SessionEnded);

    assistant.pump(noon());
    assert!(!assistant.is_listening());
    assert_eq!(assistant.notifications().len(), before);
}

#[test]
fn restarting_while_listening_opens_another_session() {
    let (mut assistant, _, mic) = setup();
    assistant.start_listening().unwrap();
    assistant.start_listening().unwrap();
    assert_eq!(mic.starts(), 2);
    assert!(assistant.is_listening());
}

// ── Commands ────────────────────────────────────────────────

#[test]
fn quick_command_time_speaks_clock() {
    let (mut assistant, speaker, _) = setup();
    let command = assistant.quick_commands()[3].command;
    let at = NaiveTime::from_hms_opt(9, 7, 0).unwrap();

    let response = assistant.handle_command(command, at);
    assert_eq!(response.matched_intent, Intent::Time);
    assert_eq!(speaker.spoken(), vec!["The current time is 09:07 AM"]);
}

#[test]
fn disabled_voice_still_classifies_but_stays_quiet() {
    let (mut assistant, speaker, _) = setup();
    assistant.set_enabled(false);

    let response = assistant.handle_command("xyz", noon());
    assert_eq!(response.matched_intent, Intent::Fallback);
    assert!(response.response_text.contains("xyz"));
    assert!(speaker.spoken().is_empty());

    assistant.announce("Well done!");
    assert!(speaker.spoken().is_empty());
}

#[test]
fn announce_ignores_assistant_stop() {
    let (mut assistant, speaker, _) = setup();
    assistant.stop_assistant();
    assistant.announce("Your task: Dinner at 6:00 PM");
    assert_eq!(speaker.spoken(), vec!["Your task: Dinner at 6:00 PM"]);
}

#[test]
fn headless_host_answers_without_speech() {
    let mut assistant = VoiceAssistant::new(
        Box::new(SilentSpeech::new()),
        Box::new(UnsupportedInput),
        &CompanionConfig::default(),
    );
    assert_eq!(assistant.start_listening(), Err(AssistantError::Unsupported));
    let response = assistant.handle_command("Show me the family", noon());
    assert_eq!(response.matched_intent, Intent::Family);
}

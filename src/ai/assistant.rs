//! Voice Assistant: the state machine around the intent classifier.
//!
//! Owns the speech capabilities, the assistant on/off and listening flags,
//! and the notification log. Recognition callbacks only enqueue events;
//! [`VoiceAssistant::pump`] applies them on the caller's thread.

use chrono::NaiveTime;
use std::sync::mpsc::{self, Receiver, Sender};
use thiserror::Error;

use super::intent::{IntentClassifier, IntentResponse};
use crate::config::CompanionConfig;
use crate::notify::NotificationLog;
use crate::stt::{ListenSession, RecognitionOptions, SpeechInput, SttError, Transcript};
use crate::tts::{SpeechOutput, SpeechParams};

const GREETING: &str = "Voice assistant is now active. How can I help you today?";
const LISTENING_PROMPT: &str = "I'm listening. How can I help you?";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssistantError {
    #[error("voice features are turned off")]
    Disabled,
    #[error("voice assistant is stopped")]
    Inactive,
    #[error("voice recognition is not supported")]
    Unsupported,
    #[error(transparent)]
    Recognition(#[from] SttError),
}

/// Canned commands offered as buttons next to the microphone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickCommand {
    pub label: &'static str,
    pub command: &'static str,
}

pub const QUICK_COMMANDS: &[QuickCommand] = &[
    QuickCommand {
        label: "Tell me about my medications",
        command: "medication",
    },
    QuickCommand {
        label: "What's my routine today?",
        command: "routine today",
    },
    QuickCommand {
        label: "Tell me about my family",
        command: "family",
    },
    QuickCommand {
        label: "What time is it?",
        command: "what time is it",
    },
];

#[derive(Debug)]
enum RecognitionEvent {
    Result(Transcript),
    Error(SttError),
}

pub struct VoiceAssistant {
    output: Box<dyn SpeechOutput>,
    input: Box<dyn SpeechInput>,
    classifier: IntentClassifier,
    speech: SpeechParams,
    recognition: RecognitionOptions,

    enabled: bool,
    active: bool,
    listening: bool,
    transcript: Option<String>,
    session: Option<Box<dyn ListenSession>>,

    events_tx: Sender<RecognitionEvent>,
    events_rx: Receiver<RecognitionEvent>,
    notifications: NotificationLog,
}

impl VoiceAssistant {
    pub fn new(
        output: Box<dyn SpeechOutput>,
        input: Box<dyn SpeechInput>,
        config: &CompanionConfig,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        tracing::debug!(
            output = %output.id(),
            recognition = input.is_supported(),
            "voice assistant created"
        );
        Self {
            output,
            input,
            classifier: IntentClassifier::from_config(&config.assistant),
            speech: SpeechParams::from_config(&config.voice),
            recognition: RecognitionOptions::from_config(&config.voice),
            enabled: config.voice.enabled,
            active: true,
            listening: false,
            transcript: None,
            session: None,
            events_tx,
            events_rx,
            notifications: NotificationLog::new(),
        }
    }

    // ── State ──────────────────────────────────────────

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_supported(&self) -> bool {
        self.input.is_supported()
    }

    /// Last final transcript heard.
    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    pub fn notifications(&self) -> &NotificationLog {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationLog {
        &mut self.notifications
    }

    pub fn quick_commands(&self) -> &'static [QuickCommand] {
        QUICK_COMMANDS
    }

    // ── Speech ─────────────────────────────────────────

    /// Speak through the assistant; silent unless voice is on and the assistant is running.
    pub fn speak(&mut self, text: &str) {
        if !self.active || !self.enabled {
            return;
        }
        self.output.speak(text, &self.speech);
    }

    /// Spoken feedback from the care screens; only the global voice switch applies.
    ///
    /// Unlike [`speak`](Self::speak) this ignores a stopped assistant, but unlike the
    /// care screens of the web app it does honour "Voice Off".
    pub fn announce(&mut self, text: &str) {
        if !self.enabled {
            return;
        }
        self.output.speak(text, &self.speech);
    }

    /// Global "Voice On / Voice Off" switch.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.end_session();
            self.output.cancel();
        }
        tracing::info!(enabled, "voice switched");
    }

    pub fn start_assistant(&mut self) {
        self.active = true;
        self.speak(GREETING);
        self.notifications.info(
            "Voice Assistant Started",
            "Voice assistant is now ready to help you",
        );
        tracing::info!("voice assistant started");
    }

    pub fn stop_assistant(&mut self) {
        self.active = false;
        self.end_session();
        self.output.cancel();
        self.notifications.info(
            "Voice Assistant Stopped",
            "Voice assistant has been turned off",
        );
        tracing::info!("voice assistant stopped");
    }

    // ── Listening ──────────────────────────────────────

    pub fn start_listening(&mut self) -> Result<(), AssistantError> {
        if !self.enabled {
            return Err(AssistantError::Disabled);
        }
        if !self.input.is_supported() {
            self.notifications.destructive(
                "Voice not supported",
                "Your browser doesn't support voice recognition",
            );
            tracing::warn!("speech recognition unavailable");
            return Err(AssistantError::Unsupported);
        }
        if !self.active {
            self.notifications.destructive(
                "Voice Assistant Stopped",
                "Please start the voice assistant first",
            );
            return Err(AssistantError::Inactive);
        }

        let results_tx = self.events_tx.clone();
        let errors_tx = self.events_tx.clone();
        let session = self.input.start(
            &self.recognition,
            Box::new(move |transcript| {
                let _ = results_tx.send(RecognitionEvent::Result(transcript));
            }),
            Box::new(move |error| {
                let _ = errors_tx.send(RecognitionEvent::Error(error));
            }),
        );

        match session {
            Ok(session) => {
                self.session = Some(session);
                self.listening = true;
                tracing::info!(language = %self.recognition.language, "listening");
                self.speak(LISTENING_PROMPT);
                Ok(())
            }
            Err(e) => {
                self.report_recognition_error(&e);
                Err(e.into())
            }
        }
    }

    pub fn stop_listening(&mut self) {
        self.end_session();
        self.output.cancel();
    }

    fn end_session(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.stop();
        }
        self.listening = false;
        // Results already queued by the stopped session must not leak into the next one.
        while self.events_rx.try_recv().is_ok() {}
    }

    fn report_recognition_error(&mut self, error: &SttError) {
        tracing::warn!(%error, "voice recognition error");
        self.notifications
            .destructive("Voice error", "There was an error with voice recognition");
    }

    /// Apply recognition events queued by the input callbacks.
    ///
    /// The first final, non-empty transcript is handled as a command and ends
    /// the session; its response is returned.
    pub fn pump(&mut self, now: NaiveTime) -> Option<IntentResponse> {
        let mut handled = None;
        while let Ok(event) = self.events_rx.try_recv() {
            if !self.listening {
                continue;
            }
            match event {
                RecognitionEvent::Result(transcript) => {
                    if !transcript.is_final || transcript.text.is_empty() {
                        continue;
                    }
                    self.transcript = Some(transcript.text.clone());
                    handled = Some(self.handle_command(&transcript.text, now));
                    self.end_session();
                }
                RecognitionEvent::Error(SttError::SessionEnded) => {
                    self.session = None;
                    self.listening = false;
                }
                RecognitionEvent::Error(error) => {
                    self.session = None;
                    self.listening = false;
                    self.report_recognition_error(&error);
                }
            }
        }
        handled
    }

    // ── Commands ───────────────────────────────────────

    /// Classify a command, speak the answer and log it for the toast surface.
    pub fn handle_command(&mut self, command: &str, now: NaiveTime) -> IntentResponse {
        let command = command.to_lowercase();
        tracing::info!(%command, "voice command");

        let response = self.classifier.classify(&command, now);
        self.speak(&response.response_text);
        self.notifications
            .info("Voice Assistant", format!("Heard: \"{}\"", command));
        response
    }
}

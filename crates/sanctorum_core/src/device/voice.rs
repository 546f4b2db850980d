//! Voice search capture state.

use crate::device::capability::{CapabilityError, CapabilitySet, DeviceCapability};
use crate::model::language::Language;
use log::warn;

/// Recognition events reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceEvent {
    Started,
    Result(String),
    Ended,
    /// Host error code, e.g. `not-allowed`.
    Error(String),
}

/// Listening state for a voice-enabled search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceCapture {
    available: bool,
    language: Language,
    listening: bool,
    transcript: String,
    error: Option<String>,
}

impl VoiceCapture {
    pub fn new(capabilities: &CapabilitySet, language: Language) -> Self {
        let available = capabilities.supports(DeviceCapability::SpeechRecognition);
        Self {
            available,
            language,
            listening: false,
            transcript: String::new(),
            error: (!available).then(|| {
                DeviceCapability::SpeechRecognition
                    .unavailable_message()
                    .to_string()
            }),
        }
    }

    /// Requests a new capture; returns the locale the host should listen in.
    ///
    /// `Ok(None)` when a capture is already running.
    pub fn start(&mut self) -> Result<Option<&'static str>, CapabilityError> {
        if !self.available {
            return Err(CapabilityError::Unavailable(
                DeviceCapability::SpeechRecognition,
            ));
        }
        if self.listening {
            return Ok(None);
        }
        self.transcript.clear();
        Ok(Some(self.language.speech_locale()))
    }

    pub fn apply(&mut self, event: VoiceEvent) {
        match event {
            VoiceEvent::Started => {
                self.listening = true;
                self.error = None;
            }
            VoiceEvent::Result(transcript) => self.transcript = transcript.trim().to_string(),
            VoiceEvent::Ended => self.listening = false,
            VoiceEvent::Error(code) => {
                warn!("event=voice_capture module=device status=error code={code}");
                self.error = Some(self.friendly_error(&code));
                self.listening = false;
            }
        }
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Last recognized text; empty until a result arrives.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn friendly_error(&self, code: &str) -> String {
        match code {
            "not-allowed" => "Microphone access denied. Please allow microphone permission to use this feature.".to_string(),
            "no-speech" => "No speech was detected. Please try again.".to_string(),
            "language-not-supported" => format!(
                "The selected language ({}) is not supported for speech recognition.",
                self.language.code()
            ),
            other => format!("Speech recognition error: {other}"),
        }
    }
}

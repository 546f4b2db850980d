//! Read-aloud controller for chapter text.
//!
//! # Invariants
//! - At most one utterance is active; starting a new one cancels the old.
//! - Nothing is spoken when speech synthesis is unavailable.

use crate::bible::chapter::narration_text;
use crate::device::capability::{CapabilityError, CapabilitySet, DeviceCapability};
use crate::model::language::Language;
use crate::model::scripture::ChapterVerse;

/// Host speech engine.
pub trait SpeechSynthesizer {
    fn speak(&mut self, text: &str, locale: &str);
    fn pause(&mut self);
    fn resume(&mut self);
    fn cancel(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NarrationState {
    #[default]
    Idle,
    Speaking,
    Paused,
}

pub struct NarrationController<S: SpeechSynthesizer> {
    synthesizer: S,
    available: bool,
    state: NarrationState,
}

impl<S: SpeechSynthesizer> NarrationController<S> {
    pub fn new(synthesizer: S, capabilities: &CapabilitySet) -> Self {
        Self {
            synthesizer,
            available: capabilities.supports(DeviceCapability::SpeechSynthesis),
            state: NarrationState::Idle,
        }
    }

    pub fn state(&self) -> NarrationState {
        self.state
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Speaks `verses[start..]` as one utterance.
    ///
    /// An out-of-range `start` stops narration and speaks nothing.
    pub fn start_from(
        &mut self,
        verses: &[ChapterVerse],
        start: usize,
        lang: Language,
    ) -> Result<(), CapabilityError> {
        self.require()?;
        self.stop();
        if let Some(text) = narration_text(verses, start) {
            self.synthesizer.speak(&text, lang.speech_locale());
            self.state = NarrationState::Speaking;
        }
        Ok(())
    }

    /// Play button: pause, resume, or start from the first verse.
    pub fn toggle_play(
        &mut self,
        verses: &[ChapterVerse],
        lang: Language,
    ) -> Result<(), CapabilityError> {
        self.require()?;
        match self.state {
            NarrationState::Speaking => self.pause(),
            NarrationState::Paused => self.resume(),
            NarrationState::Idle => self.start_from(verses, 0, lang)?,
        }
        Ok(())
    }

    /// No-op unless speaking.
    pub fn pause(&mut self) {
        if self.state == NarrationState::Speaking {
            self.synthesizer.pause();
            self.state = NarrationState::Paused;
        }
    }

    /// No-op unless paused.
    pub fn resume(&mut self) {
        if self.state == NarrationState::Paused {
            self.synthesizer.resume();
            self.state = NarrationState::Speaking;
        }
    }

    pub fn stop(&mut self) {
        if self.state != NarrationState::Idle {
            self.synthesizer.cancel();
        }
        self.state = NarrationState::Idle;
    }

    /// Host callback when the utterance ends on its own.
    pub fn on_finished(&mut self) {
        self.state = NarrationState::Idle;
    }

    fn require(&self) -> Result<(), CapabilityError> {
        if self.available {
            Ok(())
        } else {
            Err(CapabilityError::Unavailable(DeviceCapability::SpeechSynthesis))
        }
    }
}

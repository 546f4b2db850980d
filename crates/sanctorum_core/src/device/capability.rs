//! Host capability declarations.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Optional platform feature used by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeviceCapability {
    SpeechRecognition,
    SpeechSynthesis,
    Share,
}

/// Host string id for speech recognition.
pub const DEVICE_CAPABILITY_SPEECH_RECOGNITION: &str = "speech_recognition";
/// Host string id for speech synthesis.
pub const DEVICE_CAPABILITY_SPEECH_SYNTHESIS: &str = "speech_synthesis";
/// Host string id for the system share sheet.
pub const DEVICE_CAPABILITY_SHARE: &str = "share";

impl DeviceCapability {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SpeechRecognition => DEVICE_CAPABILITY_SPEECH_RECOGNITION,
            Self::SpeechSynthesis => DEVICE_CAPABILITY_SPEECH_SYNTHESIS,
            Self::Share => DEVICE_CAPABILITY_SHARE,
        }
    }

    /// Message shown when a user reaches for a missing feature.
    pub fn unavailable_message(self) -> &'static str {
        match self {
            Self::SpeechRecognition => "Speech recognition is not supported on this device.",
            Self::SpeechSynthesis => "Text-to-speech is not supported on this device.",
            Self::Share => "Sharing is not supported on this device.",
        }
    }
}

/// Parses one host capability id.
pub fn parse_device_capability(value: &str) -> Result<DeviceCapability, CapabilityError> {
    match value.trim() {
        "" => Err(CapabilityError::EmptyCapability),
        DEVICE_CAPABILITY_SPEECH_RECOGNITION => Ok(DeviceCapability::SpeechRecognition),
        DEVICE_CAPABILITY_SPEECH_SYNTHESIS => Ok(DeviceCapability::SpeechSynthesis),
        DEVICE_CAPABILITY_SHARE => Ok(DeviceCapability::Share),
        other => Err(CapabilityError::UnknownCapability(other.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    EmptyCapability,
    UnknownCapability(String),
    Unavailable(DeviceCapability),
}

impl Display for CapabilityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCapability => write!(f, "device capability value must not be empty"),
            Self::UnknownCapability(value) => write!(f, "unknown device capability: {value}"),
            Self::Unavailable(capability) => write!(f, "{}", capability.unavailable_message()),
        }
    }
}

impl Error for CapabilityError {}

/// Capabilities the host reported at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    available: BTreeSet<DeviceCapability>,
}

impl CapabilitySet {
    pub fn new(capabilities: impl IntoIterator<Item = DeviceCapability>) -> Self {
        Self {
            available: capabilities.into_iter().collect(),
        }
    }

    /// Builds a set from host ids, skipping (and returning) unknown ones.
    pub fn from_host_ids<'a>(
        ids: impl IntoIterator<Item = &'a str>,
    ) -> (Self, Vec<CapabilityError>) {
        let mut set = Self::default();
        let mut rejected = Vec::new();
        for id in ids {
            match parse_device_capability(id) {
                Ok(capability) => {
                    set.available.insert(capability);
                }
                Err(err) => rejected.push(err),
            }
        }
        (set, rejected)
    }

    pub fn supports(&self, capability: DeviceCapability) -> bool {
        self.available.contains(&capability)
    }

    /// `Err(Unavailable)` when the feature must be hidden or disabled.
    pub fn require(&self, capability: DeviceCapability) -> Result<(), CapabilityError> {
        if self.supports(capability) {
            Ok(())
        } else {
            Err(CapabilityError::Unavailable(capability))
        }
    }
}

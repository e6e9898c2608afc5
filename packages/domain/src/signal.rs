//! Stream lifecycle markers interleaved with feature data.
use serde::{Deserialize, Serialize};
use strum::Display;

/// Out-of-band control signal emitted by the frontend.
///
/// Signals carry no payload; they bracket the feature stream so a
/// consumer can tell utterance boundaries apart from raw stream
/// boundaries. Only [`SignalKind::SpeechEnd`] terminates a scoring
/// call; every other kind is transparently skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum SignalKind {
    /// The capture stream opened.
    DataStart,
    /// The capture stream closed.
    DataEnd,
    /// An utterance began (endpointer fired).
    SpeechStart,
    /// The utterance is over; no further features belong to it.
    SpeechEnd,
}

impl SignalKind {
    /// Whether this signal ends the current utterance.
    #[inline]
    pub const fn ends_utterance(self) -> bool {
        matches!(self, Self::SpeechEnd)
    }
}

//! Error taxonomy shared by the scorer and its collaborators.
use thiserror::Error;

/// Failures around a scoring session.
///
/// End-of-stream and an empty hypothesis pool are *not* errors; both
/// surface as an ordinary "no result" from the scorer. Only the model
/// acquisition class is fatal to a session.
#[derive(Debug, Clone, Error)]
pub enum ScoreError {
    /// The frontend failed to produce an item. Recovered locally: the
    /// scoring call yields no result and the session stays alive.
    #[error("processing: {0}")]
    Processing(String),
    /// An acoustic model could not be acquired during `open()`. Fatal:
    /// scoring cannot proceed without a loaded model.
    #[error("model load: {0}")]
    ModelLoad(String),
}

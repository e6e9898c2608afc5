//! Feature-frame primitives produced by the signal-processing frontend.
//
//  • `FeatureFrame` is the reduced-precision (f32) representation every
//    scoring algorithm operates on.
//  • `FeatureVector` tags a frame with its numeric precision; frontends
//    that compute in f64 hand over `Full` frames and the scorer reduces
//    them before scoring.

use serde::{Deserialize, Serialize};

/// One analysis frame in the reduced-precision representation.
///
/// Carries the coefficient values plus enough provenance to line the
/// frame back up with the audio it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureFrame {
    /// Feature coefficients for this frame.
    pub values: Vec<f32>,
    /// Sample rate of the audio the frame was computed from, in Hz.
    pub sample_rate: u32,
    /// Position of the first sample of the analysis window.
    pub frame_index: u64,
}

impl FeatureFrame {
    /// Build a frame from coefficients and provenance.
    pub fn new(values: Vec<f32>, sample_rate: u32, frame_index: u64) -> Self {
        Self {
            values,
            sample_rate,
            frame_index,
        }
    }

    /// Number of coefficients in the frame.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.values.len()
    }
}

/// A feature frame tagged with its numeric precision.
///
/// The frontend may produce either representation; scoring always runs
/// on the reduced one. See [`FeatureVector::reduce`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureVector {
    /// Already in the representation the scorers consume.
    Reduced(FeatureFrame),
    /// High-precision frame, as produced by an f64 analysis pipeline.
    Full {
        /// Feature coefficients for this frame.
        values: Vec<f64>,
        /// Sample rate of the source audio, in Hz.
        sample_rate: u32,
        /// Position of the first sample of the analysis window.
        frame_index: u64,
    },
}

impl FeatureVector {
    /// Normalize to the reduced-precision representation.
    ///
    /// Pure and deterministic: `Full` values are rounded element-wise
    /// to f32, `Reduced` frames pass through untouched (a move, not a
    /// copy), so the operation is idempotent.
    pub fn reduce(self) -> FeatureFrame {
        match self {
            Self::Reduced(frame) => frame,
            Self::Full {
                values,
                sample_rate,
                frame_index,
            } => FeatureFrame {
                values: values.into_iter().map(|v| v as f32).collect(),
                sample_rate,
                frame_index,
            },
        }
    }

    /// Number of coefficients, independent of precision.
    #[inline]
    pub fn dimension(&self) -> usize {
        match self {
            Self::Reduced(frame) => frame.values.len(),
            Self::Full { values, .. } => values.len(),
        }
    }
}

impl From<FeatureFrame> for FeatureVector {
    fn from(frame: FeatureFrame) -> Self {
        Self::Reduced(frame)
    }
}

/* --------------------------------------------------------------------- */
/*  Unit-tests                                                           */

//! The tagged item type flowing from the frontend to the scorer.
use serde::{Deserialize, Serialize};

use crate::feature::FeatureVector;
use crate::signal::SignalKind;

/// One item pulled from the feature stream: either a feature frame or
/// an interleaved control signal.
///
/// Items are immutable once produced; ownership moves to the scorer
/// for the duration of one scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataItem {
    /// A feature frame to score against.
    Feature(FeatureVector),
    /// A stream lifecycle marker; carries no feature data.
    Signal(SignalKind),
}

impl DataItem {
    /// Whether this item carries feature data.
    #[inline]
    pub const fn is_feature(&self) -> bool {
        matches!(self, Self::Feature(_))
    }
}

impl From<FeatureVector> for DataItem {
    fn from(vector: FeatureVector) -> Self {
        Self::Feature(vector)
    }
}

impl From<SignalKind> for DataItem {
    fn from(kind: SignalKind) -> Self {
        Self::Signal(kind)
    }
}

//! # Scorer Domain
//!
//! Shared domain objects for the acoustic scoring core.
//!
//! This crate contains the types exchanged between the signal-processing
//! frontend, the scorer, and the decoder's search component, keeping the
//! scorer crate free of cyclic dependencies on either side.

pub mod data_item;
pub mod error;
pub mod feature;
pub mod scoreable;
pub mod signal;

// Re-export core types
pub use data_item::DataItem;
pub use error::ScoreError;
pub use feature::{FeatureFrame, FeatureVector};
pub use scoreable::Scoreable;
pub use signal::SignalKind;

//! Acoustic scorer – public crate root
//! ===================================
//! The scoring step of a speech decoder's search loop: pull the next
//! feature frame from a frontend, skip interleaved control signals,
//! normalize the numeric representation and score every active search
//! hypothesis against the frame, handing back the arg-max.
//!
//! The scoring algorithm itself is pluggable: anything implementing
//! [`ScoringStrategy`] slots into a [`FrameScorer`]. Two strategies
//! ship with the crate — [`CallbackStrategy`] for closure-backed
//! models and [`GaussianStrategy`] for diagonal-Gaussian state banks.
//!
//! ```no_run
//! # use acoustic_scorer::{FrameScorer, CallbackStrategy, ChannelSource};
//! # use scorer_domain::{FeatureFrame, Scoreable};
//! # struct Token { score: f32 }
//! # impl Scoreable for Token {
//! #     fn score(&self) -> f32 { self.score }
//! #     fn apply_score(&mut self, s: f32) { self.score = s; }
//! # }
//! let (feed, source) = ChannelSource::bounded(64);
//! let strategy = CallbackStrategy::new(|_t: &Token, frame: &FeatureFrame| {
//!     frame.values.iter().sum::<f32>() // stand-in acoustic model
//! });
//! let mut scorer: FrameScorer<ChannelSource, Token> = FrameScorer::builder()
//!     .frontend(source)
//!     .strategy(Box::new(strategy))
//!     .name("demo")
//!     .build();
//!
//! let mut pool: Vec<Token> = vec![Token { score: 0.0 }];
//! scorer.start_session();
//! let best = scorer.score(&mut pool);
//! # let _ = (best, feed);
//! ```

#![deny(unsafe_code)]

/* ────────────────────────  sub-modules  ─────────────────────────────── */
pub mod frontend;
pub mod scorer;
pub mod strategy;

/* ────────── public façade & re-exports ──────────────────────────────── */
pub use frontend::{ChannelSource, FeatureFeed, FeatureSource};
pub use scorer::{FrameScorer, FrameScorerBuilder};
pub use strategy::callback::CallbackStrategy;
pub use strategy::gaussian::{
    BankIoError, DiagGaussian, GaussianBank, GaussianStrategy, GaussianStrategyBuilder,
    StateAligned,
};
pub use strategy::ScoringStrategy;

/// Result alias used across the public API.
pub type Result<T> = std::result::Result<T, scorer_domain::ScoreError>;

//! Pluggable per-hypothesis scoring algorithms.

/// Closure-backed scoring strategy.
pub mod callback;
/// Diagonal-Gaussian state-bank scoring strategy.
pub mod gaussian;

use scorer_domain::{FeatureFrame, ScoreError, Scoreable};

/// One concrete acoustic scoring algorithm.
///
/// A [`super::FrameScorer`] owns a boxed strategy chosen at
/// configuration time; the session loop hands it the hypothesis pool
/// and one normalized frame per call.
///
/// Contract:
/// * never called with an empty pool (the session loop short-circuits
///   that case);
/// * applies a score to every hypothesis exactly once per call and
///   must not add or remove hypotheses;
/// * returns the arg-max hypothesis, ties broken stably in favor of
///   the earliest element of the caller's collection.
pub trait ScoringStrategy<H: Scoreable> {
    /// Score every hypothesis against `frame` and return the best one.
    fn score_all<'a>(&mut self, hypotheses: &'a mut [H], frame: &FeatureFrame) -> &'a H;

    /// Acquire any underlying resource (e.g. load a model bank).
    ///
    /// Failures here are the one fatal error class of a session.
    fn open(&mut self) -> Result<(), ScoreError> {
        Ok(())
    }

    /// Release whatever [`ScoringStrategy::open`] acquired. Must be
    /// safe to call even if scoring never ran.
    fn close(&mut self) {}

    /// Hook invoked when an utterance-scoring session begins.
    fn start_session(&mut self) {}

    /// Hook invoked when the session ends.
    fn end_session(&mut self) {}
}

/// Arg-max over a freshly scored pool: stable, first-in-order wins
/// ties. Shared by the shipped strategies.
pub(crate) fn best_of<H: Scoreable>(hypotheses: &[H]) -> &H {
    let mut best = 0;
    for i in 1..hypotheses.len() {
        if hypotheses[i].cmp_score(&hypotheses[best]) == core::cmp::Ordering::Greater {
            best = i;
        }
    }
    &hypotheses[best]
}

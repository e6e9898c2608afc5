//! Closure-backed scoring strategy.
//!
//! The lightest way to plug an acoustic model into the scorer: hand a
//! closure that maps `(hypothesis, frame)` to a score. Useful for
//! tests, for models living outside this crate, and for decoders that
//! keep per-hypothesis model state inside the hypothesis itself.

use scorer_domain::{FeatureFrame, Scoreable};

use super::{ScoringStrategy, best_of};

/// [`ScoringStrategy`] wrapping a scoring closure.
pub struct CallbackStrategy<M> {
    model: M,
}

impl<M> CallbackStrategy<M> {
    /// Wrap `model` as a scoring strategy.
    pub fn new(model: M) -> Self {
        Self { model }
    }
}

impl<H, M> ScoringStrategy<H> for CallbackStrategy<M>
where
    H: Scoreable,
    M: FnMut(&H, &FeatureFrame) -> f32,
{
    fn score_all<'a>(&mut self, hypotheses: &'a mut [H], frame: &FeatureFrame) -> &'a H {
        for hyp in hypotheses.iter_mut() {
            let score = (self.model)(hyp, frame);
            hyp.apply_score(score);
        }
        best_of(hypotheses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Tok {
        id: usize,
        score: f32,
    }

    impl Scoreable for Tok {
        fn score(&self) -> f32 {
            self.score
        }
        fn apply_score(&mut self, score: f32) {
            self.score = score;
        }
    }

    fn frame() -> FeatureFrame {
        FeatureFrame::new(vec![0.0; 4], 16_000, 0)
    }

    #[test]
    fn every_hypothesis_is_scored_and_argmax_returned() {
        let mut pool = vec![
            Tok { id: 0, score: 0.0 },
            Tok { id: 1, score: 0.0 },
            Tok { id: 2, score: 0.0 },
        ];
        let scores = [0.2f32, 0.9, 0.5];
        let mut strategy = CallbackStrategy::new(|t: &Tok, _: &FeatureFrame| scores[t.id]);

        let best = strategy.score_all(&mut pool, &frame());
        assert_eq!(best.id, 1);
        assert_eq!(best.score(), 0.9);

        for (tok, want) in pool.iter().zip(scores) {
            assert_eq!(tok.score(), want);
        }
    }

    #[test]
    fn ties_break_to_the_earliest_hypothesis() {
        let mut pool = vec![
            Tok { id: 0, score: 0.0 },
            Tok { id: 1, score: 0.0 },
            Tok { id: 2, score: 0.0 },
        ];
        let mut strategy = CallbackStrategy::new(|_: &Tok, _: &FeatureFrame| 1.25);

        let best = strategy.score_all(&mut pool, &frame());
        assert_eq!(best.id, 0);
    }
}

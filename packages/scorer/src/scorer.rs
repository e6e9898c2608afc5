//! Session core: one scoring step per call.
//!
//! [`FrameScorer`] owns the frontend handle and the scoring strategy
//! and drives the pull → skip-signals → normalize → score pipeline.
//! It introduces no concurrency of its own; `score` is synchronous and
//! may block inside the frontend pull.

use scorer_domain::{DataItem, ScoreError, Scoreable};
use tracing::{Span, debug, info_span, trace, warn};

use crate::frontend::FeatureSource;
use crate::strategy::ScoringStrategy;

/// Drives the scoring step of the decoder's search loop.
///
/// One instance per recognition session; calls must be issued
/// sequentially by the search loop. The strategy is chosen at
/// configuration time and boxed, so concrete acoustic models plug in
/// without touching the session logic.
pub struct FrameScorer<F, H> {
    frontend: F,
    strategy: Box<dyn ScoringStrategy<H>>,
    span: Span,
}

/// Configuration for a [`FrameScorer`]. Used to create a
/// [`FrameScorerBuilder`].
#[derive(typed_builder::TypedBuilder)]
#[builder(
    builder_method(vis = ""),
    builder_type(name = FrameScorerBuilder, vis = "pub"),
    build_method(into = FrameScorer<F, H>, vis = "pub"))
]
struct FrameScorerConfig<F, H> {
    frontend: F,
    strategy: Box<dyn ScoringStrategy<H>>,
    /// Name identifying this scorer in log output.
    #[builder(default = String::from("scorer"), setter(into))]
    name: String,
}

impl<F, H> From<FrameScorerConfig<F, H>> for FrameScorer<F, H> {
    fn from(cfg: FrameScorerConfig<F, H>) -> Self {
        Self {
            frontend: cfg.frontend,
            strategy: cfg.strategy,
            span: info_span!("acoustic_scorer", name = %cfg.name),
        }
    }
}

impl<F, H> FrameScorer<F, H>
where
    F: FeatureSource,
    H: Scoreable,
{
    /// Create a new [`FrameScorerBuilder`].
    pub fn builder() -> FrameScorerBuilder<F, H> {
        FrameScorerConfig::builder()
    }

    /// Score every hypothesis in `hypotheses` against the next feature
    /// frame and return the best-scoring one.
    ///
    /// Returns `None` when
    /// * the pool is empty (the frontend is not touched at all),
    /// * the utterance-end signal arrives before a frame,
    /// * the stream is exhausted, or
    /// * the frontend fails to produce an item — logged and swallowed,
    ///   the session stays usable for the next frame.
    ///
    /// Exactly one feature frame is consumed per successful call;
    /// interleaved control signals are skipped without being counted.
    pub fn score<'a>(&mut self, hypotheses: &'a mut [H]) -> Option<&'a H> {
        if hypotheses.is_empty() {
            return None;
        }

        let _guard = self.span.enter();

        let vector = loop {
            match self.frontend.next_item() {
                Ok(Some(DataItem::Signal(kind))) => {
                    if kind.ends_utterance() {
                        debug!(%kind, "utterance over, no frame to score");
                        return None;
                    }
                    trace!(%kind, "skipping control signal");
                }
                Ok(Some(DataItem::Feature(vector))) => break vector,
                Ok(None) => {
                    debug!("feature stream exhausted");
                    return None;
                }
                Err(err) => {
                    // One bad frame must not kill the session; the
                    // caller treats this as "no progress" and retries
                    // on the next logical frame.
                    warn!(%err, "frontend failed to produce an item");
                    return None;
                }
            }
        };

        let frame = vector.reduce();
        Some(self.strategy.score_all(hypotheses, &frame))
    }

    /// Acquire the strategy's underlying resources (model load).
    ///
    /// The one place a failure is fatal to the caller: without a model
    /// there is nothing to score against.
    pub fn open(&mut self) -> Result<(), ScoreError> {
        let _guard = self.span.enter();
        self.strategy.open()
    }

    /// Release everything [`FrameScorer::open`] acquired. Safe to call
    /// even if scoring never ran.
    pub fn close(&mut self) {
        let _guard = self.span.enter();
        self.strategy.close();
    }

    /// Mark the start of an utterance-scoring session.
    pub fn start_session(&mut self) {
        let _guard = self.span.enter();
        debug!("session started");
        self.strategy.start_session();
    }

    /// Mark the end of the session.
    pub fn end_session(&mut self) {
        let _guard = self.span.enter();
        debug!("session ended");
        self.strategy.end_session();
    }
}

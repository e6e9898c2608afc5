//! Behavioral tests for the scoring step: pull loop, signal handling,
//! normalization and arg-max selection.

use std::cell::Cell;
use std::rc::Rc;

use acoustic_scorer::{CallbackStrategy, FeatureSource, FrameScorer};
use scorer_domain::{DataItem, FeatureFrame, FeatureVector, ScoreError, Scoreable, SignalKind};

#[derive(Debug, Clone)]
struct Token {
    id: usize,
    score: f32,
    times_scored: usize,
}

impl Token {
    fn pool(n: usize) -> Vec<Token> {
        (0..n)
            .map(|id| Token {
                id,
                score: 0.0,
                times_scored: 0,
            })
            .collect()
    }
}

impl Scoreable for Token {
    fn score(&self) -> f32 {
        self.score
    }
    fn apply_score(&mut self, score: f32) {
        self.score = score;
        self.times_scored += 1;
    }
}

/// Scripted frontend; the pull counter stays observable from outside
/// after the source moves into the scorer.
struct ScriptedSource {
    items: Vec<Result<Option<DataItem>, ScoreError>>,
    pulls: Rc<Cell<usize>>,
}

impl ScriptedSource {
    fn new(items: Vec<Result<Option<DataItem>, ScoreError>>) -> (Self, Rc<Cell<usize>>) {
        let pulls = Rc::new(Cell::new(0));
        (
            Self {
                items,
                pulls: Rc::clone(&pulls),
            },
            pulls,
        )
    }
}

impl FeatureSource for ScriptedSource {
    fn next_item(&mut self) -> Result<Option<DataItem>, ScoreError> {
        self.pulls.set(self.pulls.get() + 1);
        if self.items.is_empty() {
            Ok(None)
        } else {
            self.items.remove(0)
        }
    }
}

fn frame(values: Vec<f32>) -> DataItem {
    DataItem::Feature(FeatureVector::Reduced(FeatureFrame::new(values, 16_000, 0)))
}

/// Each token is scored with the frame coefficient at its own index.
fn per_token_scorer() -> CallbackStrategy<impl FnMut(&Token, &FeatureFrame) -> f32> {
    CallbackStrategy::new(|t: &Token, f: &FeatureFrame| f.values[t.id])
}

fn scorer_over(
    source: ScriptedSource,
) -> FrameScorer<ScriptedSource, Token> {
    FrameScorer::builder()
        .frontend(source)
        .strategy(Box::new(per_token_scorer()))
        .name("test")
        .build()
}

#[test]
fn one_frame_then_speech_end_scores_every_hypothesis_once() {
    let (source, _pulls) = ScriptedSource::new(vec![
        Ok(Some(frame(vec![0.2, 0.9, 0.5]))),
        Ok(Some(DataItem::Signal(SignalKind::SpeechEnd))),
    ]);
    let mut scorer = scorer_over(source);
    let mut pool = Token::pool(3);

    let best = scorer.score(&mut pool).expect("a frame was available");
    assert!(best.id < 3, "winner must come from the pool");
    assert_eq!(best.id, 1, "0.9 is the arg-max");

    for tok in &pool {
        assert_eq!(tok.times_scored, 1);
    }
}

#[test]
fn empty_pool_never_touches_the_frontend() {
    let (source, pulls) = ScriptedSource::new(vec![Ok(Some(frame(vec![1.0])))]);
    let mut scorer = scorer_over(source);
    let mut pool: Vec<Token> = Vec::new();

    assert!(scorer.score(&mut pool).is_none());
    assert_eq!(pulls.get(), 0, "no data may be pulled for an empty pool");
}

#[test]
fn control_signals_are_skipped_not_counted() {
    let (source, pulls) = ScriptedSource::new(vec![
        Ok(Some(DataItem::Signal(SignalKind::DataStart))),
        Ok(Some(DataItem::Signal(SignalKind::SpeechStart))),
        Ok(Some(frame(vec![0.7]))),
    ]);
    let mut scorer = scorer_over(source);
    let mut pool = Token::pool(1);

    let best = scorer.score(&mut pool).expect("frame behind two signals");
    assert_eq!(best.score(), 0.7, "scored against the frame, not a signal");
    assert_eq!(pulls.get(), 3, "two signals and one frame consumed");
    assert_eq!(pool[0].times_scored, 1);
}

#[test]
fn speech_end_first_means_no_result_and_nothing_scored() {
    let (source, _pulls) = ScriptedSource::new(vec![
        Ok(Some(DataItem::Signal(SignalKind::SpeechEnd))),
        Ok(Some(frame(vec![1.0]))),
    ]);
    let mut scorer = scorer_over(source);
    let mut pool = Token::pool(2);

    assert!(scorer.score(&mut pool).is_none());
    for tok in &pool {
        assert_eq!(tok.times_scored, 0);
        assert_eq!(tok.score(), 0.0);
    }
}

#[test]
fn exhausted_source_means_no_result() {
    let (source, _pulls) = ScriptedSource::new(vec![Ok(None)]);
    let mut scorer = scorer_over(source);
    let mut pool = Token::pool(2);

    assert!(scorer.score(&mut pool).is_none());
}

#[test]
fn full_precision_frames_are_reduced_before_scoring() {
    let (source, _pulls) = ScriptedSource::new(vec![Ok(Some(DataItem::Feature(FeatureVector::Full {
        values: vec![0.25f64, 0.75],
        sample_rate: 16_000,
        frame_index: 3,
    })))]);
    let mut scorer = scorer_over(source);
    let mut pool = Token::pool(2);

    let best = scorer.score(&mut pool).expect("frame available");
    assert_eq!(best.id, 1);
    assert_eq!(pool[0].score(), 0.25f64 as f32);
    assert_eq!(pool[1].score(), 0.75f64 as f32);
}

#[test]
fn processing_failure_is_swallowed_and_the_session_survives() {
    let (source, _pulls) = ScriptedSource::new(vec![
        Err(ScoreError::Processing("frontend hiccup".into())),
        Ok(Some(frame(vec![0.4, 0.1]))),
    ]);
    let mut scorer = scorer_over(source);
    let mut pool = Token::pool(2);

    // The failing pull yields no result but must not panic or poison
    // the scorer.
    assert!(scorer.score(&mut pool).is_none());
    for tok in &pool {
        assert_eq!(tok.times_scored, 0);
    }

    // Next logical frame succeeds.
    let best = scorer.score(&mut pool).expect("healthy frame after failure");
    assert_eq!(best.id, 0);
}

#[test]
fn pool_identity_and_count_are_preserved() {
    let (source, _pulls) = ScriptedSource::new(vec![Ok(Some(frame(vec![0.1, 0.2, 0.3, 0.4])))]);
    let mut scorer = scorer_over(source);
    let mut pool = Token::pool(4);

    scorer.score(&mut pool).expect("frame available");
    assert_eq!(pool.len(), 4);
    for (i, tok) in pool.iter().enumerate() {
        assert_eq!(tok.id, i, "order and identity untouched");
    }
}

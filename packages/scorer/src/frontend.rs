//! The pull boundary between the signal-processing frontend and the
//! scorer.
//!
//! The scorer never computes features; it consumes [`DataItem`]s from
//! whatever implements [`FeatureSource`]. [`ChannelSource`] is the
//! shipped implementation for the common deployment where a capture or
//! processing thread produces frames and the decoder thread scores
//! them.

use crossbeam_channel::{Receiver, Sender};
use scorer_domain::{DataItem, ScoreError};

/// Blocking pull contract of the feature stream.
pub trait FeatureSource {
    /// Retrieve the next item, blocking until one is available.
    ///
    /// `Ok(None)` means the stream is exhausted without an explicit
    /// end signal. A [`ScoreError::Processing`] failure is local to
    /// one item; the source may well produce again on the next call.
    fn next_item(&mut self) -> Result<Option<DataItem>, ScoreError>;
}

/// Producer half of a [`ChannelSource`] pair.
///
/// Handed to the capture/processing thread; dropping it (or calling
/// [`FeatureFeed::finish`]) ends the stream on the consumer side.
#[derive(Debug, Clone)]
pub struct FeatureFeed {
    tx: Sender<DataItem>,
}

impl FeatureFeed {
    /// Push one item into the stream, blocking while the channel is
    /// full. Returns `false` if the consumer is gone.
    pub fn push(&self, item: impl Into<DataItem>) -> bool {
        self.tx.send(item.into()).is_ok()
    }

    /// Drop the sender, letting the consumer observe exhaustion.
    pub fn finish(self) {}
}

/// Channel-backed [`FeatureSource`] fed by another thread.
///
/// The receive blocks, matching the scorer's synchronous pull model;
/// a disconnected producer surfaces as stream exhaustion, not as an
/// error.
#[derive(Debug)]
pub struct ChannelSource {
    rx: Receiver<DataItem>,
}

impl ChannelSource {
    /// Create a bounded feed/source pair with the given capacity.
    pub fn bounded(capacity: usize) -> (FeatureFeed, Self) {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        (FeatureFeed { tx }, Self { rx })
    }

    /// Create an unbounded feed/source pair.
    pub fn unbounded() -> (FeatureFeed, Self) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (FeatureFeed { tx }, Self { rx })
    }
}

impl FeatureSource for ChannelSource {
    fn next_item(&mut self) -> Result<Option<DataItem>, ScoreError> {
        Ok(self.rx.recv().ok())
    }
}

/* --------------------------------------------------------------------- */
/*  Unit-tests                                                           */

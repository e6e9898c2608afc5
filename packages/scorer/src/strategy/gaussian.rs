//! Diagonal-Gaussian acoustic state bank.
//!
//! Each acoustic state owns one diagonal-covariance Gaussian over the
//! feature space; a hypothesis locates its state through the
//! [`StateAligned`] capability and is scored with the state's
//! log-likelihood for the frame. Banks persist as CBOR files so a
//! trained model can be shipped to the decoder and loaded in
//! [`ScoringStrategy::open`].

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use ciborium::{de, ser};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use scorer_domain::{FeatureFrame, ScoreError, Scoreable};

use tracing::{info, warn};

use super::{ScoringStrategy, best_of};

const LOG_2PI: f32 = 1.837_877_1; // ln(2π)

/* --------------------------------------------------------------------- */
/*  Error type                                                           */

/// Returned by bank persistence operations.
#[derive(Debug, thiserror::Error)]
pub enum BankIoError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("cbor: {0}")]
    Cbor(String),
}

type IoResult<T> = Result<T, BankIoError>;

fn write_cbor<W: Write, T: Serialize + ?Sized>(w: W, val: &T) -> IoResult<()> {
    ser::into_writer(val, w).map_err(|e| BankIoError::Cbor(e.to_string()))
}
fn read_cbor<R: Read, T: DeserializeOwned>(r: R) -> IoResult<T> {
    de::from_reader(r).map_err(|e| BankIoError::Cbor(e.to_string()))
}

/* --------------------------------------------------------------------- */
/*  Model types                                                          */

/// One diagonal-covariance Gaussian over the feature space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagGaussian {
    mean: Vec<f32>,
    var: Vec<f32>,
    /// Cached `-0.5 · Σ (ln σ² + ln 2π)`; restored verbatim on load.
    log_norm: f32,
}

impl DiagGaussian {
    /// Build a Gaussian from mean and variance vectors.
    ///
    /// Variances are clamped from below by `var_floor` so a degenerate
    /// training dimension cannot blow the likelihood up to infinity.
    pub fn new(mean: Vec<f32>, mut var: Vec<f32>, var_floor: f32) -> Self {
        debug_assert_eq!(mean.len(), var.len(), "mean/var dimension mismatch");
        for v in &mut var {
            if *v < var_floor {
                *v = var_floor;
            }
        }
        let log_norm = -0.5 * var.iter().map(|v| v.ln() + LOG_2PI).sum::<f32>();
        Self {
            mean,
            var,
            log_norm,
        }
    }

    /// Feature-space dimension of this state.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.mean.len()
    }

    /// Log-likelihood of `values` under this Gaussian.
    pub fn log_likelihood(&self, values: &[f32]) -> f32 {
        debug_assert_eq!(
            values.len(),
            self.mean.len(),
            "frame dimension must match the model"
        );
        let mut mahal = 0.0f32;
        for ((&x, &m), &v) in values.iter().zip(&self.mean).zip(&self.var) {
            let d = x - m;
            mahal += d * d / v;
        }
        self.log_norm - 0.5 * mahal
    }
}

/// An ordered collection of Gaussian states, indexed by
/// [`StateAligned::state_index`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaussianBank {
    states: Vec<DiagGaussian>,
}

impl GaussianBank {
    /// Build a bank from its states.
    pub fn new(states: Vec<DiagGaussian>) -> Self {
        Self { states }
    }

    /// Number of states in the bank.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the bank holds no states.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// State at `index`, if the bank covers it.
    pub fn state(&self, index: usize) -> Option<&DiagGaussian> {
        self.states.get(index)
    }

    /// Atomically write CBOR to `path` via "`<file>.tmp` → rename" on
    /// the same filesystem.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> IoResult<()> {
        let path = path.as_ref();
        let tmp = path.with_extension("tmp");

        {
            let f = File::create(&tmp)?;
            let mut bw = BufWriter::new(f);
            write_cbor(&mut bw, self)?;
            bw.flush()?;
        }
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Load a CBOR bank produced by [`GaussianBank::save_to_file`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let f = File::open(path)?;
        read_cbor(BufReader::new(f))
    }

    /// Load from an in-memory CBOR buffer.
    pub fn load_from_buffer(buf: &[u8]) -> IoResult<Self> {
        read_cbor(BufReader::new(buf))
    }

    /// Serialize into an in-memory CBOR buffer.
    pub fn save_to_buffer(&self) -> IoResult<Vec<u8>> {
        let mut buf = Vec::new();
        write_cbor(&mut buf, self)?;
        Ok(buf)
    }
}

/* --------------------------------------------------------------------- */
/*  Strategy                                                             */

/// Extra capability a hypothesis needs to be scored against a bank:
/// which acoustic state it currently sits in.
pub trait StateAligned: Scoreable {
    /// Index of this hypothesis's state within the bank.
    fn state_index(&self) -> usize;
}

/// [`ScoringStrategy`] backed by a [`GaussianBank`].
///
/// Built with an in-memory bank or a model path; with a path, the bank
/// is loaded lazily in [`ScoringStrategy::open`] and released again in
/// [`ScoringStrategy::close`]. A hypothesis pointing outside the bank
/// scores as impossible (`-∞`) rather than failing the whole frame.
#[derive(Debug)]
pub struct GaussianStrategy {
    bank: Option<GaussianBank>,
    model_path: Option<PathBuf>,
    loaded_from_file: bool,
}

/// Configuration for a [`GaussianStrategy`]. Used to create a
/// [`GaussianStrategyBuilder`] that performs validation on build.
#[derive(Debug, typed_builder::TypedBuilder)]
#[builder(
    builder_method(vis = ""),
    builder_type(name = GaussianStrategyBuilder, vis = "pub"),
    build_method(into = Result<GaussianStrategy, ScoreError>, vis = "pub"))
]
struct GaussianStrategyConfig {
    /// Bank supplied up-front; stays resident across `close()`.
    #[builder(default, setter(strip_option))]
    bank: Option<GaussianBank>,
    /// Path to a CBOR bank to load in `open()`.
    #[builder(default, setter(strip_option, into))]
    model_path: Option<PathBuf>,
}

impl From<GaussianStrategyConfig> for Result<GaussianStrategy, ScoreError> {
    fn from(value: GaussianStrategyConfig) -> Self {
        if value.bank.is_none() && value.model_path.is_none() {
            return Err(ScoreError::ModelLoad(
                "gaussian strategy needs a bank or a model path".into(),
            ));
        }
        Ok(GaussianStrategy {
            bank: value.bank,
            model_path: value.model_path,
            loaded_from_file: false,
        })
    }
}

impl GaussianStrategy {
    /// Create a new [`GaussianStrategyBuilder`].
    pub fn builder() -> GaussianStrategyBuilder {
        GaussianStrategyConfig::builder()
    }

    /// Wrap an in-memory bank directly.
    pub fn from_bank(bank: GaussianBank) -> Self {
        Self {
            bank: Some(bank),
            model_path: None,
            loaded_from_file: false,
        }
    }
}

impl<H: StateAligned> ScoringStrategy<H> for GaussianStrategy {
    fn score_all<'a>(&mut self, hypotheses: &'a mut [H], frame: &FeatureFrame) -> &'a H {
        match &self.bank {
            Some(bank) => {
                for hyp in hypotheses.iter_mut() {
                    let score = match bank.state(hyp.state_index()) {
                        Some(state) => state.log_likelihood(&frame.values),
                        None => f32::NEG_INFINITY,
                    };
                    hyp.apply_score(score);
                }
            }
            None => {
                // open() was skipped; nothing to score against.
                warn!("gaussian bank not loaded, scoring frame as impossible");
                for hyp in hypotheses.iter_mut() {
                    hyp.apply_score(f32::NEG_INFINITY);
                }
            }
        }
        best_of(hypotheses)
    }

    fn open(&mut self) -> Result<(), ScoreError> {
        if self.bank.is_some() {
            return Ok(());
        }
        match &self.model_path {
            Some(path) => {
                let bank = GaussianBank::load_from_file(path)
                    .map_err(|e| ScoreError::ModelLoad(format!("{}: {e}", path.display())))?;
                info!(states = bank.len(), path = %path.display(), "gaussian bank loaded");
                self.bank = Some(bank);
                self.loaded_from_file = true;
                Ok(())
            }
            None => Err(ScoreError::ModelLoad(
                "gaussian strategy needs a bank or a model path".into(),
            )),
        }
    }

    fn close(&mut self) {
        if self.loaded_from_file {
            self.bank = None;
            self.loaded_from_file = false;
        }
    }
}

/* --------------------------------------------------------------------- */
/*  Unit-tests                                                           */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn likelihood_peaks_at_the_mean() {
        let g = DiagGaussian::new(vec![1.0, -2.0], vec![0.5, 0.5], 1e-4);
        let at_mean = g.log_likelihood(&[1.0, -2.0]);
        let off_mean = g.log_likelihood(&[2.0, -2.0]);
        assert!(at_mean > off_mean);
    }

    #[test]
    fn variance_floor_clamps_degenerate_dimensions() {
        let g = DiagGaussian::new(vec![0.0], vec![0.0], 1e-2);
        // A floored variance keeps the likelihood finite.
        assert!(g.log_likelihood(&[10.0]).is_finite());
    }

    #[test]
    fn bank_round_trips_through_cbor() {
        let bank = GaussianBank::new(vec![
            DiagGaussian::new(vec![0.0, 1.0], vec![1.0, 2.0], 1e-4),
            DiagGaussian::new(vec![-1.0, 3.0], vec![0.25, 0.75], 1e-4),
        ]);
        let buf = bank.save_to_buffer().unwrap();
        let loaded = GaussianBank::load_from_buffer(&buf).unwrap();
        assert_eq!(bank, loaded);
    }

    #[test]
    fn builder_rejects_an_unconfigured_strategy() {
        let built: Result<GaussianStrategy, ScoreError> = GaussianStrategy::builder().build();
        assert!(matches!(built, Err(ScoreError::ModelLoad(_))));
    }
}

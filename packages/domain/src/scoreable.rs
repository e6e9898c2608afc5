//! The capability a search hypothesis must expose to be scored.
use core::cmp::Ordering;

/// Minimal scoring capability of a search hypothesis (token).
///
/// The scorer reads and writes nothing but the score field through this
/// trait; hypothesis identity and search state stay opaque and owned by
/// the decoder's search component. Higher scores are better.
pub trait Scoreable {
    /// Current score of this hypothesis.
    fn score(&self) -> f32;

    /// Overwrite the score with the result of the latest frame.
    fn apply_score(&mut self, score: f32);

    /// Total ordering by score.
    ///
    /// The default goes through [`f32::total_cmp`] so the ordering is
    /// total even in the presence of NaN scores, which keeps arg-max
    /// selection deterministic.
    fn cmp_score(&self, other: &Self) -> Ordering
    where
        Self: Sized,
    {
        self.score().total_cmp(&other.score())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tok(f32);

    impl Scoreable for Tok {
        fn score(&self) -> f32 {
            self.0
        }
        fn apply_score(&mut self, score: f32) {
            self.0 = score;
        }
    }

    #[test]
    fn ordering_is_total_with_nan() {
        let a = Tok(f32::NAN);
        let b = Tok(1.0);
        // total_cmp puts NaN above every finite value; what matters is
        // that the comparison never panics and is asymmetric.
        assert_ne!(a.cmp_score(&b), Ordering::Equal);
        assert_eq!(a.cmp_score(&b), b.cmp_score(&a).reverse());
    }

    #[test]
    fn apply_score_overwrites() {
        let mut t = Tok(0.0);
        t.apply_score(-3.5);
        assert_eq!(t.score(), -3.5);
    }
}

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The single seedable random source the rest of the workspace draws from:
/// `decollide_grid`'s resampling, the MDP planner's shuffles and tie-breaks.
/// Wrapping a named type (rather than passing `impl Rng` around) keeps the
/// consumption order documented in one place, per spec.md's RNG design note.
#[derive(Debug, Clone)]
pub struct Prng(ChaCha8Rng);

impl Prng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Draw a uniform sample in `[0.0, 1.0)`, the fair-coin / tie-break
    /// primitive every policy's randomised decision is built from.
    pub fn uniform(&mut self) -> f64 {
        self.0.gen_range(0.0..1.0)
    }

    /// Fisher-Yates shuffle in place, used for the MDP planner's per-tick
    /// robot visit order and candidate-move ordering.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.0.gen_range(0..=i);
            items.swap(i, j);
        }
    }
}

impl RngCore for Prng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}

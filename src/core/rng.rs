//! Deterministic random number generation for the filler seat.
//!
//! The same seed produces the same filler moves, so a session driven by
//! the same host actions replays identically. Each filler turn draws from
//! its own stream keyed by the history position, which keeps a replayed
//! session in step with the one it was recorded from.
//!
//! ```
//! use chain_reaction::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! let cells = [3, 8, 13, 21];
//! assert_eq!(a.choose(&cells), b.choose(&cells));
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive an independent RNG for the action at `sequence` in the
    /// history. Depends only on the seed and `sequence`, never on how much
    /// of this RNG has been consumed.
    #[must_use]
    pub fn for_turn(&self, sequence: u64) -> Self {
        let turn_seed = self
            .seed
            .wrapping_add(sequence.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(turn_seed)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}

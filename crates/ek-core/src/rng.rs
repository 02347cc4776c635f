//! Deterministic encounter-level RNG wrapper.
//!
//! # Determinism strategy
//!
//! Every stochastic decision an encounter makes — reschedule jitter, summon
//! variant picks, flavor-line rolls, target selection — flows through an
//! `EncounterRng` seeded from the run seed, so re-running with the same seed
//! replays the identical encounter.
//!
//! Child RNGs are derived with a golden-ratio offset mix:
//!
//!   child_seed = next_u64() XOR (offset * MIXING_CONSTANT)
//!
//! which lets collaborators (e.g. an arena doing its own target picks) hold
//! independent streams without sharing state or an ordering dependency with
//! the parent.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::Millis;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded deterministic RNG for one encounter session.
///
/// The type is `!Sync` to prevent accidental sharing across threads — a
/// session is single-threaded by design, and batch drivers give every
/// session its own `EncounterRng`.
pub struct EncounterRng(SmallRng);

impl EncounterRng {
    /// Seed deterministically from the run seed.
    pub fn new(seed: u64) -> Self {
        EncounterRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child RNG with a different seed offset — useful for giving
    /// collaborators their own independent streams.
    pub fn child(&mut self, offset: u64) -> EncounterRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        EncounterRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types
    /// (`rng.inner().sample(...)`, `rng.inner().gen_range(...)`, etc.)
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform duration in `lo..=hi` — the shape every timer jitter takes.
    #[inline]
    pub fn millis_between(&mut self, lo: Millis, hi: Millis) -> Millis {
        Millis(self.0.gen_range(lo.0..=hi.0))
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}

//! Encounter time model.
//!
//! # Design
//!
//! Time is a monotonically increasing count of simulated milliseconds since
//! the encounter engaged.  The host game loop owns real time; each frame it
//! reports the span the frame covered as a `Millis` delta, and the kit sums
//! deltas.  Using an integer millisecond as the canonical unit means all
//! schedule arithmetic is exact (no floating-point drift) and comparisons
//! are O(1).
//!
//! There is no wall-clock mapping: encounters are relative timelines, and
//! the host decides how fast simulated time runs.

use std::fmt;

// ── Millis ────────────────────────────────────────────────────────────────────

/// A span of simulated time, or an instant measured from encounter start,
/// in whole milliseconds.
///
/// Stored as `u64`: at millisecond resolution a u64 lasts ~584 million
/// years, far longer than any conceivable encounter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    /// Convenience constructor for second-granularity values.
    #[inline]
    pub const fn from_secs(secs: u64) -> Millis {
        Millis(secs * 1_000)
    }

    /// Milliseconds from `self` until `later`, saturating at zero when
    /// `later` is already past.
    #[inline]
    pub fn until(self, later: Millis) -> Millis {
        Millis(later.0.saturating_sub(self.0))
    }

    /// Whole seconds, truncating.
    #[inline]
    pub fn as_secs(self) -> u64 {
        self.0 / 1_000
    }
}

impl std::ops::Add for Millis {
    type Output = Millis;
    #[inline]
    fn add(self, rhs: Millis) -> Millis {
        Millis(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Millis {
    #[inline]
    fn add_assign(&mut self, rhs: Millis) {
        self.0 += rhs.0;
    }
}

impl std::ops::Mul<u64> for Millis {
    type Output = Millis;
    #[inline]
    fn mul(self, rhs: u64) -> Millis {
        Millis(self.0 * rhs)
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

// ── EncounterClock ────────────────────────────────────────────────────────────

/// Elapsed simulated time since the encounter engaged.
///
/// `EncounterClock` is cheap to copy and intentionally holds no heap data.
/// It only moves forward; resetting an encounter builds a fresh clock.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterClock {
    /// Time since engage.  Zero on construction.
    pub elapsed: Millis,
}

impl EncounterClock {
    pub fn new() -> Self {
        Self {
            elapsed: Millis::ZERO,
        }
    }

    /// Advance the clock by one frame's delta.
    #[inline]
    pub fn advance(&mut self, diff: Millis) {
        self.elapsed += diff;
    }

    /// Break elapsed time into (minutes, seconds, millis) components.
    /// Useful for human-readable logging without a datetime library.
    pub fn elapsed_msm(&self) -> (u64, u32, u32) {
        let total_ms = self.elapsed.0;
        let minutes = total_ms / 60_000;
        let seconds = ((total_ms % 60_000) / 1_000) as u32;
        let millis = (total_ms % 1_000) as u32;
        (minutes, seconds, millis)
    }
}

impl fmt::Display for EncounterClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (m, s, ms) = self.elapsed_msm();
        write!(f, "{m:02}:{s:02}.{ms:03}")
    }
}

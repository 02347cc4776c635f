//! The encounter phase state machine.

use std::fmt;

/// Where one encounter attempt stands.
///
/// Legal transitions:
///
/// ```text
///   Idle ──engage──▶ Engaged ──health check──▶ Enraged
///     ▲                  │                        │
///     └──────reset───────┴───────┐   ┌────────────┘
///                                ▼   ▼
///                              Defeated  (on_death)
/// ```
///
/// `Enraged` is a one-shot latch: it is reached only from `Engaged` and left
/// only through death or a full reset. `Defeated` is terminal for the
/// attempt — ticking a defeated session is a driver bug.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    /// Out of combat, no actions pending.
    Idle,
    /// In combat, full rotation running.
    Engaged,
    /// Low-health latch: the summon cycle is permanently off.
    Enraged,
    /// The scripted unit died; the session is inert.
    Defeated,
}

impl Phase {
    /// `true` while the unit is fighting (`Engaged` or `Enraged`).
    #[inline]
    pub fn is_live(self) -> bool {
        matches!(self, Phase::Engaged | Phase::Enraged)
    }

    /// Lowercase name for transcripts and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Engaged => "engaged",
            Phase::Enraged => "enraged",
            Phase::Defeated => "defeated",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

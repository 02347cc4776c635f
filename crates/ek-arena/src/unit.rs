//! Unit state: sides, positions, vitals, swing and cast timers.

use ek_core::{Millis, SpellId, UnitId};

use crate::spell::School;

/// Melee reach in world units.
pub const MELEE_RANGE: f32 = 5.0;

/// Which army a unit fights for.  Hostility is simply "the other side".
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Side {
    /// The scripted boss and anything it brings into the world.
    Defenders,
    /// The raid.
    Raiders,
}

impl Side {
    /// The opposing side.
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Defenders => Side::Raiders,
            Side::Raiders => Side::Defenders,
        }
    }
}

/// A planar position in arena-local world units.
///
/// Encounters happen in one room; a flat 2-D plane with Euclidean distance
/// is all the fidelity targeting needs.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Pos2 {
    pub x: f32,
    pub y: f32,
}

impl Pos2 {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Pos2) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// `true` when `other` lies within `range` (inclusive).  Compares
    /// squared distances — no square root on the hot path.
    #[inline]
    pub fn within(self, other: Pos2, range: f32) -> bool {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy <= range * range
    }
}

/// A cast in progress: which spell, and how long until the caster is free.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CastState {
    pub spell: SpellId,
    pub remaining: Millis,
}

/// One combatant's full state.
///
/// Stored in a plain `Vec<Unit>` indexed by `UnitId`.  Encounter rosters are
/// tens of units, so a simple array-of-structs layout keeps the code direct
/// with no measurable cost.
#[derive(Clone, Debug)]
pub struct Unit {
    pub pos: Pos2,
    pub side: Side,
    /// `true` for units whose actions are owned by a script (the boss).
    /// Scripted units never auto-swing; everything else does.
    pub scripted: bool,

    // ── Vitals ────────────────────────────────────────────────────────────
    pub health: u64,
    pub max_health: u64,
    pub power: u32,
    pub max_power: u32,
    /// Power regenerated per second of simulated time.
    pub power_regen_per_sec: u32,
    /// Sub-point regen accumulator in power·milliseconds; whole points move
    /// to `power` each update, keeping regen integer-exact at any tick rate.
    pub regen_carry_ms: u64,

    // ── Combat state ──────────────────────────────────────────────────────
    /// Current attack victim, if fighting.
    pub victim: Option<UnitId>,
    /// Flat damage per melee swing, before `damage_multiplier`.
    pub melee_damage: u64,
    /// Outgoing melee damage multiplier; raised by enhancement effects.
    pub damage_multiplier: f32,
    /// Full swing period.
    pub swing_period: Millis,
    /// Time left until the next swing is allowed.
    pub swing_ready_in: Millis,
    /// Cast occupying this unit, if any.  Casting does not block melee.
    pub casting: Option<CastState>,
    /// Schools this unit takes no damage from.
    pub immune_schools: Vec<School>,
    /// Cleared on death or despawn; dead units drop out of every scan.
    pub alive: bool,
}

impl Unit {
    /// `true` if this unit takes no damage from `school`.
    #[inline]
    pub fn is_immune(&self, school: School) -> bool {
        self.immune_schools.contains(&school)
    }
}

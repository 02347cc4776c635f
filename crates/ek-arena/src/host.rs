//! The combat-host boundary: everything a script may ask of its engine.

use ek_core::{LineId, SpellId, UnitId};

use crate::spell::School;

/// How [`CombatHost::select_target`] ranks candidates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TargetMethod {
    /// Walk the unit's threat table from the top, skip the `skip` highest
    /// entries, take the next.  An empty or too-short table yields nothing.
    MaxThreat { skip: usize },
    /// Uniform pick among all eligible hostiles, threat ignored.
    Random,
}

/// Engine surface available to encounter scripts.
///
/// Scripts never hold unit references — every query goes through an id and
/// the host answers from its authoritative state.  Calls with stale or
/// unknown ids are silent no-ops; nothing here returns an error.
///
/// The reference implementation is [`Arena`](crate::Arena); a real game
/// loop implements the same trait over its own world.
pub trait CombatHost {
    // ── Combat flow ───────────────────────────────────────────────────────

    /// Refresh and return the unit's current victim: the highest-threat
    /// live hostile, falling back to any live hostile.  `None` means there
    /// is nothing left to fight.
    fn update_victim(&mut self, unit: UnitId) -> Option<UnitId>;

    /// Pick a target by `method` among live hostiles within `max_range` of
    /// `unit` (`None` disables the range cut).
    fn select_target(
        &mut self,
        unit: UnitId,
        method: TargetMethod,
        max_range: Option<f32>,
    ) -> Option<UnitId>;

    /// Begin a cast.  Triggered casts are forced and instant regardless of
    /// cast time; normal casts occupy the caster for the spell's cast time
    /// and are refused while one is already in progress.
    fn cast(&mut self, caster: UnitId, target: UnitId, spell: SpellId, triggered: bool);

    /// Swing at the current victim if the swing timer is up and the victim
    /// is in melee reach.  Safe to call every tick.
    fn melee_swing_if_ready(&mut self, unit: UnitId);

    /// Add `amount` threat toward `target` on `unit`'s table.
    fn add_threat(&mut self, unit: UnitId, target: UnitId, amount: f32);

    /// Order `unit` to attack `target`, entering combat with it.
    fn force_attack(&mut self, unit: UnitId, target: UnitId);

    /// Pull every live opposing unit into combat with `unit`, so the whole
    /// zone reacts at engage rather than waiting to be hit.
    fn set_zone_combat(&mut self, unit: UnitId);

    // ── Resources ─────────────────────────────────────────────────────────

    /// Current health as a fraction of maximum, in [0, 1].  Zero for dead
    /// or unknown units.
    fn health_fraction(&self, unit: UnitId) -> f32;

    /// Current power as a fraction of maximum, in [0, 1].  Zero for units
    /// without a power pool.
    fn power_fraction(&self, unit: UnitId) -> f32;

    /// Maximum power pool.
    fn max_power(&self, unit: UnitId) -> u32;

    /// Add (positive) or drain (negative) power, clamped to [0, max].
    fn modify_power(&mut self, unit: UnitId, delta: i64);

    // ── Activity state ────────────────────────────────────────────────────

    /// `true` while the unit is occupied by a cast in progress.
    fn is_busy(&self, unit: UnitId) -> bool;

    /// Abort the cast in progress, if any.
    fn interrupt_cast(&mut self, unit: UnitId);

    // ── Presentation ──────────────────────────────────────────────────────

    /// Emit a speech line.  Fire-and-forget; display is host business.
    fn announce(&mut self, unit: UnitId, line: LineId);

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Remove a unit from the world without a death event.
    fn despawn(&mut self, unit: UnitId);

    /// Toggle full damage immunity to one spell school.
    fn set_school_immunity(&mut self, unit: UnitId, school: School, on: bool);
}

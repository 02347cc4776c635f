//! Script configuration: every timing, threshold, probability, and opaque id
//! the controller uses.
//!
//! Defaults reproduce the reference encounter (an arcane custodian construct);
//! applications override fields and remap the spell/line ids onto their own
//! registries. The controller never interprets an id — it only hands them
//! back to the host.

use ek_arena::School;
use ek_core::{LineId, Millis, SpellId};

use crate::{ScriptError, ScriptResult};

// ── Speech lines ──────────────────────────────────────────────────────────────

/// The six speech lines the script can emit. Line ids are opaque; mapping
/// them to display text is the application's job.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptLines {
    /// On entering combat.
    pub aggro: LineId,
    /// Flavor line rolled on a successful summon.
    pub summon: LineId,
    /// On starting the low-power recovery channel.
    pub recharge: LineId,
    /// On enraging — shared by the health latch and the berserk deadline.
    pub enrage: LineId,
    /// On killing a hostile, throttled by the kill cooldown.
    pub kill: LineId,
    /// On dying.
    pub death: LineId,
}

impl Default for ScriptLines {
    fn default() -> Self {
        Self {
            aggro: LineId(0),
            summon: LineId(1),
            recharge: LineId(2),
            enrage: LineId(3),
            kill: LineId(4),
            death: LineId(5),
        }
    }
}

// ── ScriptConfig ──────────────────────────────────────────────────────────────

/// Full controller configuration for one scripted unit.
///
/// Typically built as `ScriptConfig { ..Default::default() }` with the id
/// fields remapped. Validate with [`validate`](ScriptConfig::validate) —
/// [`EncounterSession::new`](crate::EncounterSession::new) does so for you.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptConfig {
    // ── First-schedule delays at engage ───────────────────────────────────
    /// Delay before the first bolt. Default: 10 000 ms.
    pub first_bolt_delay: Millis,

    /// Delay before the first summon. Default: 6 000 ms.
    pub first_summon_delay: Millis,

    /// The hard-enrage deadline. Default: 600 000 ms (ten minutes).
    pub berserk_delay: Millis,

    /// Low-health poll interval. Default: 1 000 ms.
    pub health_check_interval: Millis,

    // ── Enrage ────────────────────────────────────────────────────────────
    /// Health fraction at or below which the health check latches the
    /// session into `Enraged`. Default: 0.16.
    pub enrage_health_fraction: f32,

    // ── Bolt ──────────────────────────────────────────────────────────────
    /// Reschedule jitter bounds for the bolt, inclusive.
    /// Default: 5 000..=7 500 ms.
    pub bolt_interval_min: Millis,
    pub bolt_interval_max: Millis,

    /// Interval multiplier applied once the berserk deadline has fired.
    /// Default: 2.
    pub post_berserk_bolt_multiplier: u64,

    /// How many top-threat entries the bolt skips, rolled uniformly in
    /// `bolt_skip_min..=bolt_skip_max`. Default: 1..=2 — the bolt lands on
    /// the second or third raider on the table, never the current victim.
    pub bolt_skip_min: usize,
    pub bolt_skip_max: usize,

    /// Maximum bolt range in world units. Default: 40.0.
    pub bolt_range: f32,

    // ── Summon cycle ──────────────────────────────────────────────────────
    /// Normal summon reschedule interval. Default: 10 000 ms.
    pub summon_interval: Millis,

    /// Power cost of one summon, as a percentage of maximum power.
    /// Default: 10.
    pub summon_cost_pct: u32,

    /// Power fraction strictly below which the recovery stall kicks in.
    /// Default: 0.10. At exactly this fraction the cycle continues.
    pub low_power_fraction: f32,

    /// Recovery stall length: every pending action is pushed back by this
    /// much and the next summon fires after it. Default: 20 000 ms.
    pub recovery_delay: Millis,

    /// Chance of the flavor line on a successful summon. Default: 0.5.
    pub flavor_chance: f64,

    /// The summon variant spells; one is chosen uniformly per summon.
    /// Must be non-empty. Default: four variants.
    pub summon_spells: Vec<SpellId>,

    /// Radius a fresh summon searches for its first target. Default: 40.0.
    pub summon_leash_radius: f32,

    /// Threat handed to a fresh summon's first target so it sticks.
    /// Default: 1 000.0.
    pub summon_threat_bonus: f32,

    // ── Kill announcement ─────────────────────────────────────────────────
    /// Mute window after a kill line. Default: 5 000 ms.
    pub kill_line_cooldown: Millis,

    // ── Opaque ids ────────────────────────────────────────────────────────
    /// Single-target bolt spell. Default: `SpellId(1)`.
    pub bolt_spell: SpellId,

    /// Self-buff cast on the health-latch enrage. Default: `SpellId(2)`.
    pub empower_spell: SpellId,

    /// Self-buff cast on the berserk deadline. Default: `SpellId(3)`.
    pub heavy_spell: SpellId,

    /// Recovery channel cast on the low-power stall. Default: `SpellId(4)`.
    pub recovery_spell: SpellId,

    /// Speech line ids. Default: `LineId(0)..=LineId(5)` in declaration
    /// order.
    pub lines: ScriptLines,

    /// Schools the unit is made immune to on every reset. Default: arcane.
    pub immune_schools: Vec<School>,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            first_bolt_delay: Millis(10_000),
            first_summon_delay: Millis(6_000),
            berserk_delay: Millis(600_000),
            health_check_interval: Millis(1_000),
            enrage_health_fraction: 0.16,
            bolt_interval_min: Millis(5_000),
            bolt_interval_max: Millis(7_500),
            post_berserk_bolt_multiplier: 2,
            bolt_skip_min: 1,
            bolt_skip_max: 2,
            bolt_range: 40.0,
            summon_interval: Millis(10_000),
            summon_cost_pct: 10,
            low_power_fraction: 0.10,
            recovery_delay: Millis(20_000),
            flavor_chance: 0.5,
            summon_spells: vec![SpellId(5), SpellId(6), SpellId(7), SpellId(8)],
            summon_leash_radius: 40.0,
            summon_threat_bonus: 1_000.0,
            kill_line_cooldown: Millis(5_000),
            bolt_spell: SpellId(1),
            empower_spell: SpellId(2),
            heavy_spell: SpellId(3),
            recovery_spell: SpellId(4),
            lines: ScriptLines::default(),
            immune_schools: vec![School::Arcane],
        }
    }
}

impl ScriptConfig {
    /// Check the configuration for internally inconsistent values.
    ///
    /// Runtime oddities (a missing target, a dead unit) are silent no-ops by
    /// contract; a bad configuration is a caller error and surfaces here.
    pub fn validate(&self) -> ScriptResult<()> {
        fn fail(msg: impl Into<String>) -> ScriptResult<()> {
            Err(ScriptError::Config(msg.into()))
        }

        if !(0.0..=1.0).contains(&self.enrage_health_fraction) {
            return fail(format!(
                "enrage_health_fraction must be within [0, 1], got {}",
                self.enrage_health_fraction
            ));
        }
        if !(0.0..=1.0).contains(&self.low_power_fraction) {
            return fail(format!(
                "low_power_fraction must be within [0, 1], got {}",
                self.low_power_fraction
            ));
        }
        if !(0.0..=1.0).contains(&self.flavor_chance) {
            return fail(format!(
                "flavor_chance must be within [0, 1], got {}",
                self.flavor_chance
            ));
        }
        if self.bolt_interval_min == Millis::ZERO {
            return fail("bolt_interval_min must be non-zero");
        }
        if self.bolt_interval_min > self.bolt_interval_max {
            return fail(format!(
                "bolt interval bounds inverted: {} > {}",
                self.bolt_interval_min, self.bolt_interval_max
            ));
        }
        if self.bolt_skip_min > self.bolt_skip_max {
            return fail(format!(
                "bolt skip bounds inverted: {} > {}",
                self.bolt_skip_min, self.bolt_skip_max
            ));
        }
        if self.post_berserk_bolt_multiplier == 0 {
            return fail("post_berserk_bolt_multiplier must be at least 1");
        }
        if self.health_check_interval == Millis::ZERO {
            return fail("health_check_interval must be non-zero");
        }
        if self.summon_interval == Millis::ZERO {
            return fail("summon_interval must be non-zero");
        }
        if self.recovery_delay == Millis::ZERO {
            return fail("recovery_delay must be non-zero");
        }
        if self.kill_line_cooldown == Millis::ZERO {
            return fail("kill_line_cooldown must be non-zero");
        }
        if self.summon_cost_pct > 100 {
            return fail(format!(
                "summon_cost_pct must be at most 100, got {}",
                self.summon_cost_pct
            ));
        }
        if self.summon_spells.is_empty() {
            return fail("summon_spells must list at least one variant");
        }
        Ok(())
    }

    /// Every spell id the script can cast, for host-side validation.
    pub fn spell_manifest(&self) -> Vec<SpellId> {
        let mut spells = vec![
            self.bolt_spell,
            self.empower_spell,
            self.heavy_spell,
            self.recovery_spell,
        ];
        spells.extend_from_slice(&self.summon_spells);
        spells
    }
}

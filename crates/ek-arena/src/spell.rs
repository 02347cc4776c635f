//! Spell definitions: schools, effects, and the registry entry type.
//!
//! Scripts fire spells by opaque [`SpellId`]; the arena resolves the id in
//! its registry and applies the listed effect.  Effects land up front —
//! cast time only determines how long a normal cast occupies the caster.
//!
//! [`SpellId`]: ek_core::SpellId

use ek_core::Millis;

/// Magic school a spell belongs to.  Units can be made wholly immune to a
/// school's damage (`CombatHost::set_school_immunity`).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum School {
    Physical,
    Arcane,
    Fire,
    Frost,
    Nature,
    Shadow,
    Holy,
}

/// What landing a spell does.
///
/// Deliberately tiny: flat numbers, no scaling, no resistances beyond whole
/// school immunity.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug)]
pub enum SpellEffect {
    /// Flat damage to the target.
    Damage { amount: u64 },
    /// Flat damage to every unit hostile to the caster.
    AoeDamage { amount: u64 },
    /// Restore a percentage of the target's maximum power.
    RestorePowerPct { pct: u32 },
    /// Multiply the target's outgoing melee damage.
    EnhanceDamage { multiplier: f32 },
    /// Bring a new unit into the world at the caster's position.
    Summon { proto: SummonProto },
    /// Pure marker cast (visuals and auras the arena does not model).
    None,
}

/// Template for a summoned unit.  Summons fight on their summoner's side,
/// carry no power pool, and despawn outright instead of leaving a corpse.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug)]
pub struct SummonProto {
    pub max_health: u64,
    pub melee_damage: u64,
    pub swing_period: Millis,
}

/// One entry in the arena's spell registry.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug)]
pub struct SpellDef {
    pub school: School,
    /// Time a normal cast occupies the caster.  Zero means instant.
    /// Triggered casts ignore this entirely.
    pub cast_time: Millis,
    pub effect: SpellEffect,
}

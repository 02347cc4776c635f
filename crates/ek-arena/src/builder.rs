//! Builder for assembling an [`Arena`] with validation.

use ek_core::{EncounterRng, Millis, SpellId, UnitId};
use rustc_hash::FxHashMap;

use crate::error::{ArenaError, ArenaResult};
use crate::spell::SpellDef;
use crate::unit::{Pos2, Side, Unit};
use crate::Arena;

/// Everything needed to place one unit in the arena.
///
/// The `Default` is a plain raider: 100 health, no power pool, a 1.5 s
/// swing for 10 damage, standing at the origin.
#[derive(Clone, Debug)]
pub struct UnitSpec {
    pub pos: Pos2,
    pub side: Side,
    /// Scripted units never auto-act; a controller owns them.
    pub scripted: bool,
    pub max_health: u64,
    pub max_power: u32,
    pub power_regen_per_sec: u32,
    pub melee_damage: u64,
    pub swing_period: Millis,
}

impl Default for UnitSpec {
    fn default() -> Self {
        Self {
            pos: Pos2::default(),
            side: Side::Raiders,
            scripted: false,
            max_health: 100,
            max_power: 0,
            power_regen_per_sec: 0,
            melee_damage: 10,
            swing_period: Millis(1_500),
        }
    }
}

/// Accumulates units and spells, then validates into an [`Arena`].
///
/// # Example
///
/// ```rust,ignore
/// let mut builder = ArenaBuilder::new(seed);
/// let boss = builder.add_unit(UnitSpec { side: Side::Defenders, scripted: true, ..Default::default() });
/// builder.add_spell(SpellId(30383), bolt_def)?;
/// let arena = builder.build()?;
/// ```
pub struct ArenaBuilder {
    units: Vec<UnitSpec>,
    spells: FxHashMap<SpellId, SpellDef>,
    seed: u64,
}

impl ArenaBuilder {
    /// Start an empty arena whose internal RNG (random target picks) is
    /// seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            units: Vec::new(),
            spells: FxHashMap::default(),
            seed,
        }
    }

    /// Place a unit; the returned id is stable for the arena's lifetime.
    /// Ids are assigned in insertion order starting from zero.
    pub fn add_unit(&mut self, spec: UnitSpec) -> UnitId {
        let id = UnitId(self.units.len() as u32);
        self.units.push(spec);
        id
    }

    /// Register a spell under the caller's id.  Ids are opaque application
    /// configuration — the arena only requires them to be unique.
    pub fn add_spell(&mut self, id: SpellId, def: SpellDef) -> ArenaResult<()> {
        if self.spells.insert(id, def).is_some() {
            return Err(ArenaError::DuplicateSpell(id));
        }
        Ok(())
    }

    /// Validate every spec and assemble the arena.  Units start at full
    /// health and power with their swing available immediately.
    pub fn build(self) -> ArenaResult<Arena> {
        for (i, spec) in self.units.iter().enumerate() {
            let id = UnitId(i as u32);
            if spec.max_health == 0 {
                return Err(ArenaError::ZeroHealth(id));
            }
            if spec.swing_period == Millis::ZERO {
                return Err(ArenaError::ZeroSwingPeriod(id));
            }
        }

        let units = self
            .units
            .into_iter()
            .map(|spec| Unit {
                pos: spec.pos,
                side: spec.side,
                scripted: spec.scripted,
                health: spec.max_health,
                max_health: spec.max_health,
                power: spec.max_power,
                max_power: spec.max_power,
                power_regen_per_sec: spec.power_regen_per_sec,
                regen_carry_ms: 0,
                victim: None,
                melee_damage: spec.melee_damage,
                damage_multiplier: 1.0,
                swing_period: spec.swing_period,
                swing_ready_in: Millis::ZERO,
                casting: None,
                immune_schools: Vec::new(),
                alive: true,
            })
            .collect();

        Ok(Arena::from_parts(
            units,
            self.spells,
            EncounterRng::new(self.seed),
        ))
    }
}

//! `Arena` — the in-memory reference combat host.
//!
//! # Event feeds
//!
//! A real engine delivers spawn/kill/speech callbacks asynchronously; the
//! arena is synchronous, so it accumulates them in small buffers the driver
//! drains once per tick (`take_spawned`, `take_kills`, `take_announcements`,
//! `take_casts`).  Draining is destructive: each event is observed exactly
//! once.
//!
//! # Auto-acting
//!
//! Non-scripted units fight on their own: each `update` they acquire the
//! highest-threat live hostile (any live hostile as fallback) and swing when
//! their timer is up.  Scripted units only act when their script tells them
//! to — their melee is step 5 of the controller loop, not the arena's call.

use ek_core::{EncounterClock, EncounterRng, LineId, Millis, SpellId, UnitId};
use rustc_hash::FxHashMap;

use crate::host::{CombatHost, TargetMethod};
use crate::spell::{School, SpellDef, SpellEffect, SummonProto};
use crate::unit::{CastState, Side, Unit, MELEE_RANGE};

// ── Event records ─────────────────────────────────────────────────────────────

/// A speech line emitted through `announce`, stamped with arena time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Announcement {
    pub unit: UnitId,
    pub line: LineId,
    pub at: Millis,
}

/// One accepted `cast` call, for assertions and transcripts.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CastRecord {
    pub caster: UnitId,
    pub target: UnitId,
    pub spell: SpellId,
    pub triggered: bool,
    pub at: Millis,
}

/// A lethal blow: `killer` reduced `victim` to zero health.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KillEvent {
    pub killer: UnitId,
    pub victim: UnitId,
    pub at: Millis,
}

// ── Arena ─────────────────────────────────────────────────────────────────────

/// Single-threaded in-memory combat world.
///
/// Build through [`ArenaBuilder`](crate::ArenaBuilder); drive with
/// [`update`](Arena::update) once per tick before the script runs.
pub struct Arena {
    pub(crate) units: Vec<Unit>,
    pub(crate) spells: FxHashMap<SpellId, SpellDef>,
    /// threat[unit] = attacker → accumulated threat on `unit`'s table.
    threat: FxHashMap<UnitId, FxHashMap<UnitId, f32>>,
    rng: EncounterRng,
    clock: EncounterClock,

    announcements: Vec<Announcement>,
    casts: Vec<CastRecord>,
    spawned: Vec<UnitId>,
    kills: Vec<KillEvent>,
}

impl Arena {
    pub(crate) fn from_parts(
        units: Vec<Unit>,
        spells: FxHashMap<SpellId, SpellDef>,
        rng: EncounterRng,
    ) -> Self {
        Self {
            units,
            spells,
            threat: FxHashMap::default(),
            rng,
            clock: EncounterClock::new(),
            announcements: Vec::new(),
            casts: Vec::new(),
            spawned: Vec::new(),
            kills: Vec::new(),
        }
    }

    // ── Tick driver ───────────────────────────────────────────────────────

    /// Advance the world by one tick: count down swing and cast timers,
    /// apply power regen, then let non-scripted units fight.
    pub fn update(&mut self, diff: Millis) {
        self.clock.advance(diff);

        for unit in &mut self.units {
            if !unit.alive {
                continue;
            }
            unit.swing_ready_in = Millis(unit.swing_ready_in.0.saturating_sub(diff.0));

            if let Some(cast) = &mut unit.casting {
                cast.remaining = Millis(cast.remaining.0.saturating_sub(diff.0));
            }
            if unit.casting.is_some_and(|c| c.remaining == Millis::ZERO) {
                unit.casting = None;
            }

            if unit.power_regen_per_sec > 0 && unit.power < unit.max_power {
                unit.regen_carry_ms += unit.power_regen_per_sec as u64 * diff.0;
                let gained = unit.regen_carry_ms / 1_000;
                unit.regen_carry_ms %= 1_000;
                unit.power = (unit.power as u64 + gained).min(unit.max_power as u64) as u32;
            }
        }

        for i in 0..self.units.len() {
            let id = UnitId(i as u32);
            if !self.units[i].alive || self.units[i].scripted {
                continue;
            }
            if self.update_victim(id).is_some() {
                self.melee_swing_if_ready(id);
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Arena time elapsed across all `update` calls.
    #[inline]
    pub fn now(&self) -> Millis {
        self.clock.elapsed
    }

    #[inline]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// The unit's state, if the id is known.
    pub fn get(&self, unit: UnitId) -> Option<&Unit> {
        self.units.get(unit.index())
    }

    /// `true` for a known, living unit.
    #[inline]
    pub fn is_alive(&self, unit: UnitId) -> bool {
        self.units.get(unit.index()).is_some_and(|u| u.alive)
    }

    /// Number of living units on `side`.
    pub fn side_alive(&self, side: Side) -> usize {
        self.units.iter().filter(|u| u.alive && u.side == side).count()
    }

    /// `true` if the spell id resolves in the registry.
    pub fn has_spell(&self, spell: SpellId) -> bool {
        self.spells.contains_key(&spell)
    }

    /// Accumulated threat toward `attacker` on `unit`'s table.
    pub fn threat(&self, unit: UnitId, attacker: UnitId) -> f32 {
        self.threat
            .get(&unit)
            .and_then(|table| table.get(&attacker))
            .copied()
            .unwrap_or(0.0)
    }

    /// Force a unit's health to a fraction of maximum (scenario setup).
    /// A fraction of zero kills the unit.
    pub fn set_health_fraction(&mut self, unit: UnitId, fraction: f32) {
        let Some(u) = self.units.get_mut(unit.index()) else {
            return;
        };
        let target = (u.max_health as f64 * fraction.clamp(0.0, 1.0) as f64).round() as u64;
        u.health = target.min(u.max_health);
        if u.health == 0 {
            u.alive = false;
        }
    }

    // ── Event feeds ───────────────────────────────────────────────────────

    /// Drain speech lines emitted since the last call.
    pub fn take_announcements(&mut self) -> Vec<Announcement> {
        std::mem::take(&mut self.announcements)
    }

    /// Drain accepted casts since the last call.
    pub fn take_casts(&mut self) -> Vec<CastRecord> {
        std::mem::take(&mut self.casts)
    }

    /// Drain units spawned since the last call, in spawn order.
    pub fn take_spawned(&mut self) -> Vec<UnitId> {
        std::mem::take(&mut self.spawned)
    }

    /// Drain lethal blows since the last call, in the order they landed.
    pub fn take_kills(&mut self) -> Vec<KillEvent> {
        std::mem::take(&mut self.kills)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// First living hostile by ascending id — the deterministic fallback
    /// when a threat table has nothing left alive.
    fn first_live_hostile(&self, side: Side) -> Option<UnitId> {
        self.units
            .iter()
            .enumerate()
            .find(|(_, u)| u.alive && u.side != side)
            .map(|(i, _)| UnitId(i as u32))
    }

    /// Apply `amount` damage from `attacker` to `victim`.  Survivors accrue
    /// threat equal to the damage; a lethal blow queues a `KillEvent`.
    fn deal_damage(&mut self, attacker: UnitId, victim: UnitId, amount: u64) {
        let Some(v) = self.units.get_mut(victim.index()) else {
            return;
        };
        if !v.alive {
            return;
        }
        v.health = v.health.saturating_sub(amount);
        if v.health == 0 {
            v.alive = false;
            v.casting = None;
            v.victim = None;
            self.kills.push(KillEvent {
                killer: attacker,
                victim,
                at: self.clock.elapsed,
            });
        } else {
            *self
                .threat
                .entry(victim)
                .or_default()
                .entry(attacker)
                .or_insert(0.0) += amount as f32;
        }
    }

    /// Damage gated by school immunity.
    fn deal_spell_damage(&mut self, attacker: UnitId, victim: UnitId, school: School, amount: u64) {
        if self
            .units
            .get(victim.index())
            .is_some_and(|v| v.is_immune(school))
        {
            return;
        }
        self.deal_damage(attacker, victim, amount);
    }

    /// Materialize a summon next to its summoner and queue the spawn event.
    fn spawn(&mut self, summoner: UnitId, proto: SummonProto) {
        let Some(owner) = self.units.get(summoner.index()) else {
            return;
        };
        let (pos, side) = (owner.pos, owner.side);
        let id = UnitId(self.units.len() as u32);
        self.units.push(Unit {
            pos,
            side,
            scripted: false,
            health: proto.max_health,
            max_health: proto.max_health,
            power: 0,
            max_power: 0,
            power_regen_per_sec: 0,
            regen_carry_ms: 0,
            victim: None,
            melee_damage: proto.melee_damage,
            damage_multiplier: 1.0,
            swing_period: proto.swing_period,
            swing_ready_in: Millis::ZERO,
            casting: None,
            immune_schools: Vec::new(),
            alive: true,
        });
        self.spawned.push(id);
    }
}

// ── CombatHost implementation ─────────────────────────────────────────────────

impl CombatHost for Arena {
    fn update_victim(&mut self, unit: UnitId) -> Option<UnitId> {
        if !self.is_alive(unit) {
            return None;
        }
        let side = self.units[unit.index()].side;

        // Highest-threat live hostile; threat ties go to the lower id so
        // repeated runs pick the same unit.
        let by_threat = self.threat.get(&unit).and_then(|table| {
            table
                .iter()
                .filter(|(id, _)| {
                    self.units
                        .get(id.index())
                        .is_some_and(|u| u.alive && u.side != side)
                })
                .max_by(|a, b| a.1.total_cmp(b.1).then_with(|| b.0.cmp(a.0)))
                .map(|(id, _)| *id)
        });

        let next = by_threat.or_else(|| self.first_live_hostile(side));
        self.units[unit.index()].victim = next;
        next
    }

    fn select_target(
        &mut self,
        unit: UnitId,
        method: TargetMethod,
        max_range: Option<f32>,
    ) -> Option<UnitId> {
        let me = self.units.get(unit.index())?;
        if !me.alive {
            return None;
        }
        let (pos, side) = (me.pos, me.side);
        let eligible = |id: UnitId| {
            self.units.get(id.index()).is_some_and(|u| {
                u.alive && u.side != side && max_range.map_or(true, |r| pos.within(u.pos, r))
            })
        };

        match method {
            TargetMethod::MaxThreat { skip } => {
                let mut ranked: Vec<(UnitId, f32)> = self
                    .threat
                    .get(&unit)
                    .map(|table| {
                        table
                            .iter()
                            .filter(|(id, _)| eligible(**id))
                            .map(|(id, threat)| (*id, *threat))
                            .collect()
                    })
                    .unwrap_or_default();
                ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                ranked.get(skip).map(|(id, _)| *id)
            }
            TargetMethod::Random => {
                let pool: Vec<UnitId> = (0..self.units.len() as u32)
                    .map(UnitId)
                    .filter(|id| eligible(*id))
                    .collect();
                self.rng.choose(&pool).copied()
            }
        }
    }

    fn cast(&mut self, caster: UnitId, target: UnitId, spell: SpellId, triggered: bool) {
        let Some(def) = self.spells.get(&spell).copied() else {
            return;
        };
        if !self.is_alive(caster) {
            return;
        }
        if !triggered && self.units[caster.index()].casting.is_some() {
            return;
        }

        self.casts.push(CastRecord {
            caster,
            target,
            spell,
            triggered,
            at: self.clock.elapsed,
        });

        match def.effect {
            SpellEffect::Damage { amount } => {
                self.deal_spell_damage(caster, target, def.school, amount);
            }
            SpellEffect::AoeDamage { amount } => {
                let side = self.units[caster.index()].side;
                let victims: Vec<UnitId> = (0..self.units.len() as u32)
                    .map(UnitId)
                    .filter(|id| {
                        let u = &self.units[id.index()];
                        u.alive && u.side != side
                    })
                    .collect();
                for victim in victims {
                    self.deal_spell_damage(caster, victim, def.school, amount);
                }
            }
            SpellEffect::RestorePowerPct { pct } => {
                let max = self.max_power(target) as u64;
                self.modify_power(target, (max * pct as u64 / 100) as i64);
            }
            SpellEffect::EnhanceDamage { multiplier } => {
                if let Some(u) = self.units.get_mut(target.index()) {
                    u.damage_multiplier *= multiplier;
                }
            }
            SpellEffect::Summon { proto } => {
                self.spawn(caster, proto);
            }
            SpellEffect::None => {}
        }

        if !triggered && def.cast_time > Millis::ZERO {
            // The caster may have died to its own effect; guard the occupy.
            if let Some(u) = self.units.get_mut(caster.index()) {
                if u.alive {
                    u.casting = Some(CastState {
                        spell,
                        remaining: def.cast_time,
                    });
                }
            }
        }
    }

    fn melee_swing_if_ready(&mut self, unit: UnitId) {
        let Some(u) = self.units.get(unit.index()) else {
            return;
        };
        let Some(victim) = u.victim else {
            return;
        };
        if !u.alive || !self.is_alive(victim) {
            return;
        }
        let ready = u.swing_ready_in == Millis::ZERO;
        let in_range = u.pos.within(self.units[victim.index()].pos, MELEE_RANGE);
        if !ready || !in_range {
            return;
        }
        let damage = (u.melee_damage as f32 * u.damage_multiplier) as u64;
        let period = u.swing_period;
        self.units[unit.index()].swing_ready_in = period;
        self.deal_damage(unit, victim, damage);
    }

    fn add_threat(&mut self, unit: UnitId, target: UnitId, amount: f32) {
        if !self.is_alive(unit) || !self.is_alive(target) {
            return;
        }
        *self
            .threat
            .entry(unit)
            .or_default()
            .entry(target)
            .or_insert(0.0) += amount;
    }

    fn force_attack(&mut self, unit: UnitId, target: UnitId) {
        if !self.is_alive(unit) || !self.is_alive(target) {
            return;
        }
        self.units[unit.index()].victim = Some(target);
        self.threat
            .entry(unit)
            .or_default()
            .entry(target)
            .or_insert(0.0);
    }

    fn set_zone_combat(&mut self, unit: UnitId) {
        if !self.is_alive(unit) {
            return;
        }
        let side = self.units[unit.index()].side;
        let hostiles: Vec<UnitId> = (0..self.units.len() as u32)
            .map(UnitId)
            .filter(|id| {
                let u = &self.units[id.index()];
                u.alive && u.side != side
            })
            .collect();
        let table = self.threat.entry(unit).or_default();
        for hostile in hostiles {
            table.entry(hostile).or_insert(0.0);
        }
    }

    fn health_fraction(&self, unit: UnitId) -> f32 {
        let Some(u) = self.units.get(unit.index()) else {
            return 0.0;
        };
        if !u.alive || u.max_health == 0 {
            return 0.0;
        }
        u.health as f32 / u.max_health as f32
    }

    fn power_fraction(&self, unit: UnitId) -> f32 {
        let Some(u) = self.units.get(unit.index()) else {
            return 0.0;
        };
        if u.max_power == 0 {
            return 0.0;
        }
        u.power as f32 / u.max_power as f32
    }

    fn max_power(&self, unit: UnitId) -> u32 {
        self.units.get(unit.index()).map_or(0, |u| u.max_power)
    }

    fn modify_power(&mut self, unit: UnitId, delta: i64) {
        let Some(u) = self.units.get_mut(unit.index()) else {
            return;
        };
        let next = u.power as i64 + delta;
        u.power = next.clamp(0, u.max_power as i64) as u32;
    }

    fn is_busy(&self, unit: UnitId) -> bool {
        self.units
            .get(unit.index())
            .is_some_and(|u| u.casting.is_some())
    }

    fn interrupt_cast(&mut self, unit: UnitId) {
        if let Some(u) = self.units.get_mut(unit.index()) {
            u.casting = None;
        }
    }

    fn announce(&mut self, unit: UnitId, line: LineId) {
        self.announcements.push(Announcement {
            unit,
            line,
            at: self.clock.elapsed,
        });
    }

    fn despawn(&mut self, unit: UnitId) {
        if let Some(u) = self.units.get_mut(unit.index()) {
            u.alive = false;
            u.casting = None;
            u.victim = None;
        }
    }

    fn set_school_immunity(&mut self, unit: UnitId, school: School, on: bool) {
        let Some(u) = self.units.get_mut(unit.index()) else {
            return;
        };
        if on {
            if !u.immune_schools.contains(&school) {
                u.immune_schools.push(school);
            }
        } else {
            u.immune_schools.retain(|s| *s != school);
        }
    }
}

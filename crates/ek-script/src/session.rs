//! `EncounterSession` — the state of one encounter attempt.

use ek_arena::{CombatHost, TargetMethod};
use ek_core::{EncounterRng, Millis, SpellId, UnitId};
use ek_events::EventQueue;

use crate::{handlers, BossAction, BossScript, Phase, ScriptConfig, ScriptResult, SummonRoster};

/// One scripted unit's controller state for a single encounter attempt.
///
/// The session is deliberately small: a phase, the action queue, a seeded
/// RNG, and the summon roster. Everything it knows about the world it asks
/// through the [`CombatHost`] passed into each call — the session holds no
/// world handles, so a wiped attempt is discarded and a fresh one built
/// without any process-wide cleanup.
pub struct EncounterSession {
    pub(crate) boss: UnitId,
    pub(crate) config: ScriptConfig,
    pub(crate) phase: Phase,
    pub(crate) queue: EventQueue<BossAction>,
    pub(crate) rng: EncounterRng,
    pub(crate) roster: SummonRoster,
}

impl EncounterSession {
    /// Build a session for `boss` in phase `Idle`.
    ///
    /// Validates the configuration; the queue stays empty until
    /// [`engage`](BossScript::engage).
    pub fn new(boss: UnitId, config: ScriptConfig, seed: u64) -> ScriptResult<Self> {
        config.validate()?;
        Ok(Self {
            boss,
            config,
            phase: Phase::Idle,
            queue: EventQueue::new(),
            rng: EncounterRng::new(seed),
            roster: SummonRoster::new(),
        })
    }

    /// Combat time accumulated on the action clock. Freezes while the unit
    /// has no victim and rewinds to zero on reset or death.
    #[inline]
    pub fn elapsed(&self) -> Millis {
        self.queue.now()
    }

    /// Remaining delay before the soonest pending `action`, `None` when it
    /// is not scheduled.
    pub fn time_until(&self, action: BossAction) -> Option<Millis> {
        self.queue.time_until_due(action)
    }

    /// Total pending actions on the queue.
    pub fn pending_actions(&self) -> usize {
        self.queue.len()
    }

    /// Live summons currently tracked.
    pub fn summon_count(&self) -> usize {
        self.roster.len()
    }

    /// The configuration this session runs.
    pub fn config(&self) -> &ScriptConfig {
        &self.config
    }
}

impl BossScript for EncounterSession {
    fn engage<H: CombatHost>(&mut self, host: &mut H) {
        if self.phase != Phase::Idle {
            return;
        }
        self.phase = Phase::Engaged;
        host.announce(self.boss, self.config.lines.aggro);
        self.queue.schedule(BossAction::Bolt, self.config.first_bolt_delay);
        self.queue.schedule(BossAction::Summon, self.config.first_summon_delay);
        self.queue.schedule(BossAction::Berserk, self.config.berserk_delay);
        self.queue
            .schedule(BossAction::HealthCheck, self.config.health_check_interval);
        host.set_zone_combat(self.boss);
    }

    fn update<H: CombatHost>(&mut self, host: &mut H, diff: Millis) {
        if self.phase == Phase::Defeated {
            debug_assert!(false, "update() called on a defeated session");
            return;
        }
        if self.phase == Phase::Idle {
            return;
        }

        // ── Step 1: require a victim ──────────────────────────────────────
        //
        // Without one the tick ends here and the action clock does not
        // move: pending delays resume where they stopped once combat picks
        // back up.
        if host.update_victim(self.boss).is_none() {
            return;
        }

        // ── Step 2: advance the action clock ──────────────────────────────
        self.queue.advance(diff);

        // ── Steps 3 + 4: pop at most one due action ───────────────────────
        //
        // A busy (uninterruptible) tick skips the pop; due entries stay
        // queued and fire on a later tick. Melee below is unaffected.
        if !host.is_busy(self.boss) {
            if let Some(action) = self.queue.pop_due() {
                handlers::handler::<H>(action)(self, host);
            }
        }

        // ── Step 5: melee swing attempt ───────────────────────────────────
        host.melee_swing_if_ready(self.boss);
    }

    fn on_kill<H: CombatHost>(&mut self, host: &mut H, _victim: UnitId) {
        if !self.phase.is_live() {
            return;
        }
        // The gate stays shut while a KillCooldown entry is pending — due
        // but not yet popped still counts as shut.
        if self.queue.is_scheduled(BossAction::KillCooldown) {
            return;
        }
        host.announce(self.boss, self.config.lines.kill);
        self.queue
            .schedule(BossAction::KillCooldown, self.config.kill_line_cooldown);
    }

    fn on_summoned<H: CombatHost>(&mut self, host: &mut H, summon: UnitId) {
        self.roster.register(summon);
        if let Some(target) = host.select_target(
            summon,
            TargetMethod::Random,
            Some(self.config.summon_leash_radius),
        ) {
            host.force_attack(summon, target);
            host.add_threat(summon, target, self.config.summon_threat_bonus);
        }
        host.set_zone_combat(summon);
    }

    fn on_death<H: CombatHost>(&mut self, host: &mut H) {
        if !self.phase.is_live() {
            return;
        }
        self.phase = Phase::Defeated;
        host.announce(self.boss, self.config.lines.death);
        self.roster.despawn_all(host);
        self.queue.clear();
    }

    fn reset<H: CombatHost>(&mut self, host: &mut H) {
        self.phase = Phase::Idle;
        self.roster.despawn_all(host);
        self.queue.clear();
        for &school in &self.config.immune_schools {
            host.set_school_immunity(self.boss, school, true);
        }
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn boss(&self) -> UnitId {
        self.boss
    }

    fn spells(&self) -> Vec<SpellId> {
        self.config.spell_manifest()
    }
}

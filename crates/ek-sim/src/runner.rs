use ek_arena::{Arena, Side};
use ek_core::Millis;
use ek_script::{BossScript, Phase};

use crate::error::{SimError, SimResult};
use crate::observer::EncounterObserver;

// ── Configuration ─────────────────────────────────────────────────────────────

/// Knobs for a single encounter run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Simulated time advanced per tick. Default: `100` ms.
    pub tick: Millis,

    /// Encounter time after which an unresolved attempt is cut off.
    /// Default: `900_000` ms (fifteen minutes).
    pub time_limit: Millis,

    /// Master seed, recorded into the [`RunReport`] so an attempt can be
    /// replayed. The runner does not roll dice itself; whoever builds the
    /// arena and script is expected to seed them from this value.
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tick:       Millis(100),
            time_limit: Millis(900_000),
            seed:       0,
        }
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// How an attempt resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EncounterResult {
    /// The scripted unit died.
    Victory,
    /// Every raider died; the script was reset.
    Wipe,
    /// The time limit elapsed with both sides standing.
    Timeout,
}

impl EncounterResult {
    pub fn as_str(self) -> &'static str {
        match self {
            EncounterResult::Victory => "victory",
            EncounterResult::Wipe    => "wipe",
            EncounterResult::Timeout => "timeout",
        }
    }
}

impl std::fmt::Display for EncounterResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of one finished attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub seed:          u64,
    pub result:        EncounterResult,
    /// Encounter time at resolution.
    pub elapsed:       Millis,
    /// World ticks executed.
    pub ticks:         u64,
    /// Script phase after the final tick (`Defeated` on victory, `Idle`
    /// after a wipe reset).
    pub final_phase:   Phase,
    pub announcements: usize,
    pub casts:         usize,
    pub summons:       usize,
    pub kills:         usize,
}

#[derive(Default)]
struct Counters {
    announcements: usize,
    casts:         usize,
    summons:       usize,
    kills:         usize,
}

// ── Runner ────────────────────────────────────────────────────────────────────

/// Owns an [`Arena`] and a [`BossScript`] and drives them tick by tick
/// until the attempt resolves.
///
/// Construction validates that the pair can actually be driven: the
/// script's unit must exist, be alive, and be flagged `scripted` (so the
/// world never auto-acts for it), and every spell the script intends to
/// cast must be registered. See the crate docs for the per-tick order.
pub struct EncounterRunner<S: BossScript> {
    arena:  Arena,
    script: S,
    config: RunConfig,
}

impl<S: BossScript> EncounterRunner<S> {
    pub fn new(arena: Arena, script: S, config: RunConfig) -> SimResult<Self> {
        fn fail<T>(msg: String) -> SimResult<T> {
            Err(SimError::Config(msg))
        }

        if config.tick == Millis::ZERO {
            return fail("tick must be non-zero".into());
        }
        if config.time_limit == Millis::ZERO {
            return fail("time_limit must be non-zero".into());
        }

        let boss = script.boss();
        let Some(unit) = arena.get(boss) else {
            return fail(format!("scripted unit {boss} is not in the arena"));
        };
        if !unit.scripted {
            return fail(format!("unit {boss} is not flagged scripted"));
        }
        if !unit.alive {
            return fail(format!("scripted unit {boss} is already dead"));
        }
        for spell in script.spells() {
            if !arena.has_spell(spell) {
                return fail(format!("spell {spell} is not registered in the arena"));
            }
        }

        Ok(Self { arena, script, config })
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn script(&self) -> &S {
        &self.script
    }

    /// Tears the runner apart, e.g. to inspect the world after a run.
    pub fn into_parts(self) -> (Arena, S) {
        (self.arena, self.script)
    }

    /// Runs the attempt to resolution.
    ///
    /// The script is engaged immediately, then the loop described in the
    /// crate docs executes until victory, wipe, or timeout. Events are
    /// forwarded to `observer` in the order the world produced them.
    pub fn run<O: EncounterObserver>(&mut self, observer: &mut O) -> SimResult<RunReport> {
        let mut counters   = Counters::default();
        let mut prev_phase = self.script.phase();
        let mut ticks: u64 = 0;

        self.script.engage(&mut self.arena);
        self.forward_feeds(&mut counters, &mut prev_phase, observer);

        let result = loop {
            if self.arena.now() >= self.config.time_limit {
                break EncounterResult::Timeout;
            }
            let diff = self.config.tick;

            // ── World tick: timers, regeneration, raider swings ──
            self.arena.update(diff);
            ticks += 1;

            // The scripted unit dying ends the attempt before its
            // controller runs again.
            if self.route_kills(&mut counters, observer) {
                self.forward_feeds(&mut counters, &mut prev_phase, observer);
                break EncounterResult::Victory;
            }

            // ── Controller tick ──
            self.script.update(&mut self.arena, diff);

            // Kills and spawns produced by the controller's own actions.
            if self.route_kills(&mut counters, observer) {
                self.forward_feeds(&mut counters, &mut prev_phase, observer);
                break EncounterResult::Victory;
            }
            for summon in self.arena.take_spawned() {
                counters.summons += 1;
                observer.on_summon(summon, self.arena.now());
                self.script.on_summoned(&mut self.arena, summon);
            }

            self.forward_feeds(&mut counters, &mut prev_phase, observer);

            if self.arena.side_alive(Side::Raiders) == 0 {
                self.script.reset(&mut self.arena);
                self.forward_feeds(&mut counters, &mut prev_phase, observer);
                break EncounterResult::Wipe;
            }

            observer.on_tick(self.arena.now());
        };

        let elapsed = self.arena.now();
        observer.on_run_end(result, elapsed);

        Ok(RunReport {
            seed:          self.config.seed,
            result,
            elapsed,
            ticks,
            final_phase:   self.script.phase(),
            announcements: counters.announcements,
            casts:         counters.casts,
            summons:       counters.summons,
            kills:         counters.kills,
        })
    }

    /// Drains kill events, invoking the script's kill and death hooks.
    /// Returns `true` if the scripted unit was among the victims.
    fn route_kills<O: EncounterObserver>(
        &mut self,
        counters: &mut Counters,
        observer: &mut O,
    ) -> bool {
        let boss = self.script.boss();
        let mut boss_died = false;
        for kill in self.arena.take_kills() {
            counters.kills += 1;
            observer.on_kill(&kill);
            if kill.victim == boss {
                self.script.on_death(&mut self.arena);
                boss_died = true;
            } else if kill.killer == boss {
                self.script.on_kill(&mut self.arena, kill.victim);
            }
        }
        boss_died
    }

    /// Forwards announcements, cast records, and phase changes.
    fn forward_feeds<O: EncounterObserver>(
        &mut self,
        counters: &mut Counters,
        prev_phase: &mut Phase,
        observer: &mut O,
    ) {
        for announcement in self.arena.take_announcements() {
            counters.announcements += 1;
            observer.on_announcement(&announcement);
        }
        for cast in self.arena.take_casts() {
            counters.casts += 1;
            observer.on_cast(&cast);
        }
        let phase = self.script.phase();
        if phase != *prev_phase {
            observer.on_phase_change(self.arena.now(), *prev_phase, phase);
            *prev_phase = phase;
        }
    }
}

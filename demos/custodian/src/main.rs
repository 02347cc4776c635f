//! custodian — demo attempt on the arcane custodian encounter.
//!
//! Eight raiders against a gallery custodian: astral bolts thrown at
//! mid-threat targets, spark summons that drain its power pool until it
//! has to stop and recharge, a ten-minute overload clock, and a 16%
//! enrage. Narrates the timeline to stdout and writes the full event
//! transcript to `output/custodian/transcript.csv`.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use ek_arena::{
    Announcement, ArenaBuilder, CastRecord, KillEvent, School, Side, SpellDef, SpellEffect,
    SummonProto, UnitSpec,
};
use ek_core::{LineId, Millis, SpellId, UnitId};
use ek_script::{EncounterSession, Phase, ScriptConfig, ScriptLines};
use ek_sim::{EncounterObserver, EncounterResult, EncounterRunner, RecordingObserver, RunConfig};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:          u64   = 42;
const RAIDER_COUNT:  usize = 8;
const BOSS_HEALTH:   u64   = 1_200_000;
const BOSS_POWER:    u32   = 600_000;
const BOSS_MELEE:    u64   = 3_000;
const RAIDER_HEALTH: u64   = 80_000;
const RAIDER_MELEE:  u64   = 2_500;

// Spell ids as they appear in the encounter data tables.
const ASTRAL_BOLT:  SpellId = SpellId(30383);
const ARCANE_SURGE: SpellId = SpellId(30403);
const OVERLOAD:     SpellId = SpellId(26662);
const RECHARGE:     SpellId = SpellId(30254);
const SPARKS: [SpellId; 4] = [
    SpellId(30236),
    SpellId(30239),
    SpellId(30240),
    SpellId(30241),
];

// ── Display text ──────────────────────────────────────────────────────────────

// The engine traffics in opaque line ids; the words live host-side.
fn line_text(lines: &ScriptLines, line: LineId) -> &'static str {
    match line {
        l if l == lines.aggro    => "The gallery is closed to the public.",
        l if l == lines.summon   => "Maintenance protocol: engaged.",
        l if l == lines.recharge => "Power reserves depleted. Recharging.",
        l if l == lines.enrage   => "Defense mode: unrestricted.",
        l if l == lines.kill     => "Do not touch the exhibits.",
        l if l == lines.death    => "Custodian... offline.",
        _ => "...",
    }
}

fn spell_name(spell: SpellId) -> &'static str {
    match spell {
        ASTRAL_BOLT  => "Astral Bolt",
        ARCANE_SURGE => "Arcane Surge",
        OVERLOAD     => "Overload",
        RECHARGE     => "Recharge",
        _            => "Summon Spark",
    }
}

fn unit_label(unit: UnitId) -> String {
    match unit.0 as usize {
        0 => "the custodian".to_string(),
        n if n <= RAIDER_COUNT => format!("raider {n}"),
        n => format!("spark {n}"),
    }
}

fn secs(at: Millis) -> f64 {
    at.0 as f64 / 1_000.0
}

// ── Timeline observer ─────────────────────────────────────────────────────────

/// Narrates each event to stdout and forwards everything to the
/// recording observer that backs the CSV transcript.
struct TimelineObserver {
    inner: RecordingObserver,
    lines: ScriptLines,
}

impl EncounterObserver for TimelineObserver {
    fn on_announcement(&mut self, announcement: &Announcement) {
        println!(
            "[{:>6.1}s] {} yells: \"{}\"",
            secs(announcement.at),
            unit_label(announcement.unit),
            line_text(&self.lines, announcement.line)
        );
        self.inner.on_announcement(announcement);
    }

    fn on_cast(&mut self, cast: &CastRecord) {
        if cast.target == cast.caster {
            println!(
                "[{:>6.1}s] {} casts {}",
                secs(cast.at),
                unit_label(cast.caster),
                spell_name(cast.spell)
            );
        } else {
            println!(
                "[{:>6.1}s] {} casts {} at {}",
                secs(cast.at),
                unit_label(cast.caster),
                spell_name(cast.spell),
                unit_label(cast.target)
            );
        }
        self.inner.on_cast(cast);
    }

    fn on_kill(&mut self, kill: &KillEvent) {
        println!(
            "[{:>6.1}s] {} brings down {}",
            secs(kill.at),
            unit_label(kill.killer),
            unit_label(kill.victim)
        );
        self.inner.on_kill(kill);
    }

    fn on_summon(&mut self, unit: UnitId, at: Millis) {
        println!("[{:>6.1}s] {} flickers into being", secs(at), unit_label(unit));
        self.inner.on_summon(unit, at);
    }

    fn on_phase_change(&mut self, at: Millis, from: Phase, to: Phase) {
        println!("[{:>6.1}s] phase: {from} -> {to}", secs(at));
        self.inner.on_phase_change(at, from, to);
    }

    fn on_run_end(&mut self, result: EncounterResult, elapsed: Millis) {
        self.inner.on_run_end(result, elapsed);
    }
}

// ── Spellbook ─────────────────────────────────────────────────────────────────

fn spellbook(builder: &mut ArenaBuilder) -> Result<()> {
    builder.add_spell(
        ASTRAL_BOLT,
        SpellDef {
            school:    School::Arcane,
            cast_time: Millis::ZERO,
            effect:    SpellEffect::Damage { amount: 8_000 },
        },
    )?;
    builder.add_spell(
        ARCANE_SURGE,
        SpellDef {
            school:    School::Arcane,
            cast_time: Millis::ZERO,
            effect:    SpellEffect::EnhanceDamage { multiplier: 2.0 },
        },
    )?;
    builder.add_spell(
        OVERLOAD,
        SpellDef {
            school:    School::Physical,
            cast_time: Millis::ZERO,
            effect:    SpellEffect::EnhanceDamage { multiplier: 3.0 },
        },
    )?;
    builder.add_spell(
        RECHARGE,
        SpellDef {
            school:    School::Arcane,
            cast_time: Millis(20_000),
            effect:    SpellEffect::RestorePowerPct { pct: 100 },
        },
    )?;
    for spark in SPARKS {
        builder.add_spell(
            spark,
            SpellDef {
                school:    School::Arcane,
                cast_time: Millis::ZERO,
                effect:    SpellEffect::Summon {
                    proto: SummonProto {
                        max_health:   20_000,
                        melee_damage: 1_200,
                        swing_period: Millis(1_500),
                    },
                },
            },
        )?;
    }
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== custodian — scripted encounter demo ===");
    println!("Raiders: {RAIDER_COUNT}  |  Boss health: {BOSS_HEALTH}  |  Seed: {SEED}");
    println!();

    // 1. Arena: the custodian and its raid, all in one room.
    let mut builder = ArenaBuilder::new(SEED);
    let boss = builder.add_unit(UnitSpec {
        side:         Side::Defenders,
        scripted:     true,
        max_health:   BOSS_HEALTH,
        max_power:    BOSS_POWER,
        melee_damage: BOSS_MELEE,
        swing_period: Millis(2_000),
        ..Default::default()
    });
    let raiders: Vec<UnitId> = (0..RAIDER_COUNT)
        .map(|_| {
            builder.add_unit(UnitSpec {
                max_health:   RAIDER_HEALTH,
                melee_damage: RAIDER_MELEE,
                swing_period: Millis(1_500),
                ..Default::default()
            })
        })
        .collect();
    spellbook(&mut builder)?;
    let arena = builder.build()?;

    // 2. Script: default pacing, custodian spell ids.
    let config = ScriptConfig {
        bolt_spell:     ASTRAL_BOLT,
        empower_spell:  ARCANE_SURGE,
        heavy_spell:    OVERLOAD,
        recovery_spell: RECHARGE,
        summon_spells:  SPARKS.to_vec(),
        ..Default::default()
    };
    let lines = config.lines.clone();
    let session = EncounterSession::new(boss, config, SEED)?;

    // 3. Runner.
    let run_config = RunConfig { seed: SEED, ..Default::default() };
    let mut runner = EncounterRunner::new(arena, session, run_config)?;

    // 4. Run, narrating as we go.
    println!("{}", "-".repeat(64));
    let mut observer = TimelineObserver { inner: RecordingObserver::new(), lines };
    let t0 = Instant::now();
    let report = runner.run(&mut observer)?;
    let wall = t0.elapsed();
    println!("{}", "-".repeat(64));
    println!();

    // 5. Transcript CSV.
    std::fs::create_dir_all("output/custodian")?;
    let path = Path::new("output/custodian/transcript.csv");
    observer.inner.transcript().write_csv(path)?;

    // 6. Summary.
    println!(
        "Result: {}  ({:.1} s of encounter time, {} ticks in {:.3} s wall)",
        report.result,
        secs(report.elapsed),
        report.ticks,
        wall.as_secs_f64()
    );
    println!(
        "Casts: {}   Summons: {}   Kills: {}   Lines spoken: {}",
        report.casts, report.summons, report.kills, report.announcements
    );
    println!(
        "Transcript: {} rows -> {}",
        observer.inner.transcript().len(),
        path.display()
    );
    println!();

    // 7. Raid roster after the attempt.
    println!("{:<10} {:>12} {:>7}", "Unit", "Health", "Alive");
    println!("{}", "-".repeat(31));
    for &id in &raiders {
        if let Some(unit) = runner.arena().get(id) {
            println!(
                "{:<10} {:>12} {:>7}",
                unit_label(id),
                unit.health,
                if unit.alive { "yes" } else { "no" }
            );
        }
    }

    Ok(())
}

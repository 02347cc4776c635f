//! Unit tests for the reference arena.

use ek_core::{Millis, SpellId, UnitId};

use crate::{
    Arena, ArenaBuilder, ArenaError, CombatHost, School, Side, SpellDef, SpellEffect, SummonProto,
    TargetMethod, UnitSpec,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const BOLT: SpellId = SpellId(1);
const NOVA: SpellId = SpellId(2);
const RENEW: SpellId = SpellId(3);
const EMPOWER: SpellId = SpellId(4);
const CALL_HELPER: SpellId = SpellId(5);
const CHANNEL: SpellId = SpellId(6);

fn spellbook() -> Vec<(SpellId, SpellDef)> {
    vec![
        (
            BOLT,
            SpellDef {
                school: School::Arcane,
                cast_time: Millis::ZERO,
                effect: SpellEffect::Damage { amount: 50 },
            },
        ),
        (
            NOVA,
            SpellDef {
                school: School::Fire,
                cast_time: Millis::ZERO,
                effect: SpellEffect::AoeDamage { amount: 30 },
            },
        ),
        (
            RENEW,
            SpellDef {
                school: School::Arcane,
                cast_time: Millis::ZERO,
                effect: SpellEffect::RestorePowerPct { pct: 60 },
            },
        ),
        (
            EMPOWER,
            SpellDef {
                school: School::Arcane,
                cast_time: Millis::ZERO,
                effect: SpellEffect::EnhanceDamage { multiplier: 2.5 },
            },
        ),
        (
            CALL_HELPER,
            SpellDef {
                school: School::Arcane,
                cast_time: Millis::ZERO,
                effect: SpellEffect::Summon {
                    proto: SummonProto {
                        max_health: 80,
                        melee_damage: 5,
                        swing_period: Millis(1_000),
                    },
                },
            },
        ),
        (
            CHANNEL,
            SpellDef {
                school: School::Arcane,
                cast_time: Millis(3_000),
                effect: SpellEffect::None,
            },
        ),
    ]
}

fn boss_spec() -> UnitSpec {
    UnitSpec {
        side: Side::Defenders,
        scripted: true,
        max_health: 1_000,
        max_power: 100,
        melee_damage: 20,
        swing_period: Millis(2_000),
        ..Default::default()
    }
}

/// Boss plus `raiders` default raiders, all at the origin, full spellbook.
fn arena(raiders: usize) -> (Arena, UnitId, Vec<UnitId>) {
    let mut builder = ArenaBuilder::new(7);
    let boss = builder.add_unit(boss_spec());
    let raider_ids = (0..raiders)
        .map(|_| builder.add_unit(UnitSpec::default()))
        .collect();
    for (id, def) in spellbook() {
        builder.add_spell(id, def).unwrap();
    }
    (builder.build().unwrap(), boss, raider_ids)
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn ids_follow_insertion_order() {
        let mut b = ArenaBuilder::new(0);
        assert_eq!(b.add_unit(boss_spec()), UnitId(0));
        assert_eq!(b.add_unit(UnitSpec::default()), UnitId(1));
        assert_eq!(b.add_unit(UnitSpec::default()), UnitId(2));
    }

    #[test]
    fn rejects_zero_health() {
        let mut b = ArenaBuilder::new(0);
        b.add_unit(UnitSpec {
            max_health: 0,
            ..Default::default()
        });
        assert!(matches!(b.build(), Err(ArenaError::ZeroHealth(_))));
    }

    #[test]
    fn rejects_zero_swing_period() {
        let mut b = ArenaBuilder::new(0);
        b.add_unit(UnitSpec {
            swing_period: Millis::ZERO,
            ..Default::default()
        });
        assert!(matches!(b.build(), Err(ArenaError::ZeroSwingPeriod(_))));
    }

    #[test]
    fn rejects_duplicate_spell() {
        let mut b = ArenaBuilder::new(0);
        let def = SpellDef {
            school: School::Arcane,
            cast_time: Millis::ZERO,
            effect: SpellEffect::None,
        };
        b.add_spell(SpellId(9), def).unwrap();
        assert!(matches!(
            b.add_spell(SpellId(9), def),
            Err(ArenaError::DuplicateSpell(_))
        ));
    }

    #[test]
    fn units_start_topped_up() {
        let (arena, boss, _) = arena(1);
        assert_eq!(arena.health_fraction(boss), 1.0);
        assert_eq!(arena.power_fraction(boss), 1.0);
        assert!(arena.has_spell(BOLT));
        assert!(!arena.has_spell(SpellId(999)));
    }
}

// ── Vitals ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod vitals {
    use super::*;

    #[test]
    fn health_fraction_tracks_damage() {
        let (mut arena, boss, raiders) = arena(1);
        arena.cast(boss, raiders[0], BOLT, true);
        assert_eq!(arena.health_fraction(raiders[0]), 0.5); // 50 / 100
        assert_eq!(arena.health_fraction(UnitId(99)), 0.0); // unknown id
    }

    #[test]
    fn power_fraction_without_pool_is_zero() {
        let (arena, _, raiders) = arena(1);
        assert_eq!(arena.power_fraction(raiders[0]), 0.0);
    }

    #[test]
    fn modify_power_clamps_both_ends() {
        let (mut arena, boss, _) = arena(0);
        arena.modify_power(boss, -500);
        assert_eq!(arena.get(boss).unwrap().power, 0);
        arena.modify_power(boss, 40);
        arena.modify_power(boss, 9_999);
        assert_eq!(arena.get(boss).unwrap().power, 100);
    }

    #[test]
    fn regen_is_integer_exact_across_fractional_ticks() {
        // 7 power/sec at a 100 ms tick gains 0.7/tick; after 10 ticks the
        // carry must have produced exactly 7 points, no drift.
        let mut b = ArenaBuilder::new(0);
        let id = b.add_unit(UnitSpec {
            max_power: 100,
            power_regen_per_sec: 7,
            ..Default::default()
        });
        let mut arena = b.build().unwrap();
        arena.modify_power(id, -100);
        for _ in 0..10 {
            arena.update(Millis(100));
        }
        assert_eq!(arena.get(id).unwrap().power, 7);
    }

    #[test]
    fn set_health_fraction_rounds_and_kills_at_zero() {
        let (mut arena, boss, _) = arena(0);
        arena.set_health_fraction(boss, 0.16);
        assert_eq!(arena.get(boss).unwrap().health, 160);
        arena.set_health_fraction(boss, 0.0);
        assert!(!arena.is_alive(boss));
    }

    #[test]
    fn restore_power_pct_caps_at_max() {
        let (mut arena, boss, _) = arena(0);
        arena.modify_power(boss, -80); // 20 left
        arena.cast(boss, boss, RENEW, true); // +60% of 100
        assert_eq!(arena.get(boss).unwrap().power, 80);
        arena.cast(boss, boss, RENEW, true);
        assert_eq!(arena.get(boss).unwrap().power, 100);
    }
}

// ── Targeting ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod targeting {
    use super::*;
    use crate::Pos2;

    #[test]
    fn update_victim_prefers_highest_threat() {
        let (mut arena, boss, raiders) = arena(3);
        arena.add_threat(boss, raiders[0], 10.0);
        arena.add_threat(boss, raiders[1], 100.0);
        assert_eq!(arena.update_victim(boss), Some(raiders[1]));
        arena.set_health_fraction(raiders[1], 0.0);
        assert_eq!(arena.update_victim(boss), Some(raiders[0]));
    }

    #[test]
    fn update_victim_falls_back_to_any_live_hostile() {
        let (mut arena, boss, raiders) = arena(2);
        // No threat accrued yet: the first live raider by id is chosen.
        assert_eq!(arena.update_victim(boss), Some(raiders[0]));
        arena.set_health_fraction(raiders[0], 0.0);
        assert_eq!(arena.update_victim(boss), Some(raiders[1]));
        arena.set_health_fraction(raiders[1], 0.0);
        assert_eq!(arena.update_victim(boss), None);
    }

    #[test]
    fn max_threat_skip_walks_the_ranking() {
        let (mut arena, boss, raiders) = arena(3);
        arena.add_threat(boss, raiders[0], 100.0);
        arena.add_threat(boss, raiders[1], 50.0);
        arena.add_threat(boss, raiders[2], 10.0);
        let pick = |arena: &mut Arena, skip| {
            arena.select_target(boss, TargetMethod::MaxThreat { skip }, Some(40.0))
        };
        assert_eq!(pick(&mut arena, 0), Some(raiders[0]));
        assert_eq!(pick(&mut arena, 1), Some(raiders[1]));
        assert_eq!(pick(&mut arena, 2), Some(raiders[2]));
        assert_eq!(pick(&mut arena, 3), None);
    }

    #[test]
    fn max_threat_respects_range_cut() {
        let mut b = ArenaBuilder::new(0);
        let boss = b.add_unit(boss_spec());
        let near = b.add_unit(UnitSpec::default());
        let far = b.add_unit(UnitSpec {
            pos: Pos2::new(50.0, 0.0),
            ..Default::default()
        });
        let mut arena = b.build().unwrap();
        arena.add_threat(boss, far, 100.0);
        arena.add_threat(boss, near, 10.0);
        // `far` tops the table but sits outside the 40-unit cut.
        assert_eq!(
            arena.select_target(boss, TargetMethod::MaxThreat { skip: 0 }, Some(40.0)),
            Some(near)
        );
        assert_eq!(
            arena.select_target(boss, TargetMethod::MaxThreat { skip: 0 }, None),
            Some(far)
        );
    }

    #[test]
    fn max_threat_on_empty_table_is_none() {
        let (mut arena, boss, _) = arena(2);
        assert_eq!(
            arena.select_target(boss, TargetMethod::MaxThreat { skip: 0 }, None),
            None
        );
    }

    #[test]
    fn random_picks_only_live_hostiles_in_range() {
        let mut b = ArenaBuilder::new(42);
        let boss = b.add_unit(boss_spec());
        let near1 = b.add_unit(UnitSpec::default());
        let near2 = b.add_unit(UnitSpec::default());
        let far = b.add_unit(UnitSpec {
            pos: Pos2::new(80.0, 0.0),
            ..Default::default()
        });
        let mut arena = b.build().unwrap();
        for _ in 0..50 {
            let pick = arena
                .select_target(boss, TargetMethod::Random, Some(40.0))
                .unwrap();
            assert!(pick == near1 || pick == near2, "picked {pick}, not {far}");
        }
    }

    #[test]
    fn zone_combat_seeds_the_threat_table() {
        let (mut arena, boss, raiders) = arena(2);
        assert_eq!(
            arena.select_target(boss, TargetMethod::MaxThreat { skip: 0 }, None),
            None
        );
        arena.set_zone_combat(boss);
        // All entries tie at zero threat; the lowest id wins the tie.
        assert_eq!(
            arena.select_target(boss, TargetMethod::MaxThreat { skip: 0 }, None),
            Some(raiders[0])
        );
        assert_eq!(
            arena.select_target(boss, TargetMethod::MaxThreat { skip: 1 }, None),
            Some(raiders[1])
        );
    }

    #[test]
    fn dead_unit_selects_nothing() {
        let (mut arena, boss, _) = arena(2);
        arena.set_health_fraction(boss, 0.0);
        assert_eq!(arena.update_victim(boss), None);
        assert_eq!(arena.select_target(boss, TargetMethod::Random, None), None);
    }
}

// ── Casting ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod casting {
    use super::*;

    #[test]
    fn normal_cast_occupies_for_cast_time() {
        let (mut arena, boss, _) = arena(1);
        arena.cast(boss, boss, CHANNEL, false);
        assert!(arena.is_busy(boss));
        arena.update(Millis(1_000));
        arena.update(Millis(1_000));
        assert!(arena.is_busy(boss));
        arena.update(Millis(1_000));
        assert!(!arena.is_busy(boss));
    }

    #[test]
    fn busy_caster_refuses_a_second_normal_cast() {
        let (mut arena, boss, raiders) = arena(1);
        arena.cast(boss, boss, CHANNEL, false);
        arena.cast(boss, raiders[0], BOLT, false);
        let casts = arena.take_casts();
        assert_eq!(casts.len(), 1);
        assert_eq!(casts[0].spell, CHANNEL);
        assert_eq!(arena.health_fraction(raiders[0]), 1.0);
    }

    #[test]
    fn triggered_cast_ignores_busy_state() {
        let (mut arena, boss, raiders) = arena(1);
        arena.cast(boss, boss, CHANNEL, false);
        arena.cast(boss, raiders[0], BOLT, true);
        assert_eq!(arena.health_fraction(raiders[0]), 0.5);
        assert!(arena.is_busy(boss)); // the channel is still running
    }

    #[test]
    fn interrupt_clears_the_cast() {
        let (mut arena, boss, _) = arena(1);
        arena.cast(boss, boss, CHANNEL, false);
        arena.interrupt_cast(boss);
        assert!(!arena.is_busy(boss));
    }

    #[test]
    fn unknown_spell_is_a_silent_noop() {
        let (mut arena, boss, raiders) = arena(1);
        arena.cast(boss, raiders[0], SpellId(12_345), false);
        assert!(arena.take_casts().is_empty());
        assert_eq!(arena.health_fraction(raiders[0]), 1.0);
    }

    #[test]
    fn damage_accrues_threat_on_the_victim() {
        let (mut arena, boss, raiders) = arena(1);
        arena.cast(boss, raiders[0], BOLT, true);
        assert_eq!(arena.threat(raiders[0], boss), 50.0);
    }

    #[test]
    fn lethal_damage_queues_a_kill_event() {
        let (mut arena, boss, raiders) = arena(1);
        arena.cast(boss, raiders[0], BOLT, true);
        arena.cast(boss, raiders[0], BOLT, true);
        assert!(!arena.is_alive(raiders[0]));
        let kills = arena.take_kills();
        assert_eq!(kills.len(), 1);
        assert_eq!(kills[0].killer, boss);
        assert_eq!(kills[0].victim, raiders[0]);
        assert!(arena.take_kills().is_empty()); // drained
    }

    #[test]
    fn aoe_hits_every_hostile_and_nothing_else() {
        let (mut arena, boss, raiders) = arena(3);
        arena.cast(boss, boss, NOVA, true);
        for r in &raiders {
            assert_eq!(arena.health_fraction(*r), 0.7);
        }
        assert_eq!(arena.health_fraction(boss), 1.0);
    }

    #[test]
    fn summon_spawns_on_the_casters_side() {
        let (mut arena, boss, _) = arena(1);
        let before = arena.unit_count();
        arena.cast(boss, boss, CALL_HELPER, true);
        assert_eq!(arena.unit_count(), before + 1);
        let spawned = arena.take_spawned();
        assert_eq!(spawned.len(), 1);
        let helper = arena.get(spawned[0]).unwrap();
        assert_eq!(helper.side, Side::Defenders);
        assert!(!helper.scripted);
        assert_eq!(helper.health, 80);
        assert!(arena.take_spawned().is_empty()); // drained
    }
}

// ── Immunity ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod immunity {
    use super::*;

    #[test]
    fn immune_school_deals_no_damage_and_no_threat() {
        let (mut arena, boss, raiders) = arena(1);
        arena.set_school_immunity(raiders[0], School::Arcane, true);
        arena.cast(boss, raiders[0], BOLT, true);
        assert_eq!(arena.health_fraction(raiders[0]), 1.0);
        assert_eq!(arena.threat(raiders[0], boss), 0.0);

        arena.set_school_immunity(raiders[0], School::Arcane, false);
        arena.cast(boss, raiders[0], BOLT, true);
        assert_eq!(arena.health_fraction(raiders[0]), 0.5);
    }

    #[test]
    fn immunity_only_blocks_damage_effects() {
        // An arcane-immune unit still receives an arcane enhancement buff:
        // immunity gates damage, not beneficial effects.
        let (mut arena, boss, _) = arena(1);
        arena.set_school_immunity(boss, School::Arcane, true);
        arena.cast(boss, boss, EMPOWER, true);
        assert_eq!(arena.get(boss).unwrap().damage_multiplier, 2.5);
    }

    #[test]
    fn toggling_twice_does_not_stack() {
        let (mut arena, boss, _) = arena(0);
        arena.set_school_immunity(boss, School::Arcane, true);
        arena.set_school_immunity(boss, School::Arcane, true);
        arena.set_school_immunity(boss, School::Arcane, false);
        assert!(!arena.get(boss).unwrap().is_immune(School::Arcane));
    }
}

// ── Melee and auto-acting ─────────────────────────────────────────────────────

#[cfg(test)]
mod melee {
    use super::*;
    use crate::Pos2;

    #[test]
    fn raiders_swing_on_their_own() {
        let (mut arena, boss, raiders) = arena(1);
        for _ in 0..4 {
            arena.update(Millis(1_500));
        }
        // Four swings at 10 damage each.
        assert_eq!(arena.get(boss).unwrap().health, 960);
        assert_eq!(arena.health_fraction(raiders[0]), 1.0);
        assert_eq!(arena.threat(boss, raiders[0]), 40.0);
    }

    #[test]
    fn scripted_units_never_auto_swing() {
        let (mut arena, boss, raiders) = arena(1);
        for _ in 0..3 {
            arena.update(Millis(1_500));
        }
        assert_eq!(arena.health_fraction(raiders[0]), 1.0);

        // The script drives the boss's melee explicitly.
        arena.update_victim(boss);
        arena.melee_swing_if_ready(boss);
        assert_eq!(arena.get(raiders[0]).unwrap().health, 80);
    }

    #[test]
    fn swing_requires_melee_range() {
        let mut b = ArenaBuilder::new(0);
        let boss = b.add_unit(boss_spec());
        b.add_unit(UnitSpec {
            pos: Pos2::new(10.0, 0.0),
            ..Default::default()
        });
        let mut arena = b.build().unwrap();
        for _ in 0..5 {
            arena.update(Millis(1_500));
        }
        assert_eq!(arena.health_fraction(boss), 1.0);
    }

    #[test]
    fn swing_timer_enforces_the_period() {
        let (mut arena, boss, raiders) = arena(1);
        arena.update_victim(boss);
        arena.melee_swing_if_ready(boss);
        arena.melee_swing_if_ready(boss); // timer not up yet
        assert_eq!(arena.get(raiders[0]).unwrap().health, 80);
        arena.update(Millis(2_000));
        arena.melee_swing_if_ready(boss);
        assert_eq!(arena.get(raiders[0]).unwrap().health, 60);
    }

    #[test]
    fn enhancement_multiplies_swing_damage() {
        let (mut arena, boss, raiders) = arena(1);
        arena.cast(boss, boss, EMPOWER, true); // 20 → 50 per swing
        arena.update_victim(boss);
        arena.melee_swing_if_ready(boss);
        assert_eq!(arena.get(raiders[0]).unwrap().health, 50);
    }

    #[test]
    fn despawned_units_drop_out_of_combat() {
        let (mut arena, boss, raiders) = arena(1);
        arena.despawn(raiders[0]);
        assert!(!arena.is_alive(raiders[0]));
        assert_eq!(arena.side_alive(Side::Raiders), 0);
        assert_eq!(arena.update_victim(boss), None);
        assert!(arena.take_kills().is_empty()); // despawn is not a kill
    }
}

// ── Event feeds ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod feeds {
    use super::*;
    use ek_core::LineId;

    #[test]
    fn announcements_drain_in_order_with_timestamps() {
        let (mut arena, boss, _) = arena(1);
        arena.announce(boss, LineId(0));
        arena.update(Millis(500));
        arena.announce(boss, LineId(3));

        let lines = arena.take_announcements();
        assert_eq!(lines.len(), 2);
        assert_eq!((lines[0].line, lines[0].at), (LineId(0), Millis::ZERO));
        assert_eq!((lines[1].line, lines[1].at), (LineId(3), Millis(500)));
        assert!(arena.take_announcements().is_empty());
    }

    #[test]
    fn cast_records_carry_the_triggered_flag() {
        let (mut arena, boss, raiders) = arena(1);
        arena.cast(boss, raiders[0], BOLT, true);
        arena.cast(boss, boss, CHANNEL, false);
        let casts = arena.take_casts();
        assert_eq!(casts.len(), 2);
        assert!(casts[0].triggered);
        assert!(!casts[1].triggered);
        assert_eq!(casts[1].caster, boss);
    }
}

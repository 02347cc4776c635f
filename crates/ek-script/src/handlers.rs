//! One free function per action tag, plus the dispatch table.
//!
//! Keeping each handler a standalone function makes every action
//! independently testable: tests build a session, put it in the right
//! state, and invoke the handler directly instead of steering the tick
//! loop onto the path they want.

use ek_arena::{CombatHost, TargetMethod};

use crate::{BossAction, EncounterSession, Phase};

/// A monomorphized action handler.
pub type Handler<H> = fn(&mut EncounterSession, &mut H);

/// The handler for `action`.
pub fn handler<H: CombatHost>(action: BossAction) -> Handler<H> {
    match action {
        BossAction::HealthCheck => health_check::<H>,
        BossAction::Berserk => berserk::<H>,
        BossAction::Bolt => bolt::<H>,
        BossAction::Summon => summon::<H>,
        BossAction::KillCooldown => kill_cooldown::<H>,
    }
}

/// Low-health poll. At or below the threshold the session latches into
/// `Enraged`: the summon cycle is canceled for good, the empower buff goes
/// up, and the check itself stops rescheduling — the latch can never fire
/// twice. Above the threshold it just re-arms.
pub fn health_check<H: CombatHost>(session: &mut EncounterSession, host: &mut H) {
    if session.phase == Phase::Engaged
        && host.health_fraction(session.boss) <= session.config.enrage_health_fraction
    {
        session.phase = Phase::Enraged;
        session.queue.cancel(BossAction::Summon);
        host.cast(session.boss, session.boss, session.config.empower_spell, true);
        host.announce(session.boss, session.config.lines.enrage);
        return;
    }
    session
        .queue
        .schedule(BossAction::HealthCheck, session.config.health_check_interval);
}

/// The hard-enrage deadline. Fires once: it is scheduled only at engage and
/// never reschedules itself. Whatever the unit was casting is cut short so
/// the heavy buff goes up immediately.
pub fn berserk<H: CombatHost>(session: &mut EncounterSession, host: &mut H) {
    host.announce(session.boss, session.config.lines.enrage);
    host.interrupt_cast(session.boss);
    host.cast(session.boss, session.boss, session.config.heavy_spell, true);
}

/// Single-target bolt. Skips past the top of the threat table by a rolled
/// count, so the current tank is never the one hit. A missing target (table
/// too short, everyone out of range) skips the cast silently — the
/// reschedule always happens, at the jittered interval, doubled once the
/// berserk deadline has fired.
pub fn bolt<H: CombatHost>(session: &mut EncounterSession, host: &mut H) {
    let skip = session
        .rng
        .gen_range(session.config.bolt_skip_min..=session.config.bolt_skip_max);
    let target = host.select_target(
        session.boss,
        TargetMethod::MaxThreat { skip },
        Some(session.config.bolt_range),
    );
    if let Some(target) = target {
        host.cast(session.boss, target, session.config.bolt_spell, false);
    }

    let base = session
        .rng
        .millis_between(session.config.bolt_interval_min, session.config.bolt_interval_max);
    let factor = if session.queue.is_scheduled(BossAction::Berserk) {
        1
    } else {
        session.config.post_berserk_bolt_multiplier
    };
    session.queue.schedule(BossAction::Bolt, base * factor);
}

/// Summon cycle. Casts a uniformly chosen variant and pays the configured
/// share of maximum power. If that leaves the pool strictly below the
/// low-power threshold, the unit stalls: recovery channel, every pending
/// action pushed back by the recovery delay, and the next summon scheduled
/// after the same delay. Otherwise the cycle re-arms at the normal interval,
/// with a flavor line at the configured chance.
pub fn summon<H: CombatHost>(session: &mut EncounterSession, host: &mut H) {
    if let Some(&variant) = session.rng.choose(&session.config.summon_spells) {
        host.cast(session.boss, session.boss, variant, false);
    }

    // Cost is a share of maximum power, not current — a drained pool still
    // pays full price (clamped at zero by the host).
    let cost = host.max_power(session.boss) as u64 * session.config.summon_cost_pct as u64 / 100;
    host.modify_power(session.boss, -(cost as i64));

    if host.power_fraction(session.boss) < session.config.low_power_fraction {
        host.announce(session.boss, session.config.lines.recharge);
        host.cast(session.boss, session.boss, session.config.recovery_spell, false);
        session.queue.delay_all(session.config.recovery_delay);
        session
            .queue
            .schedule(BossAction::Summon, session.config.recovery_delay);
    } else {
        if session.rng.gen_bool(session.config.flavor_chance) {
            host.announce(session.boss, session.config.lines.summon);
        }
        session
            .queue
            .schedule(BossAction::Summon, session.config.summon_interval);
    }
}

/// The kill-announcement gate. Popping it does nothing; its pending
/// presence is what mutes the kill line, and only the pop re-opens the
/// gate — a busy stretch that delays pops keeps the gate shut too.
pub fn kill_cooldown<H: CombatHost>(_session: &mut EncounterSession, _host: &mut H) {}

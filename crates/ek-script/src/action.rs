//! Action tags scheduled on the session's event queue.

/// One kind of future action.
///
/// Tags carry no payload: everything a handler needs lives in the session's
/// config or is read from the host when the tag pops. The same tag may sit
/// in the queue more than once; the session's handlers are written so that
/// never happens (each reschedules itself at most once per pop).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BossAction {
    /// Periodic low-health poll; flips the session into `Enraged`.
    HealthCheck,
    /// The hard-enrage deadline. Scheduled once at engage, never again.
    Berserk,
    /// Single-target bolt at a high-threat raider.
    Bolt,
    /// Summon cycle: variant cast, power cost, possible recovery stall.
    Summon,
    /// Pure throttle gate for the kill announcement. Popping it does
    /// nothing; while it is pending the kill line stays muted.
    KillCooldown,
}

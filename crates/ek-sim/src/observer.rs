use ek_arena::{Announcement, CastRecord, KillEvent};
use ek_core::{Millis, UnitId};
use ek_script::Phase;

use crate::runner::EncounterResult;

/// Hooks invoked by [`EncounterRunner::run`](crate::EncounterRunner::run)
/// as the attempt unfolds.
///
/// All methods have empty default bodies, so implementors only override
/// the events they care about. Hooks are called after the tick that
/// produced the event, in world order.
pub trait EncounterObserver {
    /// End of a tick. `elapsed` is total encounter time so far.
    fn on_tick(&mut self, _elapsed: Millis) {}

    /// A unit spoke a scripted line.
    fn on_announcement(&mut self, _announcement: &Announcement) {}

    /// A spell cast started.
    fn on_cast(&mut self, _cast: &CastRecord) {}

    /// A unit died.
    fn on_kill(&mut self, _kill: &KillEvent) {}

    /// A summoned unit entered the arena.
    fn on_summon(&mut self, _unit: UnitId, _at: Millis) {}

    /// The script moved between phases.
    fn on_phase_change(&mut self, _at: Millis, _from: Phase, _to: Phase) {}

    /// The attempt resolved.
    fn on_run_end(&mut self, _result: EncounterResult, _elapsed: Millis) {}
}

/// Observer that ignores every event. Useful for headless batch runs.
pub struct NoopObserver;

impl EncounterObserver for NoopObserver {}

//! The `BossScript` trait — the lifecycle surface a runner drives.

use ek_arena::CombatHost;
use ek_core::{Millis, SpellId, UnitId};

use crate::Phase;

/// One scripted unit's full lifecycle, as seen by a tick-loop driver.
///
/// [`EncounterSession`](crate::EncounterSession) is the provided
/// implementation; custom encounters implement this trait directly when the
/// stock action set does not fit.
///
/// # Calling convention
///
/// The driver owns call ordering. Per tick it advances its world, routes any
/// kill/spawn callbacks that fell out of that, then calls
/// [`update`](Self::update) exactly once. Hooks arriving for a session in
/// the wrong phase are no-ops — the script never panics over a stale
/// callback.
pub trait BossScript {
    /// Enter combat: Idle → Engaged. A no-op in any other phase.
    fn engage<H: CombatHost>(&mut self, host: &mut H);

    /// One controller tick of `diff` simulated milliseconds.
    fn update<H: CombatHost>(&mut self, host: &mut H, diff: Millis);

    /// The scripted unit landed a killing blow on `victim`.
    fn on_kill<H: CombatHost>(&mut self, host: &mut H, victim: UnitId);

    /// A summon owned by this script entered the world.
    fn on_summoned<H: CombatHost>(&mut self, host: &mut H, summon: UnitId);

    /// The scripted unit died: any live phase → Defeated.
    fn on_death<H: CombatHost>(&mut self, host: &mut H);

    /// Abandon the attempt and return to Idle from any phase.
    fn reset<H: CombatHost>(&mut self, host: &mut H);

    /// Current phase.
    fn phase(&self) -> Phase;

    /// The unit this script controls.
    fn boss(&self) -> UnitId;

    /// Every spell id the script may cast, so a driver can check they all
    /// resolve before the encounter starts.
    fn spells(&self) -> Vec<SpellId>;
}

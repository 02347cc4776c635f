//! Bookkeeping for units the script has summoned.

use ek_arena::CombatHost;
use ek_core::UnitId;

/// The set of live summons owned by one session.
///
/// The session registers every summon it is told about and despawns the
/// whole roster on death or reset, so no summon outlives its encounter
/// attempt.
#[derive(Default, Debug)]
pub struct SummonRoster {
    ids: Vec<UnitId>,
}

impl SummonRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a freshly spawned summon. Re-registering an id is a no-op.
    pub fn register(&mut self, id: UnitId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    /// Despawn every tracked summon and forget the lot.
    pub fn despawn_all<H: CombatHost>(&mut self, host: &mut H) {
        for id in self.ids.drain(..) {
            host.despawn(id);
        }
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

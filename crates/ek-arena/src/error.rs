use ek_core::{SpellId, UnitId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("unit {0} has zero maximum health")]
    ZeroHealth(UnitId),

    #[error("unit {0} has a zero swing period")]
    ZeroSwingPeriod(UnitId),

    #[error("spell {0} registered twice")]
    DuplicateSpell(SpellId),
}

pub type ArenaResult<T> = Result<T, ArenaError>;

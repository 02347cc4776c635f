//! `ek-arena` — the combat-host boundary and an in-memory reference arena.
//!
//! Encounter scripts (ek-script) never touch world state directly: every
//! query and effect goes through the [`CombatHost`] trait, and the host
//! answers from its authoritative state.  This crate defines that boundary
//! and ships [`Arena`], a deliberately small single-threaded implementation
//! used by the runner, the tests, and the demos.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`host`]    | `CombatHost` trait, `TargetMethod`                       |
//! | [`unit`]    | `Unit`, `Side`, `Pos2`, `CastState`, `MELEE_RANGE`       |
//! | [`spell`]   | `School`, `SpellDef`, `SpellEffect`, `SummonProto`       |
//! | [`arena`]   | `Arena` + `Announcement`/`CastRecord`/`KillEvent` feeds  |
//! | [`builder`] | `ArenaBuilder`, `UnitSpec`                               |
//! | [`error`]   | `ArenaError`, `ArenaResult<T>`                           |
//!
//! # Scope
//!
//! Combat math stays trivial on purpose — flat damage, threat equals damage
//! dealt.  The arena exists to exercise encounter scripts, not to model
//! balance.

pub mod arena;
pub mod builder;
pub mod error;
pub mod host;
pub mod spell;
pub mod unit;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use arena::{Announcement, Arena, CastRecord, KillEvent};
pub use builder::{ArenaBuilder, UnitSpec};
pub use error::{ArenaError, ArenaResult};
pub use host::{CombatHost, TargetMethod};
pub use spell::{School, SpellDef, SpellEffect, SummonProto};
pub use unit::{CastState, Pos2, Side, Unit, MELEE_RANGE};

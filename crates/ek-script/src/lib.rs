//! `ek-script` — the scripted-agent controller.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`phase`]    | `Phase` (the encounter state machine)                         |
//! | [`action`]   | `BossAction` (the timed action tags)                          |
//! | [`config`]   | `ScriptConfig`, `ScriptLines` (timings, thresholds, ids)      |
//! | [`roster`]   | `SummonRoster` (live-summon bookkeeping)                      |
//! | [`script`]   | `BossScript` (the lifecycle trait the runner drives)          |
//! | [`session`]  | `EncounterSession` (one encounter attempt's state)            |
//! | [`handlers`] | one free function per action tag + the dispatch table         |
//! | [`error`]    | `ScriptError`, `ScriptResult<T>`                              |
//!
//! # The controller loop
//!
//! A host game loop drives the session once per tick through
//! [`BossScript::update`]. Each tick runs five fixed steps:
//!
//! 1. Require a victim (`update_victim`); without one the tick ends and the
//!    action clock does not move.
//! 2. Advance the action queue clock by the tick delta.
//! 3. If the unit is busy with an uninterruptible activity, skip step 4 —
//!    pending actions hold, already-due actions wait.
//! 4. Pop at most one due action and dispatch it through the handler table.
//! 5. Attempt a melee swing. This runs even on busy ticks.
//!
//! All world reads and effects go through the
//! [`CombatHost`](ek_arena::CombatHost) boundary; the session owns only its
//! phase, queue, RNG, and summon roster.

pub mod action;
pub mod config;
pub mod error;
pub mod handlers;
pub mod phase;
pub mod roster;
pub mod script;
pub mod session;


pub use action::BossAction;
pub use config::{ScriptConfig, ScriptLines};
pub use error::{ScriptError, ScriptResult};
pub use phase::Phase;
pub use roster::SummonRoster;
pub use script::BossScript;
pub use session::EncounterSession;

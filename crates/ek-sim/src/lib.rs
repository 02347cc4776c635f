//! Encounter runner: drives an [`ek_script::BossScript`] against an
//! [`ek_arena::Arena`] on a fixed tick until the attempt resolves.
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | `runner`     | [`EncounterRunner`], [`RunConfig`], [`RunReport`]     |
//! | `observer`   | [`EncounterObserver`] hook trait, [`NoopObserver`]    |
//! | `transcript` | [`RecordingObserver`], CSV transcript/report writers  |
//! | `batch`      | [`run_batch`] over a list of seeds                    |
//! | `error`      | [`SimError`], [`SimResult`]                           |
//!
//! # The tick loop
//!
//! Each tick the runner advances the world first, then the controller,
//! then routes whatever the world produced back into the script:
//!
//! 1. `arena.update(tick)` — timers, regeneration, raider swings.
//! 2. Kill events from the world tick. The scripted unit dying ends the
//!    attempt as a [`EncounterResult::Victory`] before its controller
//!    runs again.
//! 3. `script.update(arena, tick)`.
//! 4. Kill and spawn events from the controller's own actions; fresh
//!    spawns are handed to [`ek_script::BossScript::on_summoned`].
//! 5. Announcements, cast records, and phase changes go to the observer.
//! 6. Outcome checks: no raider left alive is a wipe (the script resets),
//!    and the configured time limit turns into a timeout.
//!
//! The run is deterministic for a given arena, script, and seed:
//! identical inputs replay tick for tick.

pub mod batch;
pub mod error;
pub mod observer;
pub mod runner;
pub mod transcript;


pub use batch::run_batch;
pub use error::{SimError, SimResult};
pub use observer::{EncounterObserver, NoopObserver};
pub use runner::{EncounterResult, EncounterRunner, RunConfig, RunReport};
pub use transcript::{RecordingObserver, Transcript, TranscriptRow, write_batch_report};

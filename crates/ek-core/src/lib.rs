//! `ek-core` — foundational types for the `rust_ek` encounter kit.
//!
//! This crate is a dependency of every other `ek-*` crate.  It intentionally
//! has no `ek-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module   | Contents                                    |
//! |----------|---------------------------------------------|
//! | [`ids`]  | `UnitId`, `SpellId`, `LineId`               |
//! | [`time`] | `Millis`, `EncounterClock`                  |
//! | [`rng`]  | `EncounterRng` (seeded, deterministic)      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::{LineId, SpellId, UnitId};
pub use rng::EncounterRng;
pub use time::{EncounterClock, Millis};

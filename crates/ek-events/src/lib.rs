//! `ek-events` — the timed action queue driving scripted encounters.
//!
//! # Crate layout
//!
//! | Module    | Contents                                      |
//! |-----------|-----------------------------------------------|
//! | [`queue`] | `EventQueue<T>` (`BTreeMap<Millis, Vec<T>>`)  |
//!
//! # Contract (summary)
//!
//! The queue holds tagged entries due at absolute fire times and owns its
//! own elapsed-time clock:
//!
//! ```text
//! schedule(tag, delay)   entry due at now + delay; duplicates allowed
//! cancel(tag)            drop every pending entry with the tag
//! delay_all(offset)      shift every pending fire time by offset
//! advance(diff)          move the clock forward one controller tick
//! pop_due()              earliest due entry, FIFO among equal fire times
//! time_until_due(tag)    remaining delay for the soonest entry, if any
//! ```
//!
//! The clock only advances when the owner calls `advance` — a controller
//! that skips a tick (no victim) freezes its pending timeline with it.

pub mod queue;

#[cfg(test)]
mod tests;

pub use queue::EventQueue;

//! `EventQueue` — tagged future actions on a millisecond timeline.
//!
//! # Why this exists
//!
//! A scripted unit juggles several future actions at once (the next bolt,
//! the next summon, a berserk deadline, a periodic health check) whose
//! delays are rescheduled, shifted, and canceled as the fight evolves.
//! Hand-rolled countdown fields turn into a thicket of `if timer <= diff`
//! blocks; the queue centralizes them behind schedule/cancel/pop.
//!
//! # Representation
//!
//! Entries are stored at absolute fire times in a `BTreeMap<Millis, Vec<T>>`
//! keyed by `now + delay`, with one internal clock that `advance` moves
//! forward.  Observably identical to decrementing a counter per entry, but
//! `delay_all` is a single map rebuild and the next due entry is always the
//! first key.
//!
//! # Performance note
//!
//! `BTreeMap` gives O(log W) insert and pop where W = number of distinct
//! pending fire times.  A boss script keeps W under ten, so the constant
//! is tiny.

use std::collections::BTreeMap;

use ek_core::{EncounterClock, Millis};

/// A priority queue mapping absolute fire times → action tags due then.
///
/// `T` is the caller's action tag type — any small `Copy + Eq` value
/// (typically a fieldless enum).  The same tag may be scheduled more than
/// once; entries are not deduplicated.  Callers that want replace-semantics
/// cancel before scheduling.
pub struct EventQueue<T> {
    inner: BTreeMap<Millis, Vec<T>>,
    clock: EncounterClock,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self {
            inner: BTreeMap::new(),
            clock: EncounterClock::new(),
            total: 0,
        }
    }
}

impl<T: Copy + Eq> EventQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The queue's own elapsed time.  Advances only via [`advance`].
    ///
    /// [`advance`]: EventQueue::advance
    #[inline]
    pub fn now(&self) -> Millis {
        self.clock.elapsed
    }

    /// Move the clock forward by one controller tick's delta.
    ///
    /// Entries whose fire time the clock passes become due; they stay queued
    /// until popped.
    #[inline]
    pub fn advance(&mut self, diff: Millis) {
        self.clock.advance(diff);
    }

    /// Schedule `tag` to fire `delay` from now.
    ///
    /// Insertion order is preserved among entries with the same fire time,
    /// so equal-delay schedules pop in the order they were made.
    pub fn schedule(&mut self, tag: T, delay: Millis) {
        let fire = self.clock.elapsed + delay;
        self.inner.entry(fire).or_default().push(tag);
        self.total += 1;
    }

    /// Remove every pending entry with `tag`.
    ///
    /// A no-op when the tag is not scheduled; canceling twice is safe.
    pub fn cancel(&mut self, tag: T) {
        let mut removed = 0;
        self.inner.retain(|_, tags| {
            let before = tags.len();
            tags.retain(|t| *t != tag);
            removed += before - tags.len();
            !tags.is_empty()
        });
        self.total -= removed;
    }

    /// Push every pending fire time back by exactly `offset`.
    ///
    /// Relative order is unchanged: all keys shift by the same amount, so
    /// no two slots can collide or reorder.
    pub fn delay_all(&mut self, offset: Millis) {
        if offset == Millis::ZERO {
            return;
        }
        self.inner = std::mem::take(&mut self.inner)
            .into_iter()
            .map(|(fire, tags)| (fire + offset, tags))
            .collect();
    }

    /// Remove and return the earliest due entry (fire time ≤ now), or `None`
    /// when nothing is due yet.
    ///
    /// Among entries sharing a fire time, the one scheduled first pops
    /// first.  At most one entry is returned per call; callers that drain
    /// everything due loop until `None`.
    pub fn pop_due(&mut self) -> Option<T> {
        let mut slot = self.inner.first_entry()?;
        if *slot.key() > self.clock.elapsed {
            return None;
        }
        let tags = slot.get_mut();
        let tag = tags.remove(0);
        if tags.is_empty() {
            slot.remove();
        }
        self.total -= 1;
        Some(tag)
    }

    /// Remaining delay before the soonest entry with `tag` fires, saturating
    /// at zero for entries already due.  `None` when the tag is not
    /// scheduled.  Non-consuming.
    pub fn time_until_due(&self, tag: T) -> Option<Millis> {
        self.inner
            .iter()
            .find(|(_, tags)| tags.contains(&tag))
            .map(|(&fire, _)| self.clock.elapsed.until(fire))
    }

    /// `true` while at least one entry with `tag` is pending.
    pub fn is_scheduled(&self, tag: T) -> bool {
        self.inner.values().any(|tags| tags.contains(&tag))
    }

    /// Absolute fire time of the earliest pending entry, or `None` if empty.
    pub fn next_fire_time(&self) -> Option<Millis> {
        self.inner.keys().next().copied()
    }

    /// Total pending entries across all fire times.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Drop every pending entry and rewind the clock to zero, leaving the
    /// queue as if freshly built.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.clock = EncounterClock::new();
        self.total = 0;
    }
}

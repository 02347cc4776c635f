//! Unit tests for the event queue.

use ek_core::{EncounterRng, Millis};

use crate::EventQueue;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Action tags standing in for a script's action set.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Tag {
    A,
    B,
    C,
}

fn queue() -> EventQueue<Tag> {
    EventQueue::new()
}

// ── Scheduling and popping ────────────────────────────────────────────────────

#[cfg(test)]
mod popping {
    use super::*;

    #[test]
    fn nothing_due_on_fresh_queue() {
        let mut q = queue();
        assert!(q.pop_due().is_none());
        q.schedule(Tag::A, Millis(100));
        assert!(q.pop_due().is_none());
    }

    #[test]
    fn fires_at_exact_boundary() {
        // Schedule at 1000; 999 elapsed → nothing; 1 more → fires.
        let mut q = queue();
        q.schedule(Tag::A, Millis(1_000));
        q.advance(Millis(999));
        assert!(q.pop_due().is_none());
        q.advance(Millis(1));
        assert_eq!(q.pop_due(), Some(Tag::A));
        assert!(q.is_empty());
    }

    #[test]
    fn pops_only_due_entries() {
        // A at 3000, B at 5000; advancing 3000 yields A alone.
        let mut q = queue();
        q.schedule(Tag::A, Millis(3_000));
        q.schedule(Tag::B, Millis(5_000));
        q.advance(Millis(3_000));
        assert_eq!(q.pop_due(), Some(Tag::A));
        assert!(q.pop_due().is_none());
        q.advance(Millis(2_000));
        assert_eq!(q.pop_due(), Some(Tag::B));
    }

    #[test]
    fn earliest_fire_time_pops_first() {
        let mut q = queue();
        q.schedule(Tag::B, Millis(200));
        q.schedule(Tag::A, Millis(100));
        q.advance(Millis(200));
        assert_eq!(q.pop_due(), Some(Tag::A));
        assert_eq!(q.pop_due(), Some(Tag::B));
    }

    #[test]
    fn fifo_among_equal_fire_times() {
        let mut q = queue();
        q.schedule(Tag::C, Millis(50));
        q.schedule(Tag::A, Millis(50));
        q.schedule(Tag::B, Millis(50));
        q.advance(Millis(50));
        assert_eq!(q.pop_due(), Some(Tag::C));
        assert_eq!(q.pop_due(), Some(Tag::A));
        assert_eq!(q.pop_due(), Some(Tag::B));
    }

    #[test]
    fn overdue_entries_stay_until_popped() {
        // Nothing expires silently: an entry long past due still pops.
        let mut q = queue();
        q.schedule(Tag::A, Millis(10));
        q.advance(Millis(10_000));
        assert_eq!(q.pop_due(), Some(Tag::A));
    }

    #[test]
    fn duplicate_tags_coexist() {
        let mut q = queue();
        q.schedule(Tag::A, Millis(100));
        q.schedule(Tag::A, Millis(200));
        assert_eq!(q.len(), 2);
        q.advance(Millis(200));
        assert_eq!(q.pop_due(), Some(Tag::A));
        assert_eq!(q.pop_due(), Some(Tag::A));
        assert!(q.pop_due().is_none());
    }

    #[test]
    fn never_fires_early_randomized() {
        // Walk the clock toward a random due time in uneven steps; the entry
        // must never surface before the boundary and always at it.
        let mut rng = EncounterRng::new(0xEC0);
        for _ in 0..200 {
            let mut q = queue();
            let delay = rng.millis_between(Millis(1), Millis(10_000));
            q.schedule(Tag::A, delay);

            let mut elapsed = 0u64;
            while elapsed < delay.0 {
                let step = rng.gen_range(1..=137u64).min(delay.0 - elapsed);
                q.advance(Millis(step));
                elapsed += step;
                if elapsed < delay.0 {
                    assert!(q.pop_due().is_none(), "fired at {elapsed} < {delay}");
                }
            }
            assert_eq!(q.pop_due(), Some(Tag::A));
        }
    }
}

// ── Cancellation ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod cancel {
    use super::*;

    #[test]
    fn canceled_tag_never_pops() {
        let mut q = queue();
        q.schedule(Tag::A, Millis(100));
        q.schedule(Tag::B, Millis(100));
        q.cancel(Tag::A);
        q.advance(Millis(100));
        assert_eq!(q.pop_due(), Some(Tag::B));
        assert!(q.pop_due().is_none());
    }

    #[test]
    fn cancel_removes_all_duplicates() {
        let mut q = queue();
        q.schedule(Tag::A, Millis(100));
        q.schedule(Tag::A, Millis(300));
        q.schedule(Tag::A, Millis(500));
        q.cancel(Tag::A);
        assert!(q.is_empty());
        q.advance(Millis(1_000));
        assert!(q.pop_due().is_none());
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut q = queue();
        q.schedule(Tag::A, Millis(100));
        q.cancel(Tag::A);
        q.cancel(Tag::A);
        q.cancel(Tag::B); // never scheduled
        assert!(q.is_empty());
    }

    #[test]
    fn cancel_then_reschedule() {
        let mut q = queue();
        q.schedule(Tag::A, Millis(100));
        q.cancel(Tag::A);
        q.schedule(Tag::A, Millis(400));
        q.advance(Millis(100));
        assert!(q.pop_due().is_none());
        q.advance(Millis(300));
        assert_eq!(q.pop_due(), Some(Tag::A));
    }
}

// ── delay_all ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod delay_all {
    use super::*;

    #[test]
    fn shifts_by_exact_offset() {
        let mut q = queue();
        q.schedule(Tag::A, Millis(1_000));
        q.delay_all(Millis(500));
        assert_eq!(q.time_until_due(Tag::A), Some(Millis(1_500)));
        q.advance(Millis(1_499));
        assert!(q.pop_due().is_none());
        q.advance(Millis(1));
        assert_eq!(q.pop_due(), Some(Tag::A));
    }

    #[test]
    fn preserves_relative_order() {
        let mut q = queue();
        q.schedule(Tag::A, Millis(100));
        q.schedule(Tag::B, Millis(200));
        q.schedule(Tag::C, Millis(300));
        q.delay_all(Millis(20_000));
        q.advance(Millis(20_300));
        assert_eq!(q.pop_due(), Some(Tag::A));
        assert_eq!(q.pop_due(), Some(Tag::B));
        assert_eq!(q.pop_due(), Some(Tag::C));
    }

    #[test]
    fn zero_offset_is_noop() {
        let mut q = queue();
        q.schedule(Tag::A, Millis(100));
        q.delay_all(Millis::ZERO);
        assert_eq!(q.time_until_due(Tag::A), Some(Millis(100)));
    }

    #[test]
    fn applies_to_overdue_entries_too() {
        // An entry already due gets pushed back out of due-ness.
        let mut q = queue();
        q.schedule(Tag::A, Millis(100));
        q.advance(Millis(100));
        q.delay_all(Millis(500));
        assert!(q.pop_due().is_none());
        q.advance(Millis(500));
        assert_eq!(q.pop_due(), Some(Tag::A));
    }
}

// ── Queries ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod queries {
    use super::*;

    #[test]
    fn time_until_due_counts_down() {
        let mut q = queue();
        q.schedule(Tag::A, Millis(1_000));
        assert_eq!(q.time_until_due(Tag::A), Some(Millis(1_000)));
        q.advance(Millis(400));
        assert_eq!(q.time_until_due(Tag::A), Some(Millis(600)));
        assert_eq!(q.time_until_due(Tag::B), None);
    }

    #[test]
    fn time_until_due_saturates_at_zero() {
        let mut q = queue();
        q.schedule(Tag::A, Millis(100));
        q.advance(Millis(5_000));
        assert_eq!(q.time_until_due(Tag::A), Some(Millis::ZERO));
    }

    #[test]
    fn time_until_due_reports_soonest_duplicate() {
        let mut q = queue();
        q.schedule(Tag::A, Millis(800));
        q.schedule(Tag::A, Millis(300));
        assert_eq!(q.time_until_due(Tag::A), Some(Millis(300)));
    }

    #[test]
    fn is_scheduled_tracks_lifecycle() {
        let mut q = queue();
        assert!(!q.is_scheduled(Tag::A));
        q.schedule(Tag::A, Millis(100));
        assert!(q.is_scheduled(Tag::A));
        q.advance(Millis(100));
        assert!(q.is_scheduled(Tag::A)); // due but not yet popped
        q.pop_due();
        assert!(!q.is_scheduled(Tag::A));
    }

    #[test]
    fn next_fire_time_is_earliest_key() {
        let mut q = queue();
        assert!(q.next_fire_time().is_none());
        q.schedule(Tag::B, Millis(700));
        q.schedule(Tag::A, Millis(200));
        assert_eq!(q.next_fire_time(), Some(Millis(200)));
    }

    #[test]
    fn len_counts_entries_not_slots() {
        let mut q = queue();
        q.schedule(Tag::A, Millis(100));
        q.schedule(Tag::B, Millis(100));
        q.schedule(Tag::C, Millis(200));
        assert_eq!(q.len(), 3);
        q.advance(Millis(100));
        q.pop_due();
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn clear_rewinds_everything() {
        let mut q = queue();
        q.schedule(Tag::A, Millis(100));
        q.advance(Millis(50));
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.now(), Millis::ZERO);
        assert!(q.next_fire_time().is_none());
    }

    #[test]
    fn clock_freezes_between_advances() {
        let mut q = queue();
        q.schedule(Tag::A, Millis(100));
        assert_eq!(q.now(), Millis::ZERO);
        // No advance calls → repeated queries see the same frozen state.
        for _ in 0..10 {
            assert!(q.pop_due().is_none());
            assert_eq!(q.time_until_due(Tag::A), Some(Millis(100)));
        }
    }
}

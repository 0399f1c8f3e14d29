//! SparseSet generational handle tests.
//!
//! These tests verify correct behavior of the generational SparseSet,
//! including generation counter increments, use-after-free detection,
//! and memory reuse.

use bramble_core::alloc::sparse_set::{IndexSlot, SparseSet};

#[test]
fn test_push_and_get() {
    let mut set = SparseSet::new();

    let idx = set.push(42);
    assert_eq!(*set.get(idx), 42);

    let idx2 = set.push(100);
    assert_eq!(*set.get(idx2), 100);

    // Original value should still be accessible
    assert_eq!(*set.get(idx), 42);
}

#[test]
fn test_get_mut() {
    let mut set = SparseSet::new();

    let idx = set.push(42);
    *set.get_mut(idx) = 100;

    assert_eq!(*set.get(idx), 100);
}

#[test]
fn test_try_get_invalid_returns_none() {
    let set = SparseSet::<i32>::new();

    let invalid = IndexSlot::new(0, 999);
    assert_eq!(set.try_get(invalid), None);
}

#[test]
#[should_panic(expected = "invalid generation")]
fn test_use_after_free_panics() {
    let mut set = SparseSet::new();

    let idx = set.push(42);
    set.remove(idx);

    let _ = set.get(idx);
}

#[test]
fn test_try_remove_twice() {
    let mut set = SparseSet::new();

    let idx = set.push("a");
    assert_eq!(set.try_remove(idx), Some("a"));
    assert_eq!(set.try_remove(idx), None);
    assert!(set.is_empty());
}

#[test]
fn test_stale_handle_does_not_alias_reused_slot() {
    let mut set = SparseSet::new();

    let old = set.push(1);
    set.remove(old);
    let new = set.push(2);

    assert_eq!(old.index(), new.index());
    assert_eq!(set.try_get(old), None);
    assert_eq!(set.try_get(new), Some(&2));
    assert_ne!(old.to_bits(), new.to_bits());
}

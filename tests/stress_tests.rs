//! Stress tests that push the heap through large operation counts
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load.

use rust_fibonacci_heap::{Direction, FibonacciHeap, HeapError};

/// Deterministic pseudo-random sequence so failures reproduce
struct Lcg(u64);

impl Lcg {
    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }
}

#[test]
fn test_massive_operations() {
    let mut heap = FibonacciHeap::new();
    for i in 0..10_000 {
        heap.enqueue(i, i);
    }
    assert_eq!(heap.len(), 10_000);

    for i in 0..10_000 {
        assert_eq!(heap.dequeue(), Ok((i, i)));
    }
    assert!(heap.is_empty());
}

#[test]
fn test_many_decrease_keys() {
    let mut heap = FibonacciHeap::new();
    let handles: Vec<_> = (0..2_000).map(|i| heap.enqueue(100_000 + i, i)).collect();
    heap.enqueue(-1, -1);
    heap.dequeue().unwrap();

    // Reverse order maximizes cuts out of the consolidated trees
    for (i, handle) in handles.iter().enumerate().rev() {
        heap.change_key(handle, i as i32).unwrap();
    }
    heap.check_invariants().unwrap();

    for i in 0..2_000 {
        assert_eq!(heap.dequeue(), Ok((i, i)));
    }
}

#[test]
fn test_alternating_ops() {
    let mut heap = FibonacciHeap::new();
    for i in 0..2_000 {
        heap.enqueue(i * 2, i);
        heap.enqueue(i * 2 + 1, i + 100_000);
        assert!(heap.pop().is_some());
    }
    assert_eq!(heap.len(), 2_000);
    heap.check_invariants().unwrap();

    let drained: Vec<i32> = heap.into_sorted().map(|(p, _)| p).collect();
    assert!(drained.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_large_merge() {
    let mut heap1 = FibonacciHeap::new();
    let mut heap2 = FibonacciHeap::new();
    for i in 0..5_000 {
        heap1.enqueue(i * 2, i);
        heap2.enqueue(i * 2 + 1, i);
    }
    heap1.dequeue().unwrap();
    heap2.dequeue().unwrap();

    heap1.merge(&mut heap2).unwrap();
    assert_eq!(heap1.len(), 9_998);
    heap1.check_invariants().unwrap();

    for expected in 2..10_000 {
        assert_eq!(heap1.dequeue().map(|(p, _)| p), Ok(expected));
    }
}

#[test]
fn test_many_small_merges() {
    let mut total = FibonacciHeap::with_direction(Direction::Decreasing);
    let mut handles = Vec::new();
    for batch in 0..500 {
        let mut part = FibonacciHeap::with_direction(Direction::Decreasing);
        for j in 0..4 {
            handles.push(part.enqueue(batch * 4 + j, ()));
        }
        total.merge(&mut part).unwrap();
    }
    assert_eq!(total.len(), 2_000);

    // every handle resolves through its chain of merged owners
    for (i, handle) in handles.iter().enumerate().step_by(7) {
        total.change_key(handle, 10_000 + i as i32).unwrap();
    }
    assert_eq!(total.dequeue().map(|(p, _)| p), Ok(10_000 + 1_995));
    total.check_invariants().unwrap();
}

#[test]
fn test_random_mixed_workload() {
    let mut rng = Lcg(0x5eed);
    let mut heap = FibonacciHeap::new();
    let mut handles = Vec::new();
    let mut live = 0usize;

    for step in 0..50_000u32 {
        match rng.below(10) {
            0..=3 => {
                handles.push(heap.enqueue(rng.below(1_000_000) as i64, step));
                live += 1;
            }
            4..=5 => {
                let removed = heap.dequeue().is_ok();
                live -= usize::from(removed);
            }
            6..=8 if !handles.is_empty() => {
                let handle = &handles[rng.below(handles.len() as u64) as usize];
                let target = rng.below(1_000_000) as i64 - 500_000;
                match heap.change_key(handle, target) {
                    Ok(()) => {}
                    Err(e) => assert_eq!(e, HeapError::InvalidHandle),
                }
            }
            _ if !handles.is_empty() => {
                let handle = &handles[rng.below(handles.len() as u64) as usize];
                let removed = heap.delete(handle).is_ok();
                live -= usize::from(removed);
            }
            _ => {}
        }
        assert_eq!(heap.len(), live);
        if step % 5_000 == 0 {
            heap.check_invariants().unwrap();
        }
    }

    heap.check_invariants().unwrap();
    let drained: Vec<i64> = heap.into_sorted().map(|(p, _)| p).collect();
    assert_eq!(drained.len(), live);
    assert!(drained.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_large_priorities() {
    let mut heap = FibonacciHeap::new();
    let values = [i64::MAX, i64::MIN, 0, i64::MAX - 1, i64::MIN + 1];
    for (i, v) in values.iter().enumerate() {
        heap.enqueue(*v, i);
    }
    assert_eq!(heap.dequeue(), Ok((i64::MIN, 1)));
    assert_eq!(heap.dequeue(), Ok((i64::MIN + 1, 4)));
    assert_eq!(heap.dequeue(), Ok((0, 2)));
    assert_eq!(heap.dequeue(), Ok((i64::MAX - 1, 3)));
    assert_eq!(heap.dequeue(), Ok((i64::MAX, 0)));
}

#[test]
fn test_deep_cascades() {
    // Cut half of the cells out of the consolidated trees each round so marks
    // accumulate and cascades climb several levels.
    let mut heap = FibonacciHeap::new();
    let handles: Vec<_> = (0..4_096).map(|i| heap.enqueue(i, i)).collect();
    heap.enqueue(-1, -1);
    heap.dequeue().unwrap();

    for round in 0..4i32 {
        for (i, handle) in handles.iter().enumerate() {
            if i % 2 == round as usize % 2 && !handle.is_removed() {
                heap.change_key(handle, -(i as i32) - round * 10_000).unwrap();
            }
        }
        heap.check_invariants().unwrap();
        for _ in 0..64 {
            heap.dequeue().unwrap();
        }
        heap.check_invariants().unwrap();
    }
}

#[test]
fn test_long_merge_chain_drops_cleanly() {
    // each step hands the whole heap to a fresh one, so ownership forwards
    // through one tag per merge
    let mut acc = FibonacciHeap::new();
    let first = acc.enqueue(1, 1);
    for _ in 0..500_000 {
        let mut next = FibonacciHeap::new();
        next.merge(&mut acc).unwrap();
        acc = next;
    }
    assert_eq!(acc.len(), 1);
    assert!(acc.contains(&first));
    drop(acc);
    assert!(first.is_removed());
}

#[test]
fn test_deep_chain_passes_invariant_check() {
    // every round leaves one more cell hanging below the previous tree, so
    // the heap ends up as a chain hundreds of thousands of levels deep
    let mut heap = FibonacciHeap::new();
    heap.enqueue(0i64, 0u32);
    heap.enqueue(1, 1);
    for round in 1..=300_000i64 {
        let base = -3 * round;
        heap.enqueue(base, 0);
        heap.enqueue(base + 1, 1);
        let c = heap.enqueue(base + 2, 2);
        assert_eq!(heap.dequeue().map(|(p, _)| p), Ok(base));
        assert_eq!(heap.delete(&c).map(|(p, _)| p), Ok(base + 2));
    }
    assert_eq!(heap.len(), 300_002);
    heap.check_invariants().unwrap();
    assert_eq!(heap.dequeue().map(|(p, _)| p), Ok(-3 * 300_000 + 1));
}

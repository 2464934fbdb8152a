//! Benchmark workloads for the strand containers.
//!
//! - [`mixed_workload`]: a seeded, push-biased sequence of end operations
//! - [`run_workload`]: replay a workload against any list
//! - [`arena_bytes_for`]: arena capacity needed for a number of nodes

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::mem;

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strand_core::{AllocError, AllocStrategy};
use strand_list::{List, Node};

/// One end operation of a workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    PushFront(u64),
    PushBack(u64),
    PopFront,
    PopBack,
}

/// Generate `len` steps from `seed`.
///
/// Roughly three in five steps push, so the list grows over the run. The
/// same seed always yields the same workload.
pub fn mixed_workload(len: usize, seed: u64) -> Vec<Step> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            let roll = rng.next_u64();
            let value = roll >> 8;
            match roll % 10 {
                0..=2 => Step::PushFront(value),
                3..=5 => Step::PushBack(value),
                6 | 7 => Step::PopFront,
                _ => Step::PopBack,
            }
        })
        .collect()
}

/// Number of pushes in `steps`, i.e. the nodes a non-reclaiming arena must
/// hold to replay it.
pub fn push_count(steps: &[Step]) -> usize {
    steps
        .iter()
        .filter(|s| matches!(s, Step::PushFront(_) | Step::PushBack(_)))
        .count()
}

/// Replay `steps` on `list`, returning a checksum of everything popped.
pub fn run_workload<A>(list: &mut List<u64, A>, steps: &[Step]) -> Result<u64, AllocError>
where
    A: AllocStrategy<Value = u64>,
{
    let mut checksum = 0u64;
    for step in steps {
        match *step {
            Step::PushFront(v) => list.push_front(v)?,
            Step::PushBack(v) => list.push_back(v)?,
            Step::PopFront => checksum = checksum.wrapping_add(list.pop_front().unwrap_or(0)),
            Step::PopBack => checksum = checksum.wrapping_add(list.pop_back().unwrap_or(0)),
        }
    }
    Ok(checksum)
}

/// Arena bytes needed for `nodes` list nodes holding `T`.
pub fn arena_bytes_for<T>(nodes: usize) -> usize {
    nodes * mem::size_of::<Node<T>>()
}

//! Test utilities and instrumented strategies for strand development.
//!
//! - [`CountingAlloc`]: a heap-backed [`AllocStrategy`] that records every
//!   live allocation in a shared ledger, can be told to fail after a
//!   budget, and takes its propagation policy from a type parameter.
//! - [`Flaky`]: an element type whose construction fails (or whose `Clone`
//!   panics) on a chosen attempt, with live-instance accounting.
//!
//! [`AllocStrategy`]: strand_core::AllocStrategy

#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]

#[allow(unsafe_code)]
pub mod counting;
pub mod flaky;

pub use counting::{AlwaysPropagate, CountingAlloc, FreshOnCopy, NeverPropagate, Propagation};
pub use flaky::{ConstructError, Flaky, Tracker};

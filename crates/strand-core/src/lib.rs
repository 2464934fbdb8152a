//! Allocation strategy abstraction for strand containers.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! contract every allocation strategy implements ([`AllocStrategy`]), the
//! shared allocation error type ([`AllocError`]), and the default heap
//! strategy ([`Global`]).
//!
//! # Strategy model
//!
//! ```text
//! List<T, A>
//! └── A::Rebind<Node<T>>   (declared for T, rebound to the node type)
//!     └── backing store    (heap for Global, an Arena for ArenaHandle)
//! ```
//!
//! A strategy handle is a cheap, cloneable *reference* to a backing store.
//! Two handles compare equal iff memory allocated through one may be
//! released through the other. Containers consult the handle's
//! propagation constants to decide whether handle identity follows the
//! elements on copy-assignment, move-assignment and swap.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod error;
#[allow(unsafe_code)]
pub mod global;
#[allow(unsafe_code)]
pub mod strategy;

pub use error::AllocError;
pub use global::Global;
pub use strategy::AllocStrategy;

//! Allocator-aware doubly-linked list for strand.
//!
//! [`List`] stores each element in its own node and obtains every node from
//! an injected [`AllocStrategy`](strand_core::AllocStrategy). The strategy is
//! declared for the element type and rebound to the node type internally, so
//! the same arena handle that serves a `List<u64, _>` can serve any other
//! container.
//!
//! # Guarantees
//!
//! - Element insertion and removal never move or touch other elements, so
//!   references obtained through cursors and iterators stay valid across
//!   edits elsewhere in the list (the borrow checker scopes them).
//! - Every insertion either succeeds or leaves the list unchanged, including
//!   when the strategy runs out of space or an element constructor panics.
//! - Every node is released exactly once, through a handle equal to the one
//!   that allocated it.
//!
//! # Architecture
//!
//! ```text
//! List<T, A>
//! ├── alloc: A::Rebind<Node<T>>
//! ├── len
//! └── sentinel: BaseNode { next, prev }
//!         │                        ▲
//!         ▼                        │
//!     Node { base, value } ⇄ … ⇄ Node { base, value }
//! ```
//!
//! Boundary links use `None` for "the owning list's sentinel", which keeps
//! moving, swapping, and taking a list O(1) with no re-patching.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]

#[allow(unsafe_code)]
pub mod cursor;
pub mod error;
#[allow(unsafe_code)]
pub mod iter;
#[allow(unsafe_code)]
pub mod list;
#[allow(unsafe_code)]
pub mod node;

pub use cursor::{Cursor, CursorMut};
pub use error::ListError;
pub use iter::{IntoIter, Iter, IterMut};
pub use list::{List, NodeAlloc};
pub use node::Node;

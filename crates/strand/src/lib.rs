//! Strand: an allocator-aware linked list with a fixed-buffer bump arena.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! strand sub-crates. For most users, adding `strand` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use strand::prelude::*;
//!
//! // A kilobyte of inline storage, served by a bump arena.
//! let mut storage = StackStorage::<1024>::new();
//! let arena = storage.arena();
//!
//! // Two lists drawing nodes from the same arena.
//! let mut names = List::new_in(arena.handle::<&str>());
//! let mut scores = List::new_in(arena.handle::<u32>());
//! names.push_back("ada").unwrap();
//! names.push_back("grace").unwrap();
//! scores.try_extend([90, 85]).unwrap();
//!
//! let mut cursor = names.cursor_front_mut();
//! cursor.insert_after("linus").unwrap();
//! assert_eq!(names.iter().copied().collect::<Vec<_>>(), ["ada", "linus", "grace"]);
//! assert_eq!(arena.allocation_count(), 5);
//!
//! // The heap strategy is the default.
//! let heap: List<u32> = scores.iter().copied().collect();
//! assert_eq!(heap, scores);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`strategy`] | `strand-core` | `AllocStrategy`, `AllocError`, the `Global` heap strategy |
//! | [`arena`] | `strand-arena` | `Arena`, `ArenaHandle`, storage owners, `ArenaConfig` |
//! | [`list`] | `strand-list` | `List`, cursors, iterators, `ListError` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Strategy trait, allocation errors, and the heap strategy (`strand-core`).
///
/// Implement [`strategy::AllocStrategy`] to plug a custom store into the
/// containers.
pub use strand_core as strategy;

/// Fixed-buffer bump arena (`strand-arena`).
///
/// Own the bytes with [`arena::StackStorage`] or [`arena::ArenaStorage`],
/// then hand [`arena::ArenaHandle`]s to containers.
pub use strand_arena as arena;

/// The doubly-linked list (`strand-list`).
///
/// [`list::List`] with its [`list::Cursor`], [`list::CursorMut`], and
/// iterator types.
pub use strand_list as list;

/// Common imports for typical strand usage.
///
/// ```rust
/// use strand::prelude::*;
/// ```
pub mod prelude {
    // Strategies
    pub use strand_core::{AllocError, AllocStrategy, Global};

    // Arena
    pub use strand_arena::{Arena, ArenaConfig, ArenaHandle, ArenaStorage, StackStorage};

    // List
    pub use strand_list::{Cursor, CursorMut, List, ListError};
}

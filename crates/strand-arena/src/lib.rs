//! Fixed-buffer bump arena for strand containers.
//!
//! An [`Arena`] serves allocation requests from a buffer supplied by its
//! owner by advancing a single offset. Nothing is reclaimed until the arena
//! itself is dropped; `deallocate` is a no-op. Containers reach the arena
//! through [`ArenaHandle`], a `Copy` strategy handle that references (never
//! owns) the arena and can be rebound to any value type.
//!
//! # Architecture
//!
//! ```text
//! StackStorage<N> / ArenaStorage   (owner of the bytes)
//! └── Arena<'buf>                  (bump offset over the borrowed bytes)
//!     └── ArenaHandle<'a, T> × k   (Copy, compare equal iff same Arena)
//! ```
//!
//! # Example
//!
//! ```
//! use strand_arena::{ArenaHandle, StackStorage};
//! use strand_core::AllocStrategy;
//!
//! let mut storage = StackStorage::<256>::new();
//! let arena = storage.arena();
//! let handle: ArenaHandle<'_, u64> = arena.handle();
//!
//! let ptr = handle.allocate(4).unwrap();
//! assert_eq!(ptr.as_ptr() as usize % 8, 0);
//! assert_eq!(arena.used(), 32);
//!
//! let bytes: ArenaHandle<'_, u8> = handle.rebind();
//! assert!(bytes == handle);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]

#[allow(unsafe_code)]
pub mod arena;
pub mod config;
pub mod error;
#[allow(unsafe_code)]
pub mod handle;
pub mod storage;

pub use arena::Arena;
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use handle::ArenaHandle;
pub use storage::{ArenaStorage, StackStorage};

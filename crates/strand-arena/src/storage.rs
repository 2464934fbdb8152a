//! Owned buffers for arenas to run over.
//!
//! [`StackStorage`] is an inline, compile-time sized buffer; [`ArenaStorage`]
//! is a heap buffer sized from an [`ArenaConfig`]. Neither is `Clone`: an
//! arena borrows its buffer exclusively, so a storage value backs at most one
//! live arena at a time.

use std::fmt;
use std::mem::MaybeUninit;

use crate::arena::Arena;
use crate::config::ArenaConfig;
use crate::error::ArenaError;

/// Inline buffer of `N` bytes, aligned to 16.
#[repr(C, align(16))]
pub struct StackStorage<const N: usize> {
    bytes: [MaybeUninit<u8>; N],
}

impl<const N: usize> StackStorage<N> {
    /// Alignment of the first byte.
    pub const ALIGN: usize = 16;

    /// Create an uninitialised buffer.
    pub fn new() -> Self {
        Self {
            bytes: [MaybeUninit::uninit(); N],
        }
    }

    /// Build an arena over the whole buffer.
    pub fn arena(&mut self) -> Arena<'_> {
        Arena::new(&mut self.bytes)
    }

    /// Buffer size in bytes.
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for StackStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for StackStorage<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackStorage").field("capacity", &N).finish()
    }
}

/// Heap buffer built from an [`ArenaConfig`].
///
/// The backing allocation carries `base_align - 1` bytes of slack so the
/// usable window can start on a `base_align` boundary.
pub struct ArenaStorage {
    bytes: Box<[MaybeUninit<u8>]>,
    config: ArenaConfig,
}

impl ArenaStorage {
    /// Allocate a buffer for `config`.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        let len = config.capacity + (config.base_align - 1);
        Ok(Self {
            bytes: vec![MaybeUninit::uninit(); len].into_boxed_slice(),
            config,
        })
    }

    /// Build an arena over the usable window.
    pub fn arena(&mut self) -> Arena<'_> {
        let start = self.bytes.as_ptr().align_offset(self.config.base_align);
        let end = start + self.config.capacity;
        Arena::new(&mut self.bytes[start..end])
    }

    /// Usable size in bytes.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// The config this storage was built from.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }
}

impl fmt::Debug for ArenaStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArenaStorage")
            .field("capacity", &self.config.capacity)
            .field("base_align", &self.config.base_align)
            .finish()
    }
}

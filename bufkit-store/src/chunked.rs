//! Plain chunked storage.
//!
//! [`ChunkedStore`] accumulates typed elements in fixed-capacity chunks.
//! Elements are committed into one *current* chunk; when a commit would not
//! fit, the current chunk is finalized (appended to the chunk sequence,
//! never touched again) and a fresh one is allocated. Finalized chunks keep
//! their insertion order, so merging reproduces exactly the elements
//! committed, in commit order, regardless of the chunk geometry.
//!
//! Growth is amortized: no existing data is ever copied when the store
//! grows, only a new chunk allocation is made. This is what distinguishes
//! the store from a `Vec` — a serializer can stream gigabytes through it
//! without a single reallocation-and-copy of what came before.

use bufkit_core::error::Result;
use bufkit_core::stream::ByteStream;
use bufkit_core::traits::ChunkSink;

/// Default chunk capacity, in elements.
pub const DEFAULT_CHUNK_LEN: usize = 4096;

/// A finalized chunk: storage plus the count of elements actually used.
#[derive(Debug)]
struct Chunk<T> {
    data: Box<[T]>,
    fullness: usize,
}

/// Growable chunk-backed element storage.
///
/// See the [module docs](self) for the storage model.
#[derive(Debug)]
pub struct ChunkedStore<T> {
    /// Finalized chunks, in insertion order.
    chunks: Vec<Chunk<T>>,
    /// Capacity used for fresh chunks unless a larger one is requested.
    default_len: usize,
    /// Total elements across finalized chunks.
    finalized_len: usize,
    /// The chunk currently being filled.
    current: Box<[T]>,
    /// Elements used within `current`; never exceeds `current.len()`.
    fullness: usize,
}

impl<T: Copy + Default> ChunkedStore<T> {
    /// Create a store with the given default chunk capacity.
    ///
    /// # Panics
    ///
    /// Panics if `default_chunk_len` is zero.
    pub fn new(default_chunk_len: usize) -> Self {
        assert!(
            default_chunk_len > 0,
            "Chunk capacity must be greater than 0"
        );

        Self {
            chunks: Vec::new(),
            default_len: default_chunk_len,
            finalized_len: 0,
            current: vec![T::default(); default_chunk_len].into_boxed_slice(),
            fullness: 0,
        }
    }

    /// Total elements committed, across finalized chunks and the current one.
    pub fn total_len(&self) -> usize {
        self.finalized_len + self.fullness
    }

    /// Whether nothing has been committed yet.
    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }

    /// Number of finalized chunks.
    pub fn finalized_chunks(&self) -> usize {
        self.chunks.len()
    }

    /// Capacity of the current chunk, in elements.
    pub fn chunk_capacity(&self) -> usize {
        self.current.len()
    }

    /// Free element slots left in the current chunk.
    pub fn remaining(&self) -> usize {
        self.current.len() - self.fullness
    }

    /// Commit one element, rotating first if the current chunk is full.
    pub fn push(&mut self, item: T) {
        if self.remaining() == 0 {
            self.rotate();
        }
        self.current[self.fullness] = item;
        self.fullness += 1;
    }

    /// Commit a slice of elements contiguously, rotating as needed.
    ///
    /// A slice that does not fit in the remaining space rotates into a
    /// fresh chunk sized for the slice (never below the default capacity),
    /// so the commit is always contiguous.
    pub fn extend_from_slice(&mut self, items: &[T]) {
        if items.is_empty() {
            return;
        }

        if items.len() > self.remaining() {
            self.rotate_with_capacity(items.len());
        }

        self.current[self.fullness..self.fullness + items.len()].copy_from_slice(items);
        self.fullness += items.len();
    }

    /// Finalize the current chunk and start a fresh default-capacity one.
    ///
    /// An empty current chunk is discarded instead of finalized.
    pub fn rotate(&mut self) {
        self.rotate_with_capacity(self.default_len);
    }

    /// Finalize the current chunk and start a fresh one holding at least
    /// `capacity` elements (never less than the default capacity).
    pub fn rotate_with_capacity(&mut self, capacity: usize) {
        let capacity = capacity.max(self.default_len);
        let fresh = vec![T::default(); capacity].into_boxed_slice();
        let retired = std::mem::replace(&mut self.current, fresh);

        if self.fullness != 0 {
            self.finalized_len += self.fullness;
            self.chunks.push(Chunk {
                data: retired,
                fullness: self.fullness,
            });
            self.fullness = 0;
        }
    }

    /// Iterate the committed elements as slices: finalized chunks in
    /// insertion order, then the current chunk's live prefix.
    pub fn chunk_slices(&self) -> impl Iterator<Item = &[T]> {
        self.chunks
            .iter()
            .map(|chunk| &chunk.data[..chunk.fullness])
            .chain(std::iter::once(&self.current[..self.fullness]))
    }

    /// Collect every committed element into one contiguous vector.
    pub fn merge_to_vec(&self) -> Vec<T> {
        let mut merged = Vec::with_capacity(self.total_len());
        for slice in self.chunk_slices() {
            merged.extend_from_slice(slice);
        }
        merged
    }

    /// Retract the most recently committed element iff it equals `item`.
    ///
    /// Returns whether an element was retracted. Only the current chunk is
    /// considered; finalized chunks are immutable.
    pub fn truncate_last_if(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        if self.fullness != 0 && self.current[self.fullness - 1] == *item {
            self.fullness -= 1;
            true
        } else {
            false
        }
    }
}

impl ChunkedStore<u8> {
    /// Write every committed byte into `stream`, reserving the destination
    /// up front. The store itself is left unmodified.
    pub fn merge_into<M: ByteStream + ?Sized>(&self, stream: &mut M) -> Result<usize> {
        stream.reserve(self.total_len())?;

        let mut written = 0;
        for slice in self.chunk_slices() {
            written += stream.write(slice);
        }
        Ok(written)
    }
}

impl<T: Copy + Default> Default for ChunkedStore<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_LEN)
    }
}

impl ChunkSink for ChunkedStore<u8> {
    fn chunk_capacity(&self) -> usize {
        ChunkedStore::chunk_capacity(self)
    }

    fn remaining(&self) -> usize {
        ChunkedStore::remaining(self)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }

    fn rotate(&mut self) -> Result<()> {
        ChunkedStore::rotate(self);
        Ok(())
    }

    fn rotate_with_capacity(&mut self, capacity: usize) -> Result<()> {
        ChunkedStore::rotate_with_capacity(self, capacity);
        Ok(())
    }

    fn truncate_last_if(&mut self, byte: u8) -> bool {
        ChunkedStore::truncate_last_if(self, &byte)
    }

    fn merge_into<M: ByteStream + ?Sized>(&mut self, stream: &mut M) -> Result<usize> {
        ChunkedStore::merge_into(self, stream)
    }
}

//! Core traits for chunked byte storage.
//!
//! This module defines [`ChunkSink`], the write-cursor contract between a
//! chunk-backed store and the producers that fill it. A store owns a
//! sequence of finalized fixed-capacity chunks plus one *cursor buffer*
//! currently being filled; producers commit bytes through [`ChunkSink::write`]
//! and the store rotates to a fresh buffer whenever a commit would not fit.
//!
//! The contract deliberately has no "check capacity first" obligation:
//! `write` is bounds-checked and rotates internally, so a producer can
//! stream bytes of any size without tracking the chunk geometry. The only
//! geometry-aware operation producers need is [`ChunkSink::truncate_last_if`],
//! which retracts the most recently committed byte — used by serializers to
//! elide a trailing separator. Retraction is guaranteed to find that byte
//! still in the cursor buffer because rotation only ever happens *inside* a
//! subsequent write.

use crate::error::Result;
use crate::stream::ByteStream;

/// A chunk-backed byte sink with an auto-rotating write cursor.
///
/// Implemented by the plain and compressing chunk stores; consumed by
/// streaming serializers that neither know nor care which variant they are
/// writing into.
pub trait ChunkSink {
    /// Capacity of the cursor buffer currently being filled.
    ///
    /// Constant for the life of the store unless explicitly reconfigured
    /// through [`ChunkSink::rotate_with_capacity`].
    fn chunk_capacity(&self) -> usize;

    /// Free space left in the cursor buffer before the next rotation.
    fn remaining(&self) -> usize;

    /// Commit bytes through the cursor, rotating chunks as needed.
    ///
    /// A payload that does not fit in the remaining space triggers a
    /// rotation, and the fresh cursor buffer is guaranteed large enough for
    /// the payload — the whole payload is always committed contiguously.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Finalize the cursor buffer and start a fresh one at the default
    /// capacity. An empty cursor buffer is discarded rather than finalized.
    fn rotate(&mut self) -> Result<()>;

    /// Like [`ChunkSink::rotate`], but guarantee the fresh cursor buffer
    /// holds at least `capacity` bytes.
    fn rotate_with_capacity(&mut self, capacity: usize) -> Result<()>;

    /// Retract the last committed byte iff it equals `byte`.
    ///
    /// Returns whether a byte was retracted. A no-op when the cursor buffer
    /// is empty — finalized chunks are never touched.
    fn truncate_last_if(&mut self, byte: u8) -> bool;

    /// Merge everything committed so far into `stream`, finalized chunks
    /// first in insertion order, then the cursor buffer's live prefix.
    ///
    /// Reserves the destination up front and returns the number of bytes
    /// written. Compressing stores finish their compression stream here and
    /// refuse further use afterwards.
    fn merge_into<M: ByteStream + ?Sized>(&mut self, stream: &mut M) -> Result<usize>;
}

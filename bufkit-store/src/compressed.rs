//! Compressing chunked storage.
//!
//! [`CompressedStore`] accepts cursor writes into an uncompressed *staging*
//! buffer. Whenever the staging buffer rotates (explicitly, or because a
//! write would not fit) its filled prefix is fed through one long-lived
//! streaming zlib deflate stream, and the compressed output accumulates in
//! fixed-size chunks — a chunk is finalized the instant it is exactly full,
//! which may happen zero or many times per flush, since the compression
//! ratio is unpredictable.
//!
//! The deflate stream's dictionary window carries across rotations: chunk
//! boundaries do not reset the compression history, so the merged output is
//! one zlib stream over everything ever committed. Because of that single
//! stream, [`merge_into`](ChunkSink::merge_into) finishes the stream and
//! retires the store — further writes report [`Error::StoreFinished`].

use bufkit_core::error::{Error, Result};
use bufkit_core::stream::ByteStream;
use bufkit_core::traits::ChunkSink;
use flate2::{Compress, Compression, FlushCompress, Status};

/// Default compressed-chunk and staging-buffer length, in bytes.
pub const DEFAULT_CHUNK_LEN: usize = 4096;

/// Chunked byte storage with streaming deflate on rotation.
///
/// See the [module docs](self) for the storage model.
pub struct CompressedStore {
    /// Finalized compressed chunks, each exactly `chunk_len` bytes.
    chunks: Vec<Box<[u8]>>,
    /// Capacity of every compressed chunk.
    chunk_len: usize,
    /// The compressed chunk currently being filled.
    current: Box<[u8]>,
    /// Bytes used within `current`; never exceeds `chunk_len`.
    current_fullness: usize,
    /// Uncompressed staging buffer — the write-cursor target.
    staging: Box<[u8]>,
    /// Bytes used within `staging`.
    staging_fullness: usize,
    /// The deflate stream; lives as long as the store.
    compressor: Compress,
    /// Set once the stream has been finished by a merge.
    finished: bool,
}

impl CompressedStore {
    /// Create a store with the given compressed-chunk and staging lengths.
    ///
    /// # Panics
    ///
    /// Panics if either length is zero.
    pub fn new(chunk_len: usize, staging_len: usize) -> Self {
        assert!(chunk_len > 0, "Chunk capacity must be greater than 0");
        assert!(staging_len > 0, "Staging capacity must be greater than 0");

        Self {
            chunks: Vec::new(),
            chunk_len,
            current: vec![0u8; chunk_len].into_boxed_slice(),
            current_fullness: 0,
            staging: vec![0u8; staging_len].into_boxed_slice(),
            staging_fullness: 0,
            compressor: Compress::new(Compression::default(), true),
            finished: false,
        }
    }

    /// Whether the compression stream has been finished by a merge.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of finalized compressed chunks so far.
    pub fn finalized_chunks(&self) -> usize {
        self.chunks.len()
    }

    /// Compressed bytes produced so far (finalized chunks plus the current
    /// chunk's fullness). More may still be buffered inside the stream.
    pub fn compressed_len(&self) -> usize {
        self.chunks.len() * self.chunk_len + self.current_fullness
    }

    fn ensure_open(&self) -> Result<()> {
        if self.finished {
            Err(Error::StoreFinished)
        } else {
            Ok(())
        }
    }

    /// Feed the staging buffer's filled prefix through the deflate stream.
    ///
    /// Keeps deflating while input remains unconsumed or a call filled the
    /// entire output chunk (more output may still be buffered inside the
    /// stream); with `finish`, loops until the stream reports its end.
    fn deflate_staging(&mut self, finish: bool) -> Result<()> {
        let flush = if finish {
            FlushCompress::Finish
        } else {
            FlushCompress::None
        };

        let mut offset = 0;
        loop {
            let before_in = self.compressor.total_in();
            let before_out = self.compressor.total_out();

            let output = &mut self.current[self.current_fullness..];
            let status = self
                .compressor
                .compress(&self.staging[offset..self.staging_fullness], output, flush)
                .map_err(|error| Error::compress(error.to_string()))?;

            offset += (self.compressor.total_in() - before_in) as usize;
            self.current_fullness += (self.compressor.total_out() - before_out) as usize;
            debug_assert!(self.current_fullness <= self.chunk_len);

            let filled_chunk = self.current_fullness == self.chunk_len;
            if filled_chunk {
                let retired =
                    std::mem::replace(&mut self.current, vec![0u8; self.chunk_len].into_boxed_slice());
                self.chunks.push(retired);
                self.current_fullness = 0;
            }

            if finish {
                if matches!(status, Status::StreamEnd) {
                    break;
                }
            } else if offset == self.staging_fullness && !filled_chunk {
                break;
            }
        }

        self.staging_fullness = 0;
        Ok(())
    }
}

impl Default for CompressedStore {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_LEN, DEFAULT_CHUNK_LEN)
    }
}

// The deflate stream state is opaque; report the geometry instead
impl std::fmt::Debug for CompressedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompressedStore")
            .field("chunk_len", &self.chunk_len)
            .field("finalized_chunks", &self.chunks.len())
            .field("current_fullness", &self.current_fullness)
            .field("staging_len", &self.staging.len())
            .field("staging_fullness", &self.staging_fullness)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl ChunkSink for CompressedStore {
    fn chunk_capacity(&self) -> usize {
        self.staging.len()
    }

    fn remaining(&self) -> usize {
        self.staging.len() - self.staging_fullness
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_open()?;
        if bytes.is_empty() {
            return Ok(());
        }

        if bytes.len() > self.staging.len() {
            self.rotate_with_capacity(bytes.len())?;
        } else if bytes.len() > self.remaining() {
            self.rotate()?;
        }

        self.staging[self.staging_fullness..self.staging_fullness + bytes.len()]
            .copy_from_slice(bytes);
        self.staging_fullness += bytes.len();
        Ok(())
    }

    fn rotate(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.deflate_staging(false)
    }

    fn rotate_with_capacity(&mut self, capacity: usize) -> Result<()> {
        self.ensure_open()?;
        self.deflate_staging(false)?;

        // The staging buffer only ever grows
        if capacity > self.staging.len() {
            self.staging = vec![0u8; capacity].into_boxed_slice();
        }
        Ok(())
    }

    fn truncate_last_if(&mut self, byte: u8) -> bool {
        if self.staging_fullness != 0 && self.staging[self.staging_fullness - 1] == byte {
            self.staging_fullness -= 1;
            true
        } else {
            false
        }
    }

    fn merge_into<M: ByteStream + ?Sized>(&mut self, stream: &mut M) -> Result<usize> {
        self.ensure_open()?;
        self.deflate_staging(true)?;
        self.finished = true;

        stream.reserve(self.compressed_len())?;

        let mut written = 0;
        for chunk in &self.chunks {
            written += stream.write(chunk);
        }
        written += stream.write(&self.current[..self.current_fullness]);
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bufkit_core::stream::{MemoryStream, VecStream};
    use std::io::Read;

    fn inflate(compressed: &[u8]) -> Vec<u8> {
        let mut decoder = flate2::read::ZlibDecoder::new(compressed);
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed).unwrap();
        decompressed
    }

    #[test]
    fn test_round_trip_single_flush() {
        let mut store = CompressedStore::default();
        store.write(b"hello compressed world").unwrap();

        let mut merged = VecStream::new();
        store.merge_into(&mut merged).unwrap();
        assert_eq!(inflate(merged.as_bytes()), b"hello compressed world");
    }

    #[test]
    fn test_merge_is_single_use() {
        let mut store = CompressedStore::default();
        store.write(b"payload").unwrap();

        let mut merged = VecStream::new();
        store.merge_into(&mut merged).unwrap();
        assert!(store.is_finished());

        let mut again = VecStream::new();
        assert!(matches!(
            store.merge_into(&mut again),
            Err(Error::StoreFinished)
        ));
        assert!(matches!(store.write(b"more"), Err(Error::StoreFinished)));
        assert!(matches!(store.rotate(), Err(Error::StoreFinished)));
    }

    #[test]
    fn test_staging_grows_for_oversized_write() {
        let mut store = CompressedStore::new(64, 16);
        let payload = vec![42u8; 100];
        store.write(&payload).unwrap();
        assert_eq!(store.chunk_capacity(), 100);

        let mut merged = VecStream::new();
        store.merge_into(&mut merged).unwrap();
        assert_eq!(inflate(merged.as_bytes()), payload);
    }

    #[test]
    fn test_truncate_last_if_in_staging() {
        let mut store = CompressedStore::default();
        store.write(b"1,").unwrap();
        assert!(store.truncate_last_if(b','));
        assert!(!store.truncate_last_if(b','));

        let mut merged = VecStream::new();
        store.merge_into(&mut merged).unwrap();
        assert_eq!(inflate(merged.as_bytes()), b"1");
    }

    #[test]
    fn test_rotate_on_empty_store_is_harmless() {
        let mut store = CompressedStore::default();
        store.rotate().unwrap();
        store.rotate().unwrap();

        let mut merged = VecStream::new();
        store.merge_into(&mut merged).unwrap();
        assert_eq!(inflate(merged.as_bytes()), b"");
    }

    #[test]
    #[should_panic(expected = "greater than 0")]
    fn test_zero_chunk_capacity_panics() {
        let _ = CompressedStore::new(0, 16);
    }
}

//! # bufkit Store
//!
//! Append-only chunked storage for the bufkit primitive library.
//!
//! Two stores implement the [`ChunkSink`] write-cursor contract from
//! `bufkit-core`:
//!
//! - [`ChunkedStore`]: plain storage — typed elements accumulate in
//!   fixed-capacity chunks that are finalized as they fill
//! - [`CompressedStore`]: byte storage — cursor writes land in a staging
//!   buffer and pass through one long-lived streaming zlib deflate stream
//!   into fixed-size compressed chunks
//!
//! Both merge into any `ByteStream` as a single contiguous byte sequence:
//! finalized chunks in insertion order, then the live prefix of the chunk
//! currently being filled.
//!
//! ## Example
//!
//! ```rust
//! use bufkit_core::prelude::*;
//! use bufkit_store::ChunkedStore;
//!
//! let mut store = ChunkedStore::<u8>::new(8);
//! store.write(b"hello, chunked world").unwrap();
//!
//! let mut merged = VecStream::new();
//! store.merge_into(&mut merged).unwrap();
//! assert_eq!(merged.as_bytes(), b"hello, chunked world");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod chunked;
pub mod compressed;

// Re-exports for convenience
pub use chunked::ChunkedStore;
pub use compressed::CompressedStore;

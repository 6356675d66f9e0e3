//! # bufkit Core
//!
//! Core components for the bufkit primitive library.
//!
//! This crate provides the fundamental building blocks shared by the
//! storage and serialization crates:
//!
//! - [`stream`]: Seekable in-memory byte streams (merge sinks)
//! - [`traits`]: The chunk-sink write-cursor contract
//! - [`hash`]: Fast non-cryptographic hashing (MurmurHash3 family)
//! - [`clock`]: Monotonic mark-and-delta clock
//! - [`i24`]: Packed signed 24-bit integer
//! - [`sample`]: Sample-format conversion
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! bufkit is a small layered stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Serialization                                       │
//! │     bufkit-json streaming JSON writer                   │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Storage                                             │
//! │     bufkit-store chunked / compressed stores            │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Contracts & primitives (this crate)                 │
//! │     ChunkSink, ByteStream, hash, clock, numerics        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use bufkit_core::hash::hash32;
//! use bufkit_core::stream::{ByteStream, MemoryStream, VecStream};
//!
//! let mut stream = VecStream::new();
//! stream.write(b"Hello, World!");
//! assert_eq!(hash32(stream.as_bytes()), 0x2e493a0e);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod clock;
pub mod error;
pub mod hash;
pub mod i24;
pub mod sample;
pub mod stream;
pub mod traits;

// Re-exports for convenience
pub use clock::Clock;
pub use error::{Error, Result};
pub use hash::{Hash32, Hash64, hash32, hash64};
pub use i24::I24;
pub use sample::{FromSample, convert_samples};
pub use stream::{ByteStream, FixedStream, MemoryStream, SeekOrigin, VecStream};
pub use traits::ChunkSink;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::clock::Clock;
    pub use crate::error::{Error, Result};
    pub use crate::hash::{Hash32, Hash64};
    pub use crate::i24::I24;
    pub use crate::stream::{ByteStream, FixedStream, MemoryStream, SeekOrigin, VecStream};
    pub use crate::traits::ChunkSink;
}

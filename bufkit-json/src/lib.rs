//! # bufkit JSON
//!
//! Streaming JSON writer for the bufkit primitive library.
//!
//! [`JsonWriter`] serializes one nested document directly into any
//! [`ChunkSink`](bufkit_core::traits::ChunkSink) — plain or compressing —
//! without ever holding the document in one contiguous buffer. The closed
//! [`Emit`] trait dispatches each value kind (integers, booleans, text,
//! wide text, sequences, user structs, enums) to its emission routine at
//! compile time.
//!
//! Output is a single JSON document with two fixed conventions:
//!
//! - `u64` values are string-quoted, protecting precision in consumers
//!   whose number type is only 53-bit safe
//! - every key is followed by `": "`, in compact and pretty mode alike
//!
//! ## Example
//!
//! ```rust
//! use bufkit_core::prelude::*;
//! use bufkit_json::JsonWriter;
//! use bufkit_store::ChunkedStore;
//!
//! let mut store = ChunkedStore::<u8>::new(4096);
//! let mut writer = JsonWriter::compact(&mut store);
//! writer
//!     .root_object(|w| {
//!         w.field("enabled", &true)?;
//!         w.field("session", &18446744073709551615u64)
//!     })
//!     .unwrap();
//!
//! let mut out = VecStream::new();
//! store.merge_into(&mut out).unwrap();
//! assert_eq!(
//!     out.as_bytes(),
//!     br#"{"enabled": true,"session": "18446744073709551615"}"#
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod emit;
pub mod writer;

// Re-exports for convenience
pub use emit::{Emit, WideText};
pub use writer::JsonWriter;

// Support for macro-generated impls; not part of the public API
#[doc(hidden)]
pub mod __private {
    pub use bufkit_core::error::Result;
    pub use bufkit_core::traits::ChunkSink;
}

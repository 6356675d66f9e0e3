//! The closed serialization dispatch.
//!
//! Every kind of value the writer knows how to emit implements [`Emit`]:
//! unsigned integers (64-bit ones string-quoted), booleans, text, UTF-16
//! [`WideText`], sequences, and — through hand-written impls — user structs
//! and enums. Dispatch is resolved at compile time; there is no reflection
//! and no intermediate value tree.
//!
//! A struct impl opens an object scope and emits its fields in a fixed
//! order:
//!
//! ```
//! use bufkit_core::error::Result;
//! use bufkit_core::traits::ChunkSink;
//! use bufkit_json::{Emit, JsonWriter};
//!
//! struct Point {
//!     x: u32,
//!     y: u32,
//! }
//!
//! impl Emit for Point {
//!     fn emit<S: ChunkSink>(
//!         &self,
//!         writer: &mut JsonWriter<'_, S>,
//!         key: Option<&str>,
//!     ) -> Result<()> {
//!         writer.object(key, |w| {
//!             w.field("x", &self.x)?;
//!             w.field("y", &self.y)
//!         })
//!     }
//! }
//! ```
//!
//! Fieldless enums are emitted as their integer representation via
//! [`emit_enum!`](crate::emit_enum).

use crate::writer::JsonWriter;
use bufkit_core::error::Result;
use bufkit_core::traits::ChunkSink;

/// A value the streaming writer can serialize.
///
/// `key` is `Some` when the value sits in an object field and `None` when
/// it is a root value or array element.
pub trait Emit {
    /// Emit the value, including its trailing separator.
    fn emit<S: ChunkSink>(&self, writer: &mut JsonWriter<'_, S>, key: Option<&str>) -> Result<()>;
}

impl Emit for u8 {
    fn emit<S: ChunkSink>(&self, writer: &mut JsonWriter<'_, S>, key: Option<&str>) -> Result<()> {
        writer.emit_uint(key, u64::from(*self))
    }
}

impl Emit for u16 {
    fn emit<S: ChunkSink>(&self, writer: &mut JsonWriter<'_, S>, key: Option<&str>) -> Result<()> {
        writer.emit_uint(key, u64::from(*self))
    }
}

impl Emit for u32 {
    fn emit<S: ChunkSink>(&self, writer: &mut JsonWriter<'_, S>, key: Option<&str>) -> Result<()> {
        writer.emit_uint(key, u64::from(*self))
    }
}

impl Emit for u64 {
    fn emit<S: ChunkSink>(&self, writer: &mut JsonWriter<'_, S>, key: Option<&str>) -> Result<()> {
        writer.emit_uint_quoted(key, *self)
    }
}

impl Emit for bool {
    fn emit<S: ChunkSink>(&self, writer: &mut JsonWriter<'_, S>, key: Option<&str>) -> Result<()> {
        writer.emit_bool(key, *self)
    }
}

impl Emit for str {
    fn emit<S: ChunkSink>(&self, writer: &mut JsonWriter<'_, S>, key: Option<&str>) -> Result<()> {
        writer.emit_str(key, self)
    }
}

impl Emit for String {
    fn emit<S: ChunkSink>(&self, writer: &mut JsonWriter<'_, S>, key: Option<&str>) -> Result<()> {
        writer.emit_str(key, self)
    }
}

impl<T: Emit> Emit for [T] {
    fn emit<S: ChunkSink>(&self, writer: &mut JsonWriter<'_, S>, key: Option<&str>) -> Result<()> {
        writer.array(key, |w| {
            for item in self {
                item.emit(w, None)?;
            }
            Ok(())
        })
    }
}

impl<T: Emit, const N: usize> Emit for [T; N] {
    fn emit<S: ChunkSink>(&self, writer: &mut JsonWriter<'_, S>, key: Option<&str>) -> Result<()> {
        self.as_slice().emit(writer, key)
    }
}

impl<T: Emit> Emit for Vec<T> {
    fn emit<S: ChunkSink>(&self, writer: &mut JsonWriter<'_, S>, key: Option<&str>) -> Result<()> {
        self.as_slice().emit(writer, key)
    }
}

impl<T: Emit + ?Sized> Emit for &T {
    fn emit<S: ChunkSink>(&self, writer: &mut JsonWriter<'_, S>, key: Option<&str>) -> Result<()> {
        (**self).emit(writer, key)
    }
}

/// UTF-16 text, transcoded to UTF-8 during emission.
///
/// Each code point lands as 1-4 UTF-8 bytes; an unpaired surrogate reports
/// [`Error::InvalidCodePoint`](bufkit_core::error::Error::InvalidCodePoint).
#[derive(Debug, Clone, Copy)]
pub struct WideText<'a>(pub &'a [u16]);

impl Emit for WideText<'_> {
    fn emit<S: ChunkSink>(&self, writer: &mut JsonWriter<'_, S>, key: Option<&str>) -> Result<()> {
        writer.emit_wide(key, self.0)
    }
}

/// Implement [`Emit`] for fieldless `Copy` enums, serializing each value as
/// its integer representation.
///
/// ```
/// #[derive(Clone, Copy)]
/// #[repr(u32)]
/// enum Mode {
///     Idle = 0,
///     Active = 1,
/// }
///
/// bufkit_json::emit_enum!(Mode);
/// # let _ = Mode::Idle;
/// # let _ = Mode::Active;
/// ```
#[macro_export]
macro_rules! emit_enum {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Emit for $ty {
                fn emit<S: $crate::__private::ChunkSink>(
                    &self,
                    writer: &mut $crate::JsonWriter<'_, S>,
                    key: ::core::option::Option<&str>,
                ) -> $crate::__private::Result<()> {
                    $crate::Emit::emit(&(*self as u32), writer, key)
                }
            }
        )+
    };
}

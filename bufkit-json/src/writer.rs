//! The streaming JSON writer.
//!
//! [`JsonWriter`] emits one JSON document incrementally into any
//! [`ChunkSink`], a few bytes at a time — the document is never
//! materialized contiguously. Values are appended with a trailing `,` and
//! closing a scope (or finishing the root) retracts the one pending
//! separator through the sink's cursor, so no look-ahead is needed to know
//! whether a value is the last of its scope.
//!
//! The writer tracks only the nesting depth. Scope balance is enforced:
//! closing a scope that was never opened, or finishing a document with
//! scopes still open, reports [`Error::UnbalancedScope`]. The closure-based
//! [`JsonWriter::object`]/[`JsonWriter::array`] helpers make unbalanced
//! documents unrepresentable at the call site.
//!
//! Compact mode emits no whitespace apart from the mandated `": "` after
//! each key. Pretty mode adds a CRLF newline and one tab per depth level
//! before every field, value, and closing bracket; stripping those
//! formatting bytes yields exactly the compact output.
//!
//! # Example
//!
//! ```
//! use bufkit_core::prelude::*;
//! use bufkit_json::JsonWriter;
//! use bufkit_store::ChunkedStore;
//!
//! let mut store = ChunkedStore::<u8>::new(64);
//! let mut writer = JsonWriter::compact(&mut store);
//! writer
//!     .root_object(|w| {
//!         w.field("id", &42u32)?;
//!         w.field("name", "x")?;
//!         w.field("tags", &[1u32, 2, 3])
//!     })
//!     .unwrap();
//!
//! let mut out = VecStream::new();
//! store.merge_into(&mut out).unwrap();
//! assert_eq!(out.as_bytes(), br#"{"id": 42,"name": "x","tags": [1,2,3]}"#);
//! ```

use crate::emit::Emit;
use bufkit_core::error::{Error, Result};
use bufkit_core::traits::ChunkSink;

/// u64::MAX spans 20 decimal digits.
const UINT_BUF_LEN: usize = 20;

/// Format an unsigned integer into the tail of a stack buffer.
fn format_uint(buf: &mut [u8; UINT_BUF_LEN], mut value: u64) -> &[u8] {
    let mut cursor = UINT_BUF_LEN;
    loop {
        cursor -= 1;
        buf[cursor] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    &buf[cursor..]
}

/// The two-byte escape for a byte that JSON cannot carry literally.
fn escape_for(byte: u8) -> Option<&'static [u8]> {
    match byte {
        0x08 => Some(b"\\b"),
        0x0C => Some(b"\\f"),
        b'\n' => Some(b"\\n"),
        b'\r' => Some(b"\\r"),
        b'\t' => Some(b"\\t"),
        b'"' => Some(b"\\\""),
        b'\\' => Some(b"\\\\"),
        _ => None,
    }
}

/// A streaming JSON document writer over a chunk sink.
///
/// One writer builds exactly one document; the compact/pretty choice is
/// fixed at construction. See the [module docs](self) for the output rules.
#[derive(Debug)]
pub struct JsonWriter<'a, S: ChunkSink> {
    sink: &'a mut S,
    readable: bool,
    depth: usize,
}

impl<'a, S: ChunkSink> JsonWriter<'a, S> {
    /// Create a writer that emits maximally compact output.
    pub fn compact(sink: &'a mut S) -> Self {
        Self {
            sink,
            readable: false,
            depth: 0,
        }
    }

    /// Create a writer that emits human-readable output (CRLF newlines and
    /// tab indentation proportional to nesting depth).
    pub fn pretty(sink: &'a mut S) -> Self {
        Self {
            sink,
            readable: true,
            depth: 0,
        }
    }

    /// Current nesting depth; 0 outside any scope.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Emit `value` as the entire document.
    ///
    /// Removes the root-level trailing separator and verifies every scope
    /// was closed.
    pub fn root<V: Emit + ?Sized>(&mut self, value: &V) -> Result<()> {
        value.emit(self, None)?;
        self.finish_root()
    }

    /// Emit a keyed value inside an object scope.
    pub fn field<V: Emit + ?Sized>(&mut self, key: &str, value: &V) -> Result<()> {
        value.emit(self, Some(key))
    }

    /// Emit an unkeyed value inside an array scope.
    pub fn value<V: Emit + ?Sized>(&mut self, value: &V) -> Result<()> {
        value.emit(self, None)
    }

    /// Emit an object scope: opening bracket, `body`, closing bracket,
    /// trailing separator.
    pub fn object<F>(&mut self, key: Option<&str>, body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.begin_object(key)?;
        body(self)?;
        self.end_object()?;
        self.separator()
    }

    /// Emit an array scope: opening bracket, `body`, closing bracket,
    /// trailing separator.
    pub fn array<F>(&mut self, key: Option<&str>, body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.begin_array(key)?;
        body(self)?;
        self.end_array()?;
        self.separator()
    }

    /// Emit an object as the entire document.
    pub fn root_object<F>(&mut self, body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.object(None, body)?;
        self.finish_root()
    }

    /// Emit an array as the entire document.
    pub fn root_array<F>(&mut self, body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.array(None, body)?;
        self.finish_root()
    }

    /// Open an object scope explicitly. Prefer [`JsonWriter::object`].
    pub fn begin_object(&mut self, key: Option<&str>) -> Result<()> {
        self.open_scope(key, b"{")
    }

    /// Close an object scope opened with [`JsonWriter::begin_object`].
    ///
    /// The caller is responsible for the trailing separator when the scope
    /// sits inside another one; [`JsonWriter::object`] handles it.
    pub fn end_object(&mut self) -> Result<()> {
        self.close_scope(b"}")
    }

    /// Open an array scope explicitly. Prefer [`JsonWriter::array`].
    pub fn begin_array(&mut self, key: Option<&str>) -> Result<()> {
        self.open_scope(key, b"[")
    }

    /// Close an array scope opened with [`JsonWriter::begin_array`].
    pub fn end_array(&mut self) -> Result<()> {
        self.close_scope(b"]")
    }

    /// Append a value separator.
    pub fn separator(&mut self) -> Result<()> {
        self.sink.write(b",")
    }

    fn finish_root(&mut self) -> Result<()> {
        self.sink.truncate_last_if(b',');
        if self.depth != 0 {
            return Err(Error::unbalanced_scope(self.depth));
        }
        Ok(())
    }

    fn open_scope(&mut self, key: Option<&str>, bracket: &'static [u8]) -> Result<()> {
        self.prefix(key)?;
        self.sink.write(bracket)?;
        self.depth += 1;
        Ok(())
    }

    fn close_scope(&mut self, bracket: &'static [u8]) -> Result<()> {
        if self.depth == 0 {
            return Err(Error::unbalanced_scope(0));
        }

        // At most one separator is ever pending at scope close
        self.sink.truncate_last_if(b',');
        self.depth -= 1;

        self.newline()?;
        self.indent()?;
        self.sink.write(bracket)
    }

    pub(crate) fn emit_uint(&mut self, key: Option<&str>, value: u64) -> Result<()> {
        self.prefix(key)?;

        let mut buf = [0u8; UINT_BUF_LEN];
        self.sink.write(format_uint(&mut buf, value))?;
        self.separator()
    }

    // 64-bit integers travel as strings so 53-bit consumers keep precision
    pub(crate) fn emit_uint_quoted(&mut self, key: Option<&str>, value: u64) -> Result<()> {
        self.prefix(key)?;
        self.sink.write(b"\"")?;

        let mut buf = [0u8; UINT_BUF_LEN];
        self.sink.write(format_uint(&mut buf, value))?;
        self.sink.write(b"\",")
    }

    pub(crate) fn emit_bool(&mut self, key: Option<&str>, value: bool) -> Result<()> {
        self.prefix(key)?;
        let literal: &[u8] = if value { b"true," } else { b"false," };
        self.sink.write(literal)
    }

    pub(crate) fn emit_str(&mut self, key: Option<&str>, text: &str) -> Result<()> {
        self.prefix(key)?;
        self.sink.write(b"\"")?;
        self.write_escaped(text.as_bytes())?;
        self.sink.write(b"\",")
    }

    pub(crate) fn emit_wide(&mut self, key: Option<&str>, units: &[u16]) -> Result<()> {
        self.prefix(key)?;
        self.sink.write(b"\"")?;

        for decoded in char::decode_utf16(units.iter().copied()) {
            match decoded {
                Ok(c) => self.write_escaped_char(c)?,
                Err(error) => {
                    return Err(Error::invalid_code_point(u32::from(
                        error.unpaired_surrogate(),
                    )));
                }
            }
        }

        self.sink.write(b"\",")
    }

    /// Escape a byte run, passing unescaped stretches through in one write.
    fn write_escaped(&mut self, bytes: &[u8]) -> Result<()> {
        let mut start = 0;
        for (index, &byte) in bytes.iter().enumerate() {
            if let Some(escape) = escape_for(byte) {
                if index > start {
                    self.sink.write(&bytes[start..index])?;
                }
                self.sink.write(escape)?;
                start = index + 1;
            }
        }
        if start < bytes.len() {
            self.sink.write(&bytes[start..])?;
        }
        Ok(())
    }

    /// Escape one decoded character, UTF-8 encoding it as 1-4 bytes.
    fn write_escaped_char(&mut self, c: char) -> Result<()> {
        if c.is_ascii() {
            let byte = c as u8;
            match escape_for(byte) {
                Some(escape) => self.sink.write(escape),
                None => self.sink.write(&[byte]),
            }
        } else {
            let mut buf = [0u8; 4];
            self.sink.write(c.encode_utf8(&mut buf).as_bytes())
        }
    }

    /// Formatting and key prelude shared by every emission.
    fn prefix(&mut self, key: Option<&str>) -> Result<()> {
        self.newline()?;
        self.indent()?;
        self.write_key(key)
    }

    fn newline(&mut self) -> Result<()> {
        if self.readable {
            self.sink.write(b"\r\n")
        } else {
            Ok(())
        }
    }

    fn indent(&mut self) -> Result<()> {
        if !self.readable || self.depth == 0 {
            return Ok(());
        }

        const TABS: [u8; 16] = [b'\t'; 16];
        let mut remaining = self.depth;
        while remaining != 0 {
            let count = remaining.min(TABS.len());
            self.sink.write(&TABS[..count])?;
            remaining -= count;
        }
        Ok(())
    }

    // Keys come from statically-known field names and are not escaped
    fn write_key(&mut self, key: Option<&str>) -> Result<()> {
        if let Some(key) = key {
            self.sink.write(b"\"")?;
            self.sink.write(key.as_bytes())?;
            self.sink.write(b"\": ")?;
        }
        Ok(())
    }
}

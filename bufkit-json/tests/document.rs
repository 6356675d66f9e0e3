//! End-to-end document tests for the streaming JSON writer.

use bufkit_core::error::Error;
use bufkit_core::stream::{MemoryStream, VecStream};
use bufkit_core::traits::ChunkSink;
use bufkit_json::{Emit, JsonWriter, WideText};
use bufkit_store::{ChunkedStore, CompressedStore};
use std::io::Read;

/// Run `build` against a compact writer and return the document bytes.
fn compact_doc<F>(build: F) -> Vec<u8>
where
    F: FnOnce(&mut JsonWriter<'_, ChunkedStore<u8>>) -> bufkit_core::error::Result<()>,
{
    compact_doc_with_chunk_len(4096, build)
}

fn compact_doc_with_chunk_len<F>(chunk_len: usize, build: F) -> Vec<u8>
where
    F: FnOnce(&mut JsonWriter<'_, ChunkedStore<u8>>) -> bufkit_core::error::Result<()>,
{
    let mut store = ChunkedStore::<u8>::new(chunk_len);
    let mut writer = JsonWriter::compact(&mut store);
    build(&mut writer).unwrap();

    let mut out = VecStream::new();
    store.merge_into(&mut out).unwrap();
    out.into_inner()
}

fn pretty_doc<F>(build: F) -> Vec<u8>
where
    F: FnOnce(&mut JsonWriter<'_, ChunkedStore<u8>>) -> bufkit_core::error::Result<()>,
{
    let mut store = ChunkedStore::<u8>::new(4096);
    let mut writer = JsonWriter::pretty(&mut store);
    build(&mut writer).unwrap();

    let mut out = VecStream::new();
    store.merge_into(&mut out).unwrap();
    out.into_inner()
}

#[test]
fn test_end_to_end_object() {
    let doc = compact_doc(|w| {
        w.root_object(|w| {
            w.field("id", &42u32)?;
            w.field("name", "x")?;
            w.field("tags", &[1u32, 2, 3])
        })
    });
    assert_eq!(doc, br#"{"id": 42,"name": "x","tags": [1,2,3]}"#);
}

#[test]
fn test_end_to_end_survives_tiny_chunks() {
    for chunk_len in [1, 2, 3, 5] {
        let doc = compact_doc_with_chunk_len(chunk_len, |w| {
            w.root_object(|w| {
                w.field("id", &42u32)?;
                w.field("name", "x")?;
                w.field("tags", &[1u32, 2, 3])
            })
        });
        assert_eq!(doc, br#"{"id": 42,"name": "x","tags": [1,2,3]}"#);
    }
}

#[test]
fn test_root_scalars() {
    assert_eq!(compact_doc(|w| w.root(&0u32)), b"0");
    assert_eq!(compact_doc(|w| w.root(&4_294_967_295u32)), b"4294967295");
    assert_eq!(
        compact_doc(|w| w.root(&18_446_744_073_709_551_615u64)),
        b"\"18446744073709551615\""
    );
    assert_eq!(compact_doc(|w| w.root(&true)), b"true");
    assert_eq!(compact_doc(|w| w.root(&false)), b"false");
    assert_eq!(compact_doc(|w| w.root("plain")), b"\"plain\"");
}

#[test]
fn test_narrow_integer_widths() {
    let doc = compact_doc(|w| {
        w.root_object(|w| {
            w.field("byte", &255u8)?;
            w.field("word", &65535u16)?;
            w.field("dword", &4_294_967_295u32)?;
            w.field("qword", &18_446_744_073_709_551_615u64)
        })
    });
    assert_eq!(
        doc,
        br#"{"byte": 255,"word": 65535,"dword": 4294967295,"qword": "18446744073709551615"}"#
    );
}

#[test]
fn test_escaping() {
    assert_eq!(compact_doc(|w| w.root("a\tb\"c\\d")), b"\"a\\tb\\\"c\\\\d\"");
    assert_eq!(
        compact_doc(|w| w.root("\u{8}\u{c}\n\r")),
        b"\"\\b\\f\\n\\r\""
    );
    // Non-ASCII UTF-8 passes through untouched
    assert_eq!(
        compact_doc(|w| w.root("héllo")),
        "\"héllo\"".as_bytes()
    );
}

#[test]
fn test_empty_scopes() {
    assert_eq!(compact_doc(|w| w.root_object(|_| Ok(()))), b"{}");
    assert_eq!(compact_doc(|w| w.root_array(|_| Ok(()))), b"[]");

    let doc = compact_doc(|w| {
        w.root_object(|w| {
            w.field("a", &Vec::<u32>::new())?;
            w.object(Some("b"), |_| Ok(()))?;
            w.array(Some("c"), |w| w.object(None, |_| Ok(())))
        })
    });
    assert_eq!(doc, br#"{"a": [],"b": {},"c": [{}]}"#);
}

#[test]
fn test_nested_arrays() {
    let doc = compact_doc(|w| {
        w.root_array(|w| {
            w.value(&[1u32, 2])?;
            w.value(&[3u32])?;
            w.value(&Vec::<u32>::new())
        })
    });
    assert_eq!(doc, b"[[1,2],[3],[]]");
}

#[test]
fn test_pretty_layout() {
    let doc = pretty_doc(|w| w.root_object(|w| w.field("id", &7u32)));
    assert_eq!(doc, b"\r\n{\r\n\t\"id\": 7\r\n}");
}

#[test]
fn test_pretty_strips_to_compact() {
    fn build(w: &mut JsonWriter<'_, ChunkedStore<u8>>) -> bufkit_core::error::Result<()> {
        w.root_object(|w| {
            w.field("id", &42u32)?;
            w.field("label", "tab\tseparated")?;
            w.field("flags", &[true, false])?;
            w.object(Some("inner"), |w| {
                w.field("big", &u64::MAX)?;
                w.field("items", &[10u8, 20, 30])
            })
        })
    }

    let compact = compact_doc(build);
    let pretty = pretty_doc(build);

    // Formatting bytes are CRLF and tabs; payload tabs were escaped
    let stripped: Vec<u8> = pretty
        .iter()
        .copied()
        .filter(|b| !matches!(b, b'\r' | b'\n' | b'\t'))
        .collect();
    assert_eq!(stripped, compact);
}

#[test]
fn test_wide_text_transcoding() {
    // One code point per UTF-8 length class: 1, 2, 3, and 4 bytes
    let text = "h\u{e9}\u{2713}\u{1d11e}";
    let units: Vec<u16> = text.encode_utf16().collect();

    let doc = compact_doc(|w| w.root(&WideText(&units)));
    assert_eq!(doc, format!("\"{text}\"").into_bytes());
}

#[test]
fn test_wide_text_escapes() {
    let units: Vec<u16> = "a\tb".encode_utf16().collect();
    let doc = compact_doc(|w| w.root(&WideText(&units)));
    assert_eq!(doc, b"\"a\\tb\"");
}

#[test]
fn test_wide_text_unpaired_surrogate() {
    let mut store = ChunkedStore::<u8>::new(64);
    let mut writer = JsonWriter::compact(&mut store);
    let units = [0xD800u16];

    let result = writer.root(&WideText(&units));
    assert!(matches!(
        result,
        Err(Error::InvalidCodePoint { value: 0xD800 })
    ));
}

#[test]
fn test_unbalanced_scopes() {
    let mut store = ChunkedStore::<u8>::new(64);
    let mut writer = JsonWriter::compact(&mut store);
    assert!(matches!(
        writer.end_object(),
        Err(Error::UnbalancedScope { depth: 0 })
    ));

    let mut store = ChunkedStore::<u8>::new(64);
    let mut writer = JsonWriter::compact(&mut store);
    let result = writer.root_object(|w| w.begin_object(Some("dangling")));
    assert!(matches!(result, Err(Error::UnbalancedScope { depth: 1 })));
}

#[derive(Clone, Copy)]
#[repr(u32)]
enum Channel {
    Left = 0,
    Right = 1,
}

bufkit_json::emit_enum!(Channel);

struct Track {
    title: String,
    channel: Channel,
    samples: Vec<u16>,
}

impl Emit for Track {
    fn emit<S: ChunkSink>(
        &self,
        writer: &mut JsonWriter<'_, S>,
        key: Option<&str>,
    ) -> bufkit_core::error::Result<()> {
        writer.object(key, |w| {
            w.field("title", &self.title)?;
            w.field("channel", &self.channel)?;
            w.field("samples", &self.samples)
        })
    }
}

#[test]
fn test_enum_as_integer() {
    let doc = compact_doc(|w| w.root_object(|w| w.field("channel", &Channel::Right)));
    assert_eq!(doc, br#"{"channel": 1}"#);
    let doc = compact_doc(|w| w.root(&Channel::Left));
    assert_eq!(doc, b"0");
}

#[test]
fn test_struct_emission() {
    let track = Track {
        title: "intro".to_string(),
        channel: Channel::Left,
        samples: vec![1, 2, 3],
    };

    let doc = compact_doc(|w| w.root(&track));
    assert_eq!(
        doc,
        br#"{"title": "intro","channel": 0,"samples": [1,2,3]}"#
    );
}

#[test]
fn test_struct_sequence() {
    let tracks = vec![
        Track {
            title: "a".to_string(),
            channel: Channel::Left,
            samples: vec![],
        },
        Track {
            title: "b".to_string(),
            channel: Channel::Right,
            samples: vec![9],
        },
    ];

    let doc = compact_doc(|w| w.root(&tracks));
    assert_eq!(
        doc,
        br#"[{"title": "a","channel": 0,"samples": []},{"title": "b","channel": 1,"samples": [9]}]"#
    );
}

#[test]
fn test_document_through_compressed_store() {
    fn build(w: &mut JsonWriter<'_, CompressedStore>) -> bufkit_core::error::Result<()> {
        w.root_object(|w| {
            w.field("id", &42u32)?;
            w.field("name", "x")?;
            w.field("tags", &[1u32, 2, 3])
        })
    }

    // A tiny staging buffer forces rotations in the middle of the document
    for staging_len in [8, 64, 4096] {
        let mut store = CompressedStore::new(64, staging_len);
        let mut writer = JsonWriter::compact(&mut store);
        build(&mut writer).unwrap();

        let mut merged = VecStream::new();
        store.merge_into(&mut merged).unwrap();

        let mut decoder = flate2::read::ZlibDecoder::new(merged.as_bytes());
        let mut document = Vec::new();
        decoder.read_to_end(&mut document).unwrap();
        assert_eq!(
            document,
            br#"{"id": 42,"name": "x","tags": [1,2,3]}"#,
            "staging_len {staging_len}"
        );
    }
}

#[test]
fn test_deeply_nested_document() {
    const DEPTH: usize = 40;

    fn nest(w: &mut JsonWriter<'_, ChunkedStore<u8>>, level: usize) -> bufkit_core::error::Result<()> {
        if level == 0 {
            w.value(&1u32)
        } else {
            w.array(None, |w| nest(w, level - 1))
        }
    }

    let compact = compact_doc(|w| {
        w.root_array(|w| nest(w, DEPTH - 1))?;
        Ok(())
    });

    let mut expected = Vec::new();
    expected.extend(std::iter::repeat_n(b'[', DEPTH));
    expected.push(b'1');
    expected.extend(std::iter::repeat_n(b']', DEPTH));
    assert_eq!(compact, expected);
}

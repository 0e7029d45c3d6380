//! JSON encoding of manifests.
//!
//! The measurement policy loader compares these files byte for byte against
//! previously published ones, so the layout is fixed: `", "` and `": "`
//! separators, no trailing newline, and every non-ASCII character (plus DEL)
//! escaped as lowercase `\uXXXX`.

use std::io;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::Formatter;

/// Object key order in the encoded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrder {
    /// Keys of every object sorted lexicographically, recursively.
    Sorted,
    /// Keys in struct declaration order.
    Declared,
}

/// Encode `value` as a manifest document.
///
/// # Errors
///
/// Returns an error if serialization fails (only possible for maps with
/// non-string keys, which manifests never contain).
pub fn to_manifest_json<T: Serialize>(value: &T, order: KeyOrder) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, PyCompatFormatter);
    match order {
        KeyOrder::Declared => value.serialize(&mut ser),
        KeyOrder::Sorted => {
            // serde_json::Map is a BTreeMap without `preserve_order`.
            let tree = serde_json::to_value(value).context("building JSON tree")?;
            tree.serialize(&mut ser)
        }
    }
    .context("encoding manifest JSON")?;
    Ok(out)
}

/// Single-line formatter with spaced separators and ASCII-only strings.
struct PyCompatFormatter;

impl Formatter for PyCompatFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\x7f' {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..i])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

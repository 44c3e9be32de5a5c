//! JSON text layout shared by response bodies.
//!
//! Bodies are written with `", "` between items, `": "` between keys and
//! values, and every non-ASCII character escaped as a `\uXXXX` sequence
//! (surrogate pairs above the BMP). Number formatting is left to
//! `serde_json`, so some floats print differently from other JSON writers
//! (`0.00001` rather than `1e-05`).

use serde::Serialize;
use serde_json::ser::Formatter;
use std::io::{self, Write};

/// `serde_json` formatter producing spaced separators and ASCII-only output.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..idx].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Serialize `value` to a string using [`SpacedFormatter`].
pub fn to_spaced_string<T>(value: &T) -> Result<String, serde_json::Error>
where
    T: ?Sized + Serialize,
{
    let mut buf = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(<serde_json::Error as serde::ser::Error>::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_spaced_separators() {
        let value = json!({"a": 1, "b": [true, null, "x"]});
        assert_eq!(
            to_spaced_string(&value).unwrap(),
            r#"{"a": 1, "b": [true, null, "x"]}"#
        );
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(to_spaced_string(&json!([])).unwrap(), "[]");
        assert_eq!(to_spaced_string(&json!({})).unwrap(), "{}");
    }

    #[test]
    fn test_non_ascii_is_escaped() {
        assert_eq!(
            to_spaced_string(&json!("Café")).unwrap(),
            r#""Caf\u00e9""#
        );
    }

    #[test]
    fn test_astral_characters_use_surrogate_pairs() {
        assert_eq!(
            to_spaced_string(&json!("🎉 party")).unwrap(),
            r#""\ud83c\udf89 party""#
        );
    }

    #[test]
    fn test_control_characters_keep_standard_escapes() {
        assert_eq!(
            to_spaced_string(&json!("line\n\"quoted\"")).unwrap(),
            r#""line\n\"quoted\"""#
        );
    }
}

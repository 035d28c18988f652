//! Java `.properties` encoding for flat secret mappings.
//!
//! Output is raw ISO-8859-1 bytes, one `key=value` per line, with separators
//! and line breaks backslash-escaped. Characters in U+00A0..=U+00FF are
//! written as single bytes rather than `\uXXXX`, which
//! `java.util.Properties.load(InputStream)` reads back unchanged.

use crate::error::{Error, Result};
use crate::fetch::FlatMapping;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Position {
    Key,
    Value,
}

/// Encode `flat` as a properties file.
///
/// In strict mode a character that has no ISO-8859-1 form, or a control
/// character without a named escape, is an error. Otherwise such characters
/// are written as `\uXXXX` escapes.
pub fn encode(flat: &FlatMapping, strict: bool) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for (key, value) in flat.iter() {
        escape_into(&mut out, key, key, Position::Key, strict)?;
        out.push(b'=');
        escape_into(&mut out, key, value, Position::Value, strict)?;
        out.push(b'\n');
    }
    Ok(out)
}

fn escape_into(
    out: &mut Vec<u8>,
    key: &str,
    text: &str,
    position: Position,
    strict: bool,
) -> Result<()> {
    for (i, ch) in text.chars().enumerate() {
        match ch {
            '\\' => out.extend_from_slice(b"\\\\"),
            '\t' => out.extend_from_slice(b"\\t"),
            '\n' => out.extend_from_slice(b"\\n"),
            '\r' => out.extend_from_slice(b"\\r"),
            '\x0c' => out.extend_from_slice(b"\\f"),
            '=' | ':' | '#' | '!' => {
                out.push(b'\\');
                out.push(ch as u8);
            }
            ' ' if position == Position::Key || i == 0 => out.extend_from_slice(b"\\ "),
            c if c.is_control() || u32::from(c) > 0xff => {
                if strict {
                    return Err(Error::Unrepresentable {
                        key: key.to_string(),
                        ch: c,
                    });
                }
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.extend_from_slice(format!("\\u{:04X}", unit).as_bytes());
                }
            }
            // Latin-1 maps one-to-one onto the first 256 code points
            c => out.push(u32::from(c) as u8),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(entries: &[(&str, &str)]) -> FlatMapping {
        let mut mapping = FlatMapping::new();
        for (k, v) in entries {
            mapping.insert(*k, *v).unwrap();
        }
        mapping
    }

    #[test]
    fn test_encode_flat_keys_in_order() {
        let out = encode(&flat(&[("db.user", "u1"), ("db.password", "p1")]), true).unwrap();
        assert_eq!(out, b"db.user=u1\ndb.password=p1\n");
    }

    #[test]
    fn test_encode_escapes_separators_and_breaks() {
        let out = encode(&flat(&[("a:b", "x=y\nz\\w#!")]), true).unwrap();
        assert_eq!(out, b"a\\:b=x\\=y\\nz\\\\w\\#\\!\n".to_vec());
    }

    #[test]
    fn test_encode_spaces() {
        let out = encode(&flat(&[("my key", " lead and inner")]), true).unwrap();
        assert_eq!(out, b"my\\ key=\\ lead and inner\n".to_vec());
    }

    #[test]
    fn test_encode_latin1_bytes() {
        let out = encode(&flat(&[("k", "café")]), true).unwrap();
        assert_eq!(out, b"k=caf\xe9\n".to_vec());
    }

    #[test]
    fn test_strict_rejects_non_latin1() {
        let err = encode(&flat(&[("price", "10€")]), true).unwrap_err();
        assert!(matches!(
            err,
            Error::Unrepresentable { ref key, ch: '€' } if key == "price"
        ));
    }

    #[test]
    fn test_strict_rejects_bare_control() {
        let err = encode(&flat(&[("bell", "\u{7}")]), true).unwrap_err();
        assert!(matches!(err, Error::Unrepresentable { ch: '\u{7}', .. }));
    }

    #[test]
    fn test_upper_latin1_range_is_raw_bytes() {
        let out = encode(&flat(&[("k", "\u{a0}ÿ")]), true).unwrap();
        assert_eq!(out, b"k=\xa0\xff\n".to_vec());

        // C1 controls sit inside Latin-1 but have no printable form
        let err = encode(&flat(&[("k", "\u{85}")]), true).unwrap_err();
        assert!(matches!(err, Error::Unrepresentable { ch: '\u{85}', .. }));
    }

    #[test]
    fn test_lenient_uses_unicode_escapes() {
        let out = encode(&flat(&[("k", "€😀")]), false).unwrap();
        assert_eq!(out, b"k=\\u20AC\\uD83D\\uDE00\n".to_vec());
    }
}

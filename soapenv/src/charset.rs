//! Charset-aware decoding of SOAP response bodies.
//!
//! Servers are free to answer in any encoding they declare; the XML prolog
//! label (or a BOM) picks the decoder.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};

use crate::error::SoapParseError;

/// Decode a response body to text, honoring a BOM or a declared XML
/// prolog encoding label. Defaults to UTF-8.
///
/// Malformed sequences decode lossily to the replacement character; an
/// unknown label is an error.
pub fn decode(bytes: &[u8]) -> Result<Cow<'_, str>, SoapParseError> {
    let encoding = match declared_label(bytes) {
        Some(label) => Encoding::for_label(label.as_bytes())
            .ok_or_else(|| SoapParseError::UnknownCharset(label.to_string()))?,
        None => UTF_8,
    };
    // A BOM, if present, takes precedence over the label.
    let (text, _, _) = encoding.decode(bytes);
    Ok(text)
}

/// Extract the encoding label from an XML declaration at the start of the
/// document. Only ASCII-compatible prologs can match; UTF-16 documents
/// are caught by their BOM instead.
fn declared_label(bytes: &[u8]) -> Option<&str> {
    let head = bytes
        .strip_prefix(&[0xEF, 0xBB, 0xBF])
        .unwrap_or(bytes);
    let head = head.strip_prefix(b"<?xml")?;
    let end = head.windows(2).position(|w| w == b"?>")?;
    let decl = std::str::from_utf8(&head[..end]).ok()?;
    let (_, rest) = decl.split_once("encoding")?;
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let rest = &rest[1..];
    Some(&rest[..rest.find(quote)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_without_prolog_passes_through() {
        let text = decode("<r>ok</r>".as_bytes()).unwrap();
        assert_eq!(text, "<r>ok</r>");
    }

    #[test]
    fn latin1_label_is_honored() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><r>Jos\xE9</r>");
        let text = decode(&bytes).unwrap();
        assert_eq!(text, "<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><r>Jos\u{e9}</r>");
    }

    #[test]
    fn single_quoted_label_is_honored() {
        let bytes = b"<?xml version='1.0' encoding='iso-8859-1'?><r>\xE9</r>";
        let text = decode(bytes).unwrap();
        assert!(text.ends_with("<r>\u{e9}</r>"));
    }

    #[test]
    fn utf16le_bom_overrides_the_default() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "<?xml version=\"1.0\"?><r>ok</r>".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let text = decode(&bytes).unwrap();
        assert!(text.ends_with("<r>ok</r>"));
    }

    #[test]
    fn unknown_label_is_an_error() {
        let bytes = b"<?xml version=\"1.0\" encoding=\"ebcdic-ish\"?><r/>";
        match decode(bytes) {
            Err(SoapParseError::UnknownCharset(label)) => assert_eq!(label, "ebcdic-ish"),
            other => panic!("unexpected result: {:?}", other.map(|t| t.into_owned())),
        }
    }

    #[test]
    fn document_without_declaration_defaults_to_utf8() {
        assert!(declared_label(b"<r>ok</r>").is_none());
    }
}

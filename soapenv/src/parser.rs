//! Response-side SOAP envelope parsing.
//!
//! The envelope and body are located by local name, so any namespace
//! prefix the server chose (`soap:`, `soapenv:`, `s:`, or none) is
//! accepted. The body element's children then bind to the caller's
//! response type; prefixed children are matched with serde
//! `rename`/`alias` attributes on that type.

use std::ops::Range;

use quick_xml::Reader;
use quick_xml::events::Event;
use serde::de::DeserializeOwned;

use crate::error::SoapParseError;
use crate::fault::SoapFault;

/// Deserialize a SOAP response document into `T`.
///
/// `T`'s fields bind to the children of the Body element; the Body's own
/// tag name is not checked. A Body whose first child element is a `Fault`
/// is surfaced as [`SoapParseError::Fault`] instead.
pub fn parse_response<T: DeserializeOwned>(xml: &str) -> Result<T, SoapParseError> {
    let body = body_slice(xml)?;
    if let Some((name, range)) = first_child_element(body)? {
        if name == "Fault" {
            return Err(SoapParseError::Fault(SoapFault::from_fault_xml(
                &body[range],
            )?));
        }
    }
    Ok(quick_xml::de::from_str(body)?)
}

/// Try to extract a SOAP fault from a response document.
///
/// Returns `None` when the document is not an envelope whose Body leads
/// with a `Fault` element.
pub fn parse_fault(xml: &str) -> Option<SoapFault> {
    let body = body_slice(xml).ok()?;
    let (name, range) = first_child_element(body).ok()??;
    if name != "Fault" {
        return None;
    }
    SoapFault::from_fault_xml(&body[range]).ok()
}

/// Extract the byte span of the Body element, tags included.
fn body_slice(xml: &str) -> Result<&str, SoapParseError> {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;
    let mut saw_envelope = false;
    let mut body_start: Option<usize> = None;
    loop {
        let pos = reader.buffer_position() as usize;
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                if depth == 1 {
                    if e.local_name().as_ref() != b"Envelope" {
                        return Err(SoapParseError::MissingEnvelope);
                    }
                    saw_envelope = true;
                } else if depth == 2
                    && body_start.is_none()
                    && e.local_name().as_ref() == b"Body"
                {
                    body_start = Some(pos);
                }
            }
            Event::Empty(e) => {
                if depth == 0 {
                    if e.local_name().as_ref() != b"Envelope" {
                        return Err(SoapParseError::MissingEnvelope);
                    }
                    saw_envelope = true;
                } else if depth == 1
                    && body_start.is_none()
                    && e.local_name().as_ref() == b"Body"
                {
                    let end = reader.buffer_position() as usize;
                    return Ok(&xml[pos..end]);
                }
            }
            Event::End(_) => {
                if depth == 2 {
                    if let Some(start) = body_start {
                        let end = reader.buffer_position() as usize;
                        return Ok(&xml[start..end]);
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if saw_envelope {
        Err(SoapParseError::MissingBody)
    } else {
        Err(SoapParseError::MissingEnvelope)
    }
}

/// Locate the first child element inside an element slice: returns its
/// local name and the byte range of the complete child element.
fn first_child_element(xml: &str) -> Result<Option<(String, Range<usize>)>, SoapParseError> {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;
    let mut child_start: Option<(usize, String)> = None;
    loop {
        let pos = reader.buffer_position() as usize;
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                if depth == 2 && child_start.is_none() {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    child_start = Some((pos, name));
                }
            }
            Event::Empty(e) => {
                if depth == 1 && child_start.is_none() {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    let end = reader.buffer_position() as usize;
                    return Ok(Some((name, pos..end)));
                }
            }
            Event::End(_) => {
                if depth == 2 {
                    if let Some((start, name)) = child_start.take() {
                        let end = reader.buffer_position() as usize;
                        return Ok(Some((name, start..end)));
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

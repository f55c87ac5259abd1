//! SOAP envelope construction.
//!
//! An [`Envelope`] is built fresh for every round trip, borrows the client
//! configuration and the request payload, and is discarded once serialized.
//! The payload appears inside `soapenv:Body` as its own element, named by
//! its type (or its serde rename); the optional header is spliced in
//! verbatim as a pre-rendered [`SoapHeader`].

use std::fmt::Write;

use quick_xml::escape::escape;
use quick_xml::se::SeError;
use serde::Serialize;

/// Slot names recognized for additional namespace attributes, in wire
/// order. Each slot maps to an `xmlns:<slot>` attribute on the envelope.
pub const NAMESPACE_SLOTS: [&str; 15] = [
    "tns0", "tns1", "tns2", "tns3", "tns4", "tns5", "tns6", "tns7", "tns8", "tns9", "tns10",
    "tns11", "tns12", "tns13", "tns14",
];

/// A SOAP envelope about to be serialized.
///
/// Optional namespace attributes are omitted entirely when unset or empty;
/// an empty string never serializes as an empty attribute.
#[derive(Debug)]
pub struct Envelope<'a, B> {
    /// Value of the `xmlns:soapenv` attribute.
    pub envelope_ns: &'a str,
    /// Value of the default `xmlns` attribute.
    pub default_ns: &'a str,
    /// Optional `xmlns:tns` attribute.
    pub tns: Option<&'a str>,
    /// Optional `xmlns:urn` attribute.
    pub urn: Option<&'a str>,
    /// Optional `xmlns:xsi` attribute.
    pub xsi: Option<&'a str>,
    /// The fixed namespace slots, indexed like [`NAMESPACE_SLOTS`].
    pub namespace_slots: [Option<&'a str>; 15],
    /// Optional pre-rendered header element.
    pub header: Option<&'a SoapHeader>,
    /// Request payload serialized inside `soapenv:Body`.
    pub body: &'a B,
}

impl<'a, B: Serialize> Envelope<'a, B> {
    /// Create an envelope with no optional namespaces and no header.
    pub fn new(envelope_ns: &'a str, default_ns: &'a str, body: &'a B) -> Self {
        Self {
            envelope_ns,
            default_ns,
            tns: None,
            urn: None,
            xsi: None,
            namespace_slots: [None; 15],
            header: None,
            body,
        }
    }

    /// Fill the fixed namespace slots from (slot name, URI) pairs.
    ///
    /// Names outside `tns0`..`tns14` are silently dropped; the slots are a
    /// fixed-capacity enumeration, not open storage.
    pub fn apply_namespace_slots<'m: 'a>(
        &mut self,
        slots: impl IntoIterator<Item = (&'m str, &'m str)>,
    ) {
        for (name, uri) in slots {
            if let Some(idx) = NAMESPACE_SLOTS.iter().position(|slot| *slot == name) {
                self.namespace_slots[idx] = Some(uri);
            }
        }
    }

    /// Serialize the envelope to an XML string.
    pub fn to_xml(&self) -> Result<String, SeError> {
        let mut xml = String::with_capacity(256);
        xml.push_str("<soapenv:Envelope");
        write_attr(&mut xml, "xmlns:soapenv", self.envelope_ns);
        write_attr(&mut xml, "xmlns", self.default_ns);
        if let Some(uri) = non_empty(self.tns) {
            write_attr(&mut xml, "xmlns:tns", uri);
        }
        if let Some(uri) = non_empty(self.urn) {
            write_attr(&mut xml, "xmlns:urn", uri);
        }
        if let Some(uri) = non_empty(self.xsi) {
            write_attr(&mut xml, "xmlns:xsi", uri);
        }
        for (slot, uri) in NAMESPACE_SLOTS.iter().zip(&self.namespace_slots) {
            if let Some(uri) = non_empty(*uri) {
                let _ = write!(xml, " xmlns:{}=\"{}\"", slot, escape(uri));
            }
        }
        xml.push('>');
        if let Some(header) = self.header {
            xml.push_str(header.as_xml());
        }
        xml.push_str("<soapenv:Body>");
        xml.push_str(&quick_xml::se::to_string(self.body)?);
        xml.push_str("</soapenv:Body>");
        xml.push_str("</soapenv:Envelope>");
        Ok(xml)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn write_attr(xml: &mut String, name: &str, value: &str) {
    let _ = write!(xml, " {}=\"{}\"", name, escape(value));
}

/// An opaque, pre-rendered `soapenv:Header` element.
///
/// The value handed to [`SoapHeader::new`] is serialized once, at
/// configuration time; its attributes and children become the header
/// element's own.
#[derive(Debug, Clone)]
pub struct SoapHeader {
    xml: String,
}

impl SoapHeader {
    /// Render `value` as the envelope's header element.
    pub fn new<H: Serialize>(value: &H) -> Result<Self, SeError> {
        Ok(Self {
            xml: quick_xml::se::to_string_with_root("soapenv:Header", value)?,
        })
    }

    /// Build a header from raw inner XML. The caller is responsible for
    /// escaping.
    pub fn from_xml_content(inner: impl AsRef<str>) -> Self {
        Self {
            xml: format!("<soapenv:Header>{}</soapenv:Header>", inner.as_ref()),
        }
    }

    pub(crate) fn as_xml(&self) -> &str {
        &self.xml
    }
}

/// Credential header conveying a username and password, encoded as the
/// SOAP Header element in requests.
#[derive(Debug, Clone, Serialize)]
pub struct AuthHeader {
    #[serde(rename = "@xmlns:ns")]
    pub namespace: String,
    #[serde(rename = "ns:username")]
    pub username: String,
    #[serde(rename = "ns:password")]
    pub password: String,
}

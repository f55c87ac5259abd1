//! # soapenv - SOAP protocol layer
//!
//! Envelope construction and response parsing for SOAP 1.1 round trips,
//! independent of any HTTP transport.
//!
//! ## Features
//!
//! - Envelope assembly with namespace injection (default, tns, urn, xsi
//!   and the fixed `tns0`..`tns14` slots)
//! - Pre-serialization type annotation of request graphs ([`XmlAnnotator`])
//! - Prefix-agnostic response parsing onto caller-supplied types
//! - SOAP Fault extraction
//! - Charset-aware decoding of response bodies
//!
//! ## Example
//!
//! ```ignore
//! use serde::Serialize;
//! use soapenv::{Envelope, SOAP_11_NS};
//!
//! #[derive(Serialize)]
//! struct Ping { value: u32 }
//!
//! let body = Ping { value: 1 };
//! let envelope = Envelope::new(SOAP_11_NS, "http://example.com/svc", &body);
//! let xml = envelope.to_xml().unwrap();
//! assert!(xml.contains("<soapenv:Body><Ping>"));
//! ```

pub mod annotate;
pub mod charset;
pub mod envelope;
pub mod error;
pub mod fault;
pub mod parser;

pub use annotate::{ReflectXmlTyped, XmlAnnotator, XmlTyped};
pub use envelope::{AuthHeader, Envelope, NAMESPACE_SLOTS, SoapHeader};
pub use error::SoapParseError;
pub use fault::SoapFault;
pub use parser::{parse_fault, parse_response};

/// SOAP 1.1 envelope namespace.
pub const SOAP_11_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// XML Schema instance namespace.
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

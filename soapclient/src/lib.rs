//! # soapclient - SOAP round-trip client
//!
//! Serializes a request object into a SOAP envelope, POSTs it, and
//! deserializes the XML response body back onto a caller type.
//!
//! ## Features
//!
//! - SOAP 1.1 round trips with derived or explicit SOAPAction values
//! - SOAP 1.2 round trips (action carried in the Content-Type)
//! - Namespace injection, including the fixed `tns0`..`tns14` slots
//! - Pre-serialization type annotation of request graphs
//! - Structured error classification: serialization, transport, HTTP
//!   status, deserialization
//! - Pluggable [`Transport`] with a ureq-backed default
//!
//! ## Example
//!
//! ```ignore
//! use serde::{Deserialize, Serialize};
//! use bevy_reflect::Reflect;
//! use soapclient::Client;
//!
//! #[derive(Serialize, Reflect)]
//! struct GetUser {
//!     #[serde(rename = "UserId")]
//!     user_id: u32,
//! }
//!
//! #[derive(Deserialize)]
//! struct GetUserBody {
//!     #[serde(rename = "GetUserResponse")]
//!     response: GetUserResponse,
//! }
//!
//! #[derive(Deserialize)]
//! struct GetUserResponse {
//!     #[serde(rename = "Name")]
//!     name: String,
//! }
//!
//! let client = Client::new("http://example.com/svc", "http://example.com/ns");
//! let mut request = GetUser { user_id: 7 };
//! let body: GetUserBody = client.round_trip(&mut request)?;
//! println!("{}", body.response.name);
//! # Ok::<(), soapclient::SoapError>(())
//! ```

pub mod client;
pub mod error;
pub mod transport;

pub use client::{Client, PostHook, PreHook};
pub use error::{HttpError, SoapError};
pub use transport::{ResponseBody, Transport, TransportError, UreqTransport};

// Protocol-layer types callers need alongside the client.
pub use soapenv::{
    AuthHeader, Envelope, SOAP_11_NS, SoapFault, SoapHeader, SoapParseError, XSI_NS, XmlAnnotator,
    XmlTyped,
};

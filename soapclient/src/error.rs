//! Error types for SOAP round trips.
//!
//! Every failure of a round trip lands in exactly one of the four
//! [`SoapError`] variants, so callers can branch on HTTP-layer failures
//! versus serialization or transport failures and own their retry policy.
//! Nothing is retried or logged internally.

use soapenv::{SoapFault, SoapParseError};
use thiserror::Error;

use crate::transport::TransportError;

/// A round trip failed.
#[derive(Debug, Error)]
pub enum SoapError {
    /// The request object could not be encoded as XML.
    #[error("failed to serialize request envelope: {0}")]
    Serialize(#[from] quick_xml::se::SeError),

    /// The HTTP exchange could not complete.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The exchange completed with a status other than 200 OK.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response body could not be parsed into the expected envelope.
    #[error("failed to decode response envelope: {0}")]
    Deserialize(#[from] SoapParseError),
}

/// A completed HTTP exchange that answered with a status other than
/// exactly "200 OK".
#[derive(Debug, Error)]
#[error("{status:?}: {body:?}")]
pub struct HttpError {
    /// Numeric status code.
    pub status_code: u16,
    /// Status line, e.g. "500 Internal Server Error".
    pub status: String,
    /// Response body fragment, capped at 1 MiB.
    pub body: String,
}

impl HttpError {
    /// Try to read a SOAP fault out of the captured body fragment.
    pub fn fault(&self) -> Option<SoapFault> {
        soapenv::parse_fault(&self.body)
    }
}

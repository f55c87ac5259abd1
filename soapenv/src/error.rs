use thiserror::Error;

use crate::fault::SoapFault;

/// Errors raised while decoding or parsing a SOAP response document.
#[derive(Debug, Error)]
pub enum SoapParseError {
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML decode error: {0}")]
    Decode(#[from] quick_xml::de::DeError),

    #[error("unknown charset label {0:?}")]
    UnknownCharset(String),

    #[error("missing SOAP Envelope")]
    MissingEnvelope,

    #[error("missing SOAP Body")]
    MissingBody,

    #[error("SOAP fault: {0}")]
    Fault(SoapFault),
}

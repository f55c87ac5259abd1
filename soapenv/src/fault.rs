//! SOAP fault model.

use std::fmt;

use serde::Deserialize;

use crate::error::SoapParseError;

/// A SOAP 1.1 fault carried in a response Body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapFault {
    /// Fault code, e.g. "soapenv:Client".
    pub fault_code: String,
    /// Human-readable fault description.
    pub fault_string: String,
}

#[derive(Deserialize)]
struct FaultXml {
    #[serde(default)]
    faultcode: String,
    #[serde(default)]
    faultstring: String,
}

impl SoapFault {
    pub fn new(fault_code: impl Into<String>, fault_string: impl Into<String>) -> Self {
        Self {
            fault_code: fault_code.into(),
            fault_string: fault_string.into(),
        }
    }

    /// Parse a complete `Fault` element.
    pub(crate) fn from_fault_xml(xml: &str) -> Result<Self, SoapParseError> {
        let fault: FaultXml = quick_xml::de::from_str(xml)?;
        Ok(Self {
            fault_code: fault.faultcode,
            fault_string: fault.faultstring,
        })
    }
}

impl fmt::Display for SoapFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.fault_code, self.fault_string)
    }
}

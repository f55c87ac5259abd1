//! HTTP transport collaborator.
//!
//! The engine hands a fully-formed POST request to a [`Transport`] and
//! gets back a response (status, headers, streaming body) or a
//! [`TransportError`]. It never retries and never inspects transport
//! internals beyond status and body.

use std::io::Read;
use std::time::Duration;

use thiserror::Error;
use ureq::Agent;
use ureq::http::{Request, Response};

/// Streaming response body handed back by a [`Transport`].
pub type ResponseBody = Box<dyn Read + Send>;

/// Executes an HTTP request on behalf of the round-trip engine.
///
/// Implementations must be safe for concurrent use; a client may be
/// shared across threads and issues one `execute` per round trip.
pub trait Transport: Send + Sync {
    /// Perform the exchange, honoring `timeout` as a deadline over the
    /// whole call when set.
    fn execute(
        &self,
        request: Request<Vec<u8>>,
        timeout: Option<Duration>,
    ) -> Result<Response<ResponseBody>, TransportError>;
}

/// The HTTP exchange could not complete.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be constructed (bad URL, bad header value).
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] ureq::http::Error),

    /// The configured deadline expired while the call was outstanding.
    #[error("request timed out: {0}")]
    Timeout(#[source] ureq::Error),

    /// Connection, TLS or protocol failure during the exchange.
    #[error("http exchange failed: {0}")]
    Exchange(#[source] ureq::Error),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(#[from] std::io::Error),
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        if matches!(err, ureq::Error::Timeout(_)) {
            TransportError::Timeout(err)
        } else {
            TransportError::Exchange(err)
        }
    }
}

/// Default [`Transport`] backed by a [`ureq::Agent`].
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// Build a transport with an agent that does not treat 4xx/5xx as
    /// errors, so error pages stay readable for diagnostics.
    pub fn new() -> Self {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .build();
        Self {
            agent: config.into(),
        }
    }

    /// Wrap an existing agent. The agent should be configured with
    /// `http_status_as_error(false)`; otherwise non-2xx responses surface
    /// as transport errors instead of structured HTTP errors.
    pub fn with_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(
        &self,
        request: Request<Vec<u8>>,
        timeout: Option<Duration>,
    ) -> Result<Response<ResponseBody>, TransportError> {
        let (parts, body) = request.into_parts();
        let mut builder = self.agent.post(parts.uri.to_string());
        if let Some(timeout) = timeout {
            builder = builder.config().timeout_global(Some(timeout)).build();
        }
        for (name, value) in parts.headers.iter() {
            builder = builder.header(name.as_str(), value.as_bytes());
        }
        let response = builder.send(&body[..]).map_err(TransportError::from)?;
        Ok(response.map(|body| Box::new(body.into_reader()) as ResponseBody))
    }
}

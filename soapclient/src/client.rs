//! SOAP round-trip client.
//!
//! A [`Client`] is plain configuration: endpoint, namespaces, optional
//! header, hooks and transport override. It is read-only during a round
//! trip and may be shared across threads, provided its transport and
//! hooks are themselves thread-safe; the engine adds no locking of its
//! own. Each round trip is a single attempt — retry policy belongs to the
//! caller.

use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use bevy_reflect::{DynamicTypePath, PartialReflect};
use once_cell::sync::Lazy;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::http::header::{CONTENT_TYPE, USER_AGENT};
use ureq::http::{HeaderMap, HeaderName, HeaderValue, Method, Request, Response, StatusCode};

use soapenv::{Envelope, SOAP_11_NS, SoapHeader, XmlAnnotator};

use crate::error::{HttpError, SoapError};
use crate::transport::{ResponseBody, Transport, TransportError, UreqTransport};

/// Default Content-Type for SOAP 1.1 requests.
const DEFAULT_CONTENT_TYPE: &str = "text/xml";

/// Cap on how much of an error response body is kept for diagnostics.
const ERROR_BODY_CAP: u64 = 1024 * 1024;

/// Hook invoked on the outbound request after the engine set its headers.
pub type PreHook = Box<dyn Fn(&mut Request<Vec<u8>>) + Send + Sync>;

/// Hook invoked on the inbound response before the body is consumed.
pub type PostHook = Box<dyn Fn(&Response<ResponseBody>) + Send + Sync>;

static DEFAULT_TRANSPORT: Lazy<UreqTransport> = Lazy::new(UreqTransport::new);

/// A SOAP client.
#[derive(Default)]
pub struct Client {
    /// Endpoint URL of the server.
    pub url: String,
    /// Optional User-Agent header added to SOAP 1.1 requests.
    pub user_agent: Option<String>,
    /// Service namespace: joined into SOAPAction values and used as the
    /// envelope's default namespace (falls back to `url` when empty).
    pub namespace: String,
    /// Uniform resource namespace (`xmlns:urn`), omitted when unset.
    pub urn_namespace: Option<String>,
    /// This-namespace (`xmlns:tns`), omitted when unset.
    pub this_namespace: Option<String>,
    /// Schema-instance namespace (`xmlns:xsi`), omitted when unset.
    pub xsi_namespace: Option<String>,
    /// Leave the namespace out of derived SOAPAction values.
    pub exclude_action_namespace: bool,
    /// Envelope namespace attribute override; defaults to SOAP 1.1.
    pub envelope_namespace: Option<String>,
    /// Optional header element attached verbatim to every envelope.
    pub header: Option<SoapHeader>,
    /// Content-Type override for SOAP 1.1 requests.
    pub content_type: Option<String>,
    /// Deadline applied to the HTTP call and body read.
    pub timeout: Option<Duration>,
    /// Additional envelope namespaces by slot name (`tns0`..`tns14`);
    /// unrecognized slot names are silently dropped.
    pub extra_namespaces: HashMap<String, String>,
    /// Registry of request types that self-annotate before serialization.
    pub annotator: XmlAnnotator,
    /// Transport override; a shared default agent is used when unset.
    pub transport: Option<Arc<dyn Transport>>,
    /// Hook to customize outbound requests.
    pub pre: Option<PreHook>,
    /// Hook to observe inbound responses.
    pub post: Option<PostHook>,
}

impl Client {
    /// Create a client for `url` with the given service namespace.
    pub fn new(url: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// Execute a round trip. The SOAPAction value is derived from the
    /// request's type name, prefixed with the service namespace unless
    /// `exclude_action_namespace` is set.
    ///
    /// The request is annotated in place before serialization; callers
    /// must not assume it is unchanged afterwards. The decoded response
    /// body is returned by value.
    pub fn round_trip<Req, Resp>(&self, req: &mut Req) -> Result<Resp, SoapError>
    where
        Req: Serialize + PartialReflect,
        Resp: DeserializeOwned,
    {
        let action = self.action_value(req.reflect_short_type_path());
        self.do_round_trip(HeaderPlan::soap11(self, action), req)
    }

    /// Execute a round trip with a caller-supplied SOAPAction value,
    /// subject to the same namespace-prefixing rule as [`Self::round_trip`].
    pub fn round_trip_with_action<Req, Resp>(
        &self,
        action: &str,
        req: &mut Req,
    ) -> Result<Resp, SoapError>
    where
        Req: Serialize + PartialReflect,
        Resp: DeserializeOwned,
    {
        let action = self.action_value(action);
        self.do_round_trip(HeaderPlan::soap11(self, action), req)
    }

    /// Execute a SOAP 1.2 round trip. The action travels inside the
    /// Content-Type; no SOAPAction header is set.
    pub fn round_trip_soap12<Req, Resp>(
        &self,
        action: &str,
        req: &mut Req,
    ) -> Result<Resp, SoapError>
    where
        Req: Serialize + PartialReflect,
        Resp: DeserializeOwned,
    {
        self.do_round_trip(HeaderPlan::soap12(action), req)
    }

    fn action_value(&self, operation: &str) -> String {
        if self.exclude_action_namespace {
            operation.to_string()
        } else {
            format!("{}/{}", self.namespace, operation)
        }
    }

    fn do_round_trip<Req, Resp>(&self, plan: HeaderPlan, req: &mut Req) -> Result<Resp, SoapError>
    where
        Req: Serialize + PartialReflect,
        Resp: DeserializeOwned,
    {
        self.annotator.annotate(req);

        let mut envelope = Envelope::new(
            self.envelope_namespace
                .as_deref()
                .filter(|ns| !ns.is_empty())
                .unwrap_or(SOAP_11_NS),
            if self.namespace.is_empty() {
                &self.url
            } else {
                &self.namespace
            },
            &*req,
        );
        envelope.tns = self.this_namespace.as_deref();
        envelope.urn = self.urn_namespace.as_deref();
        envelope.xsi = self.xsi_namespace.as_deref();
        envelope.header = self.header.as_ref();
        envelope.apply_namespace_slots(
            self.extra_namespaces
                .iter()
                .map(|(name, uri)| (name.as_str(), uri.as_str())),
        );
        let xml = envelope.to_xml()?;

        debug!("POST {} ({} bytes)", self.url, xml.len());

        let mut request = Request::builder()
            .method(Method::POST)
            .uri(self.url.as_str())
            .body(xml.into_bytes())
            .map_err(TransportError::InvalidRequest)?;
        apply_headers(&plan, request.headers_mut())?;
        if let Some(pre) = &self.pre {
            pre(&mut request);
        }

        let transport: &dyn Transport = match &self.transport {
            Some(transport) => transport.as_ref(),
            None => &*DEFAULT_TRANSPORT,
        };
        let response = transport.execute(request, self.timeout)?;
        if let Some(post) = &self.post {
            post(&response);
        }

        let status = response.status();
        debug!("{} answered {}", self.url, status);
        let mut body = response.into_body();
        if status != StatusCode::OK {
            let mut fragment = Vec::new();
            // A failed read here only shortens the fragment; the status
            // is the error either way.
            let _ = body.take(ERROR_BODY_CAP).read_to_end(&mut fragment);
            return Err(HttpError {
                status_code: status.as_u16(),
                status: status_line(status),
                body: String::from_utf8_lossy(&fragment).into_owned(),
            }
            .into());
        }

        let mut raw = Vec::new();
        body.read_to_end(&mut raw).map_err(TransportError::Body)?;
        let text = soapenv::charset::decode(&raw)?;
        Ok(soapenv::parse_response(&text)?)
    }
}

/// Headers a protocol variant sets on the outbound request.
struct HeaderPlan {
    content_type: String,
    soap_action: Option<String>,
    user_agent: Option<String>,
}

impl HeaderPlan {
    fn soap11(client: &Client, action: String) -> Self {
        Self {
            content_type: client
                .content_type
                .clone()
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            soap_action: Some(action),
            user_agent: client.user_agent.clone(),
        }
    }

    // SOAP 1.2 carries the action in the Content-Type and sets nothing
    // else, not even a configured User-Agent.
    fn soap12(action: &str) -> Self {
        Self {
            content_type: format!("application/soap+xml; charset=utf-8; action=\"{action}\""),
            soap_action: None,
            user_agent: None,
        }
    }
}

fn apply_headers(plan: &HeaderPlan, headers: &mut HeaderMap) -> Result<(), SoapError> {
    headers.insert(CONTENT_TYPE, header_value(&plan.content_type)?);
    if let Some(user_agent) = &plan.user_agent {
        headers.append(USER_AGENT, header_value(user_agent)?);
    }
    if let Some(action) = &plan.soap_action {
        headers.append(HeaderName::from_static("soapaction"), header_value(action)?);
    }
    Ok(())
}

fn header_value(value: &str) -> Result<HeaderValue, SoapError> {
    HeaderValue::from_str(value)
        .map_err(|err| TransportError::InvalidRequest(err.into()).into())
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_value_joins_namespace_and_operation() {
        let client = Client::new("http://example.com/svc", "http://example.com/ns");
        assert_eq!(
            client.action_value("GetUser"),
            "http://example.com/ns/GetUser"
        );
    }

    #[test]
    fn action_value_without_namespace() {
        let mut client = Client::new("http://example.com/svc", "http://example.com/ns");
        client.exclude_action_namespace = true;
        assert_eq!(client.action_value("GetUser"), "GetUser");
    }

    #[test]
    fn soap12_plan_is_fixed() {
        let plan = HeaderPlan::soap12("DoThing");
        assert_eq!(
            plan.content_type,
            "application/soap+xml; charset=utf-8; action=\"DoThing\""
        );
        assert!(plan.soap_action.is_none());
        assert!(plan.user_agent.is_none());
    }

    #[test]
    fn status_lines_use_canonical_reasons() {
        assert_eq!(status_line(StatusCode::OK), "200 OK");
        assert_eq!(
            status_line(StatusCode::INTERNAL_SERVER_ERROR),
            "500 Internal Server Error"
        );
    }

    #[test]
    fn invalid_header_values_are_rejected() {
        assert!(header_value("line\nbreak").is_err());
    }

    #[test]
    fn clients_can_be_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Client>();
    }
}

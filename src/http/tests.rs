use std::cell::RefCell;

use super::{HttpResponse, HttpTransport, TransportError};
use crate::candidate::Method;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedRequest {
    pub method: Method,
    pub uri: String,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

type Handler = Box<dyn Fn(&RecordedRequest) -> Result<HttpResponse, TransportError>>;

/// Scripted transport: every request is recorded, then answered by the
/// handler.
pub(crate) struct StubTransport {
    on_request: Handler,
    calls: RefCell<Vec<RecordedRequest>>,
}

impl StubTransport {
    pub fn new<F>(on_request: F) -> Self
    where
        F: Fn(&RecordedRequest) -> Result<HttpResponse, TransportError> + 'static,
    {
        Self {
            on_request: Box::new(on_request),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedRequest> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn handle(&self, request: RecordedRequest) -> Result<HttpResponse, TransportError> {
        let result = (self.on_request)(&request);
        self.calls.borrow_mut().push(request);
        result
    }
}

impl HttpTransport for StubTransport {
    fn get(&self, uri: &str) -> Result<HttpResponse, TransportError> {
        self.handle(RecordedRequest {
            method: Method::Get,
            uri: uri.to_string(),
            body: Vec::new(),
        })
    }

    fn post(
        &self,
        uri: &str,
        body: &[u8],
        _content_type: &str,
    ) -> Result<HttpResponse, TransportError> {
        self.handle(RecordedRequest {
            method: Method::Post,
            uri: uri.to_string(),
            body: body.to_vec(),
        })
    }
}

#[test]
fn header_lookup_ignores_case() {
    let response = HttpResponse::new(302, Vec::new()).with_header("Location", " https://a.test/ ");
    assert_eq!(response.header("LOCATION"), Some(" https://a.test/ "));
    assert_eq!(response.location(), Some("https://a.test/"));
    assert_eq!(response.header("content-type"), None);
}

#[test]
fn blank_location_is_absent() {
    let response = HttpResponse::new(302, Vec::new()).with_header("location", "   ");
    assert_eq!(response.location(), None);
}

#[test]
fn relative_location_resolves_against_request() {
    let resolved = super::resolve_location(
        "https://a.test/Autodiscover/Autodiscover.xml",
        "/autodiscover/autodiscover.xml",
    )
    .unwrap();
    assert_eq!(resolved, "https://a.test/autodiscover/autodiscover.xml");
    let absolute = super::resolve_location("https://a.test/x", "http://b.test/y").unwrap();
    assert_eq!(absolute, "http://b.test/y");
    assert!(super::resolve_location("not a uri", "also not").is_err());
}

#[test]
fn stub_records_requests_in_order() {
    let http = StubTransport::new(|_| Ok(HttpResponse::new(200, b"ok".to_vec())));
    http.get("https://a.test/").unwrap();
    http.post("https://b.test/", b"<x/>", "text/xml").unwrap();
    let calls = http.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].method, Method::Get);
    assert_eq!(calls[1].method, Method::Post);
    assert_eq!(calls[1].body_text(), "<x/>");
}

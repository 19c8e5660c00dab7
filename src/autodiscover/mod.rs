//! Outlook autodiscover request/redirect cycle against one candidate.
//!
//! Every processed response is one step of an explicit loop:
//!
//! * HTTP 302 moves the request to the resolved `Location`;
//! * HTTP 200 is parsed; `redirectAddr` re-posts to the same URI with the new
//!   address, `redirectUrl` re-posts the same address to the new URI, an
//!   `<Error>` ends the exchange, anything else is the delivered document;
//! * any other status, or a transport error, ends the exchange.
//!
//! The first request uses the candidate's method and every follow-up is a
//! `POST`. Redirects are counted; one past `max_redirects` is a redirect loop.

mod error;
mod request;
mod response;

pub use error::ParseError;
pub use request::{CONTENT_TYPE, REQUEST_SCHEMA, RESPONSE_SCHEMA, request_body};
pub use response::{AutodiscoverResponse, ProtocolSettings, RedirectAction, ResponseError};

use tracing::{debug, trace};

use crate::address::EmailAddress;
use crate::attempt::{Document, Failure, FailureReason, Transition};
use crate::candidate::{Candidate, Method};
use crate::http::{HttpTransport, resolve_location};

/// Default bound on redirects followed for a single candidate.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone)]
struct Request {
    uri: String,
    email: EmailAddress,
    method: Method,
}

enum Step {
    Redirect { next: Request, transition: Transition },
    Delivered(Vec<u8>),
    Failed(FailureReason),
}

pub struct AutodiscoverClient<'a, H> {
    http: &'a H,
    max_redirects: usize,
}

impl<'a, H: HttpTransport> AutodiscoverClient<'a, H> {
    pub fn new(http: &'a H, max_redirects: usize) -> Self {
        Self {
            http,
            max_redirects,
        }
    }

    /// Runs the exchange for `candidate` until a document is delivered or the
    /// candidate fails. The returned trail holds one transition per response.
    pub fn run(&self, candidate: &Candidate, email: &EmailAddress) -> Result<Document, Failure> {
        let mut request = Request {
            uri: candidate.uri.clone(),
            email: email.clone(),
            method: candidate.method,
        };
        let mut trail = Vec::new();
        let mut redirects = 0;

        loop {
            match self.step(&request) {
                Step::Delivered(body) => {
                    debug!(uri = %request.uri, "autodiscover document delivered");
                    trail.push(Transition::Delivered {
                        uri: request.uri.clone(),
                    });
                    return Ok(Document {
                        uri: request.uri,
                        body,
                        trail,
                    });
                }
                Step::Failed(reason) => {
                    debug!(uri = %request.uri, %reason, "autodiscover exchange failed");
                    return Err(fail(trail, &request.uri, reason));
                }
                Step::Redirect { next, transition } => {
                    redirects += 1;
                    if redirects > self.max_redirects {
                        let reason = FailureReason::RedirectLoop {
                            hops: self.max_redirects,
                        };
                        debug!(uri = %request.uri, %reason, "autodiscover redirect bound reached");
                        return Err(fail(trail, &request.uri, reason));
                    }
                    debug!(%transition, hop = redirects, "autodiscover redirect");
                    trail.push(transition);
                    request = next;
                }
            }
        }
    }

    fn step(&self, request: &Request) -> Step {
        let result = match request.method {
            Method::Get => self.http.get(&request.uri),
            Method::Post => {
                let body = request_body(&request.email.to_string());
                self.http.post(&request.uri, body.as_bytes(), CONTENT_TYPE)
            }
        };
        let response = match result {
            Ok(response) => response,
            Err(err) => return Step::Failed(FailureReason::transport(err.to_string())),
        };
        trace!(uri = %request.uri, status = response.status, "autodiscover response");

        match response.status {
            302 => {
                let Some(location) = response.location() else {
                    return Step::Failed(FailureReason::protocol(
                        302,
                        "redirect without Location header",
                    ));
                };
                match resolve_location(&request.uri, location) {
                    Ok(to) => Step::Redirect {
                        transition: Transition::HttpRedirect {
                            from: request.uri.clone(),
                            to: to.clone(),
                            status: 302,
                        },
                        next: Request {
                            uri: to,
                            email: request.email.clone(),
                            method: Method::Post,
                        },
                    },
                    Err(err) => Step::Failed(FailureReason::protocol(
                        302,
                        format!("unusable Location {location:?}: {err}"),
                    )),
                }
            }
            200 => interpret(request, response.body),
            status => Step::Failed(FailureReason::protocol(
                i32::from(status),
                "unexpected HTTP status",
            )),
        }
    }
}

fn interpret(request: &Request, body: Vec<u8>) -> Step {
    let action = AutodiscoverResponse::parse(&body).and_then(|doc| doc.redirect_action());
    match action {
        Err(err) => Step::Failed(FailureReason::invalid_document(err.to_string())),
        Ok(RedirectAction::None) => Step::Delivered(body),
        Ok(RedirectAction::ProtocolError { code, message }) => {
            Step::Failed(FailureReason::protocol(code, message))
        }
        Ok(RedirectAction::RedirectToAddress(email)) => Step::Redirect {
            transition: Transition::RedirectAddress {
                uri: request.uri.clone(),
                from: request.email.to_string(),
                to: email.to_string(),
            },
            next: Request {
                uri: request.uri.clone(),
                email,
                method: Method::Post,
            },
        },
        Ok(RedirectAction::RedirectToUrl(url)) => match resolve_location(&request.uri, &url) {
            Ok(to) => Step::Redirect {
                transition: Transition::RedirectUrl {
                    from: request.uri.clone(),
                    to: to.clone(),
                },
                next: Request {
                    uri: to,
                    email: request.email.clone(),
                    method: Method::Post,
                },
            },
            Err(err) => {
                Step::Failed(FailureReason::invalid_document(format!("redirectUrl {url:?}: {err}")))
            }
        },
    }
}

fn fail(mut trail: Vec<Transition>, uri: &str, reason: FailureReason) -> Failure {
    trail.push(Transition::Failed {
        uri: uri.to_string(),
        reason: reason.clone(),
    });
    Failure { reason, trail }
}

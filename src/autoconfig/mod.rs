//! Static autoconfig (`clientConfig` v1.1) retrieval.
//!
//! A candidate is fetched with `GET`; standard HTTP redirects are followed up
//! to the configured bound. A `200` body counts only when its root is
//! `clientConfig`; anything else fails the candidate as an invalid document.

mod summary;

pub use summary::{ClientConfigSummary, ServerSettings, SummaryError};

use tracing::{debug, trace};

use crate::attempt::{Document, Failure, FailureReason, Transition};
use crate::candidate::Candidate;
use crate::http::{HttpTransport, resolve_location};

const REDIRECT_STATUSES: [u16; 5] = [301, 302, 303, 307, 308];

pub fn fetch<H: HttpTransport>(
    http: &H,
    candidate: &Candidate,
    max_redirects: usize,
) -> Result<Document, Failure> {
    let mut uri = candidate.uri.clone();
    let mut trail = Vec::new();
    let mut redirects = 0;

    loop {
        let response = match http.get(&uri) {
            Ok(response) => response,
            Err(err) => {
                return Err(failed(trail, uri, FailureReason::transport(err.to_string())));
            }
        };
        trace!(uri = %uri, status = response.status, "autoconfig response");

        if response.status == 200 {
            if let Err(err) = ClientConfigSummary::parse(&response.body) {
                debug!(uri = %uri, error = %err, "200 without a clientConfig document");
                return Err(failed(trail, uri, FailureReason::invalid_document(err.to_string())));
            }
            trail.push(Transition::Delivered { uri: uri.clone() });
            return Ok(Document {
                uri,
                body: response.body,
                trail,
            });
        }

        if !REDIRECT_STATUSES.contains(&response.status) {
            let reason =
                FailureReason::protocol(i32::from(response.status), "unexpected HTTP status");
            return Err(failed(trail, uri, reason));
        }

        let Some(location) = response.location() else {
            let reason = FailureReason::protocol(
                i32::from(response.status),
                "redirect without Location header",
            );
            return Err(failed(trail, uri, reason));
        };
        let to = match resolve_location(&uri, location) {
            Ok(to) => to,
            Err(err) => {
                let reason = FailureReason::protocol(
                    i32::from(response.status),
                    format!("unusable Location {location:?}: {err}"),
                );
                return Err(failed(trail, uri, reason));
            }
        };

        redirects += 1;
        if redirects > max_redirects {
            let reason = FailureReason::RedirectLoop {
                hops: max_redirects,
            };
            return Err(failed(trail, uri, reason));
        }
        debug!(from = %uri, to = %to, status = response.status, "autoconfig redirect");
        trail.push(Transition::HttpRedirect {
            from: uri,
            to: to.clone(),
            status: response.status,
        });
        uri = to;
    }
}

fn failed(mut trail: Vec<Transition>, uri: String, reason: FailureReason) -> Failure {
    trail.push(Transition::Failed {
        uri,
        reason: reason.clone(),
    });
    Failure { reason, trail }
}

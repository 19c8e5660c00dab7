//! Sequential walk over a candidate list.

mod types;

pub use types::{
    Discovered, DiscoveryOutcome, Document, FailedAttempt, Failure, FailureReason, Transition,
};

use tracing::{debug, info};

use crate::candidate::Candidate;

/// Invokes `attempt` for each candidate in order and stops at the first
/// document. Failures are collected, never retried.
pub fn run_attempts<F>(candidates: &[Candidate], mut attempt: F) -> DiscoveryOutcome
where
    F: FnMut(&Candidate) -> Result<Document, Failure>,
{
    let mut failed = Vec::new();
    for candidate in candidates {
        debug!(method = %candidate.method, uri = %candidate.uri, "trying candidate");
        match attempt(candidate) {
            Ok(document) => {
                info!(uri = %candidate.uri, served_by = %document.uri, "configuration found");
                return DiscoveryOutcome::Success(Discovered {
                    candidate: candidate.clone(),
                    document,
                    skipped: failed,
                });
            }
            Err(Failure { reason, trail }) => {
                debug!(uri = %candidate.uri, %reason, "candidate failed");
                failed.push(FailedAttempt {
                    candidate: candidate.clone(),
                    reason,
                    trail,
                });
            }
        }
    }
    DiscoveryOutcome::Exhausted { attempts: failed }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(uri: &str) -> Document {
        Document {
            uri: uri.to_string(),
            body: b"<clientConfig/>".to_vec(),
            trail: Vec::new(),
        }
    }

    #[test]
    fn stops_at_first_success() {
        let candidates = [
            Candidate::get("https://a.test/"),
            Candidate::get("https://b.test/"),
            Candidate::get("https://c.test/"),
        ];
        let mut invoked = Vec::new();
        let outcome = run_attempts(&candidates, |candidate| {
            invoked.push(candidate.uri.clone());
            match candidate.uri.as_str() {
                "https://b.test/" => Ok(document(&candidate.uri)),
                _ => Err(FailureReason::transport("refused").into()),
            }
        });

        assert_eq!(invoked, ["https://a.test/", "https://b.test/"]);
        let DiscoveryOutcome::Success(found) = outcome else {
            panic!("expected success");
        };
        assert_eq!(found.candidate.uri, "https://b.test/");
        assert_eq!(found.skipped.len(), 1);
        assert_eq!(found.skipped[0].candidate.uri, "https://a.test/");
    }

    #[test]
    fn exhausted_keeps_failure_order() {
        let candidates = [Candidate::get("https://a.test/"), Candidate::post("https://b.test/")];
        let outcome = run_attempts(&candidates, |candidate| {
            Err(FailureReason::protocol(404, candidate.uri.clone()).into())
        });

        assert!(!outcome.is_success());
        assert!(outcome.document().is_none());
        let reasons: Vec<String> = outcome
            .attempts()
            .iter()
            .map(|attempt| attempt.reason.to_string())
            .collect();
        assert_eq!(
            reasons,
            [
                "protocol failure (404): https://a.test/",
                "protocol failure (404): https://b.test/"
            ]
        );
    }

    #[test]
    fn empty_list_is_exhausted() {
        let outcome = run_attempts(&[], |_| -> Result<Document, Failure> {
            panic!("no candidate to try")
        });
        assert!(matches!(outcome, DiscoveryOutcome::Exhausted { attempts } if attempts.is_empty()));
    }
}

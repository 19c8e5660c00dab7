#[cfg(not(feature = "with-serde"))]
use anyhow::bail;
use anyhow::Result;

use crate::args::Format;
use mailconf_lib::{
    AutodiscoverResponse, Candidate, ClientConfigSummary, DiscoveryOutcome, EmailAddress,
    FailedAttempt, Protocol, ServiceLookup, ServiceStatus, Transition,
};

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
pub struct OutcomeReport<'a> {
    pub email: String,
    pub protocol: Protocol,
    pub found: bool,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub candidate: Option<&'a Candidate>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub served_by: Option<&'a str>,
    pub trail: &'a [Transition],
    pub failed: &'a [FailedAttempt],
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub document: Option<String>,
}

impl<'a> OutcomeReport<'a> {
    pub fn new(address: &EmailAddress, protocol: Protocol, outcome: &'a DiscoveryOutcome) -> Self {
        let found = match outcome {
            DiscoveryOutcome::Success(found) => Some(found),
            DiscoveryOutcome::Exhausted { .. } => None,
        };
        Self {
            email: address.to_string(),
            protocol,
            found: found.is_some(),
            candidate: found.map(|f| &f.candidate),
            served_by: found.map(|f| f.document.uri.as_str()),
            trail: found.map(|f| f.document.trail.as_slice()).unwrap_or_default(),
            failed: outcome.attempts(),
            document: found.map(|f| f.document.text()),
        }
    }
}

pub fn print_outcome(report: &OutcomeReport<'_>, format: Format) -> Result<()> {
    match format {
        Format::Human => {
            print_outcome_human(report);
            Ok(())
        }
        Format::Json => print_json(report),
    }
}

fn print_outcome_human(report: &OutcomeReport<'_>) {
    match (report.candidate, report.served_by) {
        (Some(candidate), Some(served_by)) => {
            println!("[FOUND]  {} ({})", report.email, report.protocol);
            println!("        candidate: {candidate}");
            if served_by != candidate.uri {
                println!("        served by: {served_by}");
            }
            for step in report.trail {
                println!("        - {step}");
            }
            if let Some(document) = &report.document {
                for line in summarize(report.protocol, document.as_bytes()) {
                    println!("        {line}");
                }
            }
        }
        _ => println!("[NOT FOUND] {} ({})", report.email, report.protocol),
    }

    if !report.failed.is_empty() {
        println!("        failed candidates:");
        for attempt in report.failed {
            println!("        x {} :: {}", attempt.candidate, attempt.reason);
        }
    }
}

/// One line per server advertised by the document; empty when it cannot be
/// summarized.
fn summarize(protocol: Protocol, document: &[u8]) -> Vec<String> {
    match protocol {
        Protocol::Autoconfig => match ClientConfigSummary::parse(document) {
            Ok(summary) => {
                let mut lines = Vec::new();
                if let Some(name) = &summary.display_name {
                    lines.push(format!("provider: {name}"));
                }
                let servers = summary
                    .incoming
                    .iter()
                    .map(|s| ("in ", s))
                    .chain(summary.outgoing.iter().map(|s| ("out", s)));
                for (direction, server) in servers {
                    lines.push(format!(
                        "{direction} {:<5} {}:{} {}",
                        server.kind,
                        server.hostname,
                        server.port.map(|p| p.to_string()).unwrap_or_else(|| "?".into()),
                        server.socket_type.as_deref().unwrap_or("")
                    ));
                }
                lines
            }
            Err(_) => Vec::new(),
        },
        Protocol::Autodiscover => match AutodiscoverResponse::parse(document) {
            Ok(response) => {
                let mut lines = Vec::new();
                if let Some(name) = &response.display_name {
                    lines.push(format!("user: {name}"));
                }
                for protocol in &response.protocols {
                    let ssl = match protocol.ssl {
                        Some(true) => "ssl",
                        Some(false) => "plain",
                        None => "",
                    };
                    lines.push(format!(
                        "{:<5} {}:{} {ssl}",
                        protocol.kind,
                        protocol.server,
                        protocol.port.map(|p| p.to_string()).unwrap_or_else(|| "?".into()),
                    ));
                }
                lines
            }
            Err(_) => Vec::new(),
        },
    }
}

pub fn print_candidates(candidates: &[Candidate], format: Format) -> Result<()> {
    match format {
        Format::Human => {
            for (index, candidate) in candidates.iter().enumerate() {
                println!("{:>2}. {candidate}", index + 1);
            }
            Ok(())
        }
        Format::Json => print_json(&candidates),
    }
}

pub fn print_services(lookups: &[ServiceLookup], format: Format) -> Result<()> {
    match format {
        Format::Human => {
            for lookup in lookups {
                match &lookup.status {
                    ServiceStatus::Available { selected } => println!(
                        "[OK]      {:<10} {}:{} (priority {}, weight {})",
                        lookup.service.label(),
                        selected.host(),
                        selected.port,
                        selected.priority,
                        selected.weight
                    ),
                    ServiceStatus::Unavailable => {
                        println!("[OFF]     {:<10} not offered", lookup.service.label())
                    }
                    ServiceStatus::Absent => println!(
                        "[NONE]    {:<10} no records at {}",
                        lookup.service.label(),
                        lookup.name
                    ),
                    ServiceStatus::Failed { message } => {
                        println!("[ERROR]   {:<10} {message}", lookup.service.label())
                    }
                }
            }
            Ok(())
        }
        Format::Json => print_json(&lookups),
    }
}

#[cfg(feature = "with-serde")]
fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn print_json<T: ?Sized>(_value: &T) -> Result<()> {
    bail!("--format json requires the 'with-serde' feature")
}

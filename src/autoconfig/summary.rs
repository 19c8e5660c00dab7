use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },
    #[error("expected <clientConfig>, found {found}")]
    NotClientConfig { found: String },
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerSettings {
    /// `imap`, `pop3`, `smtp`, ...
    pub kind: String,
    pub hostname: String,
    pub port: Option<u16>,
    pub socket_type: Option<String>,
    pub username: Option<String>,
}

/// Connection settings advertised by a `clientConfig` v1.1 document.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfigSummary {
    pub provider_id: Option<String>,
    pub display_name: Option<String>,
    pub domains: Vec<String>,
    pub incoming: Vec<ServerSettings>,
    pub outgoing: Vec<ServerSettings>,
}

impl ClientConfigSummary {
    pub fn parse(bytes: &[u8]) -> Result<Self, SummaryError> {
        let mut reader = Reader::from_reader(bytes);
        reader.trim_text(true);

        let mut summary = Self::default();
        let mut path: Vec<String> = Vec::new();
        let mut root_seen = false;
        let mut server: Option<(bool, ServerSettings)> = None;
        let mut buf = Vec::new();

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|source| SummaryError::Xml {
                    position: reader.buffer_position(),
                    source,
                })?;
            match event {
                Event::Start(ref e) => {
                    let name = local_name(e);
                    if path.is_empty() {
                        if root_seen || name != "clientConfig" {
                            return Err(SummaryError::NotClientConfig { found: name });
                        }
                        root_seen = true;
                    }
                    match name.as_str() {
                        "emailProvider" => summary.provider_id = attribute(e, b"id"),
                        "incomingServer" | "outgoingServer" => {
                            let settings = ServerSettings {
                                kind: attribute(e, b"type").unwrap_or_default(),
                                ..ServerSettings::default()
                            };
                            server = Some((name == "incomingServer", settings));
                        }
                        _ => {}
                    }
                    path.push(name);
                }
                Event::End(_) => {
                    if let Some(name) = path.pop() {
                        if name == "incomingServer" || name == "outgoingServer" {
                            match server.take() {
                                Some((true, settings)) => summary.incoming.push(settings),
                                Some((false, settings)) => summary.outgoing.push(settings),
                                None => {}
                            }
                        }
                    }
                }
                Event::Text(ref e) => {
                    let text = e.unescape().map_err(|source| SummaryError::Xml {
                        position: reader.buffer_position(),
                        source,
                    })?;
                    let text = text.trim().to_string();
                    let leaf = path.last().map(String::as_str).unwrap_or_default();
                    if let Some((_, settings)) = server.as_mut() {
                        assign(settings, leaf, text);
                    } else if path.len() == 3 && leaf == "domain" {
                        summary.domains.push(text);
                    } else if path.len() == 3 && leaf == "displayName" {
                        summary.display_name = Some(text);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !root_seen {
            return Err(SummaryError::NotClientConfig {
                found: "an empty document".to_string(),
            });
        }
        Ok(summary)
    }
}

fn assign(settings: &mut ServerSettings, field: &str, text: String) {
    match field {
        "hostname" => settings.hostname = text,
        "port" => settings.port = text.parse().ok(),
        "socketType" => settings.socket_type = Some(text),
        "username" => settings.username = Some(text),
        _ => {}
    }
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}

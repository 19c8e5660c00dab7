use quick_xml::Reader;
use quick_xml::events::Event;

use super::ParseError;
use crate::address::EmailAddress;

/// Server-reported failure inside an autodiscover response.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseError {
    pub code: i32,
    pub message: String,
}

/// One `<Protocol>` block of an Outlook autodiscover response.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtocolSettings {
    pub kind: String,
    pub server: String,
    pub port: Option<u16>,
    pub ssl: Option<bool>,
}

/// The parts of an autodiscover response the redirect cycle and the
/// summaries need. Element names are matched case-insensitively without
/// namespace prefixes.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutodiscoverResponse {
    pub action: Option<String>,
    pub redirect_addr: Option<String>,
    pub redirect_url: Option<String>,
    pub error: Option<ResponseError>,
    pub display_name: Option<String>,
    pub protocols: Vec<ProtocolSettings>,
}

/// What the client has to do next with one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectAction {
    None,
    RedirectToAddress(EmailAddress),
    RedirectToUrl(String),
    ProtocolError { code: i32, message: String },
}

impl AutodiscoverResponse {
    pub fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        let mut reader = Reader::from_reader(bytes);
        reader.trim_text(true);

        let mut builder = Builder::default();
        let mut buf = Vec::new();
        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|source| ParseError::xml(reader.buffer_position(), source))?;
            match event {
                Event::Start(ref e) => builder.open(e.local_name().as_ref())?,
                Event::Empty(ref e) => {
                    builder.open(e.local_name().as_ref())?;
                    builder.close()?;
                }
                Event::End(_) => builder.close()?,
                Event::Text(ref e) => {
                    let text = e
                        .unescape()
                        .map_err(|source| ParseError::xml(reader.buffer_position(), source))?;
                    builder.text(text.trim())?;
                }
                Event::CData(ref e) => {
                    let text = String::from_utf8_lossy(e).into_owned();
                    builder.text(text.trim())?;
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        builder.finish()
    }

    /// Interprets the response: an in-document redirect first, then a
    /// server error, otherwise the document is the final configuration.
    pub fn redirect_action(&self) -> Result<RedirectAction, ParseError> {
        let action = self.action.as_deref().unwrap_or_default();
        if action.eq_ignore_ascii_case("redirectAddr") {
            let target = non_empty(&self.redirect_addr).ok_or(ParseError::MissingRedirectTarget {
                action: "redirectAddr",
            })?;
            let address = EmailAddress::parse(target)
                .map_err(|source| ParseError::RedirectAddress { source })?;
            return Ok(RedirectAction::RedirectToAddress(address));
        }
        if action.eq_ignore_ascii_case("redirectUrl") {
            let target = non_empty(&self.redirect_url).ok_or(ParseError::MissingRedirectTarget {
                action: "redirectUrl",
            })?;
            return Ok(RedirectAction::RedirectToUrl(target.to_string()));
        }
        if let Some(error) = &self.error {
            return Ok(RedirectAction::ProtocolError {
                code: error.code,
                message: error.message.clone(),
            });
        }
        Ok(RedirectAction::None)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Default)]
struct Builder {
    path: Vec<String>,
    root_seen: bool,
    root_closed: bool,
    protocol: Option<ProtocolSettings>,
    response: AutodiscoverResponse,
}

impl Builder {
    fn open(&mut self, raw_name: &[u8]) -> Result<(), ParseError> {
        let name = String::from_utf8_lossy(raw_name).to_ascii_lowercase();
        if self.path.is_empty() {
            if self.root_closed {
                return Err(ParseError::StrayContent);
            }
            if name != "autodiscover" {
                return Err(ParseError::UnexpectedRoot {
                    name: String::from_utf8_lossy(raw_name).into_owned(),
                });
            }
            self.root_seen = true;
        }
        match name.as_str() {
            "protocol" => self.protocol = Some(ProtocolSettings::default()),
            "error" => {
                self.response.error.get_or_insert_with(ResponseError::default);
            }
            _ => {}
        }
        self.path.push(name);
        Ok(())
    }

    fn close(&mut self) -> Result<(), ParseError> {
        let name = self.path.pop().ok_or(ParseError::StrayContent)?;
        if name == "protocol" {
            if let Some(protocol) = self.protocol.take() {
                self.response.protocols.push(protocol);
            }
        }
        if self.path.is_empty() {
            self.root_closed = true;
        }
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<(), ParseError> {
        let depth = self.path.len();
        if depth == 0 {
            return Err(ParseError::StrayContent);
        }
        let leaf = self.path[depth - 1].as_str();
        let parent = if depth >= 2 {
            self.path[depth - 2].as_str()
        } else {
            ""
        };
        let value = text.to_string();
        let response = &mut self.response;

        match (parent, leaf) {
            ("account", "action") => response.action = Some(value),
            ("account", "redirectaddr") => response.redirect_addr = Some(value),
            ("account", "redirecturl") => response.redirect_url = Some(value),
            ("user", "displayname") => response.display_name = Some(value),
            ("error", "errorcode") => {
                if let Some(error) = response.error.as_mut() {
                    error.code = value.parse().unwrap_or_default();
                }
            }
            ("error", "message") => {
                if let Some(error) = response.error.as_mut() {
                    error.message = value;
                }
            }
            ("protocol", field) => {
                if let Some(protocol) = self.protocol.as_mut() {
                    match field {
                        "type" => protocol.kind = value,
                        "server" => protocol.server = value,
                        "port" => protocol.port = value.parse().ok(),
                        "ssl" => protocol.ssl = Some(value.eq_ignore_ascii_case("on")),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn finish(self) -> Result<AutodiscoverResponse, ParseError> {
        if let Some(open) = self.path.last() {
            return Err(ParseError::Truncated { name: open.clone() });
        }
        if !self.root_seen {
            return Err(ParseError::NoRoot);
        }
        Ok(self.response)
    }
}

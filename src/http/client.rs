use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use tracing::trace;

use super::{HttpResponse, HttpTransport, TransportError};
use crate::discover::DiscoveryOptions;

/// Blocking HTTP client that never follows redirects on its own.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    pub fn new(timeout: Option<Duration>, user_agent: &str) -> Result<Self, TransportError> {
        let inner = Client::builder()
            .redirect(Policy::none())
            .user_agent(user_agent.to_string())
            .timeout(timeout)
            .build()
            .map_err(TransportError::client_init)?;
        Ok(Self { inner })
    }

    pub fn from_options(options: &DiscoveryOptions) -> Result<Self, TransportError> {
        Self::new(options.timeout(), &options.user_agent)
    }

    fn read(
        uri: &str,
        response: reqwest::blocking::Response,
    ) -> Result<HttpResponse, TransportError> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .map_err(|source| TransportError::http(uri, source))?
            .to_vec();
        trace!(uri, status, bytes = body.len(), "response received");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl HttpTransport for HttpClient {
    fn get(&self, uri: &str) -> Result<HttpResponse, TransportError> {
        let response = self
            .inner
            .get(uri)
            .send()
            .map_err(|source| TransportError::http(uri, source))?;
        Self::read(uri, response)
    }

    fn post(
        &self,
        uri: &str,
        body: &[u8],
        content_type: &str,
    ) -> Result<HttpResponse, TransportError> {
        let response = self
            .inner
            .post(uri)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body.to_vec())
            .send()
            .map_err(|source| TransportError::http(uri, source))?;
        Self::read(uri, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    fn spawn_one_shot(reply: &'static str) -> (u16, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        let port = listener.local_addr().expect("addr").port();
        let (ready_tx, ready_rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            ready_tx.send(()).ok();
            let Ok((mut stream, _)) = listener.accept() else {
                return String::new();
            };
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut request_line = String::new();
            reader.read_line(&mut request_line).ok();
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
                    break;
                }
            }
            stream.write_all(reply.as_bytes()).ok();
            stream.flush().ok();
            request_line
        });
        ready_rx.recv().expect("server ready");
        (port, handle)
    }

    #[test]
    #[ignore = "requires loopback TCP binding"]
    fn redirects_are_returned_not_followed() {
        let (port, handle) = spawn_one_shot(
            "HTTP/1.1 302 Found\r\nLocation: https://elsewhere.test/\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        let client = HttpClient::new(Some(Duration::from_secs(5)), "mailconf-test").unwrap();
        let response = client
            .get(&format!("http://127.0.0.1:{port}/mail/config-v1.1.xml"))
            .expect("response");
        assert_eq!(response.status, 302);
        assert_eq!(response.location(), Some("https://elsewhere.test/"));
        let request_line = handle.join().expect("server thread");
        assert!(request_line.starts_with("GET /mail/config-v1.1.xml"));
    }

    #[test]
    #[ignore = "requires loopback TCP binding"]
    fn refused_connection_is_transport_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("addr").port()
        };
        let client = HttpClient::new(Some(Duration::from_secs(2)), "mailconf-test").unwrap();
        let err = client
            .post(&format!("http://127.0.0.1:{port}/"), b"<x/>", "text/xml")
            .expect_err("nothing listening");
        assert!(matches!(
            err,
            TransportError::Http { .. } | TransportError::Timeout { .. }
        ));
    }
}

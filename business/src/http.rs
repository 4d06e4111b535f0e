//! Thin HTTP layer over `reqwest`.
//!
//! Requests are described with a [`RequestBuilder`] and answered with a plain
//! [`Response`] (status and body bytes), so the API layer never touches
//! `reqwest` types and tests can build responses by hand.

use std::{collections::HashMap, time::Duration};

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone, Error)]
#[error("HTTP error: {message}")]
pub struct HttpError {
    pub message: String,
    pub timed_out: bool,
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            timed_out: err.is_timeout(),
            message: err.to_string(),
        }
    }
}

pub type HttpResult<T> = Result<T, HttpError>;

/// A `GET` request under construction.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    url: String,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
}

impl RequestBuilder {
    fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            timeout: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn bearer_auth(self, token: &str) -> Self {
        self.header("authorization", format!("Bearer {token}"))
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub async fn send(self) -> HttpResult<Response> {
        let mut request = reqwest::Client::new().get(&self.url);

        for (name, value) in &self.headers {
            request = request.header(name, value);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(Response { status, body })
    }
}

pub struct Client;

impl Client {
    pub fn get(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &[u8]) -> Response {
        Response {
            status,
            body: body.to_vec(),
        }
    }

    #[test]
    fn success_range() {
        assert!(response(200, b"").is_success());
        assert!(response(204, b"").is_success());
        assert!(!response(401, b"").is_success());
        assert!(!response(500, b"").is_success());
    }

    #[test]
    fn text_is_lossy() {
        assert_eq!(response(503, b"busy").text(), "busy");
        assert_eq!(response(503, b"\xffok").text(), "\u{fffd}ok");
    }

    #[test]
    fn builder_sets_auth_and_timeout() {
        let builder = Client::get("https://example.org")
            .header("accept", "application/json")
            .bearer_auth("abc")
            .timeout(Duration::from_secs(3));

        assert_eq!(
            builder.headers.get("authorization").map(String::as_str),
            Some("Bearer abc")
        );
        assert_eq!(builder.headers.len(), 2);
        assert_eq!(builder.timeout, Some(Duration::from_secs(3)));
    }
}

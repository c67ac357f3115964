//! HTTP plumbing for the retrieval engine client.

use std::time::Duration;

use bytes::Bytes;
use reqwest::{
    Client as ReqwestClient, Response,
    header::{HeaderMap, HeaderValue, USER_AGENT},
    multipart,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};

/// HTTP client for the retrieval engine REST API.
///
/// Every request is issued exactly once; failed calls surface a typed
/// error and are never retried here.
pub struct HttpClient {
    client: ReqwestClient,
    base_url: String,
}

impl HttpClient {
    /// Creates a new HTTP client.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs a JSON resource.
    pub async fn get_json<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .headers(self.default_headers())
            .send()
            .await?;

        debug!(path, status = response.status().as_u16(), "GET");
        let response = self.check_status(response).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(Error::from)
    }

    /// GETs a raw binary resource.
    pub async fn get_bytes(&self, path: &str) -> Result<Bytes> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .headers(self.default_headers())
            .send()
            .await?;

        debug!(path, status = response.status().as_u16(), "GET");
        let response = self.check_status(response).await?;
        response.bytes().await.map_err(Error::from)
    }

    /// POSTs a multipart form and decodes the JSON response.
    pub async fn post_multipart<R>(&self, path: &str, form: multipart::Form) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let body = self.send_multipart(path, form).await?;
        serde_json::from_slice(&body).map_err(Error::from)
    }

    /// POSTs a multipart form where only success or failure matters.
    pub async fn post_multipart_unit(&self, path: &str, form: multipart::Form) -> Result<()> {
        self.send_multipart(path, form).await?;
        Ok(())
    }

    async fn send_multipart(&self, path: &str, form: multipart::Form) -> Result<Bytes> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .headers(self.default_headers())
            .multipart(form)
            .send()
            .await?;

        debug!(path, status = response.status().as_u16(), "POST multipart");
        let response = self.check_status(response).await?;
        response.bytes().await.map_err(Error::from)
    }

    /// Returns the response unchanged on 2xx, a backend error otherwise.
    async fn check_status(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return Err(Error::Network(e)),
        };
        Err(parse_error(&body, status.as_u16()))
    }

    /// Returns default headers for API requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("tonefind-rust/1.0"));
        headers
    }
}

/// Parses an error response body.
///
/// The engine reports failures as `{"error": "..."}`; anything else is
/// surfaced as the raw body text.
fn parse_error(body: &[u8], http_status: u16) -> Error {
    if let Ok(err_body) = serde_json::from_slice::<ErrorBody>(body) {
        return Error::backend(http_status, err_body.error);
    }

    Error::backend(http_status, String::from_utf8_lossy(body).to_string())
}

/// Error response wrapper.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    error: String,
}

#[cfg(test)]
mod tests {
    use super::parse_error;
    use crate::error::Error;

    #[test]
    fn parse_error_extracts_engine_message() {
        let err = parse_error(br#"{"error": "Unsupported file type"}"#, 400);
        match err {
            Error::Backend { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Unsupported file type");
            }
            other => panic!("expected backend error, got {other:?}"),
        }
    }

    #[test]
    fn parse_error_falls_back_to_raw_body() {
        let err = parse_error(b"Internal Server Error", 500);
        match err {
            Error::Backend { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("expected backend error, got {other:?}"),
        }
        assert!(parse_error(b"x", 500).is_server_error());
        assert!(parse_error(b"x", 415).is_rejection());
    }
}

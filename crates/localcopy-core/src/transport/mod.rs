//! HTTP transport over libcurl (via the `curl` crate).
//!
//! Every request uses the same [`TransportConfig`]: one total timeout for
//! HEAD and GET, no retries. Requests are blocking and run on the calling
//! thread, except the streamed GET body (see [`BodyReader`]). Status codes
//! are never interpreted here.

mod body;
mod headers;

pub use body::BodyReader;
pub use headers::HeaderValue;

use crate::config::TransportConfig;
use crate::error::TransportError;
use std::str;

/// Result of a HEAD request: the headers the freshness check needs.
#[derive(Debug, Clone)]
pub struct HeadResponse {
    /// Final HTTP status code (after redirects).
    pub status: u32,
    /// `Last-Modified` of the final response.
    pub last_modified: HeaderValue,
}

/// Issues HEAD and GET requests with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Transport {
    config: TransportConfig,
}

impl Transport {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Builds an easy handle for `url` with timeouts and redirect policy applied.
    pub(crate) fn easy(
        &self,
        method: &'static str,
        url: &str,
    ) -> Result<curl::easy::Easy, TransportError> {
        validate_url(url)?;
        let curl_err = |source| TransportError::Curl {
            method,
            url: url.to_string(),
            source,
        };

        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(curl_err)?;
        easy.follow_location(self.config.follow_redirects)
            .map_err(curl_err)?;
        if self.config.follow_redirects {
            easy.max_redirections(self.config.max_redirections)
                .map_err(curl_err)?;
        }
        easy.connect_timeout(self.config.connect_timeout())
            .map_err(curl_err)?;
        easy.timeout(self.config.request_timeout()).map_err(curl_err)?;
        Ok(easy)
    }

    /// Performs a HEAD request. The status code is reported, not checked.
    pub fn head(&self, url: &str) -> Result<HeadResponse, TransportError> {
        let curl_err = |source| TransportError::Curl {
            method: "HEAD",
            url: url.to_string(),
            source,
        };
        let mut lines: Vec<String> = Vec::new();

        let mut easy = self.easy("HEAD", url)?;
        easy.nobody(true).map_err(curl_err)?;
        {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|data| {
                    if let Ok(s) = str::from_utf8(data) {
                        lines.push(s.trim_end().to_string());
                    }
                    true
                })
                .map_err(curl_err)?;
            transfer.perform().map_err(curl_err)?;
        }

        let code = easy.response_code().map_err(curl_err)?;
        tracing::debug!("HEAD {} returned HTTP {}", url, code);

        Ok(headers::parse_headers(code, &lines))
    }

    /// Starts a GET request and returns its body as a stream.
    ///
    /// The status code is not checked; the body is returned whatever the server sent.
    pub fn get(&self, url: &str) -> Result<BodyReader, TransportError> {
        let easy = self.easy("GET", url)?;
        tracing::debug!("GET {}", url);
        BodyReader::start(easy, url)
    }
}

fn validate_url(url: &str) -> Result<(), TransportError> {
    let parsed = url::Url::parse(url).map_err(|source| TransportError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(TransportError::UnsupportedScheme {
            url: url.to_string(),
            scheme: other.to_string(),
        }),
    }
}

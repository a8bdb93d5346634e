//! Parse HTTP response header lines collected during a HEAD request.

use super::HeadResponse;

/// State of a single response header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    Absent,
    /// Header line present with nothing after the colon.
    Empty,
    Value(String),
}

impl HeaderValue {
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            HeaderValue::Value(v) => Some(v),
            HeaderValue::Absent | HeaderValue::Empty => None,
        }
    }
}

/// Parse collected header lines into a HeadResponse.
///
/// With redirects, curl reports every response's header block in order; a
/// status line starts a new block, so only the final response's headers count.
pub(crate) fn parse_headers(status: u32, lines: &[String]) -> HeadResponse {
    let mut last_modified = HeaderValue::Absent;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            last_modified = HeaderValue::Absent;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("last-modified") {
                let value = value.trim();
                last_modified = if value.is_empty() {
                    HeaderValue::Empty
                } else {
                    HeaderValue::Value(value.to_string())
                };
            }
        }
    }

    HeadResponse {
        status,
        last_modified,
    }
}

use std::fmt;

use crate::http::headers::HttpHeaders;
use crate::http::request::HttpRequest;
use crate::http::{CRLF, HttpMethod};

#[derive(PartialEq, Eq, Debug, Clone)]
pub enum ParseError {
    /// Request line did not have exactly three space-separated tokens.
    InvalidRequestLine,
    /// First token of the request line is not a known HTTP verb.
    UnknownMethod(String),
    /// A header line had no `": "` separator.
    MalformedHeader(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidRequestLine => write!(f, "invalid request line"),
            ParseError::UnknownMethod(token) => write!(f, "unknown method: {}", token),
            ParseError::MalformedHeader(line) => write!(f, "malformed header line: {}", line),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse one request out of the raw text read from the socket.
///
/// The input is treated as a CRLF-delimited line sequence:
/// request line, header lines up to the first empty line, then body lines
/// up to the next empty line or the end of input. Body lines are
/// concatenated without re-inserting the CRLFs that delimited them, so a
/// body spanning several lines comes out shorter than it went in.
///
/// `Content-Length` is stored like any other header and never consulted;
/// the body is whatever text actually arrived.
pub fn parse(raw: &str) -> Result<HttpRequest, ParseError> {
    let mut lines = raw.split(CRLF);

    let (method, path, version) = parse_request_line(lines.next().unwrap_or(""))?;

    let mut headers = HttpHeaders::new();
    for line in lines.by_ref() {
        if line.is_empty() {
            break;
        }
        let (name, value) = line
            .split_once(": ")
            .ok_or_else(|| ParseError::MalformedHeader(line.to_string()))?;
        headers.insert(name, value);
    }

    let mut body = String::new();
    for line in lines {
        if line.is_empty() {
            break;
        }
        body.push_str(line);
    }

    Ok(HttpRequest {
        method,
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body,
    })
}

// Request line: METHOD PATH VERSION
// Consecutive spaces yield an empty token and therefore an error, exactly
// like a trailing space does.
fn parse_request_line(line: &str) -> Result<(HttpMethod, &str, &str), ParseError> {
    let mut tokens = line.split(' ');
    match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
        (Some(method), Some(path), Some(version), None) => {
            let method = HttpMethod::from_token(method)
                .ok_or_else(|| ParseError::UnknownMethod(method.to_string()))?;
            Ok((method, path, version))
        }
        _ => Err(ParseError::InvalidRequestLine),
    }
}

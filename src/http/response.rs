use crate::http::headers::HttpHeaders;
use crate::http::status::HttpStatus;
use crate::http::{CRLF, HTTP_VERSION};

/// What a handler returns. Serialized to wire bytes by [`to_bytes`].
///
/// Headers are entirely the handler's responsibility; nothing here computes
/// `Content-Length` or inserts headers on its own.
///
/// [`to_bytes`]: HttpResponse::to_bytes
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    status: HttpStatus,
    headers: HttpHeaders,
    body: Option<String>,
}

impl HttpResponse {
    pub fn new(status: HttpStatus) -> Self {
        Self {
            status,
            headers: HttpHeaders::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn status(&self) -> HttpStatus {
        self.status
    }

    pub fn headers(&self) -> &HttpHeaders {
        &self.headers
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Serialize into the exact bytes written to the socket.
    ///
    /// Framing, in order:
    /// - `HTTP/1.1 <code> <reason>\r\n`
    /// - one `Name: Value\r\n` line per header, in insertion order
    /// - `\r\n<body>\r\n`, only when a body was set
    /// - one final `\r\n`, always
    ///
    /// So a status-only response is `HTTP/1.1 200 OK\r\n\r\n` and nothing
    /// else. Calling this twice yields the same bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut wire = format!("{} {}{}", HTTP_VERSION, self.status, CRLF);
        wire.push_str(&self.headers.stringify());
        if let Some(body) = &self.body {
            wire.push_str(CRLF);
            wire.push_str(body);
            wire.push_str(CRLF);
        }
        wire.push_str(CRLF);
        wire.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_only_response_is_two_lines() {
        let bytes = HttpResponse::new(HttpStatus::Ok).to_bytes();
        assert_eq!(bytes, b"HTTP/1.1 200 OK\r\n\r\n");
    }

    #[test]
    fn not_found_uses_its_reason_phrase() {
        let bytes = HttpResponse::new(HttpStatus::NotFound).to_bytes();
        assert_eq!(bytes, b"HTTP/1.1 404 Not Found\r\n\r\n");
    }

    #[test]
    fn body_block_is_wrapped_in_crlf() {
        let bytes = HttpResponse::new(HttpStatus::Ok)
            .with_header("Content-Type", "text/plain")
            .with_header("Content-Length", "6")
            .with_body("banana")
            .to_bytes();
        assert_eq!(
            bytes,
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 6\r\n\r\nbanana\r\n\r\n"
        );
    }

    #[test]
    fn headers_without_body_end_with_single_terminator() {
        let bytes = HttpResponse::new(HttpStatus::Ok)
            .with_header("Content-Type", "text/plain")
            .to_bytes();
        assert_eq!(bytes, b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\n");
    }

    #[test]
    fn body_without_headers_still_gets_its_block() {
        let bytes = HttpResponse::new(HttpStatus::Ok).with_body("hi").to_bytes();
        assert_eq!(bytes, b"HTTP/1.1 200 OK\r\n\r\nhi\r\n\r\n");
    }

    #[test]
    fn headers_serialize_in_insertion_order() {
        let response = HttpResponse::new(HttpStatus::Ok)
            .with_header("Content-Type", "text/plain")
            .with_header("Content-Length", "2")
            .with_header("Content-Type", "application/octet-stream")
            .with_body("ok");
        let text = String::from_utf8(response.to_bytes()).unwrap();
        assert_eq!(
            text,
            "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: 2\r\n\r\nok\r\n\r\n"
        );
    }

    #[test]
    fn to_bytes_is_idempotent() {
        let response = HttpResponse::new(HttpStatus::Created)
            .with_header("Content-Length", "0")
            .with_body("");
        assert_eq!(response.to_bytes(), response.to_bytes());
    }

    #[test]
    fn accessors_reflect_builder_calls() {
        let response = HttpResponse::new(HttpStatus::Ok).with_body("hello");
        assert_eq!(response.status(), HttpStatus::Ok);
        assert!(response.headers().is_empty());
        assert_eq!(response.body(), Some("hello"));
    }
}

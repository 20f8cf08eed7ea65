use crate::http::HttpMethod;
use crate::http::headers::HttpHeaders;

/// A fully parsed request. Built once per connection by the
/// [`parser`](crate::http::parser) and handed to handlers by shared
/// reference; never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    /// Stored as received, e.g. "HTTP/1.1". Not validated.
    pub version: String,

    pub headers: HttpHeaders,
    pub body: String,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }
}

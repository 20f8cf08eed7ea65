//! The built-in route handlers, minus the file routes which live in
//! [`files`](crate::handler::files).

use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;
use crate::http::status::HttpStatus;

pub fn root(_req: &HttpRequest) -> HttpResponse {
    HttpResponse::new(HttpStatus::Ok)
}

/// `GET /echo/<value>`: answer with `<value>` as a text/plain body.
/// Content-Length counts bytes, not characters.
pub fn echo(req: &HttpRequest) -> HttpResponse {
    let value = req.path.strip_prefix("/echo/").unwrap_or("");

    HttpResponse::new(HttpStatus::Ok)
        .with_header("Content-Type", "text/plain")
        .with_header("Content-Length", &value.len().to_string())
        .with_body(value)
}

/// `GET /user-agent`: answer with the request's own `User-Agent` value.
/// A request without one is answered with 400 rather than crashing the task.
pub fn user_agent(req: &HttpRequest) -> HttpResponse {
    match req.header("User-Agent") {
        Some(agent) => HttpResponse::new(HttpStatus::Ok)
            .with_header("Content-Type", "text/plain")
            .with_header("Content-Length", &agent.len().to_string())
            .with_body(agent),
        None => HttpResponse::new(HttpStatus::BadRequest),
    }
}

/// The router's default handler.
pub fn not_found(_req: &HttpRequest) -> HttpResponse {
    HttpResponse::new(HttpStatus::NotFound)
}

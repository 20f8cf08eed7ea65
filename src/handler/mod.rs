pub mod files;
pub mod router;
pub mod routes;

use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;

/// A route handler. Plain function pointers keep the route table cheap to
/// copy out of and shareable across tasks without boxing.
pub type Handler = fn(&HttpRequest) -> HttpResponse;

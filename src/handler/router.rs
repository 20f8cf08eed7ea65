//! Route lookup: ordered prefix matching over per-method tables.
//!
//! Routes live in plain vectors scanned in registration order, so when two
//! patterns both match a path, whichever was registered first wins.
//! A pattern matches a path that equals it or starts with it, except `"/"`
//! which only ever matches exactly; without that carve-out the root route
//! would shadow every other path.
//!
//! The table is built once at startup and never mutated afterwards, which is
//! why connection tasks can share it behind an `Arc` with no locking.

use crate::handler::Handler;
use crate::http::HttpMethod;
use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;

pub struct Router {
    get_routes: Vec<(String, Handler)>,
    post_routes: Vec<(String, Handler)>,
    default_handler: Handler,
}

impl Router {
    /// The default handler answers everything no route matches, including
    /// methods without a table.
    pub fn new(default_handler: Handler) -> Self {
        Self {
            get_routes: Vec::new(),
            post_routes: Vec::new(),
            default_handler,
        }
    }

    pub fn get(&mut self, pattern: &str, handler: Handler) {
        Self::register(&mut self.get_routes, pattern, handler);
    }

    pub fn post(&mut self, pattern: &str, handler: Handler) {
        Self::register(&mut self.post_routes, pattern, handler);
    }

    // Re-registering a pattern swaps the handler but keeps the pattern's
    // position in the scan order.
    fn register(routes: &mut Vec<(String, Handler)>, pattern: &str, handler: Handler) {
        match routes.iter_mut().find(|(existing, _)| existing == pattern) {
            Some(entry) => entry.1 = handler,
            None => routes.push((pattern.to_string(), handler)),
        }
    }

    pub fn lookup(&self, method: HttpMethod, path: &str) -> Handler {
        let routes = match method {
            HttpMethod::Get => &self.get_routes,
            HttpMethod::Post => &self.post_routes,
            _ => return self.default_handler,
        };

        routes
            .iter()
            .find(|(pattern, _)| Self::matches(pattern, path))
            .map(|(_, handler)| *handler)
            .unwrap_or(self.default_handler)
    }

    pub fn route(&self, req: &HttpRequest) -> HttpResponse {
        self.lookup(req.method, &req.path)(req)
    }

    fn matches(pattern: &str, path: &str) -> bool {
        if path == pattern {
            return true;
        }
        pattern != "/" && path.starts_with(pattern)
    }
}

//! The `/files` routes: GET reads from the configured directory, POST
//! writes into it.

use std::fs;
use std::io::ErrorKind::*;

use log::{debug, warn};

use crate::config::config;
use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;
use crate::http::status::HttpStatus;

pub fn get_file(req: &HttpRequest) -> HttpResponse {
    let full_path = match resolve(&req.path) {
        Some(p) => p,
        None => return HttpResponse::new(HttpStatus::NotFound),
    };
    debug!("serving {}", full_path);

    match fs::read_to_string(&full_path) {
        Ok(contents) => HttpResponse::new(HttpStatus::Ok)
            .with_header("Content-Type", "application/octet-stream")
            .with_header("Content-Length", &contents.len().to_string())
            .with_body(&contents),
        Err(err) => match err.kind() {
            NotFound => HttpResponse::new(HttpStatus::NotFound),
            PermissionDenied => HttpResponse::new(HttpStatus::Forbidden),
            _ => {
                warn!("reading {} failed: {}", full_path, err);
                HttpResponse::new(HttpStatus::InternalServerError)
            }
        },
    }
}

pub fn post_file(req: &HttpRequest) -> HttpResponse {
    let full_path = match resolve(&req.path) {
        Some(p) => p,
        None => return HttpResponse::new(HttpStatus::NotFound),
    };
    debug!("writing {} bytes to {}", req.body.len(), full_path);

    match fs::write(&full_path, &req.body) {
        Ok(()) => HttpResponse::new(HttpStatus::Created),
        Err(err) => {
            warn!("writing {} failed: {}", full_path, err);
            HttpResponse::new(HttpStatus::InternalServerError)
        }
    }
}

// Map the route path onto the configured directory. Any `..` path component
// is refused so a crafted name cannot reach outside the directory.
fn resolve(path: &str) -> Option<String> {
    let name = path.strip_prefix("/files").unwrap_or(path);
    if name.split('/').any(|component| component == "..") {
        return None;
    }
    Some(format!("{}{}", config().files_root, name))
}

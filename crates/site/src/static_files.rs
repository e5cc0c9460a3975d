//! Static asset serving under `/static`.
//!
//! Files come from the configured static directory. Stylesheets, scripts
//! and images are marked cacheable for a day whether or not the file
//! exists; a missing file is a plain 404.

use std::path::Path;

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, header::CACHE_CONTROL},
    middleware::{Next, from_fn},
    response::Response,
};
use tower_http::services::ServeDir;

const CACHEABLE_EXTENSIONS: [&str; 5] = [".css", ".js", ".png", ".jpg", ".ico"];
const ASSET_CACHE_CONTROL: &str = "public, max-age=86400";

/// Router serving files from `dir`, meant to be nested at `/static`.
pub fn service(dir: impl AsRef<Path>) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(from_fn(asset_cache_control))
}

async fn asset_cache_control(request: Request, next: Next) -> Response {
    let cacheable = is_cacheable(request.uri().path());
    let mut response = next.run(request).await;

    if cacheable {
        response
            .headers_mut()
            .insert(CACHE_CONTROL, HeaderValue::from_static(ASSET_CACHE_CONTROL));
    }

    response
}

fn is_cacheable(path: &str) -> bool {
    CACHEABLE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cacheable_extensions() {
        assert!(is_cacheable("/css/main.css"));
        assert!(is_cacheable("/js/main.js"));
        assert!(is_cacheable("/img/logo.png"));
        assert!(is_cacheable("/photo.jpg"));
        assert!(is_cacheable("/favicon.ico"));
        assert!(!is_cacheable("/docs/readme.txt"));
        assert!(!is_cacheable("/fonts/inter.woff2"));
        assert!(!is_cacheable("/"));
    }
}

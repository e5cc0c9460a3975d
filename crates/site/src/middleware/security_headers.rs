//! Security headers middleware.
//!
//! Every response, including errors and static files, gets:
//! - `X-Content-Type-Options: nosniff`
//! - `X-Frame-Options: DENY`
//! - `X-XSS-Protection: 1; mode=block`
//! - `Referrer-Policy: strict-origin-when-cross-origin`
//! - `Content-Security-Policy` (see [`CONTENT_SECURITY_POLICY_VALUE`])
//!
//! `Strict-Transport-Security` is added only when the request arrived over
//! HTTPS, either directly or as reported by `X-Forwarded-Proto`.

use axum::{
    extract::Request,
    http::{
        HeaderMap, HeaderValue, Uri,
        header::{
            CONTENT_SECURITY_POLICY, REFERRER_POLICY, STRICT_TRANSPORT_SECURITY,
            X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS, X_XSS_PROTECTION,
        },
    },
    middleware::Next,
    response::Response,
};

/// Policy allowing same-origin assets plus Google Fonts.
pub const CONTENT_SECURITY_POLICY_VALUE: &str = "default-src 'self'; \
     style-src 'self' 'unsafe-inline' fonts.googleapis.com; \
     font-src 'self' fonts.gstatic.com; \
     img-src 'self' data: https:; \
     script-src 'self'";

const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";

/// Add security headers to all responses.
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let https = is_https(request.uri(), request.headers());

    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_XSS_PROTECTION, HeaderValue::from_static("1; mode=block"));
    headers.insert(
        REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CONTENT_SECURITY_POLICY_VALUE),
    );

    if https {
        headers.insert(STRICT_TRANSPORT_SECURITY, HeaderValue::from_static(HSTS_VALUE));
    }

    response
}

/// Whether the request reached us (or the edge proxy) over HTTPS.
fn is_https(uri: &Uri, headers: &HeaderMap) -> bool {
    if uri.scheme_str() == Some("https") {
        return true;
    }

    headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .is_some_and(|proto| proto.trim().eq_ignore_ascii_case("https"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_is_single_line() {
        assert_eq!(
            CONTENT_SECURITY_POLICY_VALUE,
            "default-src 'self'; style-src 'self' 'unsafe-inline' fonts.googleapis.com; \
             font-src 'self' fonts.gstatic.com; img-src 'self' data: https:; script-src 'self'"
        );
        assert!(HeaderValue::from_str(CONTENT_SECURITY_POLICY_VALUE).is_ok());
    }

    #[test]
    fn test_https_detection() {
        let plain: Uri = "/about".parse().unwrap();
        let absolute: Uri = "https://devrewoh.com/about".parse().unwrap();

        assert!(!is_https(&plain, &HeaderMap::new()));
        assert!(is_https(&absolute, &HeaderMap::new()));

        let mut forwarded = HeaderMap::new();
        forwarded.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        assert!(is_https(&plain, &forwarded));

        let mut forwarded_http = HeaderMap::new();
        forwarded_http.insert("x-forwarded-proto", HeaderValue::from_static("http"));
        assert!(!is_https(&plain, &forwarded_http));
    }
}

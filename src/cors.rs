use axum::http::{HeaderName, HeaderValue, Method, Uri, header, request::Parts};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::AppConfig;

/// Origins listed in configuration, `*` patterns from the same list, and any
/// http(s) localhost origin regardless of port.
pub fn is_allowed_origin(origin: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|entry| {
        if entry.contains('*') {
            matches_pattern(entry, origin)
        } else {
            entry == origin
        }
    }) || is_local_origin(origin)
}

fn matches_pattern(pattern: &str, origin: &str) -> bool {
    let mut parts = pattern.split('*');
    let first = parts.next().unwrap_or_default();
    let Some(mut rest) = origin.strip_prefix(first) else {
        return false;
    };

    let tail: Vec<&str> = parts.collect();
    let Some((last, middle)) = tail.split_last() else {
        return rest.is_empty();
    };

    for piece in middle {
        match rest.find(piece) {
            Some(idx) => rest = &rest[idx + piece.len()..],
            None => return false,
        }
    }
    rest.ends_with(last)
}

fn is_local_origin(origin: &str) -> bool {
    let Ok(uri) = origin.parse::<Uri>() else {
        return false;
    };
    let scheme_ok = matches!(uri.scheme_str(), Some("http") | Some("https"));
    let host_ok = matches!(uri.host(), Some("localhost") | Some("127.0.0.1"));
    scheme_ok && host_ok
}

pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    let allowed = config.frontend_origins.clone();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|o| is_allowed_origin(o, &allowed))
                    .unwrap_or(false)
            },
        ))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static("x-request-id"),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        vec![
            "https://shop.example.com".to_string(),
            "https://*.vercel.app".to_string(),
        ]
    }

    #[test]
    fn exact_origin_matches() {
        assert!(is_allowed_origin("https://shop.example.com", &allowed()));
        assert!(!is_allowed_origin("https://evil.example.com", &allowed()));
    }

    #[test]
    fn wildcard_patterns_match() {
        assert!(is_allowed_origin("https://preview-42.vercel.app", &allowed()));
        assert!(!is_allowed_origin("https://vercel.app.evil.io", &allowed()));
        assert!(!is_allowed_origin("http://preview.vercel.app", &allowed()));
    }

    #[test]
    fn localhost_any_port() {
        assert!(is_allowed_origin("http://localhost:5173", &[]));
        assert!(is_allowed_origin("http://127.0.0.1:4000", &[]));
        assert!(is_allowed_origin("https://localhost", &[]));
        assert!(!is_allowed_origin("ftp://localhost:21", &[]));
        assert!(!is_allowed_origin("http://localhost.evil.io", &[]));
    }

    #[test]
    fn pattern_edges() {
        assert!(matches_pattern("*", "anything"));
        assert!(matches_pattern("https://a*b*c.io", "https://axxbyyc.io"));
        assert!(!matches_pattern("https://a*b*c.io", "https://axxc.io"));
    }
}

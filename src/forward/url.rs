//! Target URL construction.
//!
//! Callers address the proxy with or without the upstream's API version
//! segment; either spelling must reach the same upstream path.

/// Normalize a path to a single leading slash and make sure it starts
/// with the version prefix. Idempotent: a path that already carries the
/// prefix is returned unchanged.
pub fn ensure_version_prefix(path: &str, prefix: &str) -> String {
    let normalized = format!("/{}", path.trim_start_matches('/'));
    if normalized == "/" {
        return prefix.to_string();
    }
    if normalized.starts_with(prefix) {
        normalized
    } else {
        format!("{prefix}{normalized}")
    }
}

/// Build the fully-qualified upstream URL. The query string is appended
/// verbatim, without re-encoding.
pub fn build_target_url(base: &str, path: &str, query: Option<&str>, prefix: &str) -> String {
    let path = ensure_version_prefix(path, prefix);
    match query {
        Some(q) if !q.is_empty() => format!("{base}{path}?{q}"),
        _ => format!("{base}{path}"),
    }
}

//! Host normalization and best-effort website matching.

/// Normalize an inbound host or website value for comparison.
///
/// Strips surrounding whitespace, an `http://` or `https://` scheme, a leading
/// `www.` and trailing slashes, then lower-cases the rest.
pub fn normalize_host(raw: &str) -> String {
    let mut host = raw.trim().to_ascii_lowercase();

    for scheme in ["https://", "http://"] {
        if let Some(rest) = host.strip_prefix(scheme) {
            host = rest.to_string();
            break;
        }
    }

    if let Some(rest) = host.strip_prefix("www.") {
        host = rest.to_string();
    }

    host.trim_end_matches('/').to_string()
}

/// Whether a normalized lookup host equals, or is a subdomain of, the host of a
/// stored website.
///
/// The substring rule runs in SQL; this is the fallback when it finds nothing.
pub(crate) fn serves_subdomain(stored_website: &str, needle: &str) -> bool {
    stored_host(stored_website).is_some_and(|stored| {
        needle == stored
            || needle
                .strip_suffix(stored.as_str())
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

/// Host of a stored website value, without a leading `www.`.
///
/// Defaults the scheme to https when missing, so `band.org:8443/en` yields
/// `band.org`.
fn stored_host(stored_website: &str) -> Option<String> {
    let trimmed = stored_website.trim();
    if trimmed.is_empty() {
        return None;
    }

    let url_str = if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };
    let parsed = url::Url::parse(&url_str).ok()?;
    let host = parsed.host_str()?.to_lowercase();

    match host.strip_prefix("www.") {
        Some(rest) => Some(rest.to_string()),
        None => Some(host),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host("https://www.Example.com/"), "example.com");
        assert_eq!(normalize_host("EXAMPLE.COM"), "example.com");
        assert_eq!(normalize_host("  http://shop.example.com//  "), "shop.example.com");
        assert_eq!(normalize_host("HTTPS://WWW.example.com"), "example.com");
        assert_eq!(normalize_host("/"), "");
    }

    #[test]
    fn test_subdomain_match() {
        assert!(serves_subdomain("example.com", "sub.example.com"));
        assert!(serves_subdomain("https://www.example.com/", "example.com"));
        assert!(!serves_subdomain("example.com", "notexample.com"));
        assert!(!serves_subdomain("", "example.com"));
    }

    #[test]
    fn test_subdomain_match_ignores_path_and_port() {
        assert!(serves_subdomain("https://www.example.com/en", "sub.example.com"));
        assert!(serves_subdomain("https://band.org:8443", "shop.band.org"));
        assert!(serves_subdomain("Band.org:8443/tour", "band.org"));
        assert!(!serves_subdomain("https://example.com/en", "example.com.evil.net"));
    }

    #[test]
    fn test_stored_host() {
        assert_eq!(stored_host("https://WWW.Example.com/en?x=1").as_deref(), Some("example.com"));
        assert_eq!(stored_host("band.org:8443").as_deref(), Some("band.org"));
        assert_eq!(stored_host("   "), None);
    }
}

use url::Url;

/// Derive `(domain, path_depth)` from a raw URL string.
///
/// Total over arbitrary input: anything that does not parse as an absolute
/// URL yields `("", 0)` instead of an error, so one bad row never fails a
/// whole table load.
pub fn url_features(raw: &str) -> (String, u32) {
    match Url::parse(raw) {
        Ok(url) => (domain_of(&url), path_depth_of(&url)),
        Err(_) => (String::new(), 0),
    }
}

/// host[:port] portion, port kept only when explicit in the URL.
fn domain_of(url: &Url) -> String {
    let Some(host) = url.host_str() else {
        return String::new();
    };
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

/// Number of non-empty segments in the path component.
fn path_depth_of(url: &Url) -> u32 {
    match url.path_segments() {
        Some(segments) => segments.filter(|s| !s.is_empty()).count() as u32,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::url_features;

    #[test]
    fn splits_domain_and_depth() {
        assert_eq!(
            url_features("https://docs.example.com/api/v1"),
            ("docs.example.com".to_string(), 2)
        );
    }

    #[test]
    fn trailing_slash_does_not_add_depth() {
        assert_eq!(url_features("https://a.com/x/y/"), ("a.com".to_string(), 2));
        assert_eq!(url_features("https://a.com/"), ("a.com".to_string(), 0));
        assert_eq!(url_features("https://a.com"), ("a.com".to_string(), 0));
    }

    #[test]
    fn explicit_port_is_kept() {
        assert_eq!(
            url_features("http://localhost:8080/metrics"),
            ("localhost:8080".to_string(), 1)
        );
        // default port is normalized away by the parser
        assert_eq!(url_features("https://a.com:443/x"), ("a.com".to_string(), 1));
    }

    #[test]
    fn query_and_fragment_do_not_count() {
        assert_eq!(
            url_features("https://a.com/x?page=2#top"),
            ("a.com".to_string(), 1)
        );
    }

    #[test]
    fn bad_input_degrades_instead_of_failing() {
        assert_eq!(url_features(""), (String::new(), 0));
        assert_eq!(url_features("not a url"), (String::new(), 0));
        assert_eq!(url_features("relative/path/only"), (String::new(), 0));
        assert_eq!(url_features("://missing-scheme.com"), (String::new(), 0));
    }

    #[test]
    fn cannot_be_a_base_urls_have_no_depth() {
        assert_eq!(
            url_features("mailto:support@example.com"),
            (String::new(), 0)
        );
    }
}

//! CSRF token extraction

use percent_encoding::percent_decode_str;

/// Cookie the server sets with the CSRF token
pub const CSRF_COOKIE: &str = "csrftoken";

/// Header the server expects the token echoed in (`X-CSRFToken`), lowercased
/// so it can name a header directly
pub const CSRF_HEADER: &str = "x-csrftoken";

/// Find a cookie value in a `Cookie` header string (`a=1; b=2`).
///
/// The value is percent-decoded. Empty values count as absent.
pub fn token_from_cookie_header(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(name)?.strip_prefix('='))
        .map(|raw| percent_decode_str(raw).decode_utf8_lossy().into_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderName;

    #[test]
    fn test_header_name_is_usable() {
        let name = HeaderName::from_static(CSRF_HEADER);
        assert!(name.as_str().eq_ignore_ascii_case("X-CSRFToken"));
    }

    #[test]
    fn test_finds_named_cookie() {
        let header = "sessionid=xyz; csrftoken=abc123; theme=dark";
        assert_eq!(
            token_from_cookie_header(header, CSRF_COOKIE).as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn test_prefix_collision() {
        // `csrftoken_old` must not satisfy a lookup for `csrftoken`
        let header = "csrftoken_old=stale; csrftoken=fresh";
        assert_eq!(
            token_from_cookie_header(header, CSRF_COOKIE).as_deref(),
            Some("fresh")
        );
        assert_eq!(token_from_cookie_header("csrftoken_old=stale", CSRF_COOKIE), None);
    }

    #[test]
    fn test_decodes_and_skips_empty() {
        assert_eq!(
            token_from_cookie_header("csrftoken=a%2Bb%3D", CSRF_COOKIE).as_deref(),
            Some("a+b=")
        );
        assert_eq!(token_from_cookie_header("csrftoken=", CSRF_COOKIE), None);
        assert_eq!(token_from_cookie_header("", CSRF_COOKIE), None);
    }
}

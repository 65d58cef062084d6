//! Auth endpoints, relative to the API base

/// Primes the `csrftoken` cookie
pub const CSRF: &str = "auth/csrf/";

/// `POST {username, password}`, answers `{detail, user}`
pub const LOGIN: &str = "auth/login/";

pub const LOGOUT: &str = "auth/logout/";

/// Identity probe: the signed-in user, or 401/403
pub const IDENTITY: &str = "auth/user/";

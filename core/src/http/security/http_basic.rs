//! HTTP Basic Authentication (RFC 7617).
//!
//! # Spring Security Equivalent
//! `BasicAuthenticationFilter` / `BasicAuthenticationEntryPoint`

use actix_web::http::header::{HeaderMap, AUTHORIZATION};
use base64::prelude::*;

/// Credentials carried in an `Authorization: Basic ...` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Parses `Authorization: Basic <base64(username:password)>`.
///
/// Returns `None` when the header is absent, uses another scheme, or does not
/// decode to `username:password`. The password may itself contain `:`.
pub fn extract_basic_credentials(headers: &HeaderMap) -> Option<BasicCredentials> {
    let auth_str = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = auth_str.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = BASE64_STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// HTTP Basic handshake configuration.
///
/// # Spring Security Equivalent
/// `HttpSecurity.httpBasic(withDefaults())`
#[derive(Clone, Debug)]
pub struct HttpBasicConfig {
    realm: String,
}

impl HttpBasicConfig {
    /// Uses Spring's default realm name, `Realm`.
    pub fn new() -> Self {
        HttpBasicConfig {
            realm: "Realm".to_string(),
        }
    }

    pub fn realm(mut self, realm: &str) -> Self {
        self.realm = realm.to_string();
        self
    }

    pub fn get_realm(&self) -> &str {
        &self.realm
    }

    /// Value for the `WWW-Authenticate` challenge header.
    pub fn www_authenticate_header(&self) -> String {
        format!("Basic realm=\"{}\"", self.realm)
    }
}

impl Default for HttpBasicConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn basic(raw: &str) -> String {
        format!("Basic {}", BASE64_STANDARD.encode(raw))
    }

    #[test]
    fn test_extract_credentials() {
        let creds = extract_basic_credentials(&headers_with(&basic("admin:12345"))).unwrap();

        assert_eq!(creds.username, "admin");
        assert_eq!(creds.password, "12345");
    }

    #[test]
    fn test_password_with_colon() {
        let creds = extract_basic_credentials(&headers_with(&basic("admin:a:b"))).unwrap();
        assert_eq!(creds.password, "a:b");
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let value = format!("basic {}", BASE64_STANDARD.encode("user:12345"));
        assert!(extract_basic_credentials(&headers_with(&value)).is_some());
    }

    #[test]
    fn test_rejects_malformed_headers() {
        assert!(extract_basic_credentials(&HeaderMap::new()).is_none());
        assert!(extract_basic_credentials(&headers_with("Bearer abc")).is_none());
        assert!(extract_basic_credentials(&headers_with("Basic !!!")).is_none());
        assert!(extract_basic_credentials(&headers_with(&basic("no-colon"))).is_none());
    }

    #[test]
    fn test_www_authenticate_header() {
        assert_eq!(
            HttpBasicConfig::new().www_authenticate_header(),
            "Basic realm=\"Realm\""
        );
        assert_eq!(
            HttpBasicConfig::new().realm("Bank").www_authenticate_header(),
            "Basic realm=\"Bank\""
        );
    }
}

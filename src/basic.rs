//! Parsing of `Authorization: Basic <base64(username:password)>` headers.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::AuthError;
use crate::models::Credentials;

pub const BASIC_PREFIX: &str = "Basic ";

/// Extract the username/password pair from a raw `Authorization` value.
///
/// The payload must be standard Base64 of UTF-8 text. It is split on the
/// first `:` only, so the password may itself contain colons.
pub fn parse_basic_header(header: Option<&str>) -> Result<Credentials, AuthError> {
    let encoded = header
        .and_then(|h| h.strip_prefix(BASIC_PREFIX))
        .ok_or(AuthError::MissingAuth)?;

    let bytes = STANDARD
        .decode(encoded)
        .map_err(|_| AuthError::MalformedEncoding)?;
    let decoded = String::from_utf8(bytes).map_err(|_| AuthError::MalformedEncoding)?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or(AuthError::MalformedCredentials)?;

    Ok(Credentials {
        username: username.to_owned(),
        password: password.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_for(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    #[test]
    fn parses_username_and_password() {
        let header = header_for("testuser:testpass");
        assert_eq!(header, "Basic dGVzdHVzZXI6dGVzdHBhc3M=");

        let creds = parse_basic_header(Some(&header)).unwrap();
        assert_eq!(creds.username, "testuser");
        assert_eq!(creds.password, "testpass");
    }

    #[test]
    fn splits_on_first_colon_only() {
        let creds = parse_basic_header(Some(&header_for("user:pa:ss:"))).unwrap();
        assert_eq!(creds.username, "user");
        assert_eq!(creds.password, "pa:ss:");
    }

    #[test]
    fn empty_fields_are_allowed() {
        let creds = parse_basic_header(Some(&header_for(":"))).unwrap();
        assert_eq!(creds.username, "");
        assert_eq!(creds.password, "");
    }

    #[test]
    fn non_ascii_credentials() {
        let creds = parse_basic_header(Some(&header_for("ユーザー:パス"))).unwrap();
        assert_eq!(creds.username, "ユーザー");
        assert_eq!(creds.password, "パス");
    }

    #[test]
    fn missing_or_wrong_scheme() {
        assert_eq!(parse_basic_header(None), Err(AuthError::MissingAuth));
        assert_eq!(
            parse_basic_header(Some("Bearer abc")),
            Err(AuthError::MissingAuth)
        );
        assert_eq!(
            parse_basic_header(Some("basic dGVzdHVzZXI6dGVzdHBhc3M=")),
            Err(AuthError::MissingAuth)
        );
        assert_eq!(parse_basic_header(Some("Basic")), Err(AuthError::MissingAuth));
    }

    #[test]
    fn invalid_base64() {
        assert_eq!(
            parse_basic_header(Some("Basic !!!")),
            Err(AuthError::MalformedEncoding)
        );
    }

    #[test]
    fn invalid_utf8() {
        let header = format!("Basic {}", STANDARD.encode([0xff, 0xfe, b':', b'x']));
        assert_eq!(
            parse_basic_header(Some(&header)),
            Err(AuthError::MalformedEncoding)
        );
    }

    #[test]
    fn no_colon() {
        assert_eq!(
            parse_basic_header(Some(&header_for("testuser"))),
            Err(AuthError::MalformedCredentials)
        );
    }
}

//! Upstream credentials.

use std::fmt;

/// Credential attached to every request of one upstream API.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// ZGW style API token, rendered as `Token {token}`.
    Token(String),
    /// Bearer token, rendered as `Bearer {token}`.
    Bearer(String),
}

impl Credential {
    /// Value of the `Authorization` header.
    pub fn header_value(&self) -> String {
        match self {
            Self::Token(token) => format!("Token {token}"),
            Self::Bearer(token) => format!("Bearer {token}"),
        }
    }
}

// Keep tokens out of logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(_) => f.write_str("Token(***)"),
            Self::Bearer(_) => f.write_str("Bearer(***)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_values() {
        assert_eq!(Credential::Token("abc".into()).header_value(), "Token abc");
        assert_eq!(Credential::Bearer("jwt".into()).header_value(), "Bearer jwt");
    }

    #[test]
    fn test_debug_hides_secret() {
        let rendered = format!("{:?}", Credential::Token("secret".into()));
        assert!(!rendered.contains("secret"));
    }
}

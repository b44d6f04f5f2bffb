use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Username and password as typed into the login or registration form.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Surrounding whitespace in the username is dropped; the password is kept as typed.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let username: String = username.into();
        Self {
            username: username.trim().to_string(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Base64 of `username:password`, sent as `Authorization: Basic <token>`.
///
/// The token is reversible, so it is treated as a secret: `Debug` never
/// prints it and there is no `Display` or `Serialize` impl.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn from_credentials(credentials: &Credentials) -> Self {
        let raw = format!("{}:{}", credentials.username, credentials.password);
        Self(STANDARD.encode(raw.as_bytes()))
    }

    /// Rebuild a token read back from the secret store.
    pub fn from_persisted(token: String) -> Option<Self> {
        let token = token.trim().to_string();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn header_value(&self) -> String {
        format!("Basic {}", self.0)
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_base64_of_username_colon_password() {
        let token = AuthToken::from_credentials(&Credentials::new("alice", "s3cretpass"));
        assert_eq!(token.expose(), "YWxpY2U6czNjcmV0cGFzcw==");
        assert_eq!(token.header_value(), "Basic YWxpY2U6czNjcmV0cGFzcw==");
    }

    #[test]
    fn test_debug_output_is_redacted() {
        let creds = Credentials::new("alice", "s3cretpass");
        let token = AuthToken::from_credentials(&creds);

        let creds_dbg = format!("{:?}", creds);
        assert!(creds_dbg.contains("alice"));
        assert!(!creds_dbg.contains("s3cretpass"));

        let token_dbg = format!("{:?}", token);
        assert!(!token_dbg.contains(token.expose()));
    }

    #[test]
    fn test_blank_persisted_token_is_absent() {
        assert!(AuthToken::from_persisted("   ".to_string()).is_none());
        assert!(AuthToken::from_persisted("abc=".to_string()).is_some());
    }
}

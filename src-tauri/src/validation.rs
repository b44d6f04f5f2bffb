use serde::Deserialize;

use crate::error::FlowdeskError;
use crate::session::Credentials;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Registration form exactly as the user filled it in.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

impl std::fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl RegistrationForm {
    /// Checks done before anything is sent to the backend.
    pub fn validate(&self) -> Result<(), FlowdeskError> {
        if self.username.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.is_empty()
            || self.password_confirm.is_empty()
        {
            return Err(FlowdeskError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }
        if self.password != self.password_confirm {
            return Err(FlowdeskError::Validation(
                "Passwords do not match".to_string(),
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FlowdeskError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.as_str(), self.password.as_str())
    }
}

pub fn validate_login(credentials: &Credentials) -> Result<(), FlowdeskError> {
    if credentials.username.trim().is_empty() || credentials.password.is_empty() {
        return Err(FlowdeskError::Validation(
            "Please enter username and password".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::AuthToken;

    fn form(password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            username: "chemops".to_string(),
            email: "chemops@example.com".to_string(),
            password: password.to_string(),
            password_confirm: confirm.to_string(),
        }
    }

    #[test]
    fn test_seven_character_password_rejected() {
        let err = form("abc1234", "abc1234").validate().unwrap_err();
        assert_eq!(
            err,
            FlowdeskError::Validation("Password must be at least 8 characters".to_string())
        );
    }

    #[test]
    fn test_mismatched_confirmation_rejected() {
        let err = form("abcd12345", "abcd12346").validate().unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");
    }

    #[test]
    fn test_mismatch_reported_before_length() {
        let err = form("short", "shorter").validate().unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");
    }

    #[test]
    fn test_missing_email_rejected() {
        let mut f = form("abcd12345", "abcd12345");
        f.email = "  ".to_string();
        assert_eq!(f.validate().unwrap_err().to_string(), "Please fill in all fields");
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(form("abcd1234", "abcd1234").validate().is_ok());
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert!(validate_login(&Credentials::new("", "pw")).is_err());
        assert!(validate_login(&Credentials::new("op", "")).is_err());
        assert!(validate_login(&Credentials::new("op", "pw")).is_ok());
    }

    #[test]
    fn test_registration_and_login_build_same_token() {
        let mut f = form("abcd12345", "abcd12345");
        f.username = " chemops ".to_string();
        let registered = AuthToken::from_credentials(&f.credentials());
        let logged_in = AuthToken::from_credentials(&Credentials::new(" chemops ", "abcd12345"));

        assert_eq!(registered, logged_in);
        assert_eq!(f.credentials().username, "chemops");
    }

    #[test]
    fn test_debug_hides_passwords() {
        let dbg = format!("{:?}", form("abcd12345", "abcd12345"));
        assert!(!dbg.contains("abcd12345"));
    }
}

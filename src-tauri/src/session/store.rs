use std::sync::RwLock;

use tracing::{info, warn};

use super::token::AuthToken;
use super::vault::TokenVault;
use crate::error::FlowdeskError;

/// Holds the current session token and mirrors it into a [`TokenVault`].
///
/// Reads are presence checks; writes only happen on login and logout, so a
/// plain `RwLock` is enough.
pub struct SessionStore {
    vault: Box<dyn TokenVault>,
    token: RwLock<Option<AuthToken>>,
}

impl SessionStore {
    /// Read any persisted token. No network access happens here.
    ///
    /// A vault that cannot be read leaves the session unauthenticated
    /// rather than failing startup.
    pub fn initialize(vault: Box<dyn TokenVault>) -> Self {
        let token = match vault.load() {
            Ok(Some(raw)) => AuthToken::from_persisted(raw),
            Ok(None) => None,
            Err(e) => {
                warn!("Could not restore session, starting logged out: {}", e);
                None
            }
        };
        info!("Session initialized (authenticated: {})", token.is_some());

        Self {
            vault,
            token: RwLock::new(token),
        }
    }

    /// Hold `token` for this run and try to persist it.
    ///
    /// A vault that cannot save only costs persistence across restarts; the
    /// session stays usable until the app exits.
    pub fn login(&self, token: AuthToken) -> Result<(), FlowdeskError> {
        if let Err(e) = self.vault.save(token.expose()) {
            warn!("Could not persist session, keeping it for this run only: {}", e);
        }
        *self.write_slot()? = Some(token);
        info!("Session stored");
        Ok(())
    }

    /// Forget the token in memory and in the vault.
    ///
    /// The in-memory token is dropped even when the vault fails, so the
    /// user is logged out for the rest of this run either way.
    pub fn logout(&self) -> Result<(), FlowdeskError> {
        *self.write_slot()? = None;
        self.vault.clear()?;
        info!("Session cleared");
        Ok(())
    }

    pub fn token(&self) -> Option<AuthToken> {
        self.token.read().ok().and_then(|slot| slot.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    fn write_slot(&self) -> Result<std::sync::RwLockWriteGuard<'_, Option<AuthToken>>, FlowdeskError> {
        self.token
            .write()
            .map_err(|_| FlowdeskError::Session("Session lock poisoned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::token::Credentials;
    use crate::session::vault::MemoryVault;
    use std::sync::Arc;

    /// Vault wrapper that lets a test look at what was persisted.
    struct SharedVault(Arc<MemoryVault>);

    impl TokenVault for SharedVault {
        fn load(&self) -> Result<Option<String>, FlowdeskError> {
            self.0.load()
        }
        fn save(&self, token: &str) -> Result<(), FlowdeskError> {
            self.0.save(token)
        }
        fn clear(&self) -> Result<(), FlowdeskError> {
            self.0.clear()
        }
    }

    struct BrokenVault;

    impl TokenVault for BrokenVault {
        fn load(&self) -> Result<Option<String>, FlowdeskError> {
            Err(FlowdeskError::Session("locked".to_string()))
        }
        fn save(&self, _token: &str) -> Result<(), FlowdeskError> {
            Err(FlowdeskError::Session("locked".to_string()))
        }
        fn clear(&self) -> Result<(), FlowdeskError> {
            Err(FlowdeskError::Session("locked".to_string()))
        }
    }

    #[test]
    fn test_login_then_logout() {
        let backing = Arc::new(MemoryVault::new());
        let store = SessionStore::initialize(Box::new(SharedVault(backing.clone())));
        assert!(!store.is_authenticated());

        let token = AuthToken::from_credentials(&Credentials::new("operator", "pump-station-7"));
        store.login(token.clone()).unwrap();

        assert!(store.is_authenticated());
        assert_eq!(store.token(), Some(token));
        let persisted = backing.load().unwrap().unwrap();
        assert!(!persisted.is_empty());

        store.logout().unwrap();
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
        assert_eq!(backing.load().unwrap(), None);
    }

    #[test]
    fn test_initialize_restores_persisted_token() {
        let store = SessionStore::initialize(Box::new(MemoryVault::with_token("b3A6cHc=")));
        assert!(store.is_authenticated());
        assert_eq!(
            store.token().map(|t| t.header_value()),
            Some("Basic b3A6cHc=".to_string())
        );
    }

    #[test]
    fn test_unreadable_vault_starts_logged_out() {
        let store = SessionStore::initialize(Box::new(BrokenVault));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_login_survives_vault_that_cannot_save() {
        let store = SessionStore::initialize(Box::new(BrokenVault));
        let token = AuthToken::from_credentials(&Credentials::new("operator", "pump-station-7"));

        store.login(token.clone()).unwrap();

        assert!(store.is_authenticated());
        assert_eq!(store.token(), Some(token));
    }

    #[test]
    fn test_logout_drops_token_even_if_vault_fails() {
        let store = SessionStore::initialize(Box::new(BrokenVault));
        *store.token.write().unwrap() = Some(AuthToken::from_credentials(&Credentials::new("a", "b")));

        assert!(store.logout().is_err());
        assert!(!store.is_authenticated());
    }
}

use std::sync::Mutex;

use keyring::Entry;
use tracing::{info, warn};

use crate::error::FlowdeskError;

pub const KEYRING_SERVICE: &str = "flowdesk-session";
pub const KEYRING_USER: &str = "flowdesk";

/// Somewhere to keep the session token between runs.
pub trait TokenVault: Send + Sync {
    fn load(&self) -> Result<Option<String>, FlowdeskError>;
    fn save(&self, token: &str) -> Result<(), FlowdeskError>;
    /// Removing a token that was never saved is not an error.
    fn clear(&self) -> Result<(), FlowdeskError>;
}

/// Token stored in the OS keychain / secret service.
pub struct KeyringVault {
    service: String,
    user: String,
}

impl KeyringVault {
    pub fn new() -> Self {
        Self::with_names(KEYRING_SERVICE, KEYRING_USER)
    }

    pub fn with_names(service: &str, user: &str) -> Self {
        Self {
            service: service.to_string(),
            user: user.to_string(),
        }
    }

    fn entry(&self) -> Result<Entry, FlowdeskError> {
        Entry::new(&self.service, &self.user).map_err(|e| {
            warn!("Failed to create keyring entry for {}: {}", self.service, e);
            FlowdeskError::Session(e.to_string())
        })
    }
}

impl Default for KeyringVault {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenVault for KeyringVault {
    fn load(&self) -> Result<Option<String>, FlowdeskError> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => {
                info!("No stored session for service: {}", self.service);
                Ok(None)
            }
            Err(e) => {
                warn!("Failed to read session for {}: {}", self.service, e);
                Err(FlowdeskError::Session(e.to_string()))
            }
        }
    }

    fn save(&self, token: &str) -> Result<(), FlowdeskError> {
        self.entry()?.set_password(token).map_err(|e| {
            warn!("Failed to store session for {}: {}", self.service, e);
            FlowdeskError::Session(e.to_string())
        })
    }

    fn clear(&self) -> Result<(), FlowdeskError> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => {
                warn!("Failed to delete session for {}: {}", self.service, e);
                Err(FlowdeskError::Session(e.to_string()))
            }
        }
    }
}

/// In-process vault. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryVault {
    token: Mutex<Option<String>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, FlowdeskError> {
        self.token
            .lock()
            .map_err(|_| FlowdeskError::Session("Memory vault lock poisoned".to_string()))
    }
}

impl TokenVault for MemoryVault {
    fn load(&self) -> Result<Option<String>, FlowdeskError> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, token: &str) -> Result<(), FlowdeskError> {
        *self.slot()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), FlowdeskError> {
        *self.slot()? = None;
        Ok(())
    }
}

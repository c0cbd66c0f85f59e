use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use keyring::Entry;

use super::SecretStoreError;

/// Keychain service the token is filed under
const SERVICE_NAME: &str = "storefront";

/// Keychain account name for the session token
const TOKEN_ACCOUNT: &str = "userToken";

/// Vault for the single session token.
///
/// Every operation may fail with a platform storage error. Callers decide
/// per call site whether a failure degrades or escalates.
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn get(&self) -> Result<Option<String>, SecretStoreError>;
    async fn set(&self, value: &str) -> Result<(), SecretStoreError>;
    async fn clear(&self) -> Result<(), SecretStoreError>;
}

/// Session token stored in the OS keychain.
///
/// Holds one keyring entry for its whole life so every operation targets
/// the same credential.
pub struct KeyringSecretStore {
    entry: Entry,
}

impl KeyringSecretStore {
    pub fn new() -> Result<Self, SecretStoreError> {
        Self::with_names(SERVICE_NAME, TOKEN_ACCOUNT)
    }

    pub fn with_names(service: &str, account: &str) -> Result<Self, SecretStoreError> {
        let entry = Entry::new(service, account)
            .map_err(|e| SecretStoreError::Unavailable(e.to_string()))?;
        Ok(Self { entry })
    }

    pub fn from_entry(entry: Entry) -> Self {
        Self { entry }
    }
}

#[async_trait]
impl SecretStore for KeyringSecretStore {
    async fn get(&self) -> Result<Option<String>, SecretStoreError> {
        match self.entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(SecretStoreError::Read(e.to_string())),
        }
    }

    async fn set(&self, value: &str) -> Result<(), SecretStoreError> {
        self.entry
            .set_password(value)
            .map_err(|e| SecretStoreError::Write(e.to_string()))
    }

    async fn clear(&self) -> Result<(), SecretStoreError> {
        match self.entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(SecretStoreError::Clear(e.to_string())),
        }
    }
}

/// In-process token store.
///
/// Clones share the same slot. Each operation can be made to fail, which
/// is how the degraded paths of the client and session service are tested.
#[derive(Clone, Default)]
pub struct MemorySecretStore {
    slot: Arc<Mutex<Option<String>>>,
    fail_get: Arc<AtomicBool>,
    fail_set: Arc<AtomicBool>,
    fail_clear: Arc<AtomicBool>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        *store.lock() = Some(token.to_string());
        store
    }

    pub fn fail_get(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    pub fn fail_set(&self, fail: bool) {
        self.fail_set.store(fail, Ordering::SeqCst);
    }

    pub fn fail_clear(&self, fail: bool) {
        self.fail_clear.store(fail, Ordering::SeqCst);
    }

    /// Current contents, bypassing fault injection
    pub fn peek(&self) -> Option<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // A poisoned slot still holds a valid Option
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn get(&self) -> Result<Option<String>, SecretStoreError> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(SecretStoreError::Read("injected read failure".to_string()));
        }
        Ok(self.lock().clone())
    }

    async fn set(&self, value: &str) -> Result<(), SecretStoreError> {
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(SecretStoreError::Write("injected write failure".to_string()));
        }
        *self.lock() = Some(value.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SecretStoreError> {
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(SecretStoreError::Clear("injected clear failure".to_string()));
        }
        *self.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyring::credential::CredentialBuilderApi;
    use keyring::mock::MockCredential;

    fn mock_keyring_store() -> KeyringSecretStore {
        let credential = keyring::mock::default_credential_builder()
            .build(None, "storefront-test", "userToken")
            .unwrap();
        KeyringSecretStore::from_entry(Entry::new_with_credential(credential))
    }

    fn inject_failure(store: &KeyringSecretStore, message: &'static str) {
        store
            .entry
            .get_credential()
            .downcast_ref::<MockCredential>()
            .unwrap()
            .set_error(keyring::Error::PlatformFailure(message.into()));
    }

    #[tokio::test]
    async fn test_keyring_store_keeps_token_between_calls() {
        let store = mock_keyring_store();
        assert_eq!(store.get().await.unwrap(), None);

        store.set("tok123").await.unwrap();
        assert_eq!(store.get().await.unwrap().as_deref(), Some("tok123"));

        store.clear().await.unwrap();
        assert_eq!(store.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_keyring_store_clear_missing_entry_is_ok() {
        let store = mock_keyring_store();
        assert!(store.clear().await.is_ok());
        assert!(store.clear().await.is_ok());
    }

    #[tokio::test]
    async fn test_keyring_store_maps_platform_errors() {
        let store = mock_keyring_store();

        inject_failure(&store, "keychain locked");
        assert!(matches!(store.get().await, Err(SecretStoreError::Read(_))));

        inject_failure(&store, "keychain locked");
        assert!(matches!(store.set("tok123").await, Err(SecretStoreError::Write(_))));
        assert_eq!(store.get().await.unwrap(), None);

        store.set("tok123").await.unwrap();
        inject_failure(&store, "keychain locked");
        assert!(matches!(store.clear().await, Err(SecretStoreError::Clear(_))));
        assert_eq!(store.get().await.unwrap().as_deref(), Some("tok123"));
    }

    #[tokio::test]
    async fn test_memory_store_set_get_clear() {
        let store = MemorySecretStore::new();
        assert_eq!(store.get().await.unwrap(), None);

        store.set("tok123").await.unwrap();
        assert_eq!(store.get().await.unwrap().as_deref(), Some("tok123"));

        store.clear().await.unwrap();
        assert_eq!(store.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_clear_is_idempotent() {
        let store = MemorySecretStore::new();
        assert!(store.clear().await.is_ok());
        assert!(store.clear().await.is_ok());
    }

    #[tokio::test]
    async fn test_memory_store_injected_failures() {
        let store = MemorySecretStore::with_token("tok123");

        store.fail_get(true);
        assert!(matches!(store.get().await, Err(SecretStoreError::Read(_))));

        store.fail_set(true);
        assert!(matches!(store.set("other").await, Err(SecretStoreError::Write(_))));
        assert_eq!(store.peek().as_deref(), Some("tok123"));

        store.fail_clear(true);
        assert!(matches!(store.clear().await, Err(SecretStoreError::Clear(_))));
        assert_eq!(store.peek().as_deref(), Some("tok123"));
    }

    #[tokio::test]
    async fn test_clones_share_slot() {
        let store = MemorySecretStore::new();
        let handle = store.clone();
        store.set("shared").await.unwrap();
        assert_eq!(handle.peek().as_deref(), Some("shared"));
    }
}

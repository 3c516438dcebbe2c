//! Единое состояние сессии дашборда.
//!
//! One holder per process, created explicitly and handed to `ApiClient` and
//! the list controllers. `hydrate` restores a persisted token on startup,
//! `clear` tears the session down on logout or when the backend rejects the
//! token.

use chrono::Utc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::sync::{Arc, RwLock};

use contracts::system::auth::{TokenClaims, UserInfo};

use super::token_storage::{MemoryTokenStorage, StoredSession, TokenStorage};

#[derive(Clone)]
pub struct Session {
    state: Arc<RwLock<Option<StoredSession>>>,
    storage: Arc<dyn TokenStorage>,
}

impl Session {
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self {
            state: Arc::new(RwLock::new(None)),
            storage,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStorage::default()))
    }

    /// Restore the persisted session. Returns whether a usable token was
    /// found; an expired or unreadable one is wiped from storage.
    pub fn hydrate(&self) -> bool {
        let stored = match self.storage.load() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Discarding unreadable session storage: {}", e);
                self.wipe_storage();
                return false;
            }
        };

        let Some(stored) = stored else {
            return false;
        };

        if token_expired(&stored.access_token) {
            tracing::info!("Stored access token has expired, login required");
            self.wipe_storage();
            return false;
        }

        *self.write() = Some(stored);
        true
    }

    pub fn login(&self, access_token: String, user: Option<UserInfo>) {
        let stored = StoredSession { access_token, user };
        if let Err(e) = self.storage.save(&stored) {
            // the session still works for this run
            tracing::warn!("Failed to persist session: {}", e);
        }
        *self.write() = Some(stored);
    }

    pub fn set_user(&self, user: UserInfo) {
        let snapshot = {
            let mut state = self.write();
            let Some(stored) = state.as_mut() else {
                return;
            };
            stored.user = Some(user);
            stored.clone()
        };
        if let Err(e) = self.storage.save(&snapshot) {
            tracing::warn!("Failed to persist session: {}", e);
        }
    }

    /// Drop the session locally. Never fails: a storage error is logged
    /// and the in-memory state is cleared regardless.
    pub fn clear(&self) {
        *self.write() = None;
        self.wipe_storage();
    }

    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.access_token.clone())
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.read().as_ref().and_then(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    pub fn is_superuser(&self) -> bool {
        self.user().map(|u| u.is_superuser).unwrap_or(false)
    }

    fn wipe_storage(&self) {
        if let Err(e) = self.storage.clear() {
            tracing::warn!("Failed to clear session storage: {}", e);
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<StoredSession>> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<StoredSession>> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Whatever the backend signs with, `exp` is still readable
const READABLE_ALGORITHMS: [Algorithm; 12] = [
    Algorithm::HS256,
    Algorithm::HS384,
    Algorithm::HS512,
    Algorithm::RS256,
    Algorithm::RS384,
    Algorithm::RS512,
    Algorithm::PS256,
    Algorithm::PS384,
    Algorithm::PS512,
    Algorithm::ES256,
    Algorithm::ES384,
    Algorithm::EdDSA,
];

/// Expiry from the token's `exp` claim. The signature is not checked here
/// (the backend does that); a token that is not a JWT is kept as is.
fn token_expired(token: &str) -> bool {
    let mut validation = Validation::default();
    validation.algorithms = READABLE_ALGORITHMS.to_vec();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    match decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(data) => (data.claims.exp as i64) <= Utc::now().timestamp(),
        Err(_) => false,
    }
}

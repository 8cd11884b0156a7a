//! Core business logic for the authentication system.
//!
//! [`SessionManager`] is the single owner of the `(user, is_loading)` tuple.
//! Initialize, login and logout are the only writers, and every write replaces
//! the tuple under one lock, so readers never see a principal paired with a
//! stale loading flag.
//!
//! The manager mirrors the current principal into a [`KeyValueStore`] under one
//! key. Credential checks go through a [`CredentialVerifier`]; swapping the mock
//! for a real identity service does not touch this module.

use super::errors::AuthError;
use super::models::AuthState;
use super::middleware::{self, AccessDecision};
use super::roles;
use super::routes::RouteCategory;
use nagari_adapters::{AdapterError, CredentialVerifier, Credentials, KeyValueStore, User, UserRole};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

pub const DEFAULT_STORAGE_KEY: &str = "nagari_user";

pub struct SessionManager {
    verifier: Arc<dyn CredentialVerifier>,
    store: Arc<dyn KeyValueStore>,
    storage_key: String,
    state: RwLock<AuthState>,
    login_in_flight: AtomicBool,
    /// Bumped by every logout; a login started under an older value drops
    /// its result.
    logout_generation: AtomicU64,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("storage_key", &self.storage_key)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    pub fn new(verifier: Arc<dyn CredentialVerifier>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            verifier,
            store,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            state: RwLock::new(AuthState::default()),
            login_in_flight: AtomicBool::new(false),
            logout_generation: AtomicU64::new(0),
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Restores a previously stored principal without re-validating it.
    ///
    /// Never fails: an unreadable or malformed entry is logged and treated as
    /// absent.
    pub fn initialize(&self) {
        let user = match self.store.get(&self.storage_key) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    warn!(key = %self.storage_key, error = %err, "ignoring malformed stored principal");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!(key = %self.storage_key, error = %err, "session store unreadable, starting anonymous");
                None
            }
        };

        match &user {
            Some(user) => info!(user_id = %user.id, role = %user.role, "restored session"),
            None => debug!("no stored session"),
        }
        self.replace(AuthState {
            user,
            is_loading: false,
        });
    }

    /// Checks credentials and, on success, persists and installs the principal.
    ///
    /// On any failure the current principal is left untouched. A call made
    /// while another login is still pending is rejected with
    /// [`AuthError::LoginInFlight`]. A [`logout`](Self::logout) issued while
    /// the check is pending wins: the login resolves to
    /// [`AuthError::LoginSuperseded`] and installs nothing.
    pub async fn login_with_result(&self, identifier: &str, secret: &str) -> Result<User, AuthError> {
        if self
            .login_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(%identifier, "login rejected, another attempt is in flight");
            return Err(AuthError::LoginInFlight);
        }
        // Clears the in-flight flag and the loading flag on every exit,
        // including when the caller drops this future mid-check.
        let _guard = LoginGuard { manager: self };
        let generation = self.logout_generation.load(Ordering::Acquire);

        self.update(|state| state.is_loading = true);
        debug!(%identifier, "login attempt");

        let credentials = Credentials::new(identifier, secret);
        let user = match self.verifier.verify(&credentials).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                info!(%identifier, "login rejected: invalid credentials");
                return Err(AuthError::InvalidCredentials);
            }
            Err(err) => {
                warn!(%identifier, error = %err, "login failed: identity provider error");
                return Err(AuthError::Provider(err));
            }
        };

        if self.logout_generation.load(Ordering::Acquire) != generation {
            info!(%identifier, "login discarded: logout happened while it was pending");
            return Err(AuthError::LoginSuperseded);
        }

        let serialized = serde_json::to_string(&user)
            .map_err(|err| AuthError::Store(AdapterError::SerializationError(err)))?;
        self.store
            .set(&self.storage_key, &serialized)
            .map_err(|err| {
                warn!(error = %err, "login failed: could not persist principal");
                AuthError::Store(err)
            })?;

        info!(user_id = %user.id, role = %user.role, "login succeeded");
        self.replace(AuthState {
            user: Some(user.clone()),
            is_loading: false,
        });
        Ok(user)
    }

    /// Boolean form of [`login_with_result`](Self::login_with_result).
    ///
    /// Wrong credentials and provider outages both read as `false`.
    pub async fn login(&self, identifier: &str, secret: &str) -> bool {
        self.login_with_result(identifier, secret).await.is_ok()
    }

    /// Forgets the principal in memory and in the store. Idempotent.
    ///
    /// Also cancels the outcome of any login still waiting on the verifier.
    pub fn logout(&self) {
        self.logout_generation.fetch_add(1, Ordering::AcqRel);
        if let Err(err) = self.store.remove(&self.storage_key) {
            warn!(key = %self.storage_key, error = %err, "could not clear stored principal");
        }
        let previous = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.user.take()
        };
        if let Some(user) = previous {
            info!(user_id = %user.id, "logged out");
        }
    }

    pub fn state(&self) -> AuthState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state().user
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    /// `false` when nobody is logged in.
    pub fn has_role_or_higher(&self, required: UserRole) -> bool {
        self.user()
            .is_some_and(|user| roles::has_role_or_higher(user.role, required))
    }

    /// Anonymous sessions only see the public section.
    pub fn allowed_routes(&self) -> Vec<RouteCategory> {
        match self.user() {
            Some(user) => middleware::allowed_routes(user.role),
            None => vec![RouteCategory::Home],
        }
    }

    pub fn authorize(&self, category: RouteCategory) -> AccessDecision {
        middleware::authorize(self.user().as_ref(), category)
    }

    fn replace(&self, next: AuthState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    fn update(&self, apply: impl FnOnce(&mut AuthState)) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        apply(&mut state);
    }
}

struct LoginGuard<'a> {
    manager: &'a SessionManager,
}

impl Drop for LoginGuard<'_> {
    fn drop(&mut self) {
        self.manager.update(|state| state.is_loading = false);
        self.manager.login_in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nagari_adapters::mock::{admin_user, ADMIN_EMAIL, ADMIN_PASSWORD};
    use nagari_adapters::{MemoryStore, MockVerifier};
    use std::time::Duration;

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, AdapterError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), AdapterError> {
            Err(AdapterError::StorageError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }

        fn remove(&self, _key: &str) -> Result<(), AdapterError> {
            Err(AdapterError::StorageError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    fn manager(delay: Duration) -> (SessionManager, Arc<MemoryStore>, Arc<MockVerifier>) {
        let store = Arc::new(MemoryStore::new());
        let verifier = Arc::new(MockVerifier::with_delay(delay));
        let manager = SessionManager::new(verifier.clone(), store.clone());
        (manager, store, verifier)
    }

    #[test]
    fn starts_loading_and_anonymous() {
        let (manager, _, _) = manager(Duration::ZERO);
        let state = manager.state();
        assert!(state.is_loading);
        assert!(!state.is_authenticated());
    }

    #[test]
    fn initialize_restores_stored_principal() {
        let (manager, store, _) = manager(Duration::ZERO);
        store
            .set(DEFAULT_STORAGE_KEY, &serde_json::to_string(&admin_user()).unwrap())
            .unwrap();

        manager.initialize();

        assert_eq!(manager.user(), Some(admin_user()));
        assert!(!manager.is_loading());
        assert!(manager.is_authenticated());
    }

    #[test]
    fn initialize_ignores_malformed_entry() {
        let (manager, store, _) = manager(Duration::ZERO);
        store.set(DEFAULT_STORAGE_KEY, "{\"id\":").unwrap();

        manager.initialize();

        assert!(!manager.is_authenticated());
        assert!(!manager.is_loading());
    }

    #[test]
    fn custom_storage_key_is_used() {
        let store = Arc::new(MemoryStore::new());
        store
            .set("portal_user", &serde_json::to_string(&admin_user()).unwrap())
            .unwrap();
        let manager = SessionManager::new(Arc::new(MockVerifier::with_delay(Duration::ZERO)), store)
            .with_storage_key("portal_user");

        manager.initialize();
        assert_eq!(manager.storage_key(), "portal_user");
        assert!(manager.is_authenticated());
    }

    #[tokio::test]
    async fn successful_login_persists_principal() {
        let (manager, store, _) = manager(Duration::ZERO);
        manager.initialize();

        let user = manager.login_with_result(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();

        assert_eq!(user.role, UserRole::SuperAdmin);
        assert_eq!(manager.user(), Some(user.clone()));
        assert!(!manager.is_loading());
        let stored: User =
            serde_json::from_str(&store.get(DEFAULT_STORAGE_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored, user);
    }

    #[tokio::test]
    async fn rejected_login_keeps_existing_principal() {
        let (manager, _, _) = manager(Duration::ZERO);
        assert!(manager.login(ADMIN_EMAIL, ADMIN_PASSWORD).await);

        let err = manager.login_with_result(ADMIN_EMAIL, "nope").await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(manager.user(), Some(admin_user()));
        assert!(!manager.is_loading());
    }

    #[tokio::test]
    async fn provider_outage_is_reported_as_transient() {
        let (manager, _, verifier) = manager(Duration::ZERO);
        verifier.set_unavailable(true);

        let err = manager
            .login_with_result(ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .unwrap_err();
        assert!(err.is_transient(), "got: {err}");
        assert!(!manager.login(ADMIN_EMAIL, ADMIN_PASSWORD).await);
        assert!(!manager.is_authenticated());
        assert!(!manager.is_loading());
    }

    #[tokio::test]
    async fn persist_failure_leaves_session_anonymous() {
        let manager = SessionManager::new(
            Arc::new(MockVerifier::with_delay(Duration::ZERO)),
            Arc::new(ReadOnlyStore),
        );

        let err = manager
            .login_with_result(ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Store(_)), "got: {err}");
        assert!(!manager.is_authenticated());

        // Logout still clears memory when the store refuses.
        manager.logout();
        assert!(!manager.is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_login_is_rejected() {
        let (manager, _, _) = manager(Duration::from_secs(1));

        let (first, second, loading_during) = tokio::join!(
            manager.login_with_result(ADMIN_EMAIL, ADMIN_PASSWORD),
            async {
                tokio::task::yield_now().await;
                manager.login_with_result(ADMIN_EMAIL, ADMIN_PASSWORD).await
            },
            async {
                tokio::task::yield_now().await;
                manager.is_loading()
            },
        );

        assert!(first.is_ok());
        assert!(matches!(second, Err(AuthError::LoginInFlight)));
        assert!(loading_during);
        assert!(!manager.is_loading());

        // The flag is released once the first call resolves.
        assert!(manager.login(ADMIN_EMAIL, ADMIN_PASSWORD).await);
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_login_releases_in_flight_flag() {
        let (manager, _, _) = manager(Duration::from_secs(1));

        let abandoned = tokio::time::timeout(
            Duration::from_millis(100),
            manager.login(ADMIN_EMAIL, ADMIN_PASSWORD),
        )
        .await;

        assert!(abandoned.is_err());
        assert!(!manager.is_loading());
        assert!(!manager.is_authenticated());
        assert!(manager.login(ADMIN_EMAIL, ADMIN_PASSWORD).await);
    }

    #[tokio::test(start_paused = true)]
    async fn logout_during_pending_login_wins() {
        let (manager, store, _) = manager(Duration::from_secs(1));
        manager.initialize();

        let (login, ()) = tokio::join!(
            manager.login_with_result(ADMIN_EMAIL, ADMIN_PASSWORD),
            async {
                tokio::task::yield_now().await;
                manager.logout();
            },
        );

        assert!(matches!(login, Err(AuthError::LoginSuperseded)));
        assert!(!manager.is_authenticated());
        assert!(!manager.is_loading());
        assert_eq!(store.get(DEFAULT_STORAGE_KEY).unwrap(), None);

        // A login started after the logout is unaffected.
        assert!(manager.login(ADMIN_EMAIL, ADMIN_PASSWORD).await);
    }

    #[tokio::test]
    async fn logout_clears_memory_and_store() {
        let (manager, store, _) = manager(Duration::ZERO);
        assert!(manager.login(ADMIN_EMAIL, ADMIN_PASSWORD).await);

        manager.logout();
        assert!(!manager.is_authenticated());
        assert_eq!(store.get(DEFAULT_STORAGE_KEY).unwrap(), None);

        manager.logout();
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn role_helpers_follow_current_principal() {
        let (manager, _, _) = manager(Duration::ZERO);
        manager.initialize();
        assert!(!manager.has_role_or_higher(UserRole::Visitor));
        assert_eq!(manager.allowed_routes(), vec![RouteCategory::Home]);
        assert_eq!(
            manager.authorize(RouteCategory::Admin),
            AccessDecision::RedirectToLogin
        );

        assert!(manager.login(ADMIN_EMAIL, ADMIN_PASSWORD).await);
        assert!(manager.has_role_or_higher(UserRole::Staff));
        assert_eq!(
            manager.allowed_routes(),
            vec![RouteCategory::Home, RouteCategory::Portal, RouteCategory::Admin]
        );
        assert!(manager.authorize(RouteCategory::Admin).is_allowed());
    }
}

//! # Auth State
//!
//! Who is signed in, plus the loading flag and error toast of the account
//! screen.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │              login() ok / register() ok                                 │
//! │   ┌───────────┐ ────────────────────────────► ┌───────────────────┐     │
//! │   │ Anonymous │                               │   Authenticated   │     │
//! │   └───────────┘ ◄──────────────────────────── └───────────────────┘     │
//! │        │  ▲               logout()                 │        ▲           │
//! │        │  │                                        │        │           │
//! │        └──┘ login() fails:                         └────────┘           │
//! │             error = t("invalidCredentials")         update()            │
//! │                                                                         │
//! │  login / register / update sleep for the configured latency first.     │
//! │  `is_loading` is true while any of them is in flight.                   │
//! │  Only the session (user + flag) is persisted to `auth-storage`.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Abandoned Operations
//! Each async operation holds a [`LoadingGuard`]. Dropping the future (the
//! screen went away mid-request) drops the guard, which resets the loading
//! flag. Concurrent logins are not serialized: the last one to finish wins.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use hearth_core::auth::{Session, UserDirectory};
use hearth_core::{seed, CoreError, User};
use hearth_store::{SnapshotRepository, Storage};
use tracing::{debug, info, warn};

use super::{lock, LanguageState, Loading, LoadingGuard};
use crate::error::{ApiError, ApiResult, ErrorCode};

/// Mutable part of the auth store.
#[derive(Debug, Default)]
struct AuthInner {
    session: Session,
    /// Operations currently in flight.
    pending: usize,
    error: Option<String>,
}

impl Loading for AuthInner {
    fn pending_mut(&mut self) -> &mut usize {
        &mut self.pending
    }

    fn error_mut(&mut self) -> &mut Option<String> {
        &mut self.error
    }
}

/// Shared auth state.
#[derive(Debug, Clone)]
pub struct AuthState {
    inner: Arc<Mutex<AuthInner>>,
    directory: Arc<Mutex<UserDirectory>>,
    repo: SnapshotRepository<Session>,
    language: LanguageState,
    shared_password: Arc<str>,
    latency: Duration,
}

impl AuthState {
    /// Restores the saved session over the mock user directory.
    pub fn restore(
        storage: &Storage,
        language: LanguageState,
        shared_password: &str,
        latency: Duration,
    ) -> Self {
        let repo = storage.auth();
        let session = repo.restore(Session::default);
        debug!(
            authenticated = session.is_authenticated,
            user_id = session.current_user().map(|u| u.id.as_str()),
            "Session restored"
        );

        AuthState {
            inner: Arc::new(Mutex::new(AuthInner {
                session,
                ..Default::default()
            })),
            directory: Arc::new(Mutex::new(UserDirectory::new(seed::users()))),
            repo,
            language,
            shared_password: Arc::from(shared_password),
            latency,
        }
    }

    // =========================================================================
    // Async Operations
    // =========================================================================

    /// Signs in with a directory email and the shared mock password.
    ///
    /// ## Errors
    /// `UNAUTHORIZED` with the localized `invalidCredentials` message. The
    /// same message lands in [`AuthState::error`].
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<User> {
        let _loading = LoadingGuard::start(&self.inner);
        tokio::time::sleep(self.latency).await;

        let found = lock(&self.directory).authenticate(email, password, &self.shared_password);
        match found {
            Some(user) => {
                info!(user_id = %user.id, role = %user.role, "User signed in");
                self.replace_session(Session::signed_in(user.clone()));
                Ok(user)
            }
            None => {
                warn!(email, "Sign in rejected");
                let message = self.language.t("invalidCredentials");
                self.set_error(&message);
                Err(ApiError::unauthorized(message))
            }
        }
    }

    /// Creates a visitor account and signs it in.
    ///
    /// The password is not stored: every mock account shares one.
    ///
    /// ## Errors
    /// `VALIDATION_ERROR` with the localized `emailInUse` message when the
    /// email is taken. The session is left as it was.
    pub async fn register(&self, email: &str, _password: &str, name: &str) -> ApiResult<User> {
        let _loading = LoadingGuard::start(&self.inner);
        tokio::time::sleep(self.latency).await;

        let registered = lock(&self.directory).register(email, name);
        match registered {
            Ok(user) => {
                info!(user_id = %user.id, "User registered");
                self.replace_session(Session::signed_in(user.clone()));
                Ok(user)
            }
            Err(e) => {
                warn!(email, error = %e, "Registration rejected");
                let err = ApiError::localized(e, self.language.current());
                self.set_error(&err.message);
                Err(err)
            }
        }
    }

    /// Replaces the signed-in user's profile.
    ///
    /// ## Errors
    /// Localized `updateFailed` when nobody is signed in, when `user` is not
    /// the signed-in user, or when the new email belongs to someone else.
    pub async fn update(&self, user: User) -> ApiResult<User> {
        let _loading = LoadingGuard::start(&self.inner);
        tokio::time::sleep(self.latency).await;

        let current_id = self.current_user().map(|u| u.id);
        if current_id.as_deref() != Some(user.id.as_str()) {
            return Err(self.update_failed(ErrorCode::Unauthorized));
        }

        {
            let mut directory = lock(&self.directory);
            if directory.get(&user.id).is_some() {
                if let Err(e) = directory.update(user.clone()) {
                    warn!(user_id = %user.id, error = %e, "Profile update rejected");
                    return Err(self.update_failed(ErrorCode::ValidationError));
                }
            }
        }

        info!(user_id = %user.id, "Profile updated");
        self.replace_session(Session::signed_in(user.clone()));
        Ok(user)
    }

    // =========================================================================
    // Sync Operations
    // =========================================================================

    /// Signs out unconditionally.
    pub fn logout(&self) {
        let mut state = lock(&self.inner);
        if let Some(user) = state.session.current_user() {
            info!(user_id = %user.id, "User signed out");
        }
        state.session.clear();
        self.persist(&state.session);
    }

    pub fn clear_error(&self) {
        lock(&self.inner).error = None;
    }

    /// Refreshes the session copy after an admin edited the signed-in user.
    pub fn refresh_current_user(&self, user: &User) {
        let mut state = lock(&self.inner);
        let is_current = state.session.current_user().is_some_and(|u| u.id == user.id);
        if is_current {
            state.session.user = Some(user.clone());
            self.persist(&state.session);
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn session(&self) -> Session {
        lock(&self.inner).session.clone()
    }

    pub fn current_user(&self) -> Option<User> {
        lock(&self.inner).session.current_user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        lock(&self.inner).session.is_authenticated
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.inner).pending > 0
    }

    pub fn error(&self) -> Option<String> {
        lock(&self.inner).error.clone()
    }

    pub fn is_admin(&self) -> bool {
        lock(&self.inner).session.is_admin()
    }

    pub fn is_moderator(&self) -> bool {
        lock(&self.inner).session.is_moderator()
    }

    pub fn has_admin_access(&self) -> bool {
        lock(&self.inner).session.has_admin_access()
    }

    /// The signed-in user, or `NotAuthenticated`.
    pub fn require_user(&self) -> Result<User, CoreError> {
        self.current_user().ok_or(CoreError::NotAuthenticated)
    }

    /// Read access to the user directory (admin panel).
    pub fn with_directory<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&UserDirectory) -> R,
    {
        let directory = lock(&self.directory);
        f(&directory)
    }

    /// Write access to the user directory. Not persisted.
    pub fn with_directory_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut UserDirectory) -> R,
    {
        let mut directory = lock(&self.directory);
        f(&mut directory)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn replace_session(&self, session: Session) {
        let mut state = lock(&self.inner);
        state.session = session;
        self.persist(&state.session);
    }

    fn set_error(&self, message: &str) {
        lock(&self.inner).error = Some(message.to_string());
    }

    fn update_failed(&self, code: ErrorCode) -> ApiError {
        let message = self.language.t("updateFailed");
        self.set_error(&message);
        ApiError::new(code, message)
    }

    fn persist(&self, session: &Session) {
        if let Err(e) = self.repo.save(session) {
            warn!(error = %e, "Failed to persist session");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::i18n::Language;
    use hearth_core::{Role, MOCK_PASSWORD};

    const LATENCY: Duration = Duration::from_millis(1000);

    fn auth(storage: &Storage) -> AuthState {
        let language = LanguageState::restore(storage, Language::En);
        AuthState::restore(storage, language, MOCK_PASSWORD, LATENCY)
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_success_matches_mock_role() {
        let storage = Storage::in_memory();
        let auth = auth(&storage);

        let user = auth.login("admin@example.com", "password").await.unwrap();
        assert_eq!(user.role, Role::Admin);
        assert!(auth.is_authenticated());
        assert!(auth.is_admin());
        assert!(auth.has_admin_access());
        assert!(!auth.is_loading());
        assert_eq!(auth.error(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_failure_sets_localized_error() {
        let storage = Storage::in_memory();
        let auth = auth(&storage);

        let err = auth.login("admin@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert!(!auth.is_authenticated());
        assert_eq!(auth.error().as_deref(), Some("Invalid email or password"));

        auth.clear_error();
        assert_eq!(auth.error(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_existing_email_leaves_session() {
        let storage = Storage::in_memory();
        let auth = auth(&storage);

        let err = auth
            .register("user@example.com", "secret1", "Someone")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "This email is already registered");
        assert!(!auth.is_authenticated());
        assert_eq!(storage.auth().load().unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_creates_visitor() {
        let storage = Storage::in_memory();
        let auth = auth(&storage);

        let user = auth
            .register("new@example.com", "secret1", "New Person")
            .await
            .unwrap();
        assert_eq!(user.role, Role::Visitor);
        assert_eq!(user.notifications_enabled, Some(false));
        assert!(auth.is_authenticated());
        assert!(!auth.has_admin_access());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_flag_while_in_flight() {
        let storage = Storage::in_memory();
        let auth = auth(&storage);

        let pending = {
            let auth = auth.clone();
            tokio::spawn(async move { auth.login("user@example.com", "password").await })
        };
        tokio::task::yield_now().await;
        assert!(auth.is_loading());

        tokio::time::advance(LATENCY).await;
        pending.await.unwrap().unwrap();
        assert!(!auth.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_login_resets_loading() {
        let storage = Storage::in_memory();
        let auth = auth(&storage);

        let abandoned = tokio::time::timeout(
            Duration::from_millis(10),
            auth.login("user@example.com", "password"),
        )
        .await;
        assert!(abandoned.is_err());
        assert!(!auth.is_loading());
        assert!(!auth.is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_requires_current_user() {
        let storage = Storage::in_memory();
        let auth = auth(&storage);

        let stranger = seed::users().remove(0);
        let err = auth.update(stranger).await.unwrap_err();
        assert_eq!(err.message, "Could not update profile");
        assert_eq!(auth.error().as_deref(), Some("Could not update profile"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_and_logout_persist() {
        let storage = Storage::in_memory();
        let auth = auth(&storage);

        let mut user = auth.login("user@example.com", "password").await.unwrap();
        user.name = "Renamed".to_string();
        auth.update(user).await.unwrap();

        let reopened = self::auth(&storage);
        assert_eq!(reopened.current_user().map(|u| u.name), Some("Renamed".into()));

        reopened.logout();
        assert!(!reopened.is_authenticated());
        assert!(!self::auth(&storage).is_authenticated());
    }
}

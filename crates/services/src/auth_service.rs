use std::sync::{Arc, PoisonError, RwLock};

use yodha_core::model::Account;

use storage::repository::{AuthRepository, SessionRepository};

use crate::error::AuthError;
use crate::notify::{Notice, Notifier};

/// Session context: login, logout and the process-local mirror of the
/// persisted session.
///
/// There is no expiry or refresh; the stored record stays valid until
/// an explicit logout, exactly as persisted.
pub struct AuthService {
    auth: Arc<dyn AuthRepository>,
    session: Arc<dyn SessionRepository>,
    notifier: Arc<dyn Notifier>,
    current: RwLock<Option<Account>>,
}

impl AuthService {
    #[must_use]
    pub fn new(
        auth: Arc<dyn AuthRepository>,
        session: Arc<dyn SessionRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            auth,
            session,
            notifier,
            current: RwLock::new(None),
        }
    }

    /// Load the persisted session into the mirror at startup.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session store is unreadable.
    pub async fn restore(&self) -> Result<Option<Account>, AuthError> {
        let account = self.session.load_session().await?;
        self.set_current(account.clone());
        Ok(account)
    }

    /// Authenticate and persist the returned account verbatim.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the credential pair
    /// resolves to zero rows, `AuthError::Storage` on store failure.
    pub async fn login(&self, prn: &str, password: &str) -> Result<Account, AuthError> {
        let Some(account) = self.auth.authenticate(prn, password).await? else {
            tracing::warn!(prn, "login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        self.session.store_session(&account).await?;
        self.set_current(Some(account.clone()));
        tracing::info!(prn, username = %account.username, "login succeeded");
        self.notifier
            .notify(Notice::info(format!("Welcome back, {}", account.username)));
        Ok(account)
    }

    /// Clear both the persisted session and the mirror.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session store rejects the write.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.session.clear_session().await?;
        self.set_current(None);
        tracing::info!("logged out");
        Ok(())
    }

    #[must_use]
    pub fn session(&self) -> Option<Account> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    fn set_current(&self, account: Option<Account>) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = account;
    }
}

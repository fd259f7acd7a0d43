//! Injected application context.
//!
//! One `AppContext` per signed-in user, built at startup and passed by
//! reference into every command. Sign-out consumes the context so no
//! token can outlive it.

use chrono_tz::Tz;

use crate::config::Config;
use crate::error::AppError;
use crate::store::{Session, StoreClient};

pub struct AppContext {
    pub store: StoreClient,
    pub session: Session,
    pub tz: Tz,
}

impl AppContext {
    /// Build the context from config and credentials: resolve the
    /// timezone, construct the store client and sign in.
    pub async fn sign_in(config: &Config, email: &str, password: &str) -> Result<Self, AppError> {
        let tz = config.tz()?;
        let store = StoreClient::from_config(config)?;
        let session = store.sign_in(email, password).await?;
        log::info!("signed in as {}", session.user_id);
        Ok(Self { store, session, tz })
    }

    /// Refresh the session if it is at or past expiry.
    pub async fn ensure_fresh(&mut self) -> Result<(), AppError> {
        if self.session.is_expired() {
            log::debug!("session expired, refreshing");
            self.session = self.store.refresh_session(&self.session).await?;
        }
        Ok(())
    }

    /// Drop the session. Tokens are not persisted anywhere else.
    pub fn sign_out(self) {
        log::info!("signed out {}", self.session.user_id);
    }
}

//! Auth session against the store's token endpoint.
//!
//! Password-grant sign-in yields a bearer token, a refresh token and the
//! authenticated user id. The session lives in the injected app context
//! and is dropped on sign-out; nothing here is process-global.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{check_status, StoreClient};
use crate::error::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user_id: Uuid,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Expired when within 60 seconds of the expiry instant. A session
    /// without a known expiry is treated as expired so callers refresh.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            None => true,
            Some(expires_at) => expires_at <= Utc::now() + Duration::seconds(60),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    user: AuthUser,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: Uuid,
}

impl AuthResponse {
    fn into_session(self) -> Session {
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            user_id: self.user.id,
            expires_at: self
                .expires_in
                .map(|secs| Utc::now() + Duration::seconds(secs)),
        }
    }
}

impl StoreClient {
    async fn token_request(
        &self,
        grant_type: &str,
        body: serde_json::Value,
    ) -> Result<Session, StoreError> {
        let mut url = self.base_url.join("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", grant_type);
        let request = self
            .http
            .post(url)
            .header("apikey", self.api_key.clone())
            .json(&body);
        let response = check_status(request.send().await?).await?;
        let auth: AuthResponse = response.json().await?;
        Ok(auth.into_session())
    }

    /// Sign in with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, StoreError> {
        self.token_request(
            "password",
            serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    /// Exchange the refresh token for a fresh session.
    pub async fn refresh_session(&self, session: &Session) -> Result<Session, StoreError> {
        let refresh_token = session
            .refresh_token
            .as_deref()
            .ok_or(StoreError::AuthExpired)?;
        self.token_request(
            "refresh_token",
            serde_json::json!({ "refresh_token": refresh_token }),
        )
        .await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_session(expires_at: Option<DateTime<Utc>>) -> Session {
        Session {
            access_token: "token".to_string(),
            refresh_token: Some("refresh".to_string()),
            user_id: Uuid::new_v4(),
            expires_at,
        }
    }

    #[test]
    fn test_session_without_expiry_is_expired() {
        assert!(make_session(None).is_expired());
    }

    #[test]
    fn test_session_expiry_skew() {
        let fresh = make_session(Some(Utc::now() + Duration::hours(1)));
        assert!(!fresh.is_expired());

        // Inside the 60-second skew window counts as expired
        let closing = make_session(Some(Utc::now() + Duration::seconds(30)));
        assert!(closing.is_expired());

        let past = make_session(Some(Utc::now() - Duration::hours(1)));
        assert!(past.is_expired());
    }

    #[test]
    fn test_auth_response_parsing() {
        let body = r#"{
            "access_token": "jwt-token",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh-me",
            "user": { "id": "8f9f4a80-3a2e-4a15-9f48-222222222222" }
        }"#;
        let auth: AuthResponse = serde_json::from_str(body).unwrap();
        let session = auth.into_session();
        assert_eq!(session.access_token, "jwt-token");
        assert_eq!(session.refresh_token.as_deref(), Some("refresh-me"));
        assert!(!session.is_expired());
    }
}

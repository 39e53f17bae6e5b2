// Credential handling for the SmartThings API.
//
// One documented credential-provider interface: `Credential`. Both the
// refresh path and the command path resolve their bearer token through
// it, so token-refresh responsibility lives in exactly one place.

use chrono::{DateTime, TimeDelta, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::Mutex;
use url::Url;

use crate::error::Error;

/// Treat a cached token as expired this many seconds early, so a token
/// that dies mid-request is refreshed on the request before.
const EXPIRY_SKEW_SECS: i64 = 60;

/// How to authenticate against the SmartThings API.
///
/// Each variant carries the secret material needed for its flow.
#[derive(Debug)]
pub enum Credential {
    /// Static personal access token.
    /// Generated at: <https://account.smartthings.com/tokens>.
    PersonalToken(SecretString),

    /// OAuth 2.0 session; mints short-lived access tokens from a
    /// refresh token on demand.
    OAuth(OauthSession),
}

impl Credential {
    /// Resolve the bearer token to attach to the next request.
    ///
    /// For [`PersonalToken`](Self::PersonalToken) this is a cheap clone;
    /// for [`OAuth`](Self::OAuth) it may suspend on a refresh round-trip.
    pub async fn bearer_token(&self, http: &reqwest::Client) -> Result<SecretString, Error> {
        match self {
            Self::PersonalToken(token) => Ok(token.clone()),
            Self::OAuth(session) => session.access_token(http).await,
        }
    }
}

// ── OAuth session ────────────────────────────────────────────────────

/// Wire shape of the token endpoint response.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug)]
struct CachedToken {
    access_token: SecretString,
    expires_at: DateTime<Utc>,
}

#[derive(Debug)]
struct OauthState {
    /// SmartThings rotates refresh tokens; each successful refresh
    /// replaces this with the newly issued one when present.
    refresh_token: SecretString,
    cached: Option<CachedToken>,
}

/// A refreshable OAuth 2.0 credential.
///
/// Holds the refresh token and a cached access token behind one lock,
/// so concurrent callers never race two refresh round-trips.
#[derive(Debug)]
pub struct OauthSession {
    token_url: Url,
    client_id: String,
    client_secret: SecretString,
    state: Mutex<OauthState>,
}

impl OauthSession {
    /// Token endpoint for SmartThings OAuth apps.
    pub const SMARTTHINGS_TOKEN_URL: &'static str = "https://account.smartthings.com/oauth/token";

    pub fn new(
        token_url: Url,
        client_id: impl Into<String>,
        client_secret: SecretString,
        refresh_token: SecretString,
    ) -> Self {
        Self {
            token_url,
            client_id: client_id.into(),
            client_secret,
            state: Mutex::new(OauthState {
                refresh_token,
                cached: None,
            }),
        }
    }

    /// Return a valid access token, refreshing if the cached one is
    /// missing or inside the expiry skew window.
    async fn access_token(&self, http: &reqwest::Client) -> Result<SecretString, Error> {
        let mut state = self.state.lock().await;

        if let Some(ref cached) = state.cached {
            let deadline = cached.expires_at - TimeDelta::seconds(EXPIRY_SKEW_SECS);
            if Utc::now() < deadline {
                return Ok(cached.access_token.clone());
            }
        }

        tracing::debug!("access token missing or expiring, refreshing");

        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret()),
            ("refresh_token", state.refresh_token.expose_secret()),
        ];

        let resp = http
            .post(self.token_url.clone())
            .form(&params)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::TokenRefresh {
                message: format!("token endpoint returned HTTP {status}: {body}"),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            })?;

        let access_token = SecretString::from(token.access_token);
        let expires_in = token
            .expires_in
            .and_then(|secs| i64::try_from(secs).ok())
            .unwrap_or(3600);
        let expires_at = Utc::now() + TimeDelta::seconds(expires_in);

        if let Some(rotated) = token.refresh_token {
            state.refresh_token = SecretString::from(rotated);
        }
        state.cached = Some(CachedToken {
            access_token: access_token.clone(),
            expires_at,
        });

        Ok(access_token)
    }
}

//! Token endpoint client: code exchange and refresh.

use chrono::{DateTime, Duration, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::envelope::TokenRequest;
use crate::{OAuthConfig, OAuthError, TokenSet};

/// Token endpoint success response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: i64,
    token_type: Option<String>,
    scope: Option<String>,
}

/// Token endpoint error response.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
}

pub struct OAuthClient {
    config: OAuthConfig,
    http: reqwest::Client,
}

impl OAuthClient {
    pub fn new(config: OAuthConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// Consent URL that yields an authorization code with offline access.
    pub fn authorization_url(&self, redirect_uri: &str, state: Option<&str>) -> Result<String, OAuthError> {
        let mut url = Url::parse(&self.config.auth_url)?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("response_type", "code")
                .append_pair("client_id", &self.config.client_id)
                .append_pair("redirect_uri", redirect_uri)
                .append_pair("scope", &self.config.scopes.join(" "))
                .append_pair("access_type", "offline")
                .append_pair("prompt", "consent");
            if let Some(state) = state {
                query.append_pair("state", state);
            }
        }
        Ok(url.to_string())
    }

    /// Run whichever grant the request envelope asks for.
    pub async fn handle(&self, request: &TokenRequest) -> Result<TokenSet, OAuthError> {
        match request {
            TokenRequest::AuthorizationCode { code, redirect_uri } => {
                self.exchange_code(code, redirect_uri).await
            }
            TokenRequest::Refresh { refresh_token } => self.refresh(refresh_token).await,
        }
    }

    /// Exchange an authorization code for access and refresh tokens.
    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<TokenSet, OAuthError> {
        self.ensure_configured()?;
        tracing::info!("Exchanging OAuth authorization code");

        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", redirect_uri),
        ];
        let (status, body) = self.post_form(&params).await?;
        parse_token_body(status, &body, Utc::now())
    }

    /// Renew an access token. A response without a new refresh token keeps the old one.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenSet, OAuthError> {
        self.ensure_configured()?;
        tracing::info!("Refreshing OAuth access token");

        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];
        let (status, body) = self.post_form(&params).await?;
        let mut token = parse_token_body(status, &body, Utc::now())?;
        if token.refresh_token.is_none() {
            token.refresh_token = Some(refresh_token.to_string());
        }
        Ok(token)
    }

    /// Refresh `current` if it expires within `margin`.
    ///
    /// Returns `Ok(None)` when the token is still valid. The caller persists
    /// the new token when `Some` is returned.
    pub async fn refresh_if_expiring(
        &self,
        current: &TokenSet,
        margin: Duration,
    ) -> Result<Option<TokenSet>, OAuthError> {
        let now = Utc::now();
        if !current.needs_refresh(now, margin) {
            return Ok(None);
        }
        let Some(refresh_token) = current.refresh_token.as_deref() else {
            return Err(OAuthError::InvalidRequest);
        };
        tracing::info!(
            expires_in_secs = (current.expires_at - now).num_seconds(),
            "Token expiring soon, refreshing"
        );
        self.refresh(refresh_token).await.map(Some)
    }

    fn ensure_configured(&self) -> Result<(), OAuthError> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(OAuthError::NotConfigured)
        }
    }

    async fn post_form(&self, params: &[(&str, &str)]) -> Result<(StatusCode, String), OAuthError> {
        let resp = self
            .http
            .post(&self.config.token_url)
            .form(params)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        Ok((status, body))
    }
}

/// Turn a token endpoint response into a [`TokenSet`], stamping `expires_at` from `now`.
fn parse_token_body(status: StatusCode, body: &str, now: DateTime<Utc>) -> Result<TokenSet, OAuthError> {
    if !status.is_success() {
        let err: ErrorResponse = serde_json::from_str(body).unwrap_or(ErrorResponse {
            error: None,
            error_description: Some(body.to_string()),
        });
        tracing::warn!(status = status.as_u16(), error = ?err.error, "Token endpoint returned an error");
        return Err(OAuthError::Provider {
            status: status.as_u16(),
            error: err.error.unwrap_or_else(|| status.to_string()),
            description: err.error_description,
        });
    }

    let resp: TokenResponse = serde_json::from_str(body)?;
    Ok(TokenSet {
        access_token: resp.access_token,
        refresh_token: resp.refresh_token.filter(|t| !t.is_empty()),
        expires_at: now + Duration::seconds(resp.expires_in),
        token_type: resp.token_type.unwrap_or_else(|| "Bearer".to_string()),
        scope: resp.scope,
    })
}

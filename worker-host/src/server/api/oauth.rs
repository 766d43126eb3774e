//! OAuth token exchange and consent URL.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use oauth_client::{TokenError, TokenRequest, TokenSet};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{ApiResult, err_json};
use crate::app::SharedState;

/// POST /api/oauth/token
///
/// `{code, redirectUri}` exchanges an authorization code, `{refreshToken}`
/// renews an access token.
pub async fn token(
    State(state): State<SharedState>,
    Json(body): Json<Value>,
) -> Result<Json<TokenSet>, (StatusCode, Json<TokenError>)> {
    let bad_request = |e: &oauth_client::OAuthError| (StatusCode::BAD_REQUEST, Json(TokenError::from(e)));

    let request = TokenRequest::from_value(body).map_err(|e| bad_request(&e))?;
    match state.oauth().handle(&request).await {
        Ok(token) => Ok(Json(token)),
        Err(e) => {
            tracing::warn!("OAuth token request failed: {e}");
            Err(bad_request(&e))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthorizeQuery {
    pub redirect_uri: String,
    pub state: Option<String>,
}

/// GET /api/oauth/authorize?redirect_uri=...&state=...
pub async fn authorize(
    State(state): State<SharedState>,
    Query(q): Query<AuthorizeQuery>,
) -> ApiResult {
    if !state.oauth().config().is_configured() {
        return Err(err_json(400, &oauth_client::OAuthError::NotConfigured.to_string()));
    }
    let url = state
        .oauth()
        .authorization_url(&q.redirect_uri, q.state.as_deref())
        .map_err(|e| err_json(500, &e.to_string()))?;
    Ok(Json(json!({ "url": url })))
}

//! JSON envelopes of the token service HTTP surface.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::OAuthError;

/// Incoming request: either an authorization-code exchange or a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TokenRequest {
    AuthorizationCode {
        code: String,
        #[serde(rename = "redirectUri")]
        redirect_uri: String,
    },
    Refresh {
        #[serde(rename = "refreshToken")]
        refresh_token: String,
    },
}

impl TokenRequest {
    /// Parse a request body, mapping any shape mismatch to [`OAuthError::InvalidRequest`].
    pub fn from_value(value: Value) -> Result<Self, OAuthError> {
        serde_json::from_value(value).map_err(|_| OAuthError::InvalidRequest)
    }
}

/// Error envelope returned with HTTP 400.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenError {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<&OAuthError> for TokenError {
    fn from(err: &OAuthError) -> Self {
        let details = match err {
            OAuthError::Provider {
                status,
                error,
                description,
            } => Some(json!({
                "status": status,
                "error": error,
                "error_description": description,
            })),
            OAuthError::Http(e) => Some(Value::String(e.to_string())),
            _ => None,
        };
        let error = match err {
            OAuthError::Provider { .. } => "Token request was rejected by the provider".to_string(),
            OAuthError::Http(_) => "Token endpoint unreachable".to_string(),
            other => other.to_string(),
        };
        Self { error, details }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_code_exchange() {
        let req = TokenRequest::from_value(json!({
            "code": "4/abc",
            "redirectUri": "https://app.example.com/oauth/callback"
        }))
        .unwrap();
        assert_eq!(
            req,
            TokenRequest::AuthorizationCode {
                code: "4/abc".into(),
                redirect_uri: "https://app.example.com/oauth/callback".into(),
            }
        );
    }

    #[test]
    fn parses_refresh() {
        let req = TokenRequest::from_value(json!({ "refreshToken": "1//r" })).unwrap();
        assert_eq!(req, TokenRequest::Refresh { refresh_token: "1//r".into() });
    }

    #[test]
    fn code_without_redirect_is_invalid() {
        let err = TokenRequest::from_value(json!({ "code": "4/abc" })).unwrap_err();
        assert!(matches!(err, OAuthError::InvalidRequest));
    }

    #[test]
    fn empty_body_is_invalid() {
        assert!(TokenRequest::from_value(json!({})).is_err());
    }

    #[test]
    fn provider_error_envelope_carries_details() {
        let err = OAuthError::Provider {
            status: 400,
            error: "invalid_grant".into(),
            description: Some("Bad Request".into()),
        };
        let envelope = TokenError::from(&err);
        assert_eq!(envelope.error, "Token request was rejected by the provider");
        let details = envelope.details.unwrap();
        assert_eq!(details["error"], "invalid_grant");
        assert_eq!(details["error_description"], "Bad Request");
    }

    #[test]
    fn configuration_error_has_no_details() {
        let envelope = TokenError::from(&OAuthError::NotConfigured);
        assert_eq!(envelope.error, "OAuth client is not configured");
        let value = serde_json::to_value(&envelope).unwrap();
        assert!(value.get("details").is_none());
    }
}

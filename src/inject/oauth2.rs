use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::AuthConfig;
use crate::error::InjectError;

const OAUTH2_TYPE: &str = "OAuth2";
const GRANT_PASSWORD: &str = "Password";
const GRANT_CLIENT_CREDENTIALS: &str = "Client Credentials";
const TOKEN_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of bearer tokens for `{{$auth.token(..)}}` placeholders.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns a usable access token for `auth`.
    ///
    /// # Errors
    ///
    /// Returns an error when the credentials are unsupported or incomplete, or
    /// when the token endpoint does not return a token.
    async fn fetch_token(&self, auth: &AuthConfig) -> Result<String, InjectError>;
}

/// Token endpoint response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: String,
}

/// Fetches tokens from OAuth2 token endpoints with form-encoded POSTs.
#[derive(Debug, Clone)]
pub struct OAuth2TokenProvider {
    client: reqwest::Client,
}

impl OAuth2TokenProvider {
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new() -> Result<Self, InjectError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("jetter/", env!("CARGO_PKG_VERSION")))
            .timeout(TOKEN_REQUEST_TIMEOUT)
            .build()
            .map_err(|err| InjectError::BuildClient { source: err })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TokenProvider for OAuth2TokenProvider {
    async fn fetch_token(&self, auth: &AuthConfig) -> Result<String, InjectError> {
        if auth.auth_type != OAUTH2_TYPE {
            return Err(InjectError::UnsupportedAuthType {
                auth_type: auth.auth_type.clone(),
            });
        }
        let form = token_form(auth)?;

        let response = self
            .client
            .post(&auth.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|err| InjectError::TokenRequest { source: err })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| InjectError::TokenRequest { source: err })?;
        if status != reqwest::StatusCode::OK {
            return Err(InjectError::TokenStatus {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|err| InjectError::TokenParse { source: err })?;
        tracing::debug!(
            "Fetched {} token from {} (expires in {}s)",
            token.token_type,
            auth.token_url,
            token.expires_in
        );
        Ok(token.access_token)
    }
}

/// Form fields for the token request of `auth`'s grant type.
///
/// # Errors
///
/// Returns an error for unsupported grant types or missing credentials.
pub(crate) fn token_form(auth: &AuthConfig) -> Result<Vec<(&'static str, &str)>, InjectError> {
    let mut form = match auth.grant_type.as_str() {
        GRANT_PASSWORD => {
            require(&auth.username, "Username", auth)?;
            require(&auth.password, "Password", auth)?;
            let mut form = vec![
                ("grant_type", "password"),
                ("username", auth.username.as_str()),
                ("password", auth.password.as_str()),
                ("client_id", auth.client_id.as_str()),
            ];
            if !auth.client_secret.is_empty() {
                form.push(("client_secret", auth.client_secret.as_str()));
            }
            form
        }
        GRANT_CLIENT_CREDENTIALS => {
            require(&auth.client_secret, "Client Secret", auth)?;
            vec![
                ("grant_type", "client_credentials"),
                ("client_id", auth.client_id.as_str()),
                ("client_secret", auth.client_secret.as_str()),
            ]
        }
        other => {
            return Err(InjectError::UnsupportedGrantType {
                grant_type: other.to_owned(),
            });
        }
    };
    if !auth.scope.is_empty() {
        form.push(("scope", auth.scope.as_str()));
    }
    Ok(form)
}

fn require(value: &str, field: &'static str, auth: &AuthConfig) -> Result<(), InjectError> {
    if value.is_empty() {
        return Err(InjectError::MissingCredential {
            field,
            grant_type: auth.grant_type.clone(),
        });
    }
    Ok(())
}

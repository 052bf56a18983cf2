use std::collections::BTreeMap;

use serde::Deserialize;

/// A named set of variables and credentials selected from an environment file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub variables: BTreeMap<String, String>,
    pub security: Security,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Security {
    #[serde(rename = "Auth", default)]
    pub auth: BTreeMap<String, AuthConfig>,
}

/// OAuth2 credential set referenced from scenarios via `{{$auth.token("<id>")}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    #[serde(rename = "Type")]
    pub auth_type: String,
    #[serde(rename = "Token Url", alias = "Token URL")]
    pub token_url: String,
    #[serde(rename = "Grant Type")]
    pub grant_type: String,
    #[serde(rename = "Client ID", alias = "Client Id")]
    pub client_id: String,
    #[serde(rename = "Client Secret")]
    pub client_secret: String,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "Scope")]
    pub scope: String,
}

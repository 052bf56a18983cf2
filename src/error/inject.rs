use thiserror::Error;

#[derive(Debug, Error)]
pub enum InjectError {
    #[error("failed to find auth for authId={auth_id}")]
    AuthNotFound { auth_id: String },
    #[error("malformed auth placeholder in header: {value}")]
    MalformedAuthPlaceholder { value: String },
    #[error("unsupported auth type: {auth_type}")]
    UnsupportedAuthType { auth_type: String },
    #[error("unsupported grant type: {grant_type}")]
    UnsupportedGrantType { grant_type: String },
    #[error("missing '{field}' for grant type '{grant_type}'")]
    MissingCredential {
        field: &'static str,
        grant_type: String,
    },
    #[error("failed to get token for authId={auth_id}: {source}")]
    Token {
        auth_id: String,
        #[source]
        source: Box<InjectError>,
    },
    #[error("token request failed: {source}")]
    TokenRequest {
        #[source]
        source: reqwest::Error,
    },
    #[error("token request failed: {status} {body}")]
    TokenStatus { status: u16, body: String },
    #[error("failed to parse token response: {source}")]
    TokenParse {
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to build token client: {source}")]
    BuildClient {
        #[source]
        source: reqwest::Error,
    },
}

// =============================================================================
// GOOGLE AUTHENTICATION
// =============================================================================
//
// The Drive and Sheets clients never sign anyone in. They are handed an
// `AuthSession` that yields bearer tokens, acquired in one of two ways:
//
// 1. **Service account** (headless use):
//    - Create a service account in Google Cloud Console and a JSON key for it
//    - Enable the Drive API and the Sheets API for the project
//    - Share the chat folder with the service account email
//    - Optionally set `GOOGLE_IMPERSONATE_USER` to act as a Workspace user
//      (requires domain-wide delegation)
//
// 2. **Pre-acquired token**: an external consent flow (e.g. a mobile sign-in)
//    obtained an access token and passes it in through `GOOGLE_ACCESS_TOKEN`.
//
// **Environment Variables:**
// - `GOOGLE_ACCESS_TOKEN` - Bearer token from an external consent flow
// - `GOOGLE_SERVICE_ACCOUNT_KEY` - Path to service account JSON file
// - `GOOGLE_SERVICE_ACCOUNT_JSON` - Service account JSON content (alternative)
// - `GOOGLE_IMPERSONATE_USER` - Optional delegated subject

use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::core::remote::RemoteError;

pub const DRIVE_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/drive.readonly";
pub const SHEETS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Refresh the cached token once fewer than this many seconds remain.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to read service account key: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid service account key: {0}")]
    Credentials(#[from] serde_json::Error),

    #[error("Failed to sign token request: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("Token request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Token exchange failed ({status}): {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("System clock error: {0}")]
    Clock(#[from] std::time::SystemTimeError),

    #[error("{0}")]
    NotConfigured(String),
}

impl From<AuthError> for RemoteError {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        match err {
            AuthError::Http(_) => RemoteError::Transport(message),
            AuthError::Rejected { status, .. } if status.is_server_error() => {
                RemoteError::Transport(message)
            }
            _ => RemoteError::AuthRequired(message),
        }
    }
}

// =============================================================================
// SESSION CAPABILITY
// =============================================================================

/// Source of bearer tokens for Google API calls.
#[async_trait]
pub trait AuthSession: Send + Sync {
    async fn access_token(&self) -> Result<String, AuthError>;
}

/// A token obtained elsewhere. It is never refreshed; when it expires the API
/// answers 401 and callers route the user back through consent.
pub struct StaticTokenSession {
    token: String,
}

impl StaticTokenSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AuthSession for StaticTokenSession {
    async fn access_token(&self) -> Result<String, AuthError> {
        Ok(self.token.clone())
    }
}

/// Picks the session configured in the environment: a pre-acquired token
/// wins over service account credentials.
pub async fn session_from_env() -> Result<Arc<dyn AuthSession>, AuthError> {
    if let Ok(token) = std::env::var("GOOGLE_ACCESS_TOKEN") {
        if !token.trim().is_empty() {
            tracing::info!("Using pre-acquired Google access token");
            return Ok(Arc::new(StaticTokenSession::new(token.trim())));
        }
    }

    let mut auth = ServiceAccountAuth::from_env().await?;
    if let Ok(subject) = std::env::var("GOOGLE_IMPERSONATE_USER") {
        if !subject.trim().is_empty() {
            auth = auth.with_subject(subject.trim());
        }
    }
    tracing::info!("Using service account {}", auth.credentials.client_email);
    Ok(Arc::new(auth))
}

// =============================================================================
// SERVICE ACCOUNT AUTHENTICATION
// =============================================================================

/// Service account credentials from the JSON key file.
#[derive(Debug, Clone, Deserialize)]
struct ServiceAccountCredentials {
    /// The service account email (used as issuer in JWT).
    client_email: String,

    /// The private key in PEM format.
    private_key: String,

    /// Where to exchange the signed JWT for an access token.
    #[serde(default = "default_token_uri")]
    token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// JWT claims for Google OAuth2.
#[derive(Debug, Serialize)]
struct JwtClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: u64,
    exp: u64,
    /// Impersonated user for domain-wide delegation.
    #[serde(skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
}

/// Response from Google's token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// Cached access token with expiration.
struct CachedToken {
    token: String,
    expires_at: SystemTime,
}

/// Authenticator that handles OAuth2 with service account credentials.
pub struct ServiceAccountAuth {
    credentials: ServiceAccountCredentials,
    subject: Option<String>,
    scopes: Vec<&'static str>,
    client: Client,
    cached_token: Arc<RwLock<Option<CachedToken>>>,
}

impl ServiceAccountAuth {
    /// Creates a new authenticator from a JSON key file path.
    pub async fn from_file(path: &str) -> Result<Self, AuthError> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_json(&content)
    }

    /// Creates a new authenticator from JSON content.
    pub fn from_json(json: &str) -> Result<Self, AuthError> {
        let credentials: ServiceAccountCredentials = serde_json::from_str(json)?;
        Ok(Self {
            credentials,
            subject: None,
            scopes: vec![DRIVE_READONLY_SCOPE, SHEETS_READONLY_SCOPE],
            client: Client::new(),
            cached_token: Arc::new(RwLock::new(None)),
        })
    }

    /// Creates from environment variables.
    pub async fn from_env() -> Result<Self, AuthError> {
        if let Ok(path) = std::env::var("GOOGLE_SERVICE_ACCOUNT_KEY") {
            return Self::from_file(&path).await;
        }

        if let Ok(json) = std::env::var("GOOGLE_SERVICE_ACCOUNT_JSON") {
            return Self::from_json(&json);
        }

        Err(AuthError::NotConfigured(
            "Set GOOGLE_ACCESS_TOKEN, GOOGLE_SERVICE_ACCOUNT_KEY or GOOGLE_SERVICE_ACCOUNT_JSON."
                .to_string(),
        ))
    }

    /// Acts on behalf of `subject` (domain-wide delegation).
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    fn claims(&self, now: u64) -> JwtClaims {
        JwtClaims {
            iss: self.credentials.client_email.clone(),
            scope: self.scopes.join(" "),
            aud: self.credentials.token_uri.clone(),
            iat: now,
            exp: now + 3600,
            sub: self.subject.clone(),
        }
    }

    /// Gets a valid access token, refreshing if necessary.
    pub async fn get_access_token(&self) -> Result<String, AuthError> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if token.expires_at > SystemTime::now() + TOKEN_REFRESH_MARGIN {
                    return Ok(token.token.clone());
                }
            }
        }

        let fresh = self.fetch_new_token().await?;
        let token = fresh.access_token.clone();

        {
            let mut cached = self.cached_token.write().await;
            *cached = Some(CachedToken {
                token: fresh.access_token,
                expires_at: SystemTime::now() + Duration::from_secs(fresh.expires_in),
            });
        }

        Ok(token)
    }

    /// Fetches a new access token from Google.
    async fn fetch_new_token(&self) -> Result<TokenResponse, AuthError> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

        let header = Header::new(Algorithm::RS256);
        let key = EncodingKey::from_rsa_pem(self.credentials.private_key.as_bytes())?;
        let jwt = encode(&header, &self.claims(now), &key)?;

        tracing::debug!("Requesting access token for {}", self.credentials.client_email);

        let response = self
            .client
            .post(&self.credentials.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", jwt.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            return Err(AuthError::Rejected { status, body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl AuthSession for ServiceAccountAuth {
    async fn access_token(&self) -> Result<String, AuthError> {
        self.get_access_token().await
    }
}

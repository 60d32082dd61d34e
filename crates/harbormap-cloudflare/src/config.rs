//! Integration configuration
//!
//! Credentials come in two alternative forms: an API token, or the
//! legacy email + global API key pair. The token wins when both are
//! set. Startup fails before any vendor call if neither form is fully
//! present.

use crate::error::{CloudflareError, Result};

/// Cloudflare integration settings
#[derive(Debug, Clone)]
pub struct CloudflareConfig {
    pub api_token: Option<String>,
    pub email: Option<String>,
    pub api_key: Option<String>,
    /// Account id used for all account-scoped calls
    pub account_id: String,
}

/// A resolved credential form
#[derive(Debug, Clone)]
pub enum Credentials {
    /// `Authorization: Bearer <token>`
    Token(String),
    /// `X-Auth-Email` / `X-Auth-Key` header pair
    GlobalKey { email: String, api_key: String },
}

impl CloudflareConfig {
    /// Read the configuration from environment variables: `CF_API_TOKEN`
    /// or `CF_EMAIL` + `CF_API_KEY`, and the required `CF_ACCOUNT_ID`.
    pub fn from_env() -> Result<Self> {
        let account_id = std::env::var("CF_ACCOUNT_ID")
            .map_err(|_| CloudflareError::MissingEnvVar("CF_ACCOUNT_ID".to_string()))?;

        Ok(Self {
            api_token: std::env::var("CF_API_TOKEN").ok(),
            email: std::env::var("CF_EMAIL").ok(),
            api_key: std::env::var("CF_API_KEY").ok(),
            account_id,
        })
    }

    /// Resolve the credential form, token first.
    ///
    /// Returns [`CloudflareError::MissingCredentials`] when neither the
    /// token nor the complete email/key pair is present.
    pub fn credentials(&self) -> Result<Credentials> {
        if let Some(token) = &self.api_token {
            return Ok(Credentials::Token(token.clone()));
        }
        match (&self.email, &self.api_key) {
            (Some(email), Some(api_key)) => Ok(Credentials::GlobalKey {
                email: email.clone(),
                api_key: api_key.clone(),
            }),
            _ => Err(CloudflareError::MissingCredentials),
        }
    }
}

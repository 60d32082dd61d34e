//! Cloudflare API client
//!
//! Thin client over the Cloudflare v4 REST API. Every call goes through
//! the standard response envelope (`success` / `errors` / `result` /
//! `result_info`); listing endpoints are paginated with `page` /
//! `per_page` and report whether more pages remain.
//!
//! The [`CloudflareApi`] trait is the seam between the integration logic
//! and the wire: the resync handlers only see the trait, so tests swap
//! in a recording mock instead of a live client.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use harbormap_core::RawRecord;

use crate::config::{CloudflareConfig, Credentials};
use crate::error::{CloudflareError, Result};

const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";

// Cloudflare caps per_page at 50 on the zones listing; use that
// everywhere for uniform paging.
const PER_PAGE: u32 = 50;

/// One page of a listing endpoint
#[derive(Debug, Clone)]
pub struct Page {
    pub records: Vec<RawRecord>,
    /// Whether another page follows this one
    pub has_more: bool,
}

/// The Cloudflare API surface the integration consumes
#[async_trait]
pub trait CloudflareApi: Send + Sync {
    /// Fetch the configured account
    async fn get_account(&self, account_id: &str) -> Result<RawRecord>;

    /// List zones under the account, one page at a time (1-based)
    async fn list_zones(&self, account_id: &str, page: u32) -> Result<Page>;

    /// List DNS records under a zone
    async fn list_dns_records(&self, zone_id: &str, page: u32) -> Result<Page>;

    /// List Zero Trust tunnels under the account
    async fn list_tunnels(&self, account_id: &str, page: u32) -> Result<Page>;

    /// List Zero Trust access applications under the account
    async fn list_access_applications(&self, account_id: &str, page: u32) -> Result<Page>;

    /// Fetch a single tunnel by id
    async fn get_tunnel(&self, account_id: &str, tunnel_id: &str) -> Result<RawRecord>;

    /// Fetch a tunnel's configuration.
    ///
    /// Returns [`CloudflareError::NotFound`] when the tunnel has no
    /// configuration.
    async fn get_tunnel_configuration(
        &self,
        account_id: &str,
        tunnel_id: &str,
    ) -> Result<RawRecord>;
}

/// reqwest-backed client for the live API
pub struct CloudflareClient {
    client: reqwest::Client,
    credentials: Credentials,
}

impl CloudflareClient {
    pub fn new(config: &CloudflareConfig) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            credentials: config.credentials()?,
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Credentials::Token(token) => request.bearer_auth(token),
            Credentials::GlobalKey { email, api_key } => request
                .header("X-Auth-Email", email)
                .header("X-Auth-Key", api_key),
        }
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<ApiResponse<T>> {
        let url = format!("{CF_API_BASE}{path}");
        tracing::debug!("GET {url}");

        let response = self.authorize(self.client.get(&url)).send().await?;

        let status = response.status();
        tracing::debug!("Response status: {status}");

        if status == StatusCode::NOT_FOUND {
            return Err(CloudflareError::NotFound(path.to_string()));
        }

        let response_text = response.text().await?;
        let api_response: ApiResponse<T> =
            serde_json::from_str(&response_text).inspect_err(|e| {
                tracing::error!("Failed to parse Cloudflare response: {e}");
                tracing::debug!("Raw response body: {response_text}");
            })?;

        if !api_response.success {
            let (code, message) = api_response
                .errors
                .first()
                .map(|e| (e.code, e.message.clone()))
                .unwrap_or((0, "Unknown error".to_string()));
            tracing::error!("Cloudflare API error {code}: {message}");
            return Err(CloudflareError::Api { code, message });
        }

        Ok(api_response)
    }

    /// GET a single object
    async fn get_one(&self, path: &str) -> Result<RawRecord> {
        let response: ApiResponse<RawRecord> = self.get(path).await?;
        response
            .result
            .ok_or_else(|| CloudflareError::NotFound(path.to_string()))
    }

    /// GET one page of a listing; `path` may already carry query params
    async fn get_page(&self, path: &str, page: u32) -> Result<Page> {
        let separator = if path.contains('?') { '&' } else { '?' };
        let url = format!("{path}{separator}page={page}&per_page={PER_PAGE}");

        let response: ApiResponse<Vec<RawRecord>> = self.get(&url).await?;

        let has_more = response
            .result_info
            .map(|info| info.page < info.total_pages)
            .unwrap_or(false);

        Ok(Page {
            records: response.result.unwrap_or_default(),
            has_more,
        })
    }
}

#[async_trait]
impl CloudflareApi for CloudflareClient {
    async fn get_account(&self, account_id: &str) -> Result<RawRecord> {
        self.get_one(&format!("/accounts/{account_id}")).await
    }

    async fn list_zones(&self, account_id: &str, page: u32) -> Result<Page> {
        self.get_page(&format!("/zones?account.id={account_id}"), page)
            .await
    }

    async fn list_dns_records(&self, zone_id: &str, page: u32) -> Result<Page> {
        self.get_page(&format!("/zones/{zone_id}/dns_records"), page)
            .await
    }

    async fn list_tunnels(&self, account_id: &str, page: u32) -> Result<Page> {
        self.get_page(&format!("/accounts/{account_id}/cfd_tunnel?is_deleted=false"), page)
            .await
    }

    async fn list_access_applications(&self, account_id: &str, page: u32) -> Result<Page> {
        self.get_page(&format!("/accounts/{account_id}/access/apps"), page)
            .await
    }

    async fn get_tunnel(&self, account_id: &str, tunnel_id: &str) -> Result<RawRecord> {
        self.get_one(&format!("/accounts/{account_id}/cfd_tunnel/{tunnel_id}"))
            .await
    }

    async fn get_tunnel_configuration(
        &self,
        account_id: &str,
        tunnel_id: &str,
    ) -> Result<RawRecord> {
        self.get_one(&format!(
            "/accounts/{account_id}/cfd_tunnel/{tunnel_id}/configurations"
        ))
        .await
    }
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    result: Option<T>,
    #[serde(default)]
    errors: Vec<ApiError>,
    result_info: Option<ResultInfo>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResultInfo {
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default = "default_page")]
    total_pages: u32,
}

fn default_page() -> u32 {
    1
}

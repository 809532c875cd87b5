//! REST client for the Tenantry backend
//!
//! Implements the core store traits over HTTP so CLI commands drive the same
//! page controllers as the browser console.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use tenantry_core::store::{DocumentStore, FileStorage};
use tenantry_core::types::{
    AdminUser, BillingPlan, FilePayload, GlobalSettings, Invoice, TenantProfile,
};
use tenantry_core::{ConsoleConfig, Error, Result};

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

/// HTTP document store and file storage
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: Client,
    base: String,
    storage_base: String,
    token: Option<String>,
}

impl RemoteStore {
    pub fn new(config: &ConsoleConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .user_agent(format!("tenantry-cli/{}", tenantry_core::VERSION))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base: config.api.base_url.trim_end_matches('/').to_string(),
            storage_base: config.api.storage_base(),
            token: config.api.token.clone(),
        })
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base, endpoint);
        debug!(method = %method, url = %url, "Store request");

        let mut builder = self.request(method, &url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Store(format!("network error: {}", e)))?;
        check_status(response, Error::Store).await
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let response = self.send::<()>(Method::GET, endpoint, None).await?;
        parse(response, Error::Store).await
    }

    async fn get_optional<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Option<T>> {
        match self.get(endpoint).await {
            Ok(value) => Ok(Some(value)),
            Err(Error::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, endpoint: &str, body: &B) -> Result<T> {
        let response = self.send(Method::POST, endpoint, Some(body)).await?;
        parse(response, Error::Store).await
    }

    async fn put<T: DeserializeOwned, B: Serialize>(&self, endpoint: &str, body: &B) -> Result<T> {
        let response = self.send(Method::PUT, endpoint, Some(body)).await?;
        parse(response, Error::Store).await
    }

    async fn delete(&self, endpoint: &str) -> Result<()> {
        self.send::<()>(Method::DELETE, endpoint, None)
            .await
            .map(|_| ())
    }
}

async fn check_status(response: Response, fallback: fn(String) -> Error) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    Err(status_error(status.as_u16(), text, fallback))
}

async fn parse<T: DeserializeOwned>(response: Response, wrap: fn(String) -> Error) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| wrap(format!("invalid response: {}", e)))
}

fn status_error(status: u16, text: String, fallback: fn(String) -> Error) -> Error {
    let message = if text.trim().is_empty() {
        format!("Request failed with status {}", status)
    } else {
        text
    };
    match status {
        401 | 403 => Error::Forbidden(message),
        404 => Error::NotFound(message),
        _ => fallback(message),
    }
}

fn tenant_query(tenant_id: Option<&str>) -> String {
    match tenant_id {
        Some(id) => format!("?tenantId={}", urlencoding::encode(id)),
        None => String::new(),
    }
}

fn id_path(collection: &str, id: &str) -> String {
    format!("/{}/{}", collection, urlencoding::encode(id))
}

#[async_trait(?Send)]
impl DocumentStore for RemoteStore {
    async fn current_user(&self) -> Result<AdminUser> {
        self.get("/session").await
    }

    async fn get_tenant(&self, id: &str) -> Result<Option<TenantProfile>> {
        self.get_optional(&id_path("tenants", id)).await
    }

    async fn list_tenants(&self) -> Result<Vec<TenantProfile>> {
        self.get("/tenants").await
    }

    async fn update_tenant(&self, tenant: &TenantProfile) -> Result<TenantProfile> {
        self.put(&id_path("tenants", &tenant.id), tenant).await
    }

    async fn get_global_settings(&self) -> Result<GlobalSettings> {
        self.get("/settings/global").await
    }

    async fn update_global_settings(&self, settings: &GlobalSettings) -> Result<GlobalSettings> {
        self.put("/settings/global", settings).await
    }

    async fn list_users(&self, tenant_id: Option<&str>) -> Result<Vec<AdminUser>> {
        self.get(&format!("/users{}", tenant_query(tenant_id))).await
    }

    async fn get_user(&self, id: &str) -> Result<Option<AdminUser>> {
        self.get_optional(&id_path("users", id)).await
    }

    async fn create_user(&self, user: &AdminUser) -> Result<AdminUser> {
        self.post("/users", user).await
    }

    async fn update_user(&self, user: &AdminUser) -> Result<AdminUser> {
        self.put(&id_path("users", &user.id), user).await
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        self.delete(&id_path("users", id)).await
    }

    async fn list_plans(&self) -> Result<Vec<BillingPlan>> {
        self.get("/plans").await
    }

    async fn create_plan(&self, plan: &BillingPlan) -> Result<BillingPlan> {
        self.post("/plans", plan).await
    }

    async fn update_plan(&self, plan: &BillingPlan) -> Result<BillingPlan> {
        self.put(&id_path("plans", &plan.id), plan).await
    }

    async fn delete_plan(&self, id: &str) -> Result<()> {
        self.delete(&id_path("plans", id)).await
    }

    async fn list_invoices(&self, tenant_id: Option<&str>) -> Result<Vec<Invoice>> {
        self.get(&format!("/invoices{}", tenant_query(tenant_id))).await
    }
}

#[async_trait(?Send)]
impl FileStorage for RemoteStore {
    async fn upload(&self, path: &str, file: &FilePayload) -> Result<String> {
        let url = format!("{}/{}", self.storage_base, path.trim_start_matches('/'));
        debug!(url = %url, size = file.size(), "Uploading file");

        let response = self
            .request(Method::PUT, &url)
            .header(reqwest::header::CONTENT_TYPE, &file.mime_type)
            .body(file.bytes.clone())
            .send()
            .await
            .map_err(|e| Error::Upload(format!("network error: {}", e)))?;
        let response = check_status(response, Error::Upload).await?;

        let body: UploadResponse = parse(response, Error::Upload).await?;
        Ok(body.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_mapping() {
        assert_eq!(status_error(401, String::new(), Error::Store).code(), "Forbidden");
        assert_eq!(status_error(404, "gone".into(), Error::Store).code(), "NotFound");
        assert_eq!(status_error(500, String::new(), Error::Upload).code(), "UploadFailure");

        let err = status_error(502, "  ".into(), Error::Store);
        assert_eq!(err.to_string(), "Store request failed: Request failed with status 502");
    }

    #[test]
    fn test_paths() {
        assert_eq!(tenant_query(None), "");
        assert_eq!(tenant_query(Some("acme co")), "?tenantId=acme%20co");
        assert_eq!(id_path("tenants", "a/b"), "/tenants/a%2Fb");
    }

    #[test]
    fn test_new_normalizes_endpoints() {
        let mut config = ConsoleConfig::default();
        config.api.base_url = "https://console.example.com/api/v1/".into();
        let store = RemoteStore::new(&config).unwrap();
        assert_eq!(store.base, "https://console.example.com/api/v1");
        assert_eq!(store.storage_base, "https://console.example.com/api/v1/files");
    }
}

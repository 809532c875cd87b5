//! API client implementation
//!
//! Makes HTTP requests to the Tenantry REST backend and the file storage
//! service, and exposes them through the core store traits.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use web_sys::window;

use tenantry_core::store::{DocumentStore, FileStorage};
use tenantry_core::types::{
    AdminUser, BillingPlan, FilePayload, GlobalSettings, Invoice, TenantProfile,
};
use tenantry_core::{ConsoleConfig, Error, Result};

const API_URL_KEY: &str = "tenantry_api_url";
const STORAGE_URL_KEY: &str = "tenantry_storage_url";
const TOKEN_KEY: &str = "tenantry_api_token";

fn local_item(key: &str) -> Option<String> {
    window()?
        .local_storage()
        .ok()??
        .get_item(key)
        .ok()?
        .filter(|v| !v.is_empty())
}

/// Base URL for the REST API
pub fn api_base() -> String {
    // Check localStorage for custom API URL, default to relative path
    local_item(API_URL_KEY).unwrap_or_else(|| tenantry_core::DEFAULT_API_BASE.to_string())
}

pub fn save_token(token: &str) {
    if let Some(storage) = window().and_then(|w| w.local_storage().ok()).flatten() {
        let _ = storage.set_item(TOKEN_KEY, token);
    }
}

/// Point the console at another backend. An empty value restores the default.
pub fn save_api_url(url: &str) {
    if let Some(storage) = window().and_then(|w| w.local_storage().ok()).flatten() {
        let url = url.trim();
        let _ = if url.is_empty() {
            storage.remove_item(API_URL_KEY)
        } else {
            storage.set_item(API_URL_KEY, url)
        };
    }
}

pub fn clear_token() {
    if let Some(storage) = window().and_then(|w| w.local_storage().ok()).flatten() {
        let _ = storage.remove_item(TOKEN_KEY);
    }
}

enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

/// REST client for the document store and file storage.
#[derive(Debug, Clone)]
pub struct HttpStore {
    base: String,
    storage_base: String,
    token: Option<String>,
}

impl HttpStore {
    pub fn new(base: impl Into<String>, storage_base: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            storage_base: storage_base.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Endpoints and token as saved in localStorage.
    pub fn from_local_storage() -> Self {
        let base = api_base();
        let storage = local_item(STORAGE_URL_KEY)
            .unwrap_or_else(|| format!("{}/files", base.trim_end_matches('/')));
        Self::new(base, storage, local_item(TOKEN_KEY))
    }

    /// Console configuration matching this client's endpoints.
    pub fn console_config(&self) -> ConsoleConfig {
        let mut config = ConsoleConfig::default();
        config.api.base_url = self.base.clone();
        config.api.storage_url = Some(self.storage_base.clone());
        config.api.token = self.token.clone();
        config
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = match method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
            Method::Delete => Request::delete(url),
        };
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn send(&self, method: Method, endpoint: &str, body: Option<String>) -> Result<Response> {
        let url = format!("{}{}", self.base, endpoint);
        let builder = self.request(method, &url);

        let response = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(body)
                .map_err(|e| Error::Store(e.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| Error::Store(format!("network error: {}", e)))?;

        if !response.ok() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, text, Error::Store));
        }
        Ok(response)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let response = self.send(Method::Get, endpoint, None).await?;
        parse(response).await
    }

    async fn get_optional<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Option<T>> {
        match self.get(endpoint).await {
            Ok(value) => Ok(Some(value)),
            Err(Error::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, endpoint: &str, body: &B) -> Result<T> {
        let response = self
            .send(Method::Post, endpoint, Some(serde_json::to_string(body)?))
            .await?;
        parse(response).await
    }

    async fn put<T: DeserializeOwned, B: Serialize>(&self, endpoint: &str, body: &B) -> Result<T> {
        let response = self
            .send(Method::Put, endpoint, Some(serde_json::to_string(body)?))
            .await?;
        parse(response).await
    }

    async fn delete(&self, endpoint: &str) -> Result<()> {
        self.send(Method::Delete, endpoint, None).await.map(|_| ())
    }
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| Error::Store(format!("invalid response: {}", e)))
}

fn status_error(status: u16, text: String, fallback: fn(String) -> Error) -> Error {
    let message = if text.is_empty() {
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
impl DocumentStore for HttpStore {
    // ============= Session =============

    async fn current_user(&self) -> Result<AdminUser> {
        self.get("/session").await
    }

    // ============= Tenant Operations =============

    async fn get_tenant(&self, id: &str) -> Result<Option<TenantProfile>> {
        self.get_optional(&id_path("tenants", id)).await
    }

    async fn list_tenants(&self) -> Result<Vec<TenantProfile>> {
        self.get("/tenants").await
    }

    async fn update_tenant(&self, tenant: &TenantProfile) -> Result<TenantProfile> {
        self.put(&id_path("tenants", &tenant.id), tenant).await
    }

    // ============= Global Settings =============

    async fn get_global_settings(&self) -> Result<GlobalSettings> {
        self.get("/settings/global").await
    }

    async fn update_global_settings(&self, settings: &GlobalSettings) -> Result<GlobalSettings> {
        self.put("/settings/global", settings).await
    }

    // ============= User Operations =============

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

    // ============= Billing Operations =============

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
impl FileStorage for HttpStore {
    async fn upload(&self, path: &str, file: &FilePayload) -> Result<String> {
        let url = format!("{}/{}", self.storage_base, path.trim_start_matches('/'));

        let response = self
            .request(Method::Put, &url)
            .header("Content-Type", &file.mime_type)
            .body(file.bytes.clone())
            .map_err(|e| Error::Upload(e.to_string()))?
            .send()
            .await
            .map_err(|e| Error::Upload(format!("network error: {}", e)))?;

        if !response.ok() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, text, Error::Upload));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| Error::Upload(format!("invalid upload response: {}", e)))?;
        log::debug!("Uploaded {} ({} bytes)", path, file.size());
        Ok(body.url)
    }
}

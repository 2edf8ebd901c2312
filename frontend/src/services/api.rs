use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    Budget, ConfirmReceiptRequest, ConfirmReceiptResponse, CreateBudgetRequest, Expense,
    LoginRequest, ReceiptProcessResponse, RegisterRequest, UserProfile,
};
use thiserror::Error;
use web_sys::{File, FormData, RequestCredentials};

/// Errors surfaced by the API client.
///
/// Non-2xx responses become `Api` with the backend's `detail` string when
/// one is present; malformed success bodies become `Decode` instead of
/// propagating missing fields silently.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("{message}")]
    Api { status: u16, message: String },
}

/// Where an unauthenticated session check should send the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    Login,
}

/// Result of the "who am I" check. An invalid session is a routing
/// decision for the caller to act on, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Authorized,
    Redirect(RedirectTarget),
}

/// API client for the expense-tracking backend.
///
/// One attempt per call, no retries, no timeouts beyond the transport
/// default. Every request carries same-origin credentials (cookie session).
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a client against the default `/api` base path.
    pub fn new() -> Self {
        Self {
            base_url: "/api".to_string(),
        }
    }

    /// Create a client with a custom base URL.
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check whether the current cookie session is valid.
    pub async fn check_session(&self) -> SessionOutcome {
        let result = Request::get(&self.url("/auth/me"))
            .credentials(RequestCredentials::Include)
            .send()
            .await;

        match result {
            Ok(response) if response.ok() => SessionOutcome::Authorized,
            _ => SessionOutcome::Redirect(RedirectTarget::Login),
        }
    }

    /// Sign in; the response body is the signed-in user's profile.
    pub async fn login(&self, request: &LoginRequest) -> Result<UserProfile, ApiError> {
        self.post_json("/auth/login", request).await
    }

    /// Create an account. The caller follows up with a login call.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let response = self.send_json("/auth/register", request).await?;
        Self::expect_ok(response).await
    }

    /// Clear the server-side session.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = Request::post(&self.url("/auth/logout"))
            .credentials(RequestCredentials::Include)
            .send()
            .await;
        match result {
            Ok(response) => Self::expect_ok(response).await,
            Err(e) => Err(ApiError::Network(e.to_string())),
        }
    }

    /// Fetch the full expense list; filtering happens client-side.
    pub async fn get_expenses(&self) -> Result<Vec<Expense>, ApiError> {
        self.get_json("/expenses").await
    }

    /// Fetch budgets, optionally narrowed to one `YYYY-MM` month.
    /// Omitting the month means "all months" per the backend contract.
    pub async fn get_budgets(&self, month: Option<&str>) -> Result<Vec<Budget>, ApiError> {
        let path = match month {
            Some(m) => format!("/budgets?month={}", m),
            None => "/budgets".to_string(),
        };
        self.get_json(&path).await
    }

    pub async fn create_budget(&self, request: &CreateBudgetRequest) -> Result<Budget, ApiError> {
        self.post_json("/budgets", request).await
    }

    pub async fn delete_budget(&self, id: i64) -> Result<(), ApiError> {
        let result = Request::delete(&self.url(&format!("/budgets/{}", id)))
            .credentials(RequestCredentials::Include)
            .send()
            .await;
        match result {
            Ok(response) => Self::expect_ok(response).await,
            Err(e) => Err(ApiError::Network(e.to_string())),
        }
    }

    /// Upload a receipt image for extraction (multipart).
    pub async fn process_receipt(&self, file: &File) -> Result<ReceiptProcessResponse, ApiError> {
        let form = FormData::new()
            .map_err(|_| ApiError::Network("Failed to build upload form".to_string()))?;
        form.append_with_blob("file", file)
            .map_err(|_| ApiError::Network("Failed to attach file".to_string()))?;

        let request = Request::post(&self.url("/receipts/process"))
            .credentials(RequestCredentials::Include)
            .body(form)
            .map_err(|e| ApiError::Network(e.to_string()))?;

        match request.send().await {
            Ok(response) => Self::parse_body(response).await,
            Err(e) => Err(ApiError::Network(e.to_string())),
        }
    }

    /// Persist the reviewed draft rows for a processed receipt.
    pub async fn confirm_receipt(
        &self,
        request: &ConfirmReceiptRequest,
    ) -> Result<ConfirmReceiptResponse, ApiError> {
        self.post_json("/receipts/confirm", request).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let result = Request::get(&self.url(path))
            .credentials(RequestCredentials::Include)
            .send()
            .await;
        match result {
            Ok(response) => Self::parse_body(response).await,
            Err(e) => Err(ApiError::Network(e.to_string())),
        }
    }

    async fn send_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, ApiError> {
        let request = Request::post(&self.url(path))
            .credentials(RequestCredentials::Include)
            .json(body)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        request.send().await.map_err(|e| ApiError::Network(e.to_string()))
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send_json(path, body).await?;
        Self::parse_body(response).await
    }

    async fn parse_body<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if !response.ok() {
            return Err(Self::error_from(response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn expect_ok(response: Response) -> Result<(), ApiError> {
        if response.ok() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    /// Normalize a non-2xx response into an error message: the JSON body's
    /// `detail` field when present, else the raw text, else a generic
    /// `Request failed (<status>)`.
    async fn error_from(response: Response) -> ApiError {
        let status = response.status();

        let content_type = response
            .headers()
            .get("content-type")
            .unwrap_or_default();

        let message = if content_type.contains("application/json") {
            match response.json::<serde_json::Value>().await {
                Ok(body) => body
                    .get("detail")
                    .and_then(|d| d.as_str())
                    .map(|d| d.to_string()),
                Err(_) => None,
            }
        } else {
            response
                .text()
                .await
                .ok()
                .filter(|text| !text.trim().is_empty())
        };

        ApiError::Api {
            status,
            message: message.unwrap_or_else(|| format!("Request failed ({})", status)),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

//! Repository layer: HTTP access to the remote equipment API

pub mod equipment;
pub mod loans;
pub mod users;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::{
    config::ApiConfig,
    error::{AppError, AppResult, ErrorScope},
    models::{Equipment, LoanRequest, LoanResponse, LoginCredentials, Specification, User},
};

/// Operations the services need from the remote API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /equipo`
    async fn list_equipment(&self) -> AppResult<Vec<Equipment>>;

    /// `GET /equipo/{id}/especificaciones`
    async fn get_specifications(&self, equipment_id: i64) -> AppResult<Specification>;

    /// `POST /prestamos/solicitar`
    async fn request_loan(&self, request: &LoanRequest) -> AppResult<LoanResponse>;

    /// `GET /prestamos`
    async fn list_loans(&self) -> AppResult<Vec<LoanResponse>>;

    /// `GET /usuario/find/by/correo-and-password`
    async fn authenticate(&self, credentials: &LoginCredentials) -> AppResult<User>;

    /// `GET /usuario`
    async fn list_users(&self) -> AppResult<Vec<User>>;
}

/// Main repository struct holding the HTTP client
#[derive(Clone)]
pub struct Repository {
    client: Client,
    base_url: String,
}

impl Repository {
    /// Create a repository for the configured API
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request; a missing response becomes a connection error
    async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        request.send().await.map_err(|e| {
            tracing::warn!("Request failed without response: {}", e);
            AppError::from(e)
        })
    }

    /// Read the body, translating error statuses into their messages
    async fn read_body(&self, scope: ErrorScope, response: Response) -> AppResult<String> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!("Server answered {} for {:?} call", status, scope);
            return Err(AppError::from_response(scope, status.as_u16(), &body));
        }

        Ok(body)
    }

    async fn read_json<T: DeserializeOwned>(&self, scope: ErrorScope, response: Response) -> AppResult<T> {
        let body = self.read_body(scope, response).await?;
        serde_json::from_str(&body).map_err(|e| AppError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Backend for Repository {
    async fn list_equipment(&self) -> AppResult<Vec<Equipment>> {
        self.equipment_list().await
    }

    async fn get_specifications(&self, equipment_id: i64) -> AppResult<Specification> {
        self.equipment_specifications(equipment_id).await
    }

    async fn request_loan(&self, request: &LoanRequest) -> AppResult<LoanResponse> {
        self.loans_request(request).await
    }

    async fn list_loans(&self) -> AppResult<Vec<LoanResponse>> {
        self.loans_list().await
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> AppResult<User> {
        self.users_find_by_credentials(credentials).await
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users_list().await
    }
}

//! Loan (préstamo) endpoints

use super::Repository;
use crate::{
    error::{AppError, AppResult, ErrorScope},
    models::{LoanRequest, LoanResponse},
};

impl Repository {
    /// Ask the backend to lend an equipment, moving it to the requested status
    pub async fn loans_request(&self, request: &LoanRequest) -> AppResult<LoanResponse> {
        let url = self.url("/prestamos/solicitar");
        tracing::debug!(
            "POST {} (user {}, equipment {})",
            url,
            request.user_id,
            request.equipment_id
        );

        let response = self.send(self.client.post(&url).json(request)).await?;
        let body = self.read_body(ErrorScope::Equipment, response).await?;

        // Some deployments answer 201 with an empty body
        if body.trim().is_empty() {
            return Ok(LoanResponse::default());
        }
        serde_json::from_str(&body).map_err(|e| AppError::Decode(e.to_string()))
    }

    /// List all loan records
    pub async fn loans_list(&self) -> AppResult<Vec<LoanResponse>> {
        let url = self.url("/prestamos");
        tracing::debug!("GET {}", url);

        let response = self.send(self.client.get(&url)).await?;
        self.read_json(ErrorScope::Equipment, response).await
    }
}

//! User endpoints

use super::Repository;
use crate::{
    error::{AppResult, ErrorScope},
    models::{LoginCredentials, User},
};

impl Repository {
    /// Look up a user by email and password. The backend answers 404 when
    /// the pair does not match.
    pub async fn users_find_by_credentials(&self, credentials: &LoginCredentials) -> AppResult<User> {
        let url = self.url("/usuario/find/by/correo-and-password");
        tracing::debug!("GET {} (correo={})", url, credentials.email);

        let request = self.client.get(&url).query(&[
            ("correo", credentials.email.as_str()),
            ("password", credentials.password.as_str()),
        ]);
        let response = self.send(request).await?;
        self.read_json(ErrorScope::Users, response).await
    }

    /// List all users
    pub async fn users_list(&self) -> AppResult<Vec<User>> {
        let url = self.url("/usuario");
        tracing::debug!("GET {}", url);

        let response = self.send(self.client.get(&url)).await?;
        self.read_json(ErrorScope::Users, response).await
    }
}

//! Equipment endpoints

use super::Repository;
use crate::{
    error::{AppResult, ErrorScope},
    models::{Equipment, Specification},
};

impl Repository {
    /// List all equipment
    pub async fn equipment_list(&self) -> AppResult<Vec<Equipment>> {
        let url = self.url("/equipo");
        tracing::debug!("GET {}", url);

        let response = self.send(self.client.get(&url)).await?;
        self.read_json(ErrorScope::Equipment, response).await
    }

    /// Technical specifications of one equipment
    pub async fn equipment_specifications(&self, id: i64) -> AppResult<Specification> {
        let url = self.url(&format!("/equipo/{}/especificaciones", id));
        tracing::debug!("GET {}", url);

        let response = self.send(self.client.get(&url)).await?;
        self.read_json(ErrorScope::Equipment, response).await
    }
}

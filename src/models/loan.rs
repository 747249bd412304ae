//! Loan (préstamo) request and response types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /prestamos/solicitar`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRequest {
    #[serde(rename = "idUsuario")]
    pub user_id: i64,
    #[serde(rename = "idEquipo")]
    pub equipment_id: i64,
    /// Backend status token the equipment should move to
    #[serde(rename = "estadoEquipo")]
    pub equipment_status: String,
}

/// Loan record returned by the backend.
///
/// Only success or failure matters to the client, so every field is optional
/// and unknown fields are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanResponse {
    #[serde(rename = "idPrestamo", alias = "id", default)]
    pub id: Option<i64>,
    #[serde(rename = "idUsuario", default)]
    pub user_id: Option<i64>,
    #[serde(rename = "idEquipo", default)]
    pub equipment_id: Option<i64>,
    #[serde(rename = "estado", alias = "estadoEquipo", default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

//! Equipment model

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use super::status;

/// Equipment record as returned by `GET /equipo`.
///
/// Text fields sent as `null` read as empty strings.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(rename = "idEquipo")]
    pub id: i64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "nombre")]
    pub name: String,
    /// Free-text category
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "categoria", default)]
    pub category: String,
    /// Units available; `None` means unknown or unlimited
    #[serde(rename = "cantidad", default)]
    pub quantity: Option<i64>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "marca", default)]
    pub brand: String,
    /// Raw backend status token (see [`status`])
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "estado")]
    pub status: String,
}

impl Equipment {
    pub fn status_label(&self) -> String {
        status::label(&self.status)
    }

    pub fn status_style(&self) -> &'static str {
        status::style_tag(&self.status)
    }

    pub fn is_in_use(&self) -> bool {
        status::is_in_use(&self.status)
    }

    /// Quantity for display
    pub fn quantity_display(&self) -> String {
        match self.quantity {
            Some(q) => q.to_string(),
            None => "Limitado".to_string(),
        }
    }

    /// Copy of this record carrying a new status token
    pub fn with_status(&self, status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            ..self.clone()
        }
    }
}

//! Specification detail view

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Equipment, SpecRow, Specification},
    repository::Backend,
};

/// Detail panel for one selected equipment. The fetched specification lives
/// only while the panel is open.
pub struct SpecificationViewer {
    backend: Arc<dyn Backend>,
    selected: Option<Equipment>,
    specification: Option<Specification>,
    error: Option<String>,
}

impl SpecificationViewer {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            selected: None,
            specification: None,
            error: None,
        }
    }

    /// Select an equipment and fetch its specification
    pub async fn open(&mut self, equipment: Equipment) -> AppResult<&Specification> {
        let id = equipment.id;
        self.selected = Some(equipment);
        self.specification = None;
        self.error = None;

        match self.backend.get_specifications(id).await {
            Ok(spec) => {
                tracing::debug!("Specification for equipment {} is {:?}", id, spec.kind());
                Ok(&*self.specification.insert(spec))
            }
            Err(e) => {
                tracing::error!("Failed to load specifications for {}: {}", id, e);
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    pub fn close(&mut self) {
        self.selected = None;
        self.specification = None;
        self.error = None;
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected(&self) -> Option<&Equipment> {
        self.selected.as_ref()
    }

    pub fn specification(&self) -> Option<&Specification> {
        self.specification.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Summary fields shown above the specification rows
    pub fn header(&self) -> Vec<(&'static str, String)> {
        match &self.selected {
            Some(equipment) => vec![
                ("Categoría", equipment.category.clone()),
                ("Marca", equipment.brand.clone()),
                ("Estado", equipment.status_label()),
                ("Cantidad Disponible", equipment.quantity_display()),
            ],
            None => Vec::new(),
        }
    }

    pub fn rows(&self) -> Vec<SpecRow> {
        self.specification
            .as_ref()
            .map(Specification::rows)
            .unwrap_or_default()
    }
}

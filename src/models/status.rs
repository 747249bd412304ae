//! Equipment status taxonomy
//!
//! The backend sends free-text status tokens whose case and separators vary
//! ("EN USO", "en-uso", "EnUso"...). Every token is resolved against a small
//! table of descriptors; lookups never fail and always have a fallback.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use thiserror::Error;

/// Canonical token for available equipment
pub const AVAILABLE: &str = "DISPONIBLE";
/// Canonical token for equipment currently lent
pub const IN_USE: &str = "EN USO";
/// Style tag for statuses missing from the table
pub const UNKNOWN_STYLE: &str = "status-unknown";

/// One canonical status and the spellings accepted for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDescriptor {
    pub value: &'static str,
    pub label: &'static str,
    pub style: &'static str,
    pub variations: &'static [&'static str],
}

const BUILTIN: &[StatusDescriptor] = &[
    StatusDescriptor {
        value: AVAILABLE,
        label: "Disponible",
        style: "status-available",
        variations: &["disponible", "available"],
    },
    StatusDescriptor {
        value: IN_USE,
        label: "En uso",
        style: "status-in-use",
        variations: &["en-uso", "en uso", "enuso", "en_uso"],
    },
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TaxonomyError {
    #[error("status variation '{variation}' maps to both '{first}' and '{second}'")]
    DuplicateVariation {
        variation: String,
        first: &'static str,
        second: &'static str,
    },
}

/// Descriptor table plus the variation index built from it
#[derive(Debug, Clone)]
pub struct StatusTaxonomy {
    descriptors: Vec<StatusDescriptor>,
    variations: HashMap<String, usize>,
}

impl StatusTaxonomy {
    /// Build the lookup index. A variation claimed by two different
    /// canonical values is rejected.
    pub fn new(descriptors: Vec<StatusDescriptor>) -> Result<Self, TaxonomyError> {
        let mut variations: HashMap<String, usize> = HashMap::new();

        for (idx, descriptor) in descriptors.iter().enumerate() {
            for variation in descriptor.variations {
                let key = variation.trim().to_lowercase();
                match variations.get(&key) {
                    Some(&existing) if descriptors[existing].value != descriptor.value => {
                        return Err(TaxonomyError::DuplicateVariation {
                            variation: key,
                            first: descriptors[existing].value,
                            second: descriptor.value,
                        });
                    }
                    Some(_) => {}
                    None => {
                        variations.insert(key, idx);
                    }
                }
            }
        }

        Ok(Self { descriptors, variations })
    }

    pub fn descriptors(&self) -> &[StatusDescriptor] {
        &self.descriptors
    }

    /// Descriptor matching a raw backend status, if any
    pub fn descriptor(&self, raw: &str) -> Option<&StatusDescriptor> {
        self.variations
            .get(&raw.trim().to_lowercase())
            .map(|&idx| &self.descriptors[idx])
    }

    /// Canonical token for a raw status, or `None` if unrecognized
    pub fn normalize(&self, raw: &str) -> Option<&'static str> {
        self.descriptor(raw).map(|d| d.value)
    }

    /// Display label; unknown statuses get their first letter upper-cased
    pub fn label(&self, raw: &str) -> String {
        match self.descriptor(raw) {
            Some(d) => d.label.to_string(),
            None => capitalize(raw),
        }
    }

    pub fn style_tag(&self, raw: &str) -> &'static str {
        self.descriptor(raw).map(|d| d.style).unwrap_or(UNKNOWN_STYLE)
    }

    /// Value a status selector shows for a record
    pub fn select_value(&self, raw: &str) -> String {
        self.normalize(raw)
            .map(str::to_string)
            .unwrap_or_else(|| raw.to_lowercase())
    }
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

static TAXONOMY: Lazy<StatusTaxonomy> = Lazy::new(|| {
    StatusTaxonomy::new(BUILTIN.to_vec()).expect("built-in status table has conflicting variations")
});

/// Process-wide taxonomy built from the built-in table
pub fn taxonomy() -> &'static StatusTaxonomy {
    &TAXONOMY
}

pub fn normalize(raw: &str) -> Option<&'static str> {
    taxonomy().normalize(raw)
}

pub fn label(raw: &str) -> String {
    taxonomy().label(raw)
}

pub fn style_tag(raw: &str) -> &'static str {
    taxonomy().style_tag(raw)
}

pub fn select_value(raw: &str) -> String {
    taxonomy().select_value(raw)
}

pub fn is_in_use(raw: &str) -> bool {
    normalize(raw) == Some(IN_USE)
}

/// Convert a selector value to the token the backend expects.
///
/// Selector values are the canonical tokens, which the backend already
/// accepts, so this is the identity. A selector vocabulary that diverges from
/// the backend one has to be mapped here.
pub fn to_backend_token(ui_value: &str) -> String {
    ui_value.to_string()
}

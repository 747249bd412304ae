//! Technical specification shapes
//!
//! `GET /equipo/{id}/especificaciones` answers one of several DTOs without a
//! type tag. The shape is recovered from which keys are present, probing in
//! declaration order. Mechanical, electrical and electronic specs share the
//! same two fields and cannot be told apart.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

static DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-]{1,61}[a-zA-Z0-9]\.[a-zA-Z]{2,}$")
        .expect("domain pattern is valid")
});

/// Specification record, variants in probing priority order.
///
/// Values are kept as sent; a key that is present with `null` still selects
/// its shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Specification {
    /// Mechanical, electrical or electronic equipment
    ModelReference {
        #[serde(rename = "modelo")]
        model: Value,
        #[serde(rename = "referencia")]
        reference: Value,
    },
    Cnc {
        #[serde(rename = "areaDeTrabajo")]
        work_area: Value,
        #[serde(rename = "materialDeGrabado")]
        engraving_material: Value,
        /// mm/min
        #[serde(rename = "velocidadMaxCorte")]
        max_cut_speed: Value,
    },
    Printer3d {
        #[serde(rename = "volumenDeImpresion")]
        print_volume: Value,
        #[serde(rename = "materialDeImpresion")]
        print_material: Value,
        /// mm/s
        #[serde(rename = "velocidadMaxImpresion")]
        max_print_speed: Value,
    },
    Software {
        cpu: Value,
        gpu: Value,
        #[serde(rename = "ramGb")]
        ram_gb: Value,
    },
    /// Anything else; rendered as no rows
    Unrecognized(Value),
}

impl<'de> Deserialize<'de> for Specification {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Specification::from_value(Value::deserialize(deserializer)?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecificationKind {
    ModelReference,
    Cnc,
    Printer3d,
    Software,
    Unrecognized,
}

/// One labelled line of the specification panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRow {
    pub field: &'static str,
    pub value: String,
    /// The value should be offered as an external link
    pub is_link: bool,
}

impl SpecRow {
    fn text(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            is_link: false,
        }
    }
}

impl Specification {
    /// Pick the shape from the keys present, in fixed priority
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Specification::Unrecognized(value);
        };

        if fields.contains_key("modelo") && fields.contains_key("referencia") {
            Specification::ModelReference {
                model: take(&mut fields, "modelo"),
                reference: take(&mut fields, "referencia"),
            }
        } else if fields.contains_key("areaDeTrabajo") {
            Specification::Cnc {
                work_area: take(&mut fields, "areaDeTrabajo"),
                engraving_material: take(&mut fields, "materialDeGrabado"),
                max_cut_speed: take(&mut fields, "velocidadMaxCorte"),
            }
        } else if fields.contains_key("volumenDeImpresion") {
            Specification::Printer3d {
                print_volume: take(&mut fields, "volumenDeImpresion"),
                print_material: take(&mut fields, "materialDeImpresion"),
                max_print_speed: take(&mut fields, "velocidadMaxImpresion"),
            }
        } else if fields.contains_key("cpu") {
            Specification::Software {
                cpu: take(&mut fields, "cpu"),
                gpu: take(&mut fields, "gpu"),
                ram_gb: take(&mut fields, "ramGb"),
            }
        } else {
            Specification::Unrecognized(Value::Object(fields))
        }
    }

    pub fn kind(&self) -> SpecificationKind {
        match self {
            Specification::ModelReference { .. } => SpecificationKind::ModelReference,
            Specification::Cnc { .. } => SpecificationKind::Cnc,
            Specification::Printer3d { .. } => SpecificationKind::Printer3d,
            Specification::Software { .. } => SpecificationKind::Software,
            Specification::Unrecognized(_) => SpecificationKind::Unrecognized,
        }
    }

    /// Rows shown in the detail view
    pub fn rows(&self) -> Vec<SpecRow> {
        match self {
            Specification::ModelReference { model, reference } => {
                let reference = display(reference);
                vec![
                    SpecRow::text("Modelo", display(model)),
                    SpecRow {
                        field: "Referencia",
                        is_link: !reference.is_empty() && looks_like_link(&reference),
                        value: reference,
                    },
                ]
            }
            Specification::Cnc {
                work_area,
                engraving_material,
                max_cut_speed,
            } => vec![
                SpecRow::text("Área de Trabajo", display(work_area)),
                SpecRow::text("Material de Grabado", display(engraving_material)),
                SpecRow::text("Velocidad Máx. de Corte", with_unit(max_cut_speed, "mm/min")),
            ],
            Specification::Printer3d {
                print_volume,
                print_material,
                max_print_speed,
            } => vec![
                SpecRow::text("Volumen de Impresión", display(print_volume)),
                SpecRow::text("Material de Impresión", display(print_material)),
                SpecRow::text("Velocidad Máx. de Impresión", with_unit(max_print_speed, "mm/s")),
            ],
            Specification::Software { cpu, gpu, ram_gb } => vec![
                SpecRow::text("CPU", display(cpu)),
                SpecRow::text("GPU", display(gpu)),
                SpecRow::text("RAM", with_unit(ram_gb, "GB")),
            ],
            Specification::Unrecognized(_) => Vec::new(),
        }
    }
}

fn take(fields: &mut Map<String, Value>, key: &str) -> Value {
    fields.remove(key).unwrap_or(Value::Null)
}

/// Text for a wire value; null shows as empty
fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            // 1500.0 shows as 1500
            Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Measured value with its unit; an absent value shows no unit either
fn with_unit(value: &Value, unit: &str) -> String {
    match display(value) {
        text if text.is_empty() => text,
        text => format!("{} {}", text, unit),
    }
}

/// Whether a reference should be rendered as a link
pub fn looks_like_link(value: &str) -> bool {
    Url::parse(value).is_ok()
        || DOMAIN_RE.is_match(value)
        || value.contains("www.")
        || value.contains("http")
}

/// Absolute URL to open for a reference
pub fn link_target(reference: &str) -> String {
    if reference.starts_with("http://") || reference.starts_with("https://") {
        reference.to_string()
    } else {
        format!("https://{}", reference)
    }
}

//! User model and login credentials

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Message shown when a login field is left empty
pub const MISSING_CREDENTIALS: &str = "Por favor ingrese correo y contraseña";

/// User as returned by the user endpoints (never carries the password)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "idUsuario")]
    pub id: i64,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "nombres", default)]
    pub first_name: String,
    #[serde(rename = "apellidos", default)]
    pub last_name: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Credentials captured by the login form
#[derive(Clone, Default, Validate)]
pub struct LoginCredentials {
    #[validate(length(min = 1, message = "Por favor ingrese correo y contraseña"))]
    pub email: String,
    #[validate(length(min = 1, message = "Por favor ingrese correo y contraseña"))]
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn clear(&mut self) {
        self.email.clear();
        self.password.clear();
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

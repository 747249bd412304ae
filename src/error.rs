//! Error types for the Tech Lab monitor client

use serde::Deserialize;
use thiserror::Error;

/// Message shown when no response was received at all
pub const CONNECTION_MESSAGE: &str =
    "Error de conexión: No se puede conectar al servidor. Verifica tu conexión a internet.";

/// Family of remote endpoints an error came from.
///
/// The user lookup answers 404 for bad credentials, so it gets its own
/// wording and does not map 401/403.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorScope {
    Equipment,
    Users,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// No response received (DNS, refused connection, TLS, timeout)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Response received with a non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Client-side validation, never reaches the network
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

/// Structured error body some backend endpoints return
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}

impl AppError {
    /// Translate a non-2xx response into a single human readable message
    pub fn from_response(scope: ErrorScope, status: u16, body: &str) -> Self {
        let message = match (status, scope) {
            (404, ErrorScope::Equipment) => "Recurso no encontrado".to_string(),
            (404, ErrorScope::Users) => "Usuario no encontrado o credenciales incorrectas".to_string(),
            (500, _) => "Error interno del servidor".to_string(),
            (401, ErrorScope::Equipment) => "No autorizado. Inicia sesión para continuar.".to_string(),
            (403, ErrorScope::Equipment) => {
                "No tienes permisos para realizar esta acción.".to_string()
            }
            _ => serde_json::from_str::<ErrorBody>(body)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("Error del servidor: Código {}", status)),
        };

        AppError::Http { status, message }
    }

    /// Message suitable for display next to the affected control
    pub fn user_message(&self) -> String {
        match self {
            AppError::Connection(_) => CONNECTION_MESSAGE.to_string(),
            AppError::Http { message, .. } => message.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Decode(_) => "Respuesta inválida del servidor".to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Config(e) => format!("Configuración inválida: {}", e),
        }
    }

    /// HTTP status, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AppError::Decode(e.to_string())
        } else {
            AppError::Connection(e.to_string())
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_status_codes() {
        let e = AppError::from_response(ErrorScope::Equipment, 404, "");
        assert_eq!(e.user_message(), "Recurso no encontrado");
        assert_eq!(e.status(), Some(404));

        let e = AppError::from_response(ErrorScope::Equipment, 500, r#"{"message":"boom"}"#);
        assert_eq!(e.user_message(), "Error interno del servidor");

        let e = AppError::from_response(ErrorScope::Equipment, 401, "");
        assert_eq!(e.user_message(), "No autorizado. Inicia sesión para continuar.");

        let e = AppError::from_response(ErrorScope::Equipment, 403, "");
        assert_eq!(e.user_message(), "No tienes permisos para realizar esta acción.");
    }

    #[test]
    fn test_user_scope_404() {
        let e = AppError::from_response(ErrorScope::Users, 404, "");
        assert_eq!(e.user_message(), "Usuario no encontrado o credenciales incorrectas");
    }

    #[test]
    fn test_user_scope_401_falls_back_to_body() {
        let e = AppError::from_response(ErrorScope::Users, 401, r#"{"message":"Sesión expirada"}"#);
        assert_eq!(e.user_message(), "Sesión expirada");
    }

    #[test]
    fn test_body_message_fallback() {
        let e = AppError::from_response(ErrorScope::Equipment, 409, r#"{"message":"Equipo ya prestado"}"#);
        assert_eq!(e.user_message(), "Equipo ya prestado");
    }

    #[test]
    fn test_generic_code_message() {
        let e = AppError::from_response(ErrorScope::Equipment, 418, "not json");
        assert_eq!(e.user_message(), "Error del servidor: Código 418");

        let e = AppError::from_response(ErrorScope::Equipment, 422, r#"{"error":"x"}"#);
        assert_eq!(e.user_message(), "Error del servidor: Código 422");
    }

    #[test]
    fn test_connection_message() {
        let e = AppError::Connection("connection refused".into());
        assert_eq!(e.user_message(), CONNECTION_MESSAGE);
        assert_eq!(e.status(), None);
    }
}

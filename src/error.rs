// ============================================================================
// ERRORES - Taxonomía de fallos del núcleo cliente
// ============================================================================
// Ningún error de este módulo es fatal: o se devuelve al que llamó,
// o se degrada a sesión no autenticada / mensaje visible.
// ============================================================================

use thiserror::Error;

/// Fallo del backend de almacenamiento del token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Almacenamiento no disponible: {0}")]
    Unavailable(String),

    #[error("Error leyendo '{key}': {message}")]
    Read { key: String, message: String },

    #[error("Error guardando '{key}': {message}")]
    Write { key: String, message: String },

    #[error("Error eliminando '{key}': {message}")]
    Delete { key: String, message: String },
}

/// Token mal formado o imposible de decodificar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token mal formado: se esperaban 3 segmentos, hay {segments}")]
    Malformed { segments: usize },

    #[error("Token mal formado: segmento {index} vacío")]
    EmptySegment { index: usize },

    #[error("Payload del token no es base64url válido: {0}")]
    Encoding(String),

    #[error("Payload del token no es un objeto JSON válido: {0}")]
    Payload(String),
}

/// Resultado fallido de `SessionManager::login`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error(transparent)]
    InvalidToken(#[from] TokenError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Fallo de las APIs externas (registro, generación, favoritos, historial)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Réponse invalide du serveur")]
    InvalidResponse,

    #[error("Utilisateur non authentifié")]
    Unauthenticated,
}

impl ApiError {
    /// Mensaje para mostrar en pantalla
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Impossible de joindre le serveur".to_string(),
            ApiError::Http { status, .. } if *status == 401 || *status == 403 => {
                "Session expirée, veuillez vous reconnecter".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Campo de formulario al que se refiere un `ValidationError`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Email,
    Password,
    ConfirmPassword,
    Ingredients,
}

/// Validación de formulario fallida
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: FormField,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_error_wraps_token_error_transparently() {
        let err: AuthError = TokenError::Malformed { segments: 2 }.into();
        assert_eq!(
            err.to_string(),
            "Token mal formado: se esperaban 3 segmentos, hay 2"
        );
    }

    #[test]
    fn user_message_hides_network_details() {
        let err = ApiError::Network("dns failure".to_string());
        assert_eq!(err.user_message(), "Impossible de joindre le serveur");

        let err = ApiError::Http {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert_eq!(err.user_message(), "Session expirée, veuillez vous reconnecter");

        let err = ApiError::Http {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.user_message(), "HTTP 500: boom");
    }
}

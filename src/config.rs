use serde::{Deserialize, Serialize};

use crate::utils::constants::{DEFAULT_KEYRING_SERVICE, DEFAULT_NUM_RECIPES, STORAGE_KEY_AUTH_TOKEN};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    /// Recetas pedidas por cada generación
    pub num_recipes: u32,
    /// Nombre del secreto donde vive el token de sesión
    pub token_storage_key: String,
    /// Servicio bajo el que se guarda el token en el llavero del sistema
    pub keyring_service: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: "http://localhost:8080".to_string(),
            backend_url_production: "https://api.recettes.example".to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            num_recipes: DEFAULT_NUM_RECIPES,
            token_storage_key: STORAGE_KEY_AUTH_TOKEN.to_string(),
            keyring_service: DEFAULT_KEYRING_SERVICE.to_string(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url_development: option_env!("BACKEND_URL_DEVELOPMENT")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url_development),
            backend_url_production: option_env!("BACKEND_URL_PRODUCTION")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url_production),
            environment: option_env!("ENVIRONMENT")
                .map(str::to_string)
                .unwrap_or(defaults.environment),
            enable_logging: option_env!("ENABLE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
            num_recipes: option_env!("NUM_RECIPES")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.num_recipes),
            token_storage_key: option_env!("TOKEN_STORAGE_KEY")
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.token_storage_key),
            keyring_service: option_env!("KEYRING_SERVICE")
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.keyring_service),
        }
    }

    /// Obtiene la URL del backend según el entorno actual
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

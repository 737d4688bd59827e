use std::fmt;

/// Plataforma de ejecución, detectada una sola vez al arrancar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Navegador (WASM): el token vive en localStorage
    Web,
    /// Escritorio / móvil nativo: el token vive en el llavero del sistema
    Native,
}

impl Platform {
    pub fn detect() -> Self {
        if cfg!(target_arch = "wasm32") {
            Platform::Web
        } else {
            Platform::Native
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Web => write!(f, "web"),
            Platform::Native => write!(f, "native"),
        }
    }
}

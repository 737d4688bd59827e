// ============================================================================
// TOKEN STORE - Persistencia del secreto de sesión por plataforma
// ============================================================================
// Sin reintentos: cualquier fallo se devuelve al que llama.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::error::StorageError;
use crate::utils::Platform;

/// Almacén clave/valor para el token de sesión
#[async_trait(?Send)]
pub trait TokenStore {
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Eliminar una clave inexistente no es un error
    async fn delete_item(&self, key: &str) -> Result<(), StorageError>;

    /// Nombre del backend para logs
    fn backend_name(&self) -> &'static str;
}

/// Construye el backend que corresponde a la plataforma detectada
pub fn token_store_for(
    platform: Platform,
    config: &AppConfig,
) -> Result<Rc<dyn TokenStore>, StorageError> {
    let store: Rc<dyn TokenStore> = match platform {
        #[cfg(target_arch = "wasm32")]
        Platform::Web => Rc::new(WebTokenStore::new()),
        #[cfg(not(target_arch = "wasm32"))]
        Platform::Native => Rc::new(SecureTokenStore::new(&config.keyring_service)),
        other => {
            return Err(StorageError::Unavailable(format!(
                "No hay backend de almacenamiento '{}' en este target",
                other
            )))
        }
    };
    log::info!(
        "🔐 Backend de token: {} ({}), clave '{}'",
        store.backend_name(),
        platform,
        config.token_storage_key
    );
    Ok(store)
}

// ============================================================================
// WEB - localStorage
// ============================================================================

#[cfg(target_arch = "wasm32")]
pub use web::WebTokenStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::*;
    use crate::utils::storage::{load_from_storage, remove_from_storage, save_to_storage};

    #[derive(Debug, Default, Clone)]
    pub struct WebTokenStore;

    impl WebTokenStore {
        pub fn new() -> Self {
            Self
        }
    }

    #[async_trait(?Send)]
    impl TokenStore for WebTokenStore {
        async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            save_to_storage(key, value)
        }

        async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            load_from_storage(key)
        }

        async fn delete_item(&self, key: &str) -> Result<(), StorageError> {
            remove_from_storage(key)
        }

        fn backend_name(&self) -> &'static str {
            "localStorage"
        }
    }
}

// ============================================================================
// NATIVO - Llavero del sistema (Keychain / Credential Manager / keyutils)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
pub use native::SecureTokenStore;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;
    use keyring::Entry;

    #[derive(Debug, Clone)]
    pub struct SecureTokenStore {
        service: String,
    }

    impl SecureTokenStore {
        pub fn new(service: &str) -> Self {
            Self {
                service: service.to_string(),
            }
        }

        fn entry(&self, key: &str) -> Result<Entry, StorageError> {
            Entry::new(&self.service, key)
                .map_err(|e| StorageError::Unavailable(format!("Llavero no disponible: {}", e)))
        }
    }

    #[async_trait(?Send)]
    impl TokenStore for SecureTokenStore {
        async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.entry(key)?
                .set_password(value)
                .map_err(|e| StorageError::Write {
                    key: key.to_string(),
                    message: e.to_string(),
                })
        }

        async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            match self.entry(key)?.get_password() {
                Ok(value) => Ok(Some(value)),
                Err(keyring::Error::NoEntry) => Ok(None),
                Err(e) => Err(StorageError::Read {
                    key: key.to_string(),
                    message: e.to_string(),
                }),
            }
        }

        async fn delete_item(&self, key: &str) -> Result<(), StorageError> {
            match self.entry(key)?.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                Err(e) => Err(StorageError::Delete {
                    key: key.to_string(),
                    message: e.to_string(),
                }),
            }
        }

        fn backend_name(&self) -> &'static str {
            "keyring"
        }
    }
}

// ============================================================================
// MEMORIA - Sin persistencia entre procesos
// ============================================================================

/// Operación del almacén que se puede forzar a fallar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Set,
    Get,
    Delete,
}

/// Almacén en memoria del proceso. Permite inyectar fallos por operación.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    items: RefCell<HashMap<String, String>>,
    failing: RefCell<Vec<StoreOp>>,
    writes: Cell<usize>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.items.borrow_mut().insert(key.to_string(), value.to_string());
        store
    }

    /// Hace fallar todas las llamadas futuras a `op`
    pub fn fail_on(&self, op: StoreOp) {
        self.failing.borrow_mut().push(op);
    }

    pub fn recover(&self) {
        self.failing.borrow_mut().clear();
    }

    /// Lectura directa, sin pasar por el trait
    pub fn peek(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    /// Número de escrituras aceptadas
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    fn check(&self, op: StoreOp, key: &str) -> Result<(), StorageError> {
        if !self.failing.borrow().contains(&op) {
            return Ok(());
        }
        let key = key.to_string();
        let message = "fallo simulado".to_string();
        Err(match op {
            StoreOp::Set => StorageError::Write { key, message },
            StoreOp::Get => StorageError::Read { key, message },
            StoreOp::Delete => StorageError::Delete { key, message },
        })
    }
}

#[async_trait(?Send)]
impl TokenStore for MemoryTokenStore {
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check(StoreOp::Set, key)?;
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check(StoreOp::Get, key)?;
        Ok(self.peek(key))
    }

    async fn delete_item(&self, key: &str) -> Result<(), StorageError> {
        self.check(StoreOp::Delete, key)?;
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

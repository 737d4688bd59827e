// Acceso crudo a localStorage (solo WASM)

use web_sys::{window, Storage};

use crate::error::StorageError;

pub fn get_local_storage() -> Result<Storage, StorageError> {
    window()
        .ok_or_else(|| StorageError::Unavailable("No hay window".to_string()))?
        .local_storage()
        .map_err(|_| StorageError::Unavailable("No se pudo acceder a localStorage".to_string()))?
        .ok_or_else(|| StorageError::Unavailable("localStorage deshabilitado".to_string()))
}

pub fn save_to_storage(key: &str, value: &str) -> Result<(), StorageError> {
    get_local_storage()?
        .set_item(key, value)
        .map_err(|e| StorageError::Write {
            key: key.to_string(),
            message: format!("{:?}", e),
        })
}

pub fn load_from_storage(key: &str) -> Result<Option<String>, StorageError> {
    get_local_storage()?
        .get_item(key)
        .map_err(|e| StorageError::Read {
            key: key.to_string(),
            message: format!("{:?}", e),
        })
}

pub fn remove_from_storage(key: &str) -> Result<(), StorageError> {
    get_local_storage()?
        .remove_item(key)
        .map_err(|e| StorageError::Delete {
            key: key.to_string(),
            message: format!("{:?}", e),
        })
}

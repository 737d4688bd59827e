pub mod api_client;
pub mod token_store;

pub use api_client::{ApiClient, BackendApi};
pub use token_store::{token_store_for, MemoryTokenStore, StoreOp, TokenStore};

#[cfg(target_arch = "wasm32")]
pub use token_store::WebTokenStore;

#[cfg(not(target_arch = "wasm32"))]
pub use token_store::SecureTokenStore;

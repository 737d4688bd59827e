// Utils compartidos

pub mod constants;
pub mod platform;
pub mod token;
pub mod validation;

#[cfg(target_arch = "wasm32")]
pub mod storage;

pub use constants::*;
pub use platform::Platform;
pub use token::{decode_token, validate_structure, TokenClaims};
pub use validation::{LoginForm, RegisterForm};

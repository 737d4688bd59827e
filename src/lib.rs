// ============================================================================
// RECETTES APP - NÚCLEO CLIENTE MVVM (RUST PURO)
// ============================================================================
// Arquitectura MVVM:
// - ViewModels: Sesión, formularios y acciones sobre recetas
// - Services: SOLO comunicación API + almacenamiento del token
// - State: State Management con Rc<RefCell> + suscriptores
// - Navigation: Rutas y guardia de sesión
// - Models: Estructuras compartidas con backend
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod navigation;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(target_arch = "wasm32")]
mod bindings;

pub use config::{AppConfig, CONFIG};
pub use error::{ApiError, AuthError, StorageError, TokenError, ValidationError};
pub use models::{Recipe, RecipeSort, Session, SessionStatus};
pub use navigation::{Navigator, PathNavigator, Route, RouteGuard};
pub use services::{ApiClient, BackendApi, TokenStore};
pub use state::AppState;
pub use utils::Platform;
pub use viewmodels::{AuthViewModel, RecipesViewModel, SessionManager};

// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod app_state;
pub mod reactivity;
pub mod recipes_state;
pub mod session_state;

pub use app_state::AppState;
pub use reactivity::{ReactiveState, SubscriptionId};
pub use recipes_state::RecipeCollection;
pub use session_state::SessionState;

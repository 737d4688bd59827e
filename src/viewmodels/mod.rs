pub mod auth_viewmodel;
pub mod recipes_viewmodel;
pub mod session_manager;

pub use auth_viewmodel::AuthViewModel;
pub use recipes_viewmodel::RecipesViewModel;
pub use session_manager::SessionManager;

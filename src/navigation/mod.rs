pub mod guard;
pub mod path_navigator;
pub mod routes;

pub use guard::{decide, GuardAction, Navigator, RouteGuard};
pub use path_navigator::PathNavigator;
pub use routes::{Area, RecipeOrigin, Route, RouteError};

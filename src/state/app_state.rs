// ============================================================================
// APP STATE - Contexto de la aplicación (inyectado, sin singletons)
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::AppConfig;
use crate::error::StorageError;
use crate::models::Session;
use crate::navigation::{Navigator, RouteGuard};
use crate::services::{token_store_for, ApiClient, BackendApi, TokenStore};
use crate::state::{RecipeCollection, SessionState};
use crate::utils::Platform;
use crate::viewmodels::{AuthViewModel, RecipesViewModel, SessionManager};

/// Estado de la aplicación, propiedad de la raíz y compartido por handle
#[derive(Clone)]
pub struct AppState {
    pub session: Rc<SessionManager>,
    pub recipes: Rc<RecipeCollection>,
    pub auth: Rc<AuthViewModel>,
    pub recipe_actions: Rc<RecipesViewModel>,
    guard: Rc<RefCell<Option<Rc<RouteGuard>>>>,
}

impl AppState {
    pub fn new(store: Rc<dyn TokenStore>, api: Rc<dyn BackendApi>, config: &AppConfig) -> Self {
        let session = Rc::new(SessionManager::new(store, config));
        let recipes = Rc::new(RecipeCollection::new());
        let auth = Rc::new(AuthViewModel::new(session.clone(), api.clone()));
        let recipe_actions = Rc::new(RecipesViewModel::new(
            session.clone(),
            recipes.clone(),
            api,
            config.num_recipes,
        ));

        Self {
            session,
            recipes,
            auth,
            recipe_actions,
            guard: Rc::new(RefCell::new(None)),
        }
    }

    /// Backend de token según plataforma + cliente HTTP real
    pub fn for_platform(platform: Platform, config: &AppConfig) -> Result<Self, StorageError> {
        let store = token_store_for(platform, config)?;
        let api: Rc<dyn BackendApi> = Rc::new(ApiClient::new(config));
        log::info!("🚀 AppState listo (backend: {})", config.backend_url());
        Ok(Self::new(store, api, config))
    }

    pub fn session_state(&self) -> Rc<SessionState> {
        self.session.state()
    }

    pub fn current_session(&self) -> Session {
        self.session.session()
    }

    /// Conecta la guardia de rutas al navegador de la capa de pantallas
    pub fn attach_navigator(&self, navigator: Rc<dyn Navigator>) -> Rc<RouteGuard> {
        let state = self.session_state();
        if let Some(previous) = self.guard.borrow_mut().take() {
            previous.detach();
        }
        let guard = RouteGuard::new(navigator);
        guard.attach(&state);
        *self.guard.borrow_mut() = Some(guard.clone());
        guard
    }

    /// Lee el token guardado y publica la sesión inicial
    pub async fn start(&self) -> Session {
        self.session.initialize().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::recipe::fixtures::recipe;
    use crate::navigation::guard::test_navigator::RecordingNavigator;
    use crate::navigation::Route;
    use crate::services::MemoryTokenStore;
    use crate::utils::token::test_tokens::token_with_payload;
    use crate::viewmodels::test_api::FakeApi;
    use futures::executor::block_on;

    fn app(store: Rc<MemoryTokenStore>, api: Rc<FakeApi>) -> AppState {
        AppState::new(store, api, &AppConfig::default())
    }

    #[test]
    fn cold_start_without_token_lands_on_login_without_network() {
        let api = Rc::new(FakeApi::default());
        let app = app(Rc::new(MemoryTokenStore::new()), api.clone());
        let nav = RecordingNavigator::at(None);
        app.attach_navigator(nav.clone());

        let session = block_on(app.start());

        assert_eq!(session, Session::unauthenticated());
        assert_eq!(nav.loading_shown.get(), 1);
        assert_eq!(*nav.replaced.borrow(), vec![Route::Login]);
        assert_eq!(api.calls.get(), 0);
    }

    #[test]
    fn full_session_round_trip() {
        let api = Rc::new(FakeApi::default());
        *api.generate_response.borrow_mut() = Ok(vec![recipe("1", "Soupe", "30 min", "20 min")]);
        let app = app(Rc::new(MemoryTokenStore::new()), api);
        let nav = RecordingNavigator::at(Some(Route::Login));
        app.attach_navigator(nav.clone());

        block_on(async {
            app.start().await;
            app.auth
                .login_with_token(&token_with_payload(r#"{"id_user":42}"#))
                .await
                .unwrap();
            app.recipe_actions.generate("tomate").await.unwrap();
            app.auth.logout().await;
        });

        assert_eq!(*nav.replaced.borrow(), vec![Route::Generate, Route::Login]);
        assert_eq!(app.recipes.len(), 1);
        assert_eq!(app.current_session(), Session::unauthenticated());
    }

    #[test]
    fn stored_token_restores_authenticated_area() {
        let token = token_with_payload(r#"{"id_user":"42"}"#);
        let store = Rc::new(MemoryTokenStore::with_item("auth_token", &token));
        let app = app(store, Rc::new(FakeApi::default()));
        let nav = RecordingNavigator::at(None);
        let guard = app.attach_navigator(nav.clone());

        block_on(app.start());

        assert_eq!(*nav.replaced.borrow(), vec![Route::Generate]);
        assert_eq!(
            guard.last_session(),
            Some(Session::authenticated(Some("42".to_string())))
        );
    }

    #[test]
    fn reattaching_replaces_previous_guard() {
        let app = app(Rc::new(MemoryTokenStore::new()), Rc::new(FakeApi::default()));
        let first = RecordingNavigator::at(None);
        let second = RecordingNavigator::at(None);
        app.attach_navigator(first.clone());
        app.attach_navigator(second.clone());

        block_on(app.start());

        assert!(first.replaced.borrow().is_empty());
        assert_eq!(*second.replaced.borrow(), vec![Route::Login]);
    }

    #[test]
    fn path_router_follows_session_and_collection_snapshots() {
        use crate::navigation::PathNavigator;
        use std::cell::RefCell;

        let app = app(Rc::new(MemoryTokenStore::new()), Rc::new(FakeApi::default()));
        let location = Rc::new(RefCell::new(Some("/".to_string())));
        let (reader, writer) = (location.clone(), location.clone());
        app.attach_navigator(Rc::new(PathNavigator::new(
            move || reader.borrow().clone(),
            move |path| *writer.borrow_mut() = Some(path.to_string()),
            || {},
        )));

        let sizes = Rc::new(RefCell::new(Vec::new()));
        let sink = sizes.clone();
        app.recipes.subscribe(move |recipes| sink.borrow_mut().push(recipes.len()));

        block_on(async {
            app.start().await;
            assert_eq!(location.borrow().as_deref(), Some("/login"));
            app.auth
                .login_with_token(&token_with_payload(r#"{"id_user":42}"#))
                .await
                .unwrap();
        });
        assert_eq!(location.borrow().as_deref(), Some("/(tabs)/generate"));

        app.recipes.add(recipe("1", "Soupe", "30 min", "20 min"));
        app.recipes.clear();
        assert_eq!(*sizes.borrow(), vec![0, 1, 0]);
    }
}

// ============================================================================
// SESSION MANAGER - Ciclo de vida de la sesión
// ============================================================================
// Loading -> { Authenticated(user_id), Unauthenticated }
// Único escritor del token persistido y de los snapshots de sesión.
// ============================================================================

use std::rc::Rc;

use chrono::Utc;

use crate::config::AppConfig;
use crate::error::{AuthError, StorageError, TokenError};
use crate::models::Session;
use crate::services::TokenStore;
use crate::state::SessionState;
use crate::utils::token::decode_token;

pub struct SessionManager {
    store: Rc<dyn TokenStore>,
    token_key: String,
    state: Rc<SessionState>,
}

impl SessionManager {
    /// Arranca en `Loading`; hay que llamar a `initialize` para salir de ahí
    pub fn new(store: Rc<dyn TokenStore>, config: &AppConfig) -> Self {
        Self {
            store,
            token_key: config.token_storage_key.clone(),
            state: Rc::new(SessionState::new()),
        }
    }

    /// Canal de snapshots para guardia de rutas y pantallas
    pub fn state(&self) -> Rc<SessionState> {
        self.state.clone()
    }

    pub fn session(&self) -> Session {
        self.state.snapshot()
    }

    /// Deriva la sesión del token guardado
    pub async fn initialize(&self) -> Session {
        log::info!("🔄 Restaurando sesión desde {}", self.store.backend_name());

        let session = match self.store.get_item(&self.token_key).await {
            Ok(None) => {
                log::info!("ℹ️ No hay token guardado");
                Session::unauthenticated()
            }
            Ok(Some(token)) => Self::session_from_stored(&token),
            Err(e) => {
                log::error!("❌ Error leyendo token guardado: {}", e);
                Session::unauthenticated()
            }
        };

        self.state.publish(session.clone());
        session
    }

    fn session_from_stored(token: &str) -> Session {
        match decode_token(token) {
            Ok(claims) => {
                if let Some(exp) = claims.expires_at() {
                    if exp < Utc::now() {
                        log::warn!("⚠️ Token guardado expirado desde {}", exp.to_rfc3339());
                    }
                }
                let user_id = claims.user_id();
                log::info!("✅ Sesión restaurada (usuario: {:?})", user_id);
                Session::authenticated(user_id)
            }
            // Se deja el token en su sitio; simplemente no autentica
            Err(e @ (TokenError::Malformed { .. } | TokenError::EmptySegment { .. })) => {
                log::warn!("⚠️ Token guardado mal formado, se ignora: {}", e);
                Session::unauthenticated()
            }
            Err(e) => {
                log::warn!("⚠️ Token guardado no decodificable, se ignora: {}", e);
                Session::unauthenticated()
            }
        }
    }

    /// Valida, persiste y autentica. Si falla, la sesión no cambia.
    pub async fn login(&self, token: &str) -> Result<Session, AuthError> {
        let claims = decode_token(token).map_err(|e| {
            log::error!("❌ Login rechazado: {}", e);
            e
        })?;

        if let Err(e) = self.store.set_item(&self.token_key, token).await {
            log::error!("❌ Error guardando token: {}", e);
            return Err(e.into());
        }

        let session = Session::authenticated(claims.user_id());
        log::info!("✅ Login correcto (usuario: {:?})", session.user_id);
        self.state.publish(session.clone());
        Ok(session)
    }

    /// Siempre termina en `Unauthenticated`, aunque falle el borrado
    pub async fn logout(&self) -> Session {
        log::info!("👋 Logout");

        if let Err(e) = self.store.delete_item(&self.token_key).await {
            log::error!("❌ Error eliminando token en logout: {}", e);
        }

        let session = Session::unauthenticated();
        self.state.publish(session.clone());
        session
    }

    /// Token para cabeceras `Authorization`; `None` si no hay sesión
    pub(crate) async fn bearer_token(&self) -> Result<Option<String>, StorageError> {
        if !self.state.snapshot().is_authenticated {
            return Ok(None);
        }
        self.store.get_item(&self.token_key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{MemoryTokenStore, StoreOp};
    use crate::utils::token::test_tokens::token_with_payload;
    use futures::executor::block_on;
    use std::cell::RefCell;

    const KEY: &str = "auth_token";

    fn manager_with(store: Rc<MemoryTokenStore>) -> SessionManager {
        SessionManager::new(store, &AppConfig::default())
    }

    #[test]
    fn starts_loading() {
        let manager = manager_with(Rc::new(MemoryTokenStore::new()));
        assert_eq!(manager.session(), Session::loading());
    }

    #[test]
    fn startup_without_token_is_unauthenticated() {
        let manager = manager_with(Rc::new(MemoryTokenStore::new()));
        let session = block_on(manager.initialize());
        assert_eq!(session, Session::unauthenticated());
        assert_eq!(manager.session(), Session::unauthenticated());
    }

    #[test]
    fn startup_with_valid_token_restores_user() {
        let token = token_with_payload(r#"{"id_user":42}"#);
        let manager = manager_with(Rc::new(MemoryTokenStore::with_item(KEY, &token)));
        let session = block_on(manager.initialize());
        assert_eq!(session, Session::authenticated(Some("42".to_string())));
    }

    #[test]
    fn startup_with_token_without_claim_is_authenticated_anonymous() {
        let token = token_with_payload(r#"{"sub":"x"}"#);
        let manager = manager_with(Rc::new(MemoryTokenStore::with_item(KEY, &token)));
        let session = block_on(manager.initialize());
        assert!(session.is_authenticated);
        assert_eq!(session.user_id, None);
    }

    #[test]
    fn startup_with_malformed_token_leaves_it_in_place() {
        let store = Rc::new(MemoryTokenStore::with_item(KEY, "fake-auth-token"));
        let manager = manager_with(store.clone());
        let session = block_on(manager.initialize());
        assert_eq!(session, Session::unauthenticated());
        assert_eq!(store.peek(KEY).as_deref(), Some("fake-auth-token"));
    }

    #[test]
    fn startup_with_undecodable_token_is_unauthenticated() {
        let store = Rc::new(MemoryTokenStore::with_item(KEY, "aGVhZGVy.!!!.c2ln"));
        let manager = manager_with(store);
        assert_eq!(block_on(manager.initialize()), Session::unauthenticated());
    }

    #[test]
    fn startup_read_failure_degrades_to_unauthenticated() {
        let store = Rc::new(MemoryTokenStore::new());
        store.fail_on(StoreOp::Get);
        let manager = manager_with(store);
        assert_eq!(block_on(manager.initialize()), Session::unauthenticated());
    }

    #[test]
    fn login_rejects_malformed_tokens_before_writing() {
        let store = Rc::new(MemoryTokenStore::new());
        let manager = manager_with(store.clone());
        block_on(manager.initialize());

        for token in ["", "fake-auth-token", "a.b", "a.b.c.d", "a..c"] {
            let err = block_on(manager.login(token)).unwrap_err();
            assert!(matches!(err, AuthError::InvalidToken(_)), "{token:?}");
            assert_eq!(manager.session(), Session::unauthenticated());
        }
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn login_persists_and_authenticates() {
        let store = Rc::new(MemoryTokenStore::new());
        let manager = manager_with(store.clone());
        block_on(manager.initialize());

        let token = token_with_payload(r#"{"id_user":42}"#);
        let session = block_on(manager.login(&token)).unwrap();

        assert_eq!(session, Session::authenticated(Some("42".to_string())));
        assert_eq!(manager.session(), session);
        assert_eq!(store.peek(KEY), Some(token.clone()));
        assert_eq!(block_on(manager.bearer_token()).unwrap(), Some(token));
    }

    #[test]
    fn login_storage_failure_leaves_session_unchanged() {
        let store = Rc::new(MemoryTokenStore::new());
        store.fail_on(StoreOp::Set);
        let manager = manager_with(store);
        block_on(manager.initialize());

        let token = token_with_payload(r#"{"id_user":42}"#);
        let err = block_on(manager.login(&token)).unwrap_err();

        assert!(matches!(err, AuthError::Storage(StorageError::Write { .. })));
        assert_eq!(manager.session(), Session::unauthenticated());
    }

    #[test]
    fn logout_always_ends_unauthenticated() {
        let token = token_with_payload(r#"{"id_user":42}"#);
        let store = Rc::new(MemoryTokenStore::with_item(KEY, &token));
        store.fail_on(StoreOp::Delete);
        let manager = manager_with(store.clone());
        block_on(manager.initialize());
        assert!(manager.session().is_authenticated);

        let first = block_on(manager.logout());
        let second = block_on(manager.logout());

        assert_eq!(first, Session::unauthenticated());
        assert_eq!(first, second);
        // El borrado falló: el token sigue ahí pero no se expone
        assert!(store.peek(KEY).is_some());
        assert_eq!(block_on(manager.bearer_token()).unwrap(), None);
    }

    #[test]
    fn logout_removes_token() {
        let token = token_with_payload(r#"{"id_user":1}"#);
        let store = Rc::new(MemoryTokenStore::with_item(KEY, &token));
        let manager = manager_with(store.clone());
        block_on(manager.initialize());
        block_on(manager.logout());
        assert_eq!(store.peek(KEY), None);
    }

    #[test]
    fn every_transition_is_published_in_order() {
        let manager = manager_with(Rc::new(MemoryTokenStore::new()));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        manager.state().subscribe(move |s| sink.borrow_mut().push(s.clone()));

        block_on(async {
            manager.initialize().await;
            manager
                .login(&token_with_payload(r#"{"id_user":"7"}"#))
                .await
                .unwrap();
            manager.logout().await;
        });

        assert_eq!(
            *seen.borrow(),
            vec![
                Session::loading(),
                Session::unauthenticated(),
                Session::authenticated(Some("7".to_string())),
                Session::unauthenticated(),
            ]
        );
    }
}

// ============================================================================
// AUTH VIEWMODEL - Formularios de login / registro
// ============================================================================

use std::rc::Rc;

use crate::models::Session;
use crate::services::BackendApi;
use crate::utils::validation::{LoginForm, RegisterForm};
use crate::viewmodels::SessionManager;

const REGISTER_FAILED: &str = "Échec de l'inscription. Veuillez réessayer.";
const LOGIN_FAILED: &str = "Échec de la connexion. Veuillez réessayer.";

pub struct AuthViewModel {
    session: Rc<SessionManager>,
    api: Rc<dyn BackendApi>,
}

impl AuthViewModel {
    pub fn new(session: Rc<SessionManager>, api: Rc<dyn BackendApi>) -> Self {
        Self { session, api }
    }

    pub fn validate_login(&self, form: &LoginForm) -> Result<(), String> {
        form.validate().map_err(|e| e.message)
    }

    /// Registro + login con el token devuelto por el backend
    pub async fn register(&self, form: &RegisterForm) -> Result<Session, String> {
        form.validate().map_err(|e| e.message)?;

        let response = self
            .api
            .register(form.email.trim(), &form.password)
            .await
            .map_err(|e| {
                log::error!("❌ Error en registro: {}", e);
                REGISTER_FAILED.to_string()
            })?;

        self.session.login(&response.token).await.map_err(|e| {
            log::error!("❌ Token de registro rechazado: {}", e);
            REGISTER_FAILED.to_string()
        })
    }

    /// Login con un token ya emitido por el backend
    pub async fn login_with_token(&self, token: &str) -> Result<Session, String> {
        self.session
            .login(token)
            .await
            .map_err(|_| LOGIN_FAILED.to_string())
    }

    pub async fn logout(&self) -> Session {
        self.session.logout().await
    }
}

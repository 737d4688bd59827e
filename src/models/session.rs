use serde::{Deserialize, Serialize};

/// Estado de la sesión del usuario (snapshot inmutable publicado a los suscriptores)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub is_loading: bool,
    pub is_authenticated: bool,
    pub user_id: Option<String>,
}

/// Vista de la sesión como máquina de estados
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    Authenticated,
    Unauthenticated,
}

impl Session {
    /// Estado inicial al arrancar el proceso
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            is_authenticated: false,
            user_id: None,
        }
    }

    /// `user_id` puede ser `None` aunque el token se haya decodificado
    pub fn authenticated(user_id: Option<String>) -> Self {
        Self {
            is_loading: false,
            is_authenticated: true,
            user_id,
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            is_loading: false,
            is_authenticated: false,
            user_id: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.is_loading {
            SessionStatus::Loading
        } else if self.is_authenticated {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Unauthenticated
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_screen_field_names() {
        let json = serde_json::to_value(Session::authenticated(Some("42".to_string()))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"isLoading": false, "isAuthenticated": true, "userId": "42"})
        );
    }

    #[test]
    fn status_follows_flags() {
        assert_eq!(Session::default().status(), SessionStatus::Loading);
        assert_eq!(Session::unauthenticated().status(), SessionStatus::Unauthenticated);
        assert_eq!(Session::authenticated(None).status(), SessionStatus::Authenticated);
    }
}

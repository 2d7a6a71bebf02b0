use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Datos de perfil del usuario autenticado. Forma libre, siempre un objeto JSON.
pub type UserRecord = Map<String, Value>;

/// Copia del estado de sesión que guarda `SessionStore`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub user: Option<UserRecord>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub error: Option<String>,
    pub profile_complete: bool,
}

impl SessionState {
    /// Valores por defecto sin sesión, conservando el flag de perfil persistido
    pub fn logged_out(profile_complete: bool) -> Self {
        Self {
            profile_complete,
            ..Self::default()
        }
    }

    pub fn authenticated(user: UserRecord, token: String, profile_complete: bool) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
            error: None,
            profile_complete,
        }
    }
}

/// Notificaciones emitidas a los subscribers del store
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    LoggedIn,
    /// Logout terminado; la capa de presentación decide a dónde ir.
    SessionEnded,
    UserUpdated,
    ProfileCompleteChanged(bool),
    /// Un setter raw cambió el estado en memoria sin persistirlo.
    Changed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_state_is_unauthenticated() {
        let state = SessionState::default();
        assert_eq!(state.user, None);
        assert_eq!(state.token, None);
        assert!(!state.is_authenticated);
        assert!(!state.profile_complete);
    }

    #[test]
    fn state_serializes_with_camel_case_fields() {
        let state = SessionState::logged_out(true);
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["profileComplete"], json!(true));
        assert_eq!(value["isAuthenticated"], json!(false));
    }
}

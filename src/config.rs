use serde::{Deserialize, Serialize};

pub const DEFAULT_TOKEN_KEY: &str = "token";
pub const DEFAULT_USER_KEY: &str = "user";
pub const DEFAULT_PROFILE_COMPLETE_KEY: &str = "profileComplete";
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub token_key: String,
    pub user_key: String,
    pub profile_complete_key: String,
    pub login_route: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            user_key: DEFAULT_USER_KEY.to_string(),
            profile_complete_key: DEFAULT_PROFILE_COMPLETE_KEY.to_string(),
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
        }
    }
}

impl SessionConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self {
            token_key: option_env!("SESSION_TOKEN_KEY")
                .unwrap_or(DEFAULT_TOKEN_KEY).to_string(),
            user_key: option_env!("SESSION_USER_KEY")
                .unwrap_or(DEFAULT_USER_KEY).to_string(),
            profile_complete_key: option_env!("SESSION_PROFILE_COMPLETE_KEY")
                .unwrap_or(DEFAULT_PROFILE_COMPLETE_KEY).to_string(),
            login_route: option_env!("LOGIN_ROUTE")
                .unwrap_or(DEFAULT_LOGIN_ROUTE).to_string(),
        }
    }

    /// Claves de la sesión, en el orden en que se borran
    pub fn session_keys(&self) -> [&str; 3] {
        [&self.token_key, &self.user_key, &self.profile_complete_key]
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: SessionConfig = SessionConfig::from_env();
}

// ============================================================================
// SESSION STORE - Estado de autenticación persistido en storage
// ============================================================================
// Hidratación al construir, operaciones de login/logout/update con
// write-through síncrono y notificaciones a los subscribers.
// ============================================================================

use std::cell::RefCell;

use serde_json::Value;

use crate::config::{SessionConfig, CONFIG};
use crate::error::{HydrationCorruption, SessionError};
use crate::models::session::{SessionEvent, SessionState, UserRecord};
use crate::state::reactivity::{SubscriptionId, Subscribers};
use crate::utils::storage::KeyValueStore;

/// Guarda la identidad autenticada y la replica en un `KeyValueStore`.
///
/// Cada operación actualiza primero la memoria y después escribe en storage
/// antes de volver. Si una escritura falla, la memoria manda: el fallo se
/// guarda en `error`, se loguea y se devuelve.
pub struct SessionStore {
    state: RefCell<SessionState>,
    storage: Box<dyn KeyValueStore>,
    config: SessionConfig,
    subscribers: Subscribers<SessionEvent>,
}

impl SessionStore {
    /// Crear store con la `CONFIG` global e hidratarlo desde `storage`
    pub fn new(storage: impl KeyValueStore + 'static) -> Self {
        Self::with_config(storage, CONFIG.clone())
    }

    pub fn with_config(storage: impl KeyValueStore + 'static, config: SessionConfig) -> Self {
        let state = hydrate(&storage, &config);
        Self {
            state: RefCell::new(state),
            storage: Box::new(storage),
            config,
            subscribers: Subscribers::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Lectura
    // ------------------------------------------------------------------------

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn user(&self) -> Option<UserRecord> {
        self.state.borrow().user.clone()
    }

    /// Un campo del usuario actual, si existe
    pub fn user_field(&self, name: &str) -> Option<Value> {
        self.state
            .borrow()
            .user
            .as_ref()
            .and_then(|user| user.get(name).cloned())
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn profile_complete(&self) -> bool {
        self.state.borrow().profile_complete
    }

    // ------------------------------------------------------------------------
    // Subscribers
    // ------------------------------------------------------------------------

    /// Los callbacks corren con el borrow ya liberado, pueden leer el store.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&SessionEvent) + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    // ------------------------------------------------------------------------
    // Operaciones
    // ------------------------------------------------------------------------

    /// Login: establece user + token + is_authenticated y persiste ambos.
    /// No toca `profile_complete`.
    pub fn login(&self, user: UserRecord, token: impl Into<String>) -> Result<(), SessionError> {
        let token = token.into();
        let serialized = serde_json::to_string(&user);

        {
            let mut state = self.state.borrow_mut();
            state.user = Some(user);
            state.token = Some(token.clone());
            state.is_authenticated = true;
            state.error = None;
        }

        let result = serialized.map_err(SessionError::from).and_then(|json| {
            self.storage.set(&self.config.token_key, &token)?;
            if let Err(e) = self.storage.set(&self.config.user_key, &json) {
                // Sin token la próxima hidratación ve datos parciales y arranca sin sesión
                if let Err(remove_err) = self.storage.remove(&self.config.token_key) {
                    log::error!("❌ Could not roll back stored token: {}", remove_err);
                }
                return Err(e.into());
            }
            Ok(())
        });

        if result.is_ok() {
            log::info!("✅ Login stored");
        }
        self.finish(SessionEvent::LoggedIn, result)
    }

    /// Logout: limpia todo, borra las tres claves y emite `SessionEnded`.
    /// Se intentan todos los borrados aunque alguno falle.
    pub fn logout(&self) -> Result<(), SessionError> {
        *self.state.borrow_mut() = SessionState::default();

        let mut result = Ok(());
        for key in self.config.session_keys() {
            if let Err(e) = self.storage.remove(key) {
                if result.is_ok() {
                    result = Err(SessionError::from(e));
                }
            }
        }

        log::info!("👋 Logout");
        self.finish(SessionEvent::SessionEnded, result)
    }

    /// Merge superficial de `partial` sobre el usuario actual y persistir.
    ///
    /// El merge lee el usuario confirmado dentro del mismo borrow que lo
    /// escribe, así llamadas seguidas no pierden campos. Sin usuario actual
    /// el resultado sale solo de `partial`.
    pub fn update_user(&self, partial: UserRecord) -> Result<(), SessionError> {
        let merged = {
            let mut state = self.state.borrow_mut();
            let user = state.user.get_or_insert_with(UserRecord::new);
            user.extend(partial);
            user.clone()
        };

        let result = serde_json::to_string(&merged)
            .map_err(SessionError::from)
            .and_then(|json| Ok(self.storage.set(&self.config.user_key, &json)?));

        self.finish(SessionEvent::UserUpdated, result)
    }

    /// Se persiste como `"true"` / `"false"`, independiente de la autenticación.
    pub fn set_profile_complete(&self, value: bool) -> Result<(), SessionError> {
        self.state.borrow_mut().profile_complete = value;

        let stored = if value { "true" } else { "false" };
        let result = self
            .storage
            .set(&self.config.profile_complete_key, stored)
            .map_err(SessionError::from);

        self.finish(SessionEvent::ProfileCompleteChanged(value), result)
    }

    /// Limpiar el error de la UI (solo en memoria)
    pub fn clear_error(&self) {
        self.state.borrow_mut().error = None;
        self.subscribers.notify(&SessionEvent::Changed);
    }

    /// Setters de bajo nivel que NO escriben en storage
    pub fn raw(&self) -> RawSession<'_> {
        RawSession { store: self }
    }

    fn finish(&self, event: SessionEvent, result: Result<(), SessionError>) -> Result<(), SessionError> {
        if let Err(ref e) = result {
            log::error!("❌ Session storage write failed: {}", e);
            self.state.borrow_mut().error = Some(e.to_string());
        }
        self.subscribers.notify(&event);
        result
    }
}

/// Acceso directo al estado en memoria.
///
/// Nada de lo escrito aquí llega a storage ni se comprueba la relación entre
/// `is_authenticated`, `user` y `token`. Los subscribers reciben igualmente
/// `SessionEvent::Changed`.
pub struct RawSession<'a> {
    store: &'a SessionStore,
}

impl RawSession<'_> {
    pub fn set_user(&self, user: Option<UserRecord>) {
        self.mutate(|state| state.user = user);
    }

    pub fn set_token(&self, token: Option<String>) {
        self.mutate(|state| state.token = token);
    }

    pub fn set_is_authenticated(&self, value: bool) {
        self.mutate(|state| state.is_authenticated = value);
    }

    pub fn set_error(&self, error: Option<String>) {
        self.mutate(|state| state.error = error);
    }

    fn mutate<F>(&self, updater: F)
    where
        F: FnOnce(&mut SessionState),
    {
        {
            let mut state = self.store.state.borrow_mut();
            updater(&mut *state);
        }
        self.store.subscribers.notify(&SessionEvent::Changed);
    }
}

/// Reconstruir la sesión desde storage. Nunca falla: los datos corruptos se
/// borran y se devuelve el estado sin sesión.
fn hydrate(storage: &dyn KeyValueStore, config: &SessionConfig) -> SessionState {
    match read_persisted(storage, config) {
        Ok(state) => {
            if state.is_authenticated {
                log::info!("✅ Session restored from storage");
            } else {
                log::debug!("ℹ️ No stored session");
            }
            state
        }
        Err(reason) => {
            log::error!("❌ Error reading auth state from storage: {}", reason);
            for key in config.session_keys() {
                if let Err(e) = storage.remove(key) {
                    log::warn!("⚠️ Could not clear corrupted key: {}", e);
                }
            }
            SessionState::default()
        }
    }
}

fn read_persisted(storage: &dyn KeyValueStore, config: &SessionConfig) -> Result<SessionState, HydrationCorruption> {
    let token = present(storage.get(&config.token_key)?);
    let user = present(storage.get(&config.user_key)?);
    let profile_complete = storage.get(&config.profile_complete_key)?.as_deref() == Some("true");

    match (token, user) {
        (Some(token), Some(raw_user)) => match serde_json::from_str::<Value>(&raw_user)? {
            Value::Object(user) => Ok(SessionState::authenticated(user, token, profile_complete)),
            _ => Err(HydrationCorruption::NotARecord),
        },
        (None, None) => Ok(SessionState::logged_out(profile_complete)),
        (Some(_), None) => Err(HydrationCorruption::Partial { missing: config.user_key.clone() }),
        (None, Some(_)) => Err(HydrationCorruption::Partial { missing: config.token_key.clone() }),
    }
}

// Empty strings count as absent.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;
    use serde_json::json;

    fn record(value: Value) -> UserRecord {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn empty_storage_hydrates_to_defaults() {
        let store = SessionStore::with_config(MemoryStorage::new(), SessionConfig::default());
        assert_eq!(store.snapshot(), SessionState::default());
    }

    #[test]
    fn update_user_without_user_builds_from_partial() {
        let storage = MemoryStorage::new();
        let store = SessionStore::with_config(storage.clone(), SessionConfig::default());

        store.update_user(record(json!({"name": "X"}))).unwrap();

        assert_eq!(store.user(), Some(record(json!({"name": "X"}))));
        assert!(!store.is_authenticated());
        assert_eq!(storage.get("user").unwrap().as_deref(), Some(r#"{"name":"X"}"#));
    }

    #[test]
    fn user_field_reads_single_value() {
        let store = SessionStore::with_config(MemoryStorage::new(), SessionConfig::default());
        store.login(record(json!({"name": "A", "age": 30})), "t").unwrap();

        assert_eq!(store.user_field("age"), Some(json!(30)));
        assert_eq!(store.user_field("missing"), None);
    }

    #[test]
    fn raw_setters_do_not_touch_storage() {
        let storage = MemoryStorage::new();
        let store = SessionStore::with_config(storage.clone(), SessionConfig::default());

        store.raw().set_token(Some("raw".into()));
        store.raw().set_user(Some(record(json!({"id": 1}))));
        store.raw().set_is_authenticated(true);
        store.raw().set_error(Some("boom".into()));

        assert_eq!(store.token().as_deref(), Some("raw"));
        assert!(store.is_authenticated());
        assert_eq!(store.error().as_deref(), Some("boom"));
        assert!(storage.is_empty());
    }

    #[test]
    fn custom_keys_are_honoured() {
        let storage = MemoryStorage::new();
        let config = SessionConfig {
            token_key: "app.token".into(),
            user_key: "app.user".into(),
            profile_complete_key: "app.profile".into(),
            login_route: "/signin".into(),
        };
        let store = SessionStore::with_config(storage.clone(), config);

        store.login(record(json!({"id": 1})), "t").unwrap();
        store.set_profile_complete(true).unwrap();

        assert!(storage.contains("app.token"));
        assert!(storage.contains("app.user"));
        assert_eq!(storage.get("app.profile").unwrap().as_deref(), Some("true"));
        assert!(!storage.contains("token"));
    }
}

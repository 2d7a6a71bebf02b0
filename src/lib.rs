// ============================================================================
// AUTH SESSION - Sesión de autenticación del lado cliente (RUST PURO)
// ============================================================================
// - State: SessionStore con RefCell + subscribers
// - Utils: storage clave/valor (localStorage en WASM, memoria en tests)
// - Context: inyección explícita del store
// - Services: redirección al login al terminar la sesión
// - Hooks: provider + hook de Yew (solo WASM)
// ============================================================================

pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(target_arch = "wasm32")]
pub mod hooks;

pub use config::{SessionConfig, CONFIG};
pub use context::SessionContext;
pub use error::{HydrationCorruption, SessionError};
pub use models::{SessionEvent, SessionState, UserRecord};
pub use services::{LoginRedirect, Navigator};
pub use state::{RawSession, SessionStore, SubscriptionId};
pub use utils::{KeyValueStore, MemoryStorage, StorageError};

#[cfg(target_arch = "wasm32")]
pub use hooks::{use_session, SessionProvider};
#[cfg(target_arch = "wasm32")]
pub use services::WindowNavigator;
#[cfg(target_arch = "wasm32")]
pub use utils::LocalStorage;

/// Inicializar panic hook y logging en el navegador
#[cfg(target_arch = "wasm32")]
pub fn init() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("🚀 Auth session ready");
}

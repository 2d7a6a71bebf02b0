// ============================================================================
// STATE MODULE - State Management con RefCell + notificaciones
// ============================================================================

pub mod reactivity;
pub mod session_store;

pub use reactivity::*;
pub use session_store::*;

// ============================================================================
// ERRORS - Errores de sesión y de almacenamiento
// ============================================================================

use crate::utils::storage::StorageError;

/// Errores devueltos por las operaciones de sesión
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),

    #[error("could not serialize user record: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Acceso al store fuera de un provider activo
    #[error("session accessor used outside of a SessionProvider")]
    MissingProvider,
}

/// Motivo por el que no se pudo restaurar la sesión persistida. Nunca llega
/// al llamador: la hidratación lo loguea, borra las claves y arranca sin sesión.
#[derive(Debug, thiserror::Error)]
pub enum HydrationCorruption {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("stored user is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("stored user is not a JSON object")]
    NotARecord,

    #[error("partial session in storage, '{missing}' is absent")]
    Partial { missing: String },
}

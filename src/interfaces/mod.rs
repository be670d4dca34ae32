// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod integrity_handler;

pub use integrity_handler::{
    IntegrityEvent, IntegrityHandler, LoggingIntegrityHandler, NoOpIntegrityHandler,
};

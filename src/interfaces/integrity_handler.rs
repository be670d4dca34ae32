// ============================================================================
// Integrity Handler Interface
// Receives non-fatal data-integrity signals raised while restoring records
// ============================================================================

use crate::domain::Operation;
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Signals emitted while restoring a stored calculation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IntegrityEvent {
    /// Stored result differs from the recomputed one
    ResultMismatch {
        operation: Operation,
        operand1: Decimal,
        operand2: Decimal,
        stored: Decimal,
        computed: Decimal,
    },
}

/// Integrity handler trait for restored records
/// Implementations can log, count or collect mismatches.
pub trait IntegrityHandler: Send + Sync {
    /// Handle an integrity event
    fn on_event(&self, event: IntegrityEvent);
}

/// No-op integrity handler
pub struct NoOpIntegrityHandler;

impl IntegrityHandler for NoOpIntegrityHandler {
    fn on_event(&self, _event: IntegrityEvent) {}
}

/// Logging integrity handler
pub struct LoggingIntegrityHandler;

impl IntegrityHandler for LoggingIntegrityHandler {
    fn on_event(&self, event: IntegrityEvent) {
        match event {
            IntegrityEvent::ResultMismatch {
                operation,
                operand1,
                operand2,
                stored,
                computed,
            } => {
                tracing::warn!(
                    %operation,
                    %operand1,
                    %operand2,
                    "stored result ({}) does not match computed result ({})",
                    stored,
                    computed
                );
            },
        }
    }
}

// ============================================================================
// Domain Models Module
// Contains the calculation record and the values it is built from
// ============================================================================

pub mod calculation;
pub mod config;
pub mod operation;

pub use calculation::{CalculationData, CalculationRecord};
pub use config::{CalculatorConfig, IntegrityPolicy, DEFAULT_PRECISION};
pub use operation::Operation;

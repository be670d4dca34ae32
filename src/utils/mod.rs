// ============================================================================
// Utilities Module
// Helpers for turning raw input into validated calculator values
// ============================================================================

mod input_validator;

pub use input_validator::InputValidator;

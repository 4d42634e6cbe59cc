// All grouping functionality is in titlegroup-core
// This CLI acts as a thin wrapper around the core library

// CLI-specific modules
pub mod logging;
pub mod overrides;

// Re-export core types for convenience
pub use titlegroup_core::*;

// Re-export CLI utilities
pub use logging::init_tracing;
pub use overrides::{apply_overrides, RuleOverride};

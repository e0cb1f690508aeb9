//! Utility modules shared across the loader

pub mod env;
pub mod logging;
pub mod validation;

// Re-export commonly used items
pub use env::{env_bool, env_int, env_opt};
#[cfg(feature = "json-logging")]
pub use logging::init_json_logging;
pub use logging::{init_logging, init_logging_from_config};
pub use validation::{ensure, ensure_fmt};

//! Bootstrap pipeline
//!
//! Sequences asset retrieval and module initialization, and defines the
//! initializer contract the host supplies.

pub mod initializer;
pub mod orchestrator;

pub use initializer::{FnInitializer, InitializeError, Initializer};
pub use orchestrator::{bootstrap_from_config, BootstrapError, Bootstrapper};

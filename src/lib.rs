// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod input;
pub mod language;
pub mod logging;
pub mod metrics;
pub mod runtime;
pub mod session;
pub mod timer;

pub use error::{KeysmashError, Result};

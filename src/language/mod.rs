pub mod core;
pub mod source;

// Re-export the main types for convenience
pub use core::{Language, DEFAULT_LANGUAGE};
pub use source::{CyclingWords, WordSource};

// Wakeguard library - Public API

// Re-export error types
pub mod error;
pub use error::{Result, WakeguardError};

// Module declarations
pub mod core;

// Initialize logging
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}

// ww3rs/src/lib.rs

pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod rules;

// Re-export commonly used types
pub use catalog::catalog;
pub use config::BundleConfig;

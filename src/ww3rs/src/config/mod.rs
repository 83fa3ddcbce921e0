// ww3rs/src/config/mod.rs

pub mod bundle;

pub use bundle::BundleConfig;

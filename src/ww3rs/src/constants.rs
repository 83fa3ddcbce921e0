// ww3rs/src/constants.rs

/// Bundle file looked up in the current directory when `--config` is not given.
pub const DEFAULT_CONFIG_NAME: &str = "ww3rs.yml";

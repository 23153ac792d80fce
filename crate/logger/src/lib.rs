pub use log_utils::{LoggingConfig, log_init, log_init_with_config};

pub mod log_utils;

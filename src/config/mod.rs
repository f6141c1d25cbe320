mod defaults;
mod loader;
mod types;
mod validation;

pub use loader::{load_config, ConfigError};
pub use validation::validate_config;
pub use types::*;

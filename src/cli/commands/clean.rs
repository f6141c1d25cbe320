use std::path::Path;

use log::{error, info};

use crate::config;
use crate::directory;

/// Handle the clean command
pub fn handle_clean_command(project_root: &Path) -> i32 {
    let config = match config::load_config(project_root) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config: {}", e);
            return 1;
        }
    };

    let output = config.output_path();
    info!("Cleaning site at {}", output.display());
    match directory::clean_dir(&output) {
        Ok(()) => {
            info!("Site cleaned successfully");
            0
        }
        Err(e) => {
            error!("Failed to clean {}: {}", output.display(), e);
            1
        }
    }
}

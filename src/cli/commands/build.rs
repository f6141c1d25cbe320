use std::path::PathBuf;

use log::{error, info};

use crate::builder::{BuildOptions, SiteBuilder};
use crate::cli::types::BuildArgs;

/// Handle the build command
pub fn handle_build_command(args: &BuildArgs, project_root: PathBuf) -> i32 {
    let options = BuildOptions {
        include_drafts: args.drafts,
        include_future: args.future,
        include_expired: args.expired,
        output_dir: args.destination.clone(),
        base_url: args.base_url.clone(),
        project_root,
        verbose: args.verbose,
        minify: args.minify,
    };

    let builder = match SiteBuilder::load(options) {
        Ok(builder) => builder,
        Err(e) => {
            error!("Failed to load config: {}", e);
            return 1;
        }
    };

    info!("Building site...");
    match builder.build() {
        Ok(result) => {
            info!(
                "Site built successfully at {} ({} pages, {} bytes)",
                builder.config().output_path().display(),
                result.pages_rendered,
                result.output_size
            );
            0
        }
        Err(e) => {
            error!("Failed to build site: {}", e);
            1
        }
    }
}

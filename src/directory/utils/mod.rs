mod cleaning;
mod file_operations;

pub use cleaning::clean_dir;
pub use file_operations::{copy_dir, copy_file, output_path_for_url, CopyStats};

mod values;

pub use values::{metadata_to_liquid, yaml_to_liquid};

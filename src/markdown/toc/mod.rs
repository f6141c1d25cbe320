mod generator;

pub use generator::{generate_toc, Heading};

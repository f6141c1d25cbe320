//! pagewright: a static site generator for Markdown content and Liquid layouts.
//!
//! The binary is a thin wrapper over [`cli::run`]; [`builder::SiteBuilder`]
//! drives a build when used as a library.

pub mod ancillary;
pub mod builder;
pub mod cli;
pub mod collections;
pub mod config;
pub mod directory;
pub mod front_matter;
pub mod layout;
pub mod liquid;
pub mod markdown;
pub mod utils;

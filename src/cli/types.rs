use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Main CLI parser structure
#[derive(Parser, Debug)]
#[command(name = "pagewright")]
#[command(about = "Static site generator for Markdown content and Liquid layouts", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Project root holding the configuration file (defaults to ./)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub source: Option<PathBuf>,

    /// Enable verbose debugging
    #[arg(short = 'g', long, default_value_t = false, global = true)]
    pub debug: bool,
}

/// Subcommands for the CLI
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build your site
    #[command(alias = "b")]
    Build(BuildArgs),

    /// Empty the output directory without building
    Clean,
}

#[derive(Args, Debug, Default, Clone)]
pub struct BuildArgs {
    /// Render pages marked as drafts
    #[arg(long, default_value_t = false)]
    pub drafts: bool,

    /// Render pages dated in the future
    #[arg(long, default_value_t = false)]
    pub future: bool,

    /// Render pages past their expiry date
    #[arg(long, default_value_t = false)]
    pub expired: bool,

    /// Destination directory (overrides output_dir)
    #[arg(short, long, value_name = "DIR")]
    pub destination: Option<PathBuf>,

    /// Base URL the site is published under (overrides base_url)
    #[arg(short, long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Print verbose output
    #[arg(short = 'V', long, default_value_t = false)]
    pub verbose: bool,

    /// Silence output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Ask output collaborators to minify
    #[arg(long, default_value_t = false)]
    pub minify: bool,
}

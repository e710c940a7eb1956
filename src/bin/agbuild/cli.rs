//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// agbuild - export native build information for the Android Gradle plugin
#[derive(Parser)]
#[command(name = "agbuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write android_gradle_build.json to the top-level output directory
    Export(ExportArgs),

    /// Show the exported compile flags of a target's sources
    Flags(FlagsArgs),
}

#[derive(Args)]
pub struct ExportArgs {
    /// Path to the build graph description (defaults to build-graph.toml)
    #[arg(long, value_name = "PATH", env = "AGBUILD_GRAPH")]
    pub graph: Option<PathBuf>,

    /// Write compact JSON instead of pretty-printed JSON
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args)]
pub struct FlagsArgs {
    /// Target name
    pub target: String,

    /// Path to the build graph description (defaults to build-graph.toml)
    #[arg(long, value_name = "PATH", env = "AGBUILD_GRAPH")]
    pub graph: Option<PathBuf>,
}

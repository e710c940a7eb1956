//! Global context - working directory and configuration locations.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::graph::{find_graph_file, GRAPH_FILE_NAME};
use crate::util::config::{global_config_path, load_config, project_config_path, Config};

/// Global context containing the working directory and derived paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Whether to use verbose output
    verbose: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext for the process working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(GlobalContext {
            cwd,
            verbose: false,
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        GlobalContext {
            cwd,
            verbose: false,
        }
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Resolve the graph description to use.
    ///
    /// An explicit path is taken relative to the working directory; otherwise
    /// `build-graph.toml` is searched from the working directory upward.
    pub fn graph_path(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(self.cwd.join(path));
        }

        match find_graph_file(&self.cwd) {
            Some(path) => Ok(path),
            None => bail!(
                "could not find `{}` in `{}` or any parent directory\n\
                 help: pass the graph description with `--graph <PATH>`",
                GRAPH_FILE_NAME,
                self.cwd.display()
            ),
        }
    }

    /// Load the merged global and project configuration.
    ///
    /// The project configuration lives next to the graph description.
    pub fn config(&self, graph_path: &Path) -> Config {
        let project_root = graph_path.parent().unwrap_or(&self.cwd);
        load_config(
            global_config_path().as_deref(),
            &project_config_path(project_root),
        )
    }
}

// Copyright 2025 Cowboy AI, LLC.

//! Workflow definition loading
//!
//! Definition files are named relative to the addons path: the first base
//! directory holding a regular file with that name wins.

use crate::errors::{WorkflowError, WorkflowResult};
use crate::workflow::WorkflowDefinition;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Finds and parses definition files below a list of base directories
#[derive(Debug, Clone, Default)]
pub struct DefinitionLoader {
    search_paths: Vec<PathBuf>,
}

impl DefinitionLoader {
    /// Create a loader searching the given base directories in order
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    /// Base directories, in search order
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Resolve a definition file name to an existing path
    ///
    /// Absolute names are checked as-is, without searching any base
    /// directory.
    pub fn resolve(&self, file: &str) -> WorkflowResult<PathBuf> {
        let candidate = Path::new(file);
        if candidate.is_absolute() {
            if candidate.is_file() {
                return Ok(candidate.to_path_buf());
            }
            return Err(WorkflowError::DefinitionNotFound {
                file: file.to_string(),
                searched: Vec::new(),
            });
        }

        self.search_paths
            .iter()
            .map(|base| base.join(candidate))
            .find(|path| path.is_file())
            .ok_or_else(|| WorkflowError::DefinitionNotFound {
                file: file.to_string(),
                searched: self.search_paths.clone(),
            })
    }

    /// Resolve, read and parse a definition file
    pub fn load(&self, file: &str) -> WorkflowResult<WorkflowDefinition> {
        let path = self.resolve(file)?;
        debug!("Loading workflow definition {} from {}", file, path.display());

        let yaml = fs::read_to_string(&path).map_err(|e| WorkflowError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let definition = WorkflowDefinition::from_yaml_str(&yaml, &path.display().to_string())?;
        debug!(
            "Loaded workflow {}: {} states, {} transitions",
            file,
            definition.state_count(),
            definition.transition_count()
        );
        Ok(definition)
    }
}

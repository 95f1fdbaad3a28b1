//! Workspace: the set of program IDLs a project has built.
//!
//! IDLs live as `<root>/target/idl/<program>.json`. Lookups fold case and
//! ignore `_` and `-`, so `Supercollab`, `supercollab` and `super_collab` all
//! resolve the same program.

use crate::error::ClientError;
use crate::program::Program;
use crate::provider::Provider;
use shared_types::{normalize_name, Idl};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Relative location of the IDL directory under a project root.
pub const IDL_DIR: &str = "target/idl";

/// Program IDLs loaded from disk.
#[derive(Debug, Clone)]
pub struct Workspace {
    dir: PathBuf,
    idls: Vec<Idl>,
}

impl Workspace {
    /// Loads the IDLs of the project rooted at `root`.
    pub fn discover(root: impl AsRef<Path>) -> Result<Self, ClientError> {
        Self::load(root.as_ref().join(IDL_DIR))
    }

    /// Loads every `*.json` file in `dir` as an IDL, in file name order.
    pub fn load(dir: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let dir = dir.into();
        let entries = fs::read_dir(&dir)
            .map_err(|e| ClientError::Workspace(format!("{}: {e}", dir.display())))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| ClientError::Workspace(format!("{}: {e}", dir.display())))?
                .path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut idls = Vec::with_capacity(paths.len());
        for path in paths {
            let text = fs::read_to_string(&path)
                .map_err(|e| ClientError::Workspace(format!("{}: {e}", path.display())))?;
            let idl = Idl::from_json(&text)
                .map_err(|e| ClientError::Workspace(format!("{}: {e}", path.display())))?;
            debug!(program = idl.name(), path = %path.display(), "loaded IDL");
            idls.push(idl);
        }

        info!(dir = %dir.display(), programs = idls.len(), "workspace loaded");
        Ok(Self { dir, idls })
    }

    /// Workspace built from IDLs already in memory.
    pub fn from_idls(idls: Vec<Idl>) -> Self {
        Self {
            dir: PathBuf::new(),
            idls,
        }
    }

    /// Directory the IDLs were read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn program_names(&self) -> Vec<&str> {
        self.idls.iter().map(Idl::name).collect()
    }

    /// The IDL named `name`, ignoring case and separators.
    pub fn idl(&self, name: &str) -> Option<&Idl> {
        let key = normalize_name(name);
        self.idls.iter().find(|idl| normalize_name(idl.name()) == key)
    }

    /// A handle to the program named `name`, bound to `provider`.
    pub fn program(&self, name: &str, provider: Arc<Provider>) -> Result<Program, ClientError> {
        let idl = self
            .idl(name)
            .ok_or_else(|| ClientError::ProgramNotFound(name.to_string()))?;
        Ok(Program::new(idl.clone(), provider))
    }
}

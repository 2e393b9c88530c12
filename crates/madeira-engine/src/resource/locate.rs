use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;

/// Where the library looks for a requested resource name.
///
/// Candidates are tried in order and the first existing file wins:
/// 1. `<root>/<dir>/<name>` for each entry of `directories`
/// 2. `<name>` itself, when `literal_fallback` is set
///
/// `root` defaults to the working directory at lookup time. The default
/// directories are `Resources` and `../../Resources`, the latter covering
/// build outputs nested two levels below a project root.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchPaths {
    pub root: Option<PathBuf>,
    pub directories: Vec<PathBuf>,
    pub literal_fallback: bool,
}

impl Default for SearchPaths {
    fn default() -> Self {
        Self {
            root: None,
            directories: vec![
                PathBuf::from(RESOURCES_DIR),
                Path::new("..").join("..").join(RESOURCES_DIR),
            ],
            literal_fallback: true,
        }
    }
}

/// Name of the conventional resources folder.
pub const RESOURCES_DIR: &str = "Resources";

impl SearchPaths {
    /// Search rooted at `root` instead of the working directory.
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::default()
        }
    }

    /// Candidate paths for `name`, in lookup order.
    pub fn candidates(&self, name: &str) -> Vec<PathBuf> {
        let root = self.root.clone().or_else(|| std::env::current_dir().ok());

        let mut out = Vec::with_capacity(self.directories.len() + 1);
        if let Some(root) = &root {
            out.extend(self.directories.iter().map(|dir| root.join(dir).join(name)));
        }

        if self.literal_fallback {
            // Relative names are relative to the root, which is the working
            // directory unless configured otherwise.
            out.push(match &self.root {
                Some(root) => root.join(name),
                None => PathBuf::from(name),
            });
        }
        out
    }

    /// Resolves `name` to the first candidate that exists as a file.
    pub fn locate(&self, name: &str) -> Result<PathBuf, Error> {
        let candidates = self.candidates(name);

        match candidates.iter().find(|path| path.is_file()) {
            Some(found) => Ok(found.clone()),
            None => Err(Error::ResourceNotFound {
                name: name.to_string(),
                candidates,
            }),
        }
    }
}

//! Shared command plumbing: project loading and component discovery.

use crate::error::{CliError, Result, ResultExt};
use fob_mixins::{discovery, normalize_id, ConfigDiscovery, MixinTransformer};
use path_clean::PathClean;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Directories never searched for components.
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

/// A resolved project: canonical root plus its compiled rules.
#[derive(Debug)]
pub struct Project {
    pub root: PathBuf,
    pub transformer: MixinTransformer,
}

impl Project {
    /// Canonicalizes `root`, loads the config (explicit or discovered) and
    /// compiles the rules.
    pub fn load(root: &Path, config: Option<&Path>) -> Result<Self> {
        let root = fs::canonicalize(root).with_path(root)?;

        let options = match config {
            Some(path) => {
                let path = resolve_against(&root, path);
                debug!("Loading mixin config from {}", path.display());
                discovery::load_from(&path)?
            }
            None => ConfigDiscovery::new(&root).load()?,
        };

        let transformer = MixinTransformer::from_options(&options, &root)?;
        debug!(
            "Resolved {} rule(s) against {}",
            transformer.rules().len(),
            root.display()
        );

        Ok(Self { root, transformer })
    }

    /// Module id for a file under the project.
    pub fn id_for(&self, path: &Path) -> Result<String> {
        path.to_str()
            .map(normalize_id)
            .ok_or_else(|| CliError::NonUtf8Path(path.to_path_buf()))
    }

    /// Path relative to the root, for display and output layout.
    pub fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    /// Every `.vue` file under the root, sorted, skipping dependency and VCS
    /// directories plus `exclude_dir`.
    pub fn components(&self, exclude_dir: Option<&Path>) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !is_skipped(entry, exclude_dir));

        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "vue")
            {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }
}

/// Joins a relative path onto `root` and removes `.`/`..` segments.
pub fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    root.join(path).clean()
}

fn is_skipped(entry: &DirEntry, exclude_dir: Option<&Path>) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    SKIPPED_DIRS.contains(&name.as_ref()) || exclude_dir.is_some_and(|dir| entry.path() == dir)
}

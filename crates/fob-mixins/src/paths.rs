//! Path canonicalisation shared by rule resolution and hosts.
//!
//! Rules and file ids are compared as strings, so both sides must go through
//! the same normalisation: absolute, `.`/`..` segments removed, and `/` as the
//! only separator.

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::error::ConfigError;

/// Resolves `relative` against `root` and returns the canonical form.
///
/// Absolute inputs ignore `root`, like `path.resolve` does.
pub fn resolve(root: &Path, relative: &str) -> Result<String, ConfigError> {
    let joined: PathBuf = root.join(normalize_separators(relative)).clean();
    let text = joined
        .to_str()
        .ok_or_else(|| ConfigError::NonUtf8Path(joined.clone()))?;
    Ok(normalize_separators(text))
}

/// Normalizes a file id handed in by a host so it can be matched.
pub fn normalize_id(id: &str) -> String {
    normalize_separators(id)
}

fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

//! Application service — GRUB module hashing.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::ModuleStore;
use crate::domain::DigestAlgorithm;
use crate::domain::manifest::ModuleDigest;

/// Hash every module under `dir` whose file name ends with `suffix`.
///
/// Order follows [`ModuleStore::list_modules`].
///
/// # Errors
///
/// Returns an error if the directory cannot be walked or a module cannot be
/// read.
pub fn scan_modules(
    store: &impl ModuleStore,
    dir: &Path,
    suffix: &str,
    algorithm: DigestAlgorithm,
) -> Result<Vec<ModuleDigest>> {
    store
        .list_modules(dir, suffix)?
        .into_iter()
        .map(|path| {
            let digest = store.hash_module(&path, algorithm)?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            tracing::debug!(module = %path.display(), %digest, "hashed module");
            Ok(ModuleDigest { file_name, digest })
        })
        .collect()
}

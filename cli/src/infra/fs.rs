//! Filesystem infrastructure — module tree scanning and manifest output.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::application::ports::{ManifestSink, ModuleStore};
use crate::domain::{DigestAlgorithm, GeneratorError};

/// Production filesystem implementation of `ModuleStore`.
pub struct LocalFs;

impl ModuleStore for LocalFs {
    fn list_modules(&self, dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
        // walkdir reports a missing root only once iteration starts; check up
        // front so the error names the directory instead of a child entry.
        let meta = std::fs::metadata(dir).map_err(|source| GeneratorError::Input {
            path: dir.to_path_buf(),
            source,
        })?;
        if !meta.is_dir() {
            return Err(GeneratorError::Input {
                path: dir.to_path_buf(),
                source: std::io::Error::other("not a directory"),
            }
            .into());
        }

        let mut modules = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.with_context(|| format!("walking {}", dir.display()))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if entry.file_name().to_string_lossy().ends_with(suffix) {
                modules.push(path.to_path_buf());
            }
        }
        Ok(modules)
    }

    fn hash_module(&self, path: &Path, algorithm: DigestAlgorithm) -> Result<String> {
        hash_file(path, algorithm)
    }
}

/// Compute the hex digest of a file.
///
/// Streams the file through the hasher instead of loading it whole.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn hash_file(path: &Path, algorithm: DigestAlgorithm) -> Result<String> {
    let input = |source| GeneratorError::Input {
        path: path.to_path_buf(),
        source,
    };
    let file = std::fs::File::open(path).map_err(input)?;
    Ok(algorithm.digest_reader(file).map_err(input)?)
}

/// Writes manifests into an existing output directory.
///
/// Each file is written to a temporary sibling and renamed into place, so a
/// reader never observes a half-written manifest.
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

fn output_error(path: &Path, source: std::io::Error) -> GeneratorError {
    GeneratorError::Output {
        path: path.to_path_buf(),
        source,
    }
}

impl ManifestSink for DirSink {
    fn ensure_writable(&self) -> Result<()> {
        let meta = std::fs::metadata(&self.dir).map_err(|e| output_error(&self.dir, e))?;
        if !meta.is_dir() {
            return Err(output_error(&self.dir, std::io::Error::other("not a directory")).into());
        }
        Ok(())
    }

    fn write_manifest(&self, name: &str, contents: &[u8]) -> Result<PathBuf> {
        let path = self.dir.join(name);
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)
            .map_err(|e| output_error(&path, e))?;
        tmp.write_all(contents)
            .and_then(|()| tmp.flush())
            .map_err(|e| output_error(&path, e))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))
                .map_err(|e| output_error(&path, e))?;
        }
        tmp.persist(&path)
            .map_err(|e| output_error(&path, e.error))?;
        Ok(path)
    }
}

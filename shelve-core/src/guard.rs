use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{error::SortError, queue::normalize_extension};

/// Resolves user supplied folder and file names into locations that are
/// guaranteed to stay beneath the root.
#[derive(Clone, Debug)]
pub struct PathGuard {
    root: PathBuf,
    extension: String,
}

impl PathGuard {
    pub fn new(root: &Path, extension: &str) -> Result<Self, SortError> {
        Ok(Self {
            root: root.canonicalize()?,
            extension: normalize_extension(extension),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `input` relative to root and creates the directory if it is
    /// missing. Lexical checks run first, containment of the canonical path
    /// second.
    #[tracing::instrument(skip(self))]
    pub fn resolve(&self, input: &str) -> Result<PathBuf, SortError> {
        let relative = sanitize_folder(input)?;
        let resolved = resolve_existing_prefix(&self.root, &relative)?;
        self.ensure_contained(input, &resolved)?;

        fs::create_dir_all(&resolved)?;

        // symlinks created between the check and create_dir_all
        let created = resolved.canonicalize()?;
        self.ensure_contained(input, &created)?;

        tracing::trace!("resolved {:?} to {:?}", input, created);

        Ok(created)
    }

    pub fn safe_file_name(&self, input: &str) -> Result<String, SortError> {
        let name = input.trim();
        if name.is_empty() {
            return Err(SortError::InvalidInput("file name is empty".to_string()));
        }

        if name.contains(['/', '\\']) {
            return Err(SortError::PathEscape(format!(
                "file name '{}' contains a path separator",
                name
            )));
        }

        if has_extension(name, &self.extension) {
            Ok(name.to_string())
        } else {
            Ok(format!("{}.{}", name, self.extension))
        }
    }

    fn ensure_contained(&self, input: &str, path: &Path) -> Result<(), SortError> {
        if path == self.root {
            Err(SortError::InvalidInput(format!(
                "'{}' resolves to the root folder itself",
                input
            )))
        } else if path.starts_with(&self.root) {
            Ok(())
        } else {
            Err(SortError::PathEscape(format!(
                "'{}' resolves outside of the root folder",
                input
            )))
        }
    }
}

/// Lexical validation of a relative folder. Returns the cleaned relative path
/// without touching the file system.
pub fn sanitize_folder(input: &str) -> Result<PathBuf, SortError> {
    let folder = input.trim().replace('\\', "/");
    if folder.is_empty() {
        return Err(SortError::InvalidInput("folder is empty".to_string()));
    }

    if folder.starts_with('/') {
        return Err(SortError::PathEscape(format!(
            "'{}' must be relative to the root folder",
            input
        )));
    }

    if folder.contains(':') {
        return Err(SortError::PathEscape(format!(
            "'{}' must not contain a drive or scheme",
            input
        )));
    }

    let segments: Vec<_> = folder
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();

    if segments.iter().any(|segment| *segment == "..") {
        return Err(SortError::PathEscape(format!(
            "'{}' must not contain '..'",
            input
        )));
    }

    if segments.is_empty() {
        return Err(SortError::InvalidInput(format!(
            "'{}' does not name a folder",
            input
        )));
    }

    Ok(segments.iter().collect())
}

/// Joins `relative` onto `root` while resolving every segment that already
/// exists, so symlinks are followed before the containment check. Segments
/// after the first missing one are appended as they are.
fn resolve_existing_prefix(root: &Path, relative: &Path) -> Result<PathBuf, SortError> {
    let mut resolved = root.to_path_buf();
    let mut components = relative.components();
    while let Some(component) = components.next() {
        let candidate = resolved.join(component);
        if fs::symlink_metadata(&candidate).is_err() {
            let remaining = components.as_path();
            resolved = if remaining.as_os_str().is_empty() {
                candidate
            } else {
                candidate.join(remaining)
            };
            break;
        }

        resolved = candidate.canonicalize()?;
    }

    Ok(resolved)
}

fn has_extension(name: &str, extension: &str) -> bool {
    let suffix = format!(".{}", extension);
    name.len() >= suffix.len()
        && name
            .get(name.len() - suffix.len()..)
            .is_some_and(|end| end.eq_ignore_ascii_case(&suffix))
}

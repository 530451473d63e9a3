use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    error::SortError,
    guard::PathGuard,
    queue::{clamp, FileQueue, Listing},
    recents::{normalize_folder, RecentFolders, RecentStore},
};

pub const TRASH_FOLDER: &str = "_trash";

/// Where a move should go. A non-empty custom folder wins over the preset.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Destination(String);

impl Destination {
    pub fn from_inputs(custom: Option<&str>, preset: Option<&str>) -> Result<Self, SortError> {
        let custom = custom.map(str::trim).filter(|value| !value.is_empty());
        let preset = preset.map(str::trim).filter(|value| !value.is_empty());

        match custom.or(preset) {
            Some(folder) => Ok(Self(folder.to_string())),
            None => Err(SortError::InvalidInput(
                "no destination provided".to_string(),
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Change {
    Renamed { from: String, to: String },
    Moved { name: String, to: PathBuf },
    Trashed { name: String, to: PathBuf },
}

/// Result of an action: the position to continue at and what happened.
/// `change` is `None` when the queue was empty or the action was a no-op.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Outcome {
    pub resume: usize,
    pub change: Option<Change>,
}

impl Outcome {
    fn unchanged(resume: usize) -> Self {
        Self {
            resume,
            change: None,
        }
    }
}

pub struct Sorter<S: RecentStore> {
    guard: PathGuard,
    queue: FileQueue,
    store: S,
}

impl<S: RecentStore> Sorter<S> {
    pub fn new(root: &Path, extension: &str, store: S) -> Result<Self, SortError> {
        let guard = PathGuard::new(root, extension)?;
        let queue = FileQueue::new(guard.root(), extension);

        Ok(Self {
            guard,
            queue,
            store,
        })
    }

    pub fn root(&self) -> &Path {
        self.queue.root()
    }

    pub fn queue(&self) -> &FileQueue {
        &self.queue
    }

    pub fn listing(&self, requested: usize) -> Result<Listing, SortError> {
        self.queue.listing(requested)
    }

    /// Renames the file at `index` within root. Renaming a file to its
    /// unchanged name succeeds without touching the file system.
    #[tracing::instrument(skip(self))]
    pub fn rename(&self, index: usize, new_name: &str) -> Result<Outcome, SortError> {
        let files = self.queue.list()?;
        let (index, old) = match select(&files, index) {
            Some(it) => it,
            None => return Ok(Outcome::unchanged(0)),
        };

        let new = self.guard.safe_file_name(new_name)?;
        if new == old {
            tracing::debug!("rename of {:?} to its own name skipped", old);
            return Ok(Outcome::unchanged(index));
        }

        let source = self.root().join(&old);
        let target = self.root().join(&new);
        if is_occupied(&target) {
            return Err(SortError::Conflict(format!(
                "'{}' already exists",
                new
            )));
        }

        fs::rename(&source, &target)?;

        tracing::info!("renamed {:?} to {:?}", old, new);

        Ok(Outcome {
            resume: index,
            change: Some(Change::Renamed { from: old, to: new }),
        })
    }

    /// Moves the file at `index` into the destination folder below root and
    /// records the destination as most recent folder.
    #[tracing::instrument(skip(self))]
    pub fn move_file(&self, index: usize, destination: &Destination) -> Result<Outcome, SortError> {
        let outcome = self.relocate(index, destination.as_str())?;
        if let Some((name, to)) = outcome.1 {
            self.record(destination.as_str());

            return Ok(Outcome {
                resume: outcome.0,
                change: Some(Change::Moved { name, to }),
            });
        }

        Ok(Outcome::unchanged(outcome.0))
    }

    #[tracing::instrument(skip(self))]
    pub fn trash(&self, index: usize) -> Result<Outcome, SortError> {
        let outcome = self.relocate(index, TRASH_FOLDER)?;
        let change = outcome
            .1
            .map(|(name, to)| Change::Trashed { name, to });

        Ok(Outcome {
            resume: outcome.0,
            change,
        })
    }

    /// Recent folders as persisted. Failing to read the store yields an empty
    /// list.
    pub fn recents(&self) -> RecentFolders {
        match self.store.load() {
            Ok(entries) => RecentFolders::from_entries(entries),
            Err(error) => {
                tracing::warn!("loading recent folders failed: {:?}", error);
                RecentFolders::default()
            }
        }
    }

    pub fn clear_recents(&self) -> RecentFolders {
        let mut recents = self.recents();
        recents.clear();
        self.persist(&recents);
        recents
    }

    fn record(&self, folder: &str) {
        let mut recents = self.recents();
        recents.push(&normalize_folder(folder));
        self.persist(&recents);
    }

    fn persist(&self, recents: &RecentFolders) {
        if let Err(error) = self.store.save(recents.entries()) {
            tracing::warn!("saving recent folders failed: {:?}", error);
        }
    }

    fn relocate(
        &self,
        index: usize,
        folder: &str,
    ) -> Result<(usize, Option<(String, PathBuf)>), SortError> {
        let files = self.queue.list()?;
        let (index, name) = match select(&files, index) {
            Some(it) => it,
            None => return Ok((0, None)),
        };

        let directory = self.guard.resolve(folder)?;
        let source = self.root().join(&name);
        let target = directory.join(&name);
        if is_occupied(&target) {
            return Err(SortError::Conflict(format!(
                "'{}' already exists in '{}'",
                name, folder
            )));
        }

        move_path(&source, &target)?;

        tracing::info!("moved {:?} to {:?}", name, directory);

        let resume = resume_after_removal(index, files.len(), self.queue.list());
        Ok((resume, Some((name, directory))))
    }
}

fn select(files: &[String], index: usize) -> Option<(usize, String)> {
    if files.is_empty() {
        return None;
    }

    let index = clamp(index, files.len());
    Some((index, files[index].clone()))
}

/// Position to continue at once a file left root. The move already happened,
/// so a failing re-list falls back to the count before it minus one.
fn resume_after_removal(
    index: usize,
    before: usize,
    remaining: Result<Vec<String>, SortError>,
) -> usize {
    let len = match remaining {
        Ok(files) => files.len(),
        Err(error) => {
            tracing::warn!("listing after move failed: {:?}", error);
            before.saturating_sub(1)
        }
    };

    clamp(index, len)
}

fn is_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn move_path(source: &Path, target: &Path) -> Result<(), io::Error> {
    match fs::rename(source, target) {
        Ok(()) => Ok(()),
        Err(error) if is_cross_device(&error) => {
            tracing::warn!("rename across devices, falling back to copy: {:?}", error);
            copy_and_remove(source, target)
        }
        Err(error) => Err(error),
    }
}

fn is_cross_device(error: &io::Error) -> bool {
    error.kind() == io::ErrorKind::CrossesDevices
}

fn copy_and_remove(source: &Path, target: &Path) -> Result<(), io::Error> {
    if let Err(error) = fs::copy(source, target) {
        let _ = fs::remove_file(target);
        return Err(error);
    }

    if let Err(error) = fs::remove_file(source) {
        let _ = fs::remove_file(target);
        return Err(error);
    }

    Ok(())
}

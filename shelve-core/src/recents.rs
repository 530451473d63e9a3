use std::{
    fs::{self, File, OpenOptions},
    path::{Path, PathBuf},
};

use crate::error::SortError;

pub const MAX_RECENTS: usize = 12;

/// Destination folders used for moves, most recent first, without
/// duplicates and never longer than [`MAX_RECENTS`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RecentFolders {
    entries: Vec<String>,
}

impl RecentFolders {
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = Vec::new();
        for entry in entries {
            let entry = entry.as_ref().trim();
            if entry.is_empty() || result.iter().any(|known| known == entry) {
                continue;
            }

            result.push(entry.to_string());
            if result.len() == MAX_RECENTS {
                break;
            }
        }

        Self { entries: result }
    }

    pub fn push(&mut self, folder: &str) {
        let folder = normalize_folder(folder);
        if folder.is_empty() {
            return;
        }

        self.entries.retain(|entry| entry != &folder);
        self.entries.insert(0, folder);
        self.entries.truncate(MAX_RECENTS);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn front(&self) -> Option<&str> {
        self.entries.first().map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn normalize_folder(folder: &str) -> String {
    folder.trim().replace('\\', "/")
}

/// Read-all/write-all persistence for the recent folders.
pub trait RecentStore {
    fn load(&self) -> Result<Vec<String>, SortError>;
    fn save(&self, entries: &[String]) -> Result<(), SortError>;
}

/// Stores one folder per csv record.
#[derive(Clone, Debug)]
pub struct CsvRecentStore {
    path: PathBuf,
}

impl CsvRecentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecentStore for CsvRecentStore {
    #[tracing::instrument(skip(self), fields(path = ?self.path))]
    fn load(&self) -> Result<Vec<String>, SortError> {
        if !self.path.exists() {
            tracing::debug!("recents file does not exist");
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut entries = Vec::new();
        for result in reader.records() {
            let record = result?;
            if let Some(folder) = record.get(0) {
                entries.push(folder.to_string());
            }
        }

        tracing::trace!("recents file read");

        Ok(entries)
    }

    #[tracing::instrument(skip(self, entries), fields(path = ?self.path))]
    fn save(&self, entries: &[String]) -> Result<(), SortError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;

        let mut writer = csv::Writer::from_writer(file);
        for folder in entries.iter().take(MAX_RECENTS) {
            writer.write_record([folder])?;
        }

        writer.flush()?;

        tracing::trace!("recents file written");

        Ok(())
    }
}

pub fn get_recents_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|cache_dir| cache_dir.join("shelve").join("recents"))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn push_moves_existing_entry_to_front() {
        let mut recents = RecentFolders::from_entries(["a", "b", "c"]);
        recents.push("c");

        assert_eq!(["c", "a", "b"], recents.entries());
    }

    #[test]
    fn push_keeps_twelve_most_recent() {
        let mut recents = RecentFolders::default();
        for index in 0..13 {
            recents.push(&format!("folder{}", index));
        }

        assert_eq!(MAX_RECENTS, recents.len());
        assert_eq!(Some("folder12"), recents.front());
        assert_eq!(Some("folder1"), recents.get(11));
        assert!(!recents.entries().contains(&"folder0".to_string()));
    }

    #[test]
    fn push_normalizes_separators_and_ignores_blank() {
        let mut recents = RecentFolders::default();
        recents.push(" Bills\\2026 ");
        recents.push("   ");

        assert_eq!(["Bills/2026"], recents.entries());
    }

    #[test]
    fn from_entries_dedups_and_drops_blank() {
        let recents = RecentFolders::from_entries([" a ", "", "b", "a", "  "]);

        assert_eq!(["a", "b"], recents.entries());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut recents = RecentFolders::from_entries(["a"]);
        recents.clear();
        recents.clear();

        assert!(recents.is_empty());
    }

    #[test]
    fn csv_store_round_trips_entries() {
        let dir = tempdir().unwrap();
        let store = CsvRecentStore::new(dir.path().join("nested").join("recents"));
        let entries = vec!["Bills/2026".to_string(), "with, comma".to_string()];

        store.save(&entries).unwrap();

        assert_eq!(entries, store.load().unwrap());
    }

    #[test]
    fn csv_store_loads_missing_file_as_empty() {
        let dir = tempdir().unwrap();
        let store = CsvRecentStore::new(dir.path().join("recents"));

        assert!(store.load().unwrap().is_empty());
    }
}

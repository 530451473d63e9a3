use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::SortError;

#[derive(Clone, Debug)]
pub struct FileQueue {
    root: PathBuf,
    extension: String,
}

/// A snapshot of the queue at one point in time. The position fields are
/// always valid for `files` (all zero when the queue is empty).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Listing {
    pub files: Vec<String>,
    pub index: usize,
    pub current: Option<String>,
    pub previous: usize,
    pub next: usize,
}

impl Listing {
    pub fn new(files: Vec<String>, requested: usize) -> Self {
        let index = clamp(requested, files.len());
        let (previous, next) = neighbors(index, files.len());
        let current = files.get(index).cloned();

        Self {
            files,
            index,
            current,
            previous,
            next,
        }
    }

    pub fn select(self, requested: usize) -> Self {
        Self::new(self.files, requested)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileQueue {
    pub fn new(root: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            root: root.into(),
            extension: normalize_extension(extension),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Eligible file names directly under root in ascending byte order.
    #[tracing::instrument(skip(self), fields(root = ?self.root))]
    pub fn list(&self) -> Result<Vec<String>, SortError> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() || !self.is_eligible(&path) {
                continue;
            }

            match path.file_name().and_then(|name| name.to_str()) {
                Some(name) => files.push(name.to_owned()),
                None => tracing::warn!("skipping file name that is not valid utf-8: {:?}", path),
            }
        }

        files.sort();

        tracing::trace!("listed {} files", files.len());

        Ok(files)
    }

    pub fn listing(&self, requested: usize) -> Result<Listing, SortError> {
        Ok(Listing::new(self.list()?, requested))
    }

    pub fn is_eligible(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }
}

pub fn clamp(requested: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        requested.min(len - 1)
    }
}

pub fn neighbors(index: usize, len: usize) -> (usize, usize) {
    let index = clamp(index, len);
    let previous = index.saturating_sub(1);
    let next = index.saturating_add(1).min(len.saturating_sub(1));
    (previous, next)
}

/// Reads a position from user input. Anything that is not a non-negative
/// integer resolves to the first position, integers too large to represent
/// saturate and get clamped to the last one later on.
pub fn parse_index(input: &str) -> usize {
    let input = input.trim();
    let digits = input.strip_prefix('+').unwrap_or(input);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }

    digits.parse::<usize>().unwrap_or(usize::MAX)
}

pub(crate) fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use proptest::prelude::*;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn list_filters_and_sorts() {
        let root = tempdir().unwrap();
        for name in ["c.pdf", "a.PDF", "b.pdf", "notes.txt", "pdf"] {
            fs::write(root.path().join(name), "x").unwrap();
        }
        fs::create_dir(root.path().join("folder.pdf")).unwrap();

        let queue = FileQueue::new(root.path(), "pdf");

        assert_eq!(vec!["a.PDF", "b.pdf", "c.pdf"], queue.list().unwrap());
    }

    #[test]
    fn list_is_not_recursive() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("sub")).unwrap();
        fs::write(root.path().join("sub").join("inner.pdf"), "x").unwrap();
        fs::write(root.path().join("outer.pdf"), "x").unwrap();

        let queue = FileQueue::new(root.path(), ".pdf");

        assert_eq!(vec!["outer.pdf"], queue.list().unwrap());
    }

    #[test]
    fn list_of_missing_root_fails() {
        let root = tempdir().unwrap();
        let queue = FileQueue::new(root.path().join("missing"), "pdf");

        assert!(matches!(
            queue.list(),
            Err(SortError::FileOperationFailed(_))
        ));
    }

    #[test]
    fn listing_clamps_requested_index() {
        let root = tempdir().unwrap();
        for name in ["a.pdf", "b.pdf", "c.pdf"] {
            fs::write(root.path().join(name), "x").unwrap();
        }

        let listing = FileQueue::new(root.path(), "pdf").listing(5).unwrap();

        assert_eq!(2, listing.index);
        assert_eq!(Some("c.pdf".to_string()), listing.current);
        assert_eq!(1, listing.previous);
        assert_eq!(2, listing.next);
    }

    #[test]
    fn listing_of_empty_root() {
        let root = tempdir().unwrap();
        let listing = FileQueue::new(root.path(), "pdf").listing(3).unwrap();

        assert_eq!(Listing::default(), listing);
    }

    #[test]
    fn select_reclamps_snapshot() {
        let listing = Listing::new(vec!["a.pdf".to_string(), "b.pdf".to_string()], 0);
        let listing = listing.select(9);

        assert_eq!(1, listing.index);
        assert_eq!(Some("b.pdf".to_string()), listing.current);
    }

    #[test]
    fn neighbors_saturate_at_bounds() {
        assert_eq!((0, 1), neighbors(0, 3));
        assert_eq!((1, 2), neighbors(2, 3));
        assert_eq!((0, 0), neighbors(0, 0));
        assert_eq!((0, 0), neighbors(0, 1));
    }

    #[test]
    fn neighbors_of_out_of_range_index_are_clamped() {
        assert_eq!((1, 2), neighbors(10, 3));
        assert_eq!((1, 2), neighbors(usize::MAX, 3));
        assert_eq!((0, 0), neighbors(usize::MAX, 0));
    }

    #[test]
    fn parse_index_treats_malformed_input_as_zero() {
        assert_eq!(0, parse_index("abc"));
        assert_eq!(0, parse_index(""));
        assert_eq!(0, parse_index("-4"));
        assert_eq!(0, parse_index("1.5"));
        assert_eq!(7, parse_index(" 7 "));
        assert_eq!(0, parse_index("-99999999999999999999"));
        assert_eq!(usize::MAX, parse_index("99999999999999999999"));
        assert_eq!(2, clamp(parse_index("99999999999999999999"), 3));
    }

    proptest! {
        #[test]
        fn prop_clamp_stays_in_bounds(index in 0usize..10_000, len in 0usize..500) {
            let clamped = clamp(index, len);
            if len == 0 {
                prop_assert_eq!(0, clamped);
            } else {
                prop_assert!(clamped < len);
            }
            prop_assert_eq!(clamped, clamp(clamped, len));
        }

        #[test]
        fn prop_neighbors_stay_in_bounds(requested in any::<usize>(), len in 1usize..500) {
            let (previous, next) = neighbors(requested, len);
            let index = clamp(requested, len);

            prop_assert!(previous < len);
            prop_assert!(next < len);
            prop_assert!(previous <= index && index <= next);
            if index == 0 {
                prop_assert_eq!(0, previous);
            }
            if index == len - 1 {
                prop_assert_eq!(len - 1, next);
            }
        }
    }
}

pub mod action;
pub mod error;
pub mod guard;
pub mod queue;
pub mod recents;

pub use action::{Change, Destination, Outcome, Sorter, TRASH_FOLDER};
pub use error::SortError;
pub use guard::PathGuard;
pub use queue::{clamp, neighbors, parse_index, FileQueue, Listing};
pub use recents::{CsvRecentStore, RecentFolders, RecentStore, MAX_RECENTS};

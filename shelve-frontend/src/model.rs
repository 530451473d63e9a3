use std::path::PathBuf;

use shelve_core::{Listing, RecentFolders};
use shelve_keymap::message::Mode;

#[derive(Debug, Default)]
pub struct Model {
    pub key_sequence: String,
    pub listing: Listing,
    pub mode: Mode,
    pub presets: Vec<String>,
    pub prompt: Prompt,
    pub recents: RecentFolders,
    pub root: PathBuf,
    pub status: Option<Status>,
}

impl Model {
    pub fn new(root: PathBuf, presets: Vec<String>) -> Self {
        Self {
            presets,
            root,
            ..Default::default()
        }
    }

    pub fn current_path(&self) -> Option<PathBuf> {
        self.listing
            .current
            .as_ref()
            .map(|current| self.root.join(current))
    }

    pub fn selected_preset(&self) -> Option<&str> {
        self.prompt
            .preset
            .and_then(|index| self.presets.get(index))
            .map(String::as_str)
    }
}

/// Text input of the rename and move prompts. `cursor` counts chars, not
/// bytes.
#[derive(Debug, Default, Eq, PartialEq)]
pub struct Prompt {
    pub cursor: usize,
    pub preset: Option<usize>,
    pub recent: Option<usize>,
    pub text: String,
}

impl Prompt {
    pub fn with_text(text: &str) -> Self {
        Self {
            cursor: text.chars().count(),
            text: text.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Status {
    Error(String),
    Information(String),
}

use std::path::PathBuf;

#[derive(Debug)]
pub struct Settings {
    pub extension: String,
    pub presets: Vec<String>,
    pub recents_path: Option<PathBuf>,
    pub root: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            extension: String::from("pdf"),
            presets: vec![
                String::from("_sorted"),
                String::from("_keep"),
                String::from("_review"),
            ],
            recents_path: None,
            root: PathBuf::from("."),
        }
    }
}

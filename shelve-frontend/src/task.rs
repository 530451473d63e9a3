use std::{
    fmt::{Debug, Display},
    sync::Arc,
};

use shelve_core::{
    Change, CsvRecentStore, Destination, Outcome, RecentStore, SortError, Sorter,
};
use shelve_keymap::message::KeySequence;
use tokio::{
    sync::mpsc::{self, Sender},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

use crate::{
    error::AppError,
    event::{Envelope, Message, MessageSource},
};

pub type SharedSorter = Arc<Sorter<CsvRecentStore>>;

#[derive(Clone, Eq, PartialEq)]
pub enum Task {
    ClearRecents,
    LoadRecents,
    Move(usize, Destination),
    Refresh(usize),
    Rename(usize, String),
    Trash(usize),
}

impl Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Task::ClearRecents => write!(f, "ClearRecents"),
            Task::LoadRecents => write!(f, "LoadRecents"),
            Task::Move(index, destination) => {
                write!(f, "Move({}, {:?})", index, destination.as_str())
            }
            Task::Refresh(index) => write!(f, "Refresh({})", index),
            Task::Rename(index, name) => write!(f, "Rename({}, {:?})", index, name),
            Task::Trash(index) => write!(f, "Trash({})", index),
        }
    }
}

impl Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt(f)
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt(f)
    }
}

/// Runs tasks one after another in arrival order. Every task touching the
/// file system runs on the blocking pool and is awaited before the next one
/// is taken, so two actions never interleave their check and mutation.
pub struct TaskManager {
    handle: Option<JoinHandle<()>>,
    sender: mpsc::UnboundedSender<Task>,
}

impl TaskManager {
    pub fn new(
        sender: Sender<Envelope>,
        sorter: SharedSorter,
        cancellation: CancellationToken,
    ) -> Self {
        let (task_sender, mut task_receiver) = mpsc::unbounded_channel::<Task>();
        let handle = tokio::spawn(async move {
            loop {
                let task = tokio::select! {
                    _ = cancellation.cancelled() => break,
                    task = task_receiver.recv() => match task {
                        Some(it) => it,
                        None => break,
                    },
                };

                tracing::debug!("handling task: {}", task);

                let id = task.to_string();
                let sorter = sorter.clone();
                let blocking = tokio::task::spawn_blocking(move || execute(sorter.as_ref(), task));
                let messages = match blocking.await {
                    Ok(it) => it,
                    Err(error) => {
                        tracing::error!("task {} did not run to completion: {:?}", id, error);
                        vec![Message::Error(format!("Task {} failed", id))]
                    }
                };

                let envelope = Envelope {
                    messages,
                    sequence: KeySequence::None,
                    source: MessageSource::Task,
                };

                tokio::select! {
                    _ = cancellation.cancelled() => break,
                    sent = sender.send(envelope) => {
                        if sent.is_err() {
                            tracing::warn!("receiver closed, dropping result of task {}", id);
                            break;
                        }
                    }
                }
            }
        });

        Self {
            handle: Some(handle),
            sender: task_sender,
        }
    }

    pub fn run(&mut self, task: Task) {
        if let Err(error) = self.sender.send(task) {
            tracing::error!("sending task failed: {:?}", error);
        }
    }

    pub async fn finishing(&mut self) -> Result<(), AppError> {
        match self.handle.take() {
            Some(handle) => Ok(handle.await?),
            None => Ok(()),
        }
    }
}

/// Executes a task against the sorter and returns the messages describing
/// its result. Failed actions yield an error line and a fresh listing.
pub fn execute<S: RecentStore>(sorter: &Sorter<S>, task: Task) -> Vec<Message> {
    match task {
        Task::ClearRecents => vec![
            Message::RecentsLoaded(sorter.clear_recents()),
            Message::Info("Recent folders cleared".to_string()),
        ],
        Task::LoadRecents => vec![Message::RecentsLoaded(sorter.recents())],
        Task::Move(index, destination) => {
            let result = sorter.move_file(index, &destination);
            let mut messages = resolve(sorter, index, result);
            messages.push(Message::RecentsLoaded(sorter.recents()));
            messages
        }
        Task::Refresh(index) => match sorter.listing(index) {
            Ok(listing) => vec![Message::Listed(listing)],
            Err(error) => {
                tracing::error!("listing root failed: {:?}", error);
                vec![Message::Error(error.to_string())]
            }
        },
        Task::Rename(index, name) => {
            let result = sorter.rename(index, &name);
            resolve(sorter, index, result)
        }
        Task::Trash(index) => {
            let result = sorter.trash(index);
            resolve(sorter, index, result)
        }
    }
}

fn resolve<S: RecentStore>(
    sorter: &Sorter<S>,
    index: usize,
    result: Result<Outcome, SortError>,
) -> Vec<Message> {
    let mut messages = Vec::new();
    let (listing, resumed) = match result {
        Ok(outcome) => {
            if let Some(change) = &outcome.change {
                messages.push(Message::Info(describe(change)));
            }
            (sorter.listing(outcome.resume), true)
        }
        Err(error) => {
            if error.is_rejection() {
                tracing::warn!("action rejected: {}", error);
            } else {
                tracing::error!("action failed: {:?}", error);
            }

            messages.push(Message::Error(error.to_string()));
            (sorter.listing(index), false)
        }
    };

    match listing {
        Ok(listing) if resumed => messages.push(Message::Resumed(listing)),
        Ok(listing) => messages.push(Message::Listed(listing)),
        Err(error) => {
            tracing::error!("listing root failed: {:?}", error);
            messages.push(Message::Error(error.to_string()));
        }
    }

    messages
}

fn describe(change: &Change) -> String {
    match change {
        Change::Renamed { from, to } => format!("Renamed '{}' to '{}'", from, to),
        Change::Moved { name, to } => format!("Moved '{}' to {}", name, to.display()),
        Change::Trashed { name, .. } => format!("Trashed '{}'", name),
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, fs, path::Path};

    use super::*;

    #[derive(Default)]
    struct MemoryStore {
        entries: RefCell<Vec<String>>,
    }

    impl RecentStore for MemoryStore {
        fn load(&self) -> Result<Vec<String>, SortError> {
            Ok(self.entries.borrow().clone())
        }

        fn save(&self, entries: &[String]) -> Result<(), SortError> {
            *self.entries.borrow_mut() = entries.to_vec();
            Ok(())
        }
    }

    fn sorter(root: &Path, files: &[&str]) -> Sorter<MemoryStore> {
        for file in files {
            fs::write(root.join(file), file.as_bytes()).expect("write file");
        }
        Sorter::new(root, "pdf", MemoryStore::default()).expect("create sorter")
    }

    #[test]
    fn execute_refresh_lists_clamped() {
        let root = tempfile::tempdir().expect("tempdir");
        let sorter = sorter(root.path(), &["a.pdf", "b.pdf"]);

        let messages = execute(&sorter, Task::Refresh(9));

        match messages.as_slice() {
            [Message::Listed(listing)] => {
                assert_eq!(1, listing.index);
                assert_eq!(Some("b.pdf".to_string()), listing.current);
            }
            other => panic!("unexpected messages: {:?}", other),
        }
    }

    #[test]
    fn execute_trash_reports_and_resumes() {
        let root = tempfile::tempdir().expect("tempdir");
        let sorter = sorter(root.path(), &["a.pdf", "b.pdf", "c.pdf"]);

        let messages = execute(&sorter, Task::Trash(2));

        match messages.as_slice() {
            [Message::Info(info), Message::Resumed(listing)] => {
                assert_eq!("Trashed 'c.pdf'", info);
                assert_eq!(1, listing.index);
                assert_eq!(2, listing.len());
            }
            other => panic!("unexpected messages: {:?}", other),
        }
    }

    #[test]
    fn execute_move_reloads_recents() {
        let root = tempfile::tempdir().expect("tempdir");
        let sorter = sorter(root.path(), &["a.pdf"]);
        let destination = Destination::from_inputs(Some("Invoices/2024"), None).expect("dest");

        let messages = execute(&sorter, Task::Move(0, destination));

        match messages.as_slice() {
            [Message::Info(_), Message::Resumed(listing), Message::RecentsLoaded(recents)] => {
                assert!(listing.is_empty());
                assert_eq!(Some("Invoices/2024"), recents.front());
            }
            other => panic!("unexpected messages: {:?}", other),
        }
        assert!(root.path().join("Invoices/2024/a.pdf").is_file());
    }

    #[test]
    fn execute_rename_conflict_reports_error_and_relists() {
        let root = tempfile::tempdir().expect("tempdir");
        let sorter = sorter(root.path(), &["a.pdf", "b.pdf"]);

        let messages = execute(&sorter, Task::Rename(0, "b".to_string()));

        match messages.as_slice() {
            [Message::Error(error), Message::Listed(listing)] => {
                assert!(error.starts_with("Conflict"));
                assert_eq!(2, listing.len());
            }
            other => panic!("unexpected messages: {:?}", other),
        }
    }

    #[test]
    fn execute_rename_to_same_name_is_silent() {
        let root = tempfile::tempdir().expect("tempdir");
        let sorter = sorter(root.path(), &["a.pdf"]);

        let messages = execute(&sorter, Task::Rename(0, "a.pdf".to_string()));

        assert!(matches!(messages.as_slice(), [Message::Resumed(_)]));
    }

    #[test]
    fn execute_clear_recents_empties_store() {
        let root = tempfile::tempdir().expect("tempdir");
        let sorter = sorter(root.path(), &["a.pdf", "b.pdf"]);
        let destination = Destination::from_inputs(None, Some("_keep")).expect("dest");
        let _ = execute(&sorter, Task::Move(0, destination));

        let messages = execute(&sorter, Task::ClearRecents);

        match messages.as_slice() {
            [Message::RecentsLoaded(recents), Message::Info(_)] => assert!(recents.is_empty()),
            other => panic!("unexpected messages: {:?}", other),
        }
        assert!(sorter.recents().is_empty());
    }
}

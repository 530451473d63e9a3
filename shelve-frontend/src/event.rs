use std::{path::Path, sync::Arc};

use futures::{FutureExt, StreamExt};
use notify::{event::ModifyKind, RecommendedWatcher, RecursiveMode, Watcher};
use shelve_core::{Listing, RecentFolders};
use shelve_keymap::{
    conversion,
    message::{KeySequence, KeymapMessage, Mode},
    MessageResolver,
};
use tokio::sync::{
    mpsc::{self, Receiver},
    Mutex,
};
use tokio_util::sync::CancellationToken;

use crate::{
    error::AppError,
    task::{SharedSorter, Task, TaskManager},
};

#[derive(Debug)]
pub struct Envelope {
    pub messages: Vec<Message>,
    pub sequence: KeySequence,
    pub source: MessageSource,
}

#[derive(Debug, Eq, PartialEq)]
pub enum MessageSource {
    Filesystem,
    Task,
    User,
}

pub enum Message {
    Keymap(KeymapMessage),
    Error(String),
    Info(String),
    /// Fresh snapshot of the queue, selection is kept where the user is now.
    Listed(Listing),
    /// Snapshot after an action, selection is where the action resumes.
    Resumed(Listing),
    RecentsLoaded(RecentFolders),
    Resize(u16, u16),
    RootChanged,
}

impl std::fmt::Debug for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Message::Keymap(msg) => write!(f, "Keymap({:?})", msg),
            Message::Error(err) => write!(f, "Error({:?})", err),
            Message::Info(info) => write!(f, "Info({:?})", info),
            Message::Listed(listing) => {
                write!(f, "Listed({}, {})", listing.index, listing.len())
            }
            Message::Resumed(listing) => {
                write!(f, "Resumed({}, {})", listing.index, listing.len())
            }
            Message::RecentsLoaded(recents) => write!(f, "RecentsLoaded({})", recents.len()),
            Message::Resize(x, y) => write!(f, "Resize({}, {})", x, y),
            Message::RootChanged => write!(f, "RootChanged"),
        }
    }
}

pub struct Emitter {
    cancellation: CancellationToken,
    tasks: TaskManager,
    pub receiver: Receiver<Envelope>,
    resolver: Arc<Mutex<MessageResolver>>,
    sender: mpsc::Sender<Envelope>,
    watcher: RecommendedWatcher,
}

impl Emitter {
    pub fn start(sorter: SharedSorter) -> Result<Self, AppError> {
        let (sender, receiver) = mpsc::channel(1);
        let cancellation = CancellationToken::new();

        let (watcher_sender, mut notify_receiver) = mpsc::unbounded_channel();
        let watcher = notify::recommended_watcher(move |res| {
            if let Err(error) = watcher_sender.send(res) {
                tracing::error!("sending watched directory changes failed: {:?}", error);
            }
        })?;

        let resolver = Arc::new(Mutex::new(MessageResolver::default()));
        let tasks = TaskManager::new(sender.clone(), sorter, cancellation.clone());

        let internal_sender = sender.clone();
        let notify_cancellation = cancellation.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = notify_cancellation.cancelled() => break,
                    event = notify_receiver.recv() => {
                        let event = match event {
                            Some(Ok(it)) => it,
                            Some(Err(error)) => {
                                tracing::warn!("watching root failed: {:?}", error);
                                continue;
                            }
                            None => break,
                        };

                        if let Some(messages) = handle_notify_event(event) {
                            let envelope = Envelope {
                                messages,
                                sequence: KeySequence::None,
                                source: MessageSource::Filesystem,
                            };

                            if internal_sender.send(envelope).await.is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        });

        start_crossterm_listener(cancellation.clone(), resolver.clone(), sender.clone());

        Ok(Self {
            cancellation,
            tasks,
            receiver,
            resolver,
            sender,
            watcher,
        })
    }

    pub fn run(&mut self, task: Task) {
        self.tasks.run(task);
    }

    pub fn sender(&self) -> mpsc::Sender<Envelope> {
        self.sender.clone()
    }

    pub async fn set_current_mode(&mut self, mode: Mode) {
        let mut resolver = self.resolver.lock().await;
        resolver.mode = mode;
    }

    pub fn watch(&mut self, path: &Path) -> Result<(), AppError> {
        Ok(self.watcher.watch(path, RecursiveMode::NonRecursive)?)
    }

    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.cancellation.cancel();
        self.tasks.finishing().await
    }
}

fn start_crossterm_listener(
    cancellation: CancellationToken,
    resolver_mutex: Arc<Mutex<MessageResolver>>,
    sender: mpsc::Sender<Envelope>,
) {
    tokio::spawn(async move {
        let mut reader = crossterm::event::EventStream::new();

        loop {
            let crossterm_event = reader.next().fuse();

            tokio::select! {
                _ = cancellation.cancelled() => break,
                Some(Ok(event)) = crossterm_event => {
                    if let Some(envelope) = handle_crossterm_event(&resolver_mutex, event).await {
                        if sender.send(envelope).await.is_err() {
                            break;
                        }
                    }
                }
            }
        }
    });
}

async fn handle_crossterm_event(
    resolver_mutex: &Arc<Mutex<MessageResolver>>,
    event: crossterm::event::Event,
) -> Option<Envelope> {
    match event {
        crossterm::event::Event::Key(key) => {
            let key = conversion::to_key(&key)?;

            let mut resolver = resolver_mutex.lock().await;
            let (messages, sequence) = resolver.add_key(key);
            Some(Envelope {
                messages: messages.into_iter().map(Message::Keymap).collect(),
                sequence,
                source: MessageSource::User,
            })
        }
        crossterm::event::Event::Resize(x, y) => Some(Envelope {
            messages: vec![Message::Resize(x, y)],
            sequence: KeySequence::None,
            source: MessageSource::User,
        }),
        crossterm::event::Event::FocusLost
        | crossterm::event::Event::FocusGained
        | crossterm::event::Event::Paste(_)
        | crossterm::event::Event::Mouse(_) => None,
    }
}

/// Any change to the direct children of root invalidates the listing. The
/// queue is small, so a full re-list replaces patching single entries.
#[tracing::instrument]
fn handle_notify_event(event: notify::Event) -> Option<Vec<Message>> {
    if event.need_rescan() {
        return Some(vec![Message::RootChanged]);
    }

    match event.kind {
        notify::EventKind::Create(_)
        | notify::EventKind::Remove(_)
        | notify::EventKind::Modify(ModifyKind::Name(_)) => Some(vec![Message::RootChanged]),
        notify::EventKind::Any
        | notify::EventKind::Access(_)
        | notify::EventKind::Modify(_)
        | notify::EventKind::Other => {
            tracing::trace!("missed handle for notify event: {:?}", event);
            None
        }
    }
}

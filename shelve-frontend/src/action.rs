use std::{
    io,
    path::{Path, PathBuf},
    process::ExitStatus,
};

use shelve_keymap::message::{KeySequence, Mode};

use crate::{
    event::{Emitter, Envelope, Message, MessageSource},
    open,
    task::Task,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    ModeChanged(Mode),
    Open(PathBuf),
    Quit,
    Task(Task),
}

#[derive(Debug, Eq, PartialEq)]
pub enum ActionResult {
    Normal,
    Quit,
}

pub async fn exec(emitter: &mut Emitter, actions: Vec<Action>) -> ActionResult {
    let mut result = ActionResult::Normal;
    for action in actions {
        match action {
            Action::ModeChanged(mode) => emitter.set_current_mode(mode).await,
            Action::Open(path) => {
                let sender = emitter.sender();
                tokio::spawn(async move {
                    let result = open::path(&path).await;
                    if let Some(message) = open_failure(&path, result) {
                        let envelope = Envelope {
                            messages: vec![message],
                            sequence: KeySequence::None,
                            source: MessageSource::Task,
                        };

                        if sender.send(envelope).await.is_err() {
                            tracing::warn!("receiver closed, dropping open failure");
                        }
                    }
                });
            }
            Action::Quit => result = ActionResult::Quit,
            Action::Task(task) => emitter.run(task),
        }
    }

    result
}

fn open_failure(path: &Path, result: Result<ExitStatus, io::Error>) -> Option<Message> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    match result {
        Ok(status) if status.success() => {
            tracing::debug!("opened {:?}", path);
            None
        }
        Ok(status) => {
            tracing::warn!("opening {:?} exited with {}", path, status);
            Some(Message::Error(format!(
                "Opening '{}' failed, viewer exited with {}",
                name, status
            )))
        }
        Err(error) => {
            tracing::error!("opening {:?} failed: {:?}", path, error);
            Some(Message::Error(format!("Opening '{}' failed: {}", name, error)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_failure_reports_launch_error() {
        let error = io::Error::from(io::ErrorKind::NotFound);

        let message = open_failure(Path::new("/inbox/a.pdf"), Err(error));

        match message {
            Some(Message::Error(text)) => assert!(text.starts_with("Opening 'a.pdf' failed")),
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn open_failure_reports_viewer_exit_code() {
        use std::os::unix::process::ExitStatusExt;

        let failed = open_failure(Path::new("/inbox/a.pdf"), Ok(ExitStatus::from_raw(256)));
        let succeeded = open_failure(Path::new("/inbox/a.pdf"), Ok(ExitStatus::from_raw(0)));

        assert!(matches!(failed, Some(Message::Error(_))));
        assert!(succeeded.is_none());
    }
}

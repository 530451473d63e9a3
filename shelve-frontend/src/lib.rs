use std::sync::Arc;

use action::ActionResult;
use error::AppError;
use event::Emitter;
use model::{Model, Status};
use settings::Settings;
use shelve_core::{recents::get_recents_path, CsvRecentStore, Sorter};
use task::Task;
use terminal::TerminalWrapper;
use view::render_model;

mod action;
pub mod error;
mod event;
mod layout;
mod model;
mod open;
pub mod settings;
mod task;
mod terminal;
mod update;
mod view;

pub async fn run(settings: Settings) -> Result<(), AppError> {
    let recents_path = match settings.recents_path {
        Some(path) => path,
        None => get_recents_path().ok_or(AppError::RecentsPathUnresolved)?,
    };

    let store = CsvRecentStore::new(recents_path);
    tracing::debug!("recent folders stored at {:?}", store.path());

    let sorter = Arc::new(Sorter::new(&settings.root, &settings.extension, store)?);

    let mut model = Model::new(sorter.root().to_path_buf(), settings.presets);
    let mut emitter = Emitter::start(sorter.clone())?;

    if let Err(error) = emitter.watch(sorter.root()) {
        tracing::warn!("watching root failed: {:?}", error);
        model.status = Some(Status::Error(
            "Watching root failed, refresh with <C-l>".to_string(),
        ));
    }

    emitter.run(Task::Refresh(0));
    emitter.run(Task::LoadRecents);

    tracing::debug!("starting with model state: {:?}", model);

    let mut terminal = TerminalWrapper::start()?;
    let mut result = Vec::new();
    if let Err(error) = render_model(&mut terminal, &model) {
        result.push(error);
    }

    while result.is_empty() {
        let envelope = match emitter.receiver.recv().await {
            Some(it) => it,
            None => break,
        };

        tracing::debug!("received messages: {:?}", envelope.messages);

        let actions = update::update(&mut model, envelope);
        if let Err(error) = render_model(&mut terminal, &model) {
            result.push(error);
            break;
        }

        if action::exec(&mut emitter, actions).await == ActionResult::Quit {
            break;
        }
    }

    if let Err(error) = emitter.shutdown().await {
        result.push(error);
    }

    if let Err(error) = terminal.shutdown() {
        result.push(error);
    }

    if result.is_empty() {
        Ok(())
    } else {
        Err(AppError::Aggregate(result))
    }
}

use shelve_core::Destination;
use shelve_keymap::message::{Cycle, Mode, PromptCursor, PromptKind, PromptMessage};

use crate::{
    action::Action,
    model::{Model, Status},
    task::Task,
};

pub fn update(model: &mut Model, message: &PromptMessage) {
    let kind = match &model.mode {
        Mode::Prompt(kind) => *kind,
        Mode::Navigation => return,
    };

    let prompt = &mut model.prompt;
    match message {
        PromptMessage::Clear => {
            prompt.text.clear();
            prompt.cursor = 0;
            prompt.recent = None;
        }
        PromptMessage::CyclePreset(cycle) => {
            if kind == PromptKind::Move && !model.presets.is_empty() {
                prompt.preset = Some(next(prompt.preset, model.presets.len(), cycle));
            }
        }
        PromptMessage::CycleRecent(cycle) => {
            if kind != PromptKind::Move || model.recents.is_empty() {
                return;
            }

            let index = next(prompt.recent, model.recents.len(), cycle);
            if let Some(folder) = model.recents.get(index) {
                prompt.text = folder.to_string();
                prompt.cursor = prompt.text.chars().count();
                prompt.recent = Some(index);
            }
        }
        PromptMessage::DeleteCharBeforeCursor => {
            if prompt.cursor > 0 {
                prompt.cursor -= 1;
                let index = byte_index(&prompt.text, prompt.cursor);
                prompt.text.remove(index);
            }
        }
        PromptMessage::DeleteCharOnCursor => {
            if prompt.cursor < prompt.text.chars().count() {
                let index = byte_index(&prompt.text, prompt.cursor);
                prompt.text.remove(index);
            }
        }
        PromptMessage::Insert(text) => {
            let index = byte_index(&prompt.text, prompt.cursor);
            prompt.text.insert_str(index, text);
            prompt.cursor += text.chars().count();
        }
        PromptMessage::MoveCursor(direction) => {
            let len = prompt.text.chars().count();
            prompt.cursor = match direction {
                PromptCursor::End => len,
                PromptCursor::Left => prompt.cursor.saturating_sub(1),
                PromptCursor::Right => (prompt.cursor + 1).min(len),
                PromptCursor::Start => 0,
            };
        }
    }
}

pub fn submit(model: &mut Model) -> Vec<Action> {
    let index = model.listing.index;
    match &model.mode {
        Mode::Prompt(PromptKind::Rename) => {
            let name = model.prompt.text.trim().to_string();
            vec![Action::Task(Task::Rename(index, name))]
        }
        Mode::Prompt(PromptKind::Move) => {
            let custom = Some(model.prompt.text.as_str());
            match Destination::from_inputs(custom, model.selected_preset()) {
                Ok(destination) => vec![Action::Task(Task::Move(index, destination))],
                Err(error) => {
                    model.status = Some(Status::Error(error.to_string()));
                    Vec::new()
                }
            }
        }
        Mode::Navigation => Vec::new(),
    }
}

fn next(current: Option<usize>, len: usize, cycle: &Cycle) -> usize {
    match (current, cycle) {
        (None, Cycle::Forward) => 0,
        (None, Cycle::Backward) => len - 1,
        (Some(index), Cycle::Forward) => (index + 1) % len,
        (Some(index), Cycle::Backward) => (index + len - 1) % len,
    }
}

fn byte_index(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}

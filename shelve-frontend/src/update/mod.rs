use shelve_keymap::message::{KeySequence, KeymapMessage, Mode, PromptKind};

use crate::{
    action::Action,
    event::{Envelope, Message, MessageSource},
    model::{Model, Prompt, Status},
    task::Task,
};

mod navigation;
mod prompt;

#[tracing::instrument(skip(model))]
pub fn update(model: &mut Model, envelope: Envelope) -> Vec<Action> {
    match &envelope.sequence {
        KeySequence::Completed(_) => model.key_sequence.clear(),
        KeySequence::Changed(sequence) => model.key_sequence = sequence.to_owned(),
        KeySequence::None => {}
    };

    if envelope.source == MessageSource::User && !envelope.messages.is_empty() {
        model.status = None;
    }

    envelope
        .messages
        .into_iter()
        .flat_map(|message| update_with_message(model, message))
        .collect()
}

fn update_with_message(model: &mut Model, message: Message) -> Vec<Action> {
    match message {
        Message::Keymap(msg) => keymap(model, msg),
        Message::Error(error) => {
            model.status = Some(Status::Error(error));
            Vec::new()
        }
        Message::Info(info) => {
            model.status = Some(Status::Information(info));
            Vec::new()
        }
        Message::Listed(listing) => {
            let index = model.listing.index;
            model.listing = listing.select(index);
            Vec::new()
        }
        Message::Resumed(listing) => {
            model.listing = listing;
            Vec::new()
        }
        Message::RecentsLoaded(recents) => {
            model.recents = recents;
            model.prompt.recent = None;
            Vec::new()
        }
        Message::Resize(_, _) => Vec::new(),
        Message::RootChanged => vec![Action::Task(Task::Refresh(model.listing.index))],
    }
}

fn keymap(model: &mut Model, message: KeymapMessage) -> Vec<Action> {
    match message {
        KeymapMessage::ChangeMode(from, to) => change_mode(model, from, to),
        KeymapMessage::ClearRecents => vec![Action::Task(Task::ClearRecents)],
        KeymapMessage::MoveCursor(count, direction) => {
            navigation::move_cursor(model, count, &direction)
        }
        KeymapMessage::OpenCurrent => match model.current_path() {
            Some(path) => vec![Action::Open(path)],
            None => {
                model.status = Some(Status::Error("Queue is empty".to_string()));
                Vec::new()
            }
        },
        KeymapMessage::Prompt(msg) => {
            prompt::update(model, &msg);
            Vec::new()
        }
        KeymapMessage::Quit => vec![Action::Quit],
        KeymapMessage::Refresh => vec![
            Action::Task(Task::Refresh(model.listing.index)),
            Action::Task(Task::LoadRecents),
        ],
        KeymapMessage::SubmitPrompt => prompt::submit(model),
        KeymapMessage::TrashCurrent => vec![Action::Task(Task::Trash(model.listing.index))],
    }
}

fn change_mode(model: &mut Model, from: Mode, to: Mode) -> Vec<Action> {
    tracing::debug!("changing mode from {} to {}", from, to);

    match &to {
        Mode::Prompt(kind) => {
            if model.listing.is_empty() {
                model.status = Some(Status::Error(format!("Nothing to {}, queue is empty", to)));
                model.mode = Mode::Navigation;
                return vec![Action::ModeChanged(Mode::Navigation)];
            }

            model.prompt = match kind {
                PromptKind::Move => Prompt {
                    preset: if model.presets.is_empty() { None } else { Some(0) },
                    ..Default::default()
                },
                PromptKind::Rename => {
                    Prompt::with_text(model.listing.current.as_deref().unwrap_or_default())
                }
            };
        }
        Mode::Navigation => model.prompt = Prompt::default(),
    }

    model.mode = to.clone();
    vec![Action::ModeChanged(to)]
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use shelve_core::{Destination, Listing, RecentFolders};
    use shelve_keymap::message::{Cycle, CursorDirection, PromptMessage};

    use super::*;

    fn model(files: &[&str]) -> Model {
        let mut model = Model::new(
            PathBuf::from("/inbox"),
            vec!["_sorted".to_string(), "_keep".to_string()],
        );
        model.listing = Listing::new(files.iter().map(|f| f.to_string()).collect(), 0);
        model
    }

    fn user(messages: Vec<KeymapMessage>, sequence: KeySequence) -> Envelope {
        Envelope {
            messages: messages.into_iter().map(Message::Keymap).collect(),
            sequence,
            source: MessageSource::User,
        }
    }

    fn task(messages: Vec<Message>) -> Envelope {
        Envelope {
            messages,
            sequence: KeySequence::None,
            source: MessageSource::Task,
        }
    }

    fn enter(model: &mut Model, kind: PromptKind) -> Vec<Action> {
        update(
            model,
            user(
                vec![KeymapMessage::ChangeMode(Mode::Navigation, Mode::Prompt(kind))],
                KeySequence::Completed("r".to_string()),
            ),
        )
    }

    #[test]
    fn update_move_cursor_selects_and_refreshes() {
        let mut model = model(&["a.pdf", "b.pdf", "c.pdf"]);

        let actions = update(
            &mut model,
            user(
                vec![KeymapMessage::MoveCursor(5, CursorDirection::Down)],
                KeySequence::Completed("5j".to_string()),
            ),
        );

        assert_eq!(2, model.listing.index);
        assert_eq!(Some("c.pdf".to_string()), model.listing.current);
        assert_eq!(vec![Action::Task(Task::Refresh(2))], actions);
    }

    #[test]
    fn update_key_sequence_tracks_pending_keys() {
        let mut model = model(&["a.pdf"]);

        let _ = update(&mut model, user(vec![], KeySequence::Changed("d".to_string())));
        assert_eq!("d", model.key_sequence);

        let _ = update(&mut model, user(vec![], KeySequence::Completed("dd".to_string())));
        assert!(model.key_sequence.is_empty());
    }

    #[test]
    fn update_listed_keeps_current_selection() {
        let mut model = model(&["a.pdf", "b.pdf", "c.pdf"]);
        model.listing = model.listing.clone().select(2);

        let listing = Listing::new(vec!["a.pdf".to_string(), "b.pdf".to_string()], 0);
        let _ = update(&mut model, task(vec![Message::Listed(listing)]));

        assert_eq!(1, model.listing.index);
        assert_eq!(Some("b.pdf".to_string()), model.listing.current);
    }

    #[test]
    fn update_resumed_takes_reported_index() {
        let mut model = model(&["a.pdf", "b.pdf", "c.pdf"]);

        let listing = Listing::new(vec!["a.pdf".to_string(), "c.pdf".to_string()], 1);
        let _ = update(&mut model, task(vec![Message::Resumed(listing)]));

        assert_eq!(1, model.listing.index);
        assert_eq!(Some("c.pdf".to_string()), model.listing.current);
    }

    #[test]
    fn update_error_is_shown_until_next_input() {
        let mut model = model(&["a.pdf"]);

        let _ = update(
            &mut model,
            task(vec![Message::Error("Conflict: 'b.pdf' already exists".to_string())]),
        );
        assert_eq!(
            Some(Status::Error("Conflict: 'b.pdf' already exists".to_string())),
            model.status
        );

        let _ = update(
            &mut model,
            user(
                vec![KeymapMessage::MoveCursor(1, CursorDirection::Down)],
                KeySequence::Completed("j".to_string()),
            ),
        );
        assert_eq!(None, model.status);
    }

    #[test]
    fn update_rename_prompt_is_prefilled() {
        let mut model = model(&["a.pdf", "b.pdf"]);

        let actions = enter(&mut model, PromptKind::Rename);

        assert_eq!(Mode::Prompt(PromptKind::Rename), model.mode);
        assert_eq!(Prompt::with_text("a.pdf"), model.prompt);
        assert_eq!(5, model.prompt.cursor);
        assert_eq!(
            vec![Action::ModeChanged(Mode::Prompt(PromptKind::Rename))],
            actions
        );
    }

    #[test]
    fn update_prompt_on_empty_queue_is_refused() {
        let mut model = model(&[]);

        let actions = enter(&mut model, PromptKind::Rename);

        assert_eq!(Mode::Navigation, model.mode);
        assert!(matches!(model.status, Some(Status::Error(_))));
        assert_eq!(vec![Action::ModeChanged(Mode::Navigation)], actions);
    }

    #[test]
    fn update_submit_rename_runs_task() {
        let mut model = model(&["a.pdf", "b.pdf"]);
        model.listing = model.listing.clone().select(1);
        let _ = enter(&mut model, PromptKind::Rename);
        prompt::update(&mut model, &PromptMessage::Clear);
        prompt::update(&mut model, &PromptMessage::Insert("Invoice".to_string()));

        let actions = update(
            &mut model,
            user(
                vec![
                    KeymapMessage::SubmitPrompt,
                    KeymapMessage::ChangeMode(
                        Mode::Prompt(PromptKind::Rename),
                        Mode::Navigation,
                    ),
                ],
                KeySequence::Completed("<cr>".to_string()),
            ),
        );

        assert_eq!(
            vec![
                Action::Task(Task::Rename(1, "Invoice".to_string())),
                Action::ModeChanged(Mode::Navigation),
            ],
            actions
        );
        assert_eq!(Mode::Navigation, model.mode);
        assert_eq!(Prompt::default(), model.prompt);
    }

    #[test]
    fn update_submit_move_prefers_custom_text() {
        let mut model = model(&["a.pdf"]);
        let _ = enter(&mut model, PromptKind::Move);
        prompt::update(&mut model, &PromptMessage::CyclePreset(Cycle::Forward));
        prompt::update(&mut model, &PromptMessage::Insert("Taxes".to_string()));

        let actions = update(
            &mut model,
            user(
                vec![KeymapMessage::SubmitPrompt],
                KeySequence::Completed("<cr>".to_string()),
            ),
        );

        let destination = Destination::from_inputs(Some("Taxes"), None).expect("destination");
        assert_eq!(vec![Action::Task(Task::Move(0, destination))], actions);
    }

    #[test]
    fn update_submit_move_falls_back_to_preset() {
        let mut model = model(&["a.pdf"]);
        let _ = enter(&mut model, PromptKind::Move);
        prompt::update(&mut model, &PromptMessage::CyclePreset(Cycle::Forward));

        let actions = update(
            &mut model,
            user(
                vec![KeymapMessage::SubmitPrompt],
                KeySequence::Completed("<cr>".to_string()),
            ),
        );

        let destination = Destination::from_inputs(None, Some("_keep")).expect("destination");
        assert_eq!(vec![Action::Task(Task::Move(0, destination))], actions);
    }

    #[test]
    fn update_submit_move_without_destination_shows_error() {
        let mut model = model(&["a.pdf"]);
        model.presets.clear();
        let _ = enter(&mut model, PromptKind::Move);

        let actions = update(
            &mut model,
            user(
                vec![KeymapMessage::SubmitPrompt],
                KeySequence::Completed("<cr>".to_string()),
            ),
        );

        assert!(actions.is_empty());
        assert_eq!(
            Some(Status::Error("Invalid input: no destination provided".to_string())),
            model.status
        );
    }

    #[test]
    fn update_recents_loaded_resets_recent_cycle() {
        let mut model = model(&["a.pdf"]);
        model.prompt.recent = Some(3);

        let recents = RecentFolders::from_entries(vec!["Invoices"]);
        let _ = update(&mut model, task(vec![Message::RecentsLoaded(recents)]));

        assert_eq!(None, model.prompt.recent);
        assert_eq!(Some("Invoices"), model.recents.front());
    }

    #[test]
    fn update_root_changed_refreshes_at_current_index() {
        let mut model = model(&["a.pdf", "b.pdf"]);
        model.listing = model.listing.clone().select(1);

        let actions = update(
            &mut model,
            Envelope {
                messages: vec![Message::RootChanged],
                sequence: KeySequence::None,
                source: MessageSource::Filesystem,
            },
        );

        assert_eq!(vec![Action::Task(Task::Refresh(1))], actions);
    }

    #[test]
    fn update_open_current_opens_absolute_path() {
        let mut model = model(&["a.pdf"]);

        let actions = update(
            &mut model,
            user(
                vec![KeymapMessage::OpenCurrent],
                KeySequence::Completed("o".to_string()),
            ),
        );

        assert_eq!(vec![Action::Open(PathBuf::from("/inbox/a.pdf"))], actions);
    }

    #[test]
    fn update_trash_count_trashes_one_at_a_time() {
        let mut model = model(&["a.pdf", "b.pdf", "c.pdf"]);

        let actions = update(
            &mut model,
            user(
                vec![KeymapMessage::TrashCurrent, KeymapMessage::TrashCurrent],
                KeySequence::Completed("2dd".to_string()),
            ),
        );

        assert_eq!(
            vec![
                Action::Task(Task::Trash(0)),
                Action::Task(Task::Trash(0))
            ],
            actions
        );
    }
}

use std::collections::HashMap;

use crate::{
    key::{Key, KeyCode, KeyModifier},
    message::{
        Binding, BindingKind, CursorDirection, Cycle, KeymapMessage, Mode, PromptCursor,
        PromptKind, PromptMessage,
    },
    tree::KeyTree,
};

#[derive(Debug)]
pub struct KeyMap {
    mappings: HashMap<Mode, Vec<(Vec<Key>, Binding)>>,
}

impl KeyMap {
    pub fn into_tree(self) -> KeyTree {
        let mut tree = KeyTree::default();
        for (mode, mappings) in self.mappings {
            for (keys, binding) in mappings {
                if let Err(error) = tree.add_mapping(&mode, keys, binding) {
                    tracing::error!("adding key mapping failed: {:?}", error);
                }
            }
        }
        tree
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut mappings = HashMap::new();

        add_mapping(
            &mut mappings,
            vec![Mode::Navigation],
            vec![
                (vec![char_key('j')], motion(CursorDirection::Down)),
                (vec![char_key('n')], motion(CursorDirection::Down)),
                (vec![code_key(KeyCode::Down)], motion(CursorDirection::Down)),
                (vec![code_key(KeyCode::Right)], motion(CursorDirection::Down)),
                (vec![char_key('k')], motion(CursorDirection::Up)),
                (vec![char_key('p')], motion(CursorDirection::Up)),
                (vec![code_key(KeyCode::Up)], motion(CursorDirection::Up)),
                (vec![code_key(KeyCode::Left)], motion(CursorDirection::Up)),
                (
                    vec![char_key('g'), char_key('g')],
                    motion(CursorDirection::Top),
                ),
                (vec![shift_key('g')], motion(CursorDirection::Bottom)),
                (
                    vec![char_key('0')],
                    Binding {
                        kind: BindingKind::RepeatOrMotion(CursorDirection::Top),
                        repeat: Some(0),
                        ..Default::default()
                    },
                ),
                (vec![char_key('o')], message(KeymapMessage::OpenCurrent)),
                (
                    vec![code_key(KeyCode::Enter)],
                    message(KeymapMessage::OpenCurrent),
                ),
                (
                    vec![char_key('r')],
                    Binding {
                        force: Some(Mode::Prompt(PromptKind::Rename)),
                        repeatable: false,
                        ..Default::default()
                    },
                ),
                (
                    vec![char_key('m')],
                    Binding {
                        force: Some(Mode::Prompt(PromptKind::Move)),
                        repeatable: false,
                        ..Default::default()
                    },
                ),
                (
                    vec![char_key('d'), char_key('d')],
                    message(KeymapMessage::TrashCurrent),
                ),
                (
                    vec![char_key('c'), char_key('r')],
                    message(KeymapMessage::ClearRecents),
                ),
                (
                    vec![Key::new(KeyCode::from_char('l'), vec![KeyModifier::Ctrl])],
                    message(KeymapMessage::Refresh),
                ),
                (vec![char_key('q')], message(KeymapMessage::Quit)),
            ],
        );

        add_mapping(
            &mut mappings,
            vec![Mode::Navigation],
            (1..=9)
                .filter_map(|digit| {
                    let c = char::from_digit(digit, 10)?;
                    Some((
                        vec![char_key(c)],
                        Binding {
                            kind: BindingKind::Repeat,
                            repeat: Some(digit as usize),
                            ..Default::default()
                        },
                    ))
                })
                .collect(),
        );

        add_mapping(
            &mut mappings,
            vec![
                Mode::Prompt(PromptKind::Move),
                Mode::Prompt(PromptKind::Rename),
            ],
            vec![
                (
                    vec![code_key(KeyCode::Enter)],
                    Binding {
                        force: Some(Mode::Navigation),
                        kind: BindingKind::Message(KeymapMessage::SubmitPrompt),
                        ..Default::default()
                    },
                ),
                (
                    vec![code_key(KeyCode::Esc)],
                    Binding {
                        force: Some(Mode::Navigation),
                        ..Default::default()
                    },
                ),
                (
                    vec![code_key(KeyCode::Backspace)],
                    prompt(PromptMessage::DeleteCharBeforeCursor),
                ),
                (
                    vec![code_key(KeyCode::Delete)],
                    prompt(PromptMessage::DeleteCharOnCursor),
                ),
                (
                    vec![code_key(KeyCode::Left)],
                    prompt(PromptMessage::MoveCursor(PromptCursor::Left)),
                ),
                (
                    vec![code_key(KeyCode::Right)],
                    prompt(PromptMessage::MoveCursor(PromptCursor::Right)),
                ),
                (
                    vec![code_key(KeyCode::Home)],
                    prompt(PromptMessage::MoveCursor(PromptCursor::Start)),
                ),
                (
                    vec![code_key(KeyCode::End)],
                    prompt(PromptMessage::MoveCursor(PromptCursor::End)),
                ),
                (
                    vec![Key::new(KeyCode::from_char('u'), vec![KeyModifier::Ctrl])],
                    prompt(PromptMessage::Clear),
                ),
            ],
        );

        add_mapping(
            &mut mappings,
            vec![Mode::Prompt(PromptKind::Move)],
            vec![
                (
                    vec![code_key(KeyCode::Tab)],
                    prompt(PromptMessage::CyclePreset(Cycle::Forward)),
                ),
                (
                    vec![Key::new(KeyCode::Tab, vec![KeyModifier::Shift])],
                    prompt(PromptMessage::CyclePreset(Cycle::Backward)),
                ),
                (
                    vec![Key::new(KeyCode::from_char('n'), vec![KeyModifier::Ctrl])],
                    prompt(PromptMessage::CycleRecent(Cycle::Forward)),
                ),
                (
                    vec![Key::new(KeyCode::from_char('p'), vec![KeyModifier::Ctrl])],
                    prompt(PromptMessage::CycleRecent(Cycle::Backward)),
                ),
            ],
        );

        Self { mappings }
    }
}

fn add_mapping(
    mappings: &mut HashMap<Mode, Vec<(Vec<Key>, Binding)>>,
    modes: Vec<Mode>,
    bindings: Vec<(Vec<Key>, Binding)>,
) {
    for mode in modes {
        mappings
            .entry(mode)
            .or_insert_with(Vec::new)
            .extend(bindings.clone());
    }
}

fn char_key(c: char) -> Key {
    Key::new(KeyCode::from_char(c), vec![])
}

fn shift_key(c: char) -> Key {
    Key::new(KeyCode::from_char(c), vec![KeyModifier::Shift])
}

fn code_key(code: KeyCode) -> Key {
    Key::new(code, vec![])
}

fn motion(direction: CursorDirection) -> Binding {
    Binding::from_motion(direction)
}

fn message(message: KeymapMessage) -> Binding {
    Binding {
        kind: BindingKind::Message(message),
        ..Default::default()
    }
}

fn prompt(message: PromptMessage) -> Binding {
    Binding {
        kind: BindingKind::Prompt(message),
        repeatable: false,
        ..Default::default()
    }
}

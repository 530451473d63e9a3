use std::collections::VecDeque;

use buffer::KeyBuffer;
use key::{Key, KeyCode};
use map::KeyMap;
use message::{
    Binding, BindingKind, KeySequence, KeymapMessage, Mode, PromptMessage,
};
use tree::KeyTree;

mod buffer;
pub mod conversion;
pub mod key;
mod map;
pub mod message;
mod tree;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum KeyMapError {
    #[error("Key sequence is incomplete.")]
    KeySequenceIncomplete,
    #[error("Mapping for mode {0} conflicts with an existing one.")]
    MappingConflict(String),
    #[error("Failed to add mapping for mode {0}.")]
    ModeUnresolvable(String),
    #[error("Failed to resolve valid binding.")]
    NoValidBindingFound,
    #[error("No keys left.")]
    NoKeysRemaining,
}

pub struct MessageResolver {
    buffer: KeyBuffer,
    pub mode: Mode,
    tree: KeyTree,
}

impl Default for MessageResolver {
    fn default() -> Self {
        Self {
            buffer: KeyBuffer::default(),
            mode: Mode::default(),
            tree: KeyMap::default().into_tree(),
        }
    }
}

impl MessageResolver {
    pub fn add_keys(&mut self, mut keys: VecDeque<Key>) -> Vec<KeymapMessage> {
        let mut messages = Vec::new();
        while let Some(key) = keys.pop_front() {
            let (resolved, _) = self.add_key(key);
            messages.extend(resolved);
        }
        messages
    }

    pub fn add_key(&mut self, key: Key) -> (Vec<KeymapMessage>, KeySequence) {
        let keys = self.buffer.get_keys();
        if key.code == KeyCode::Esc && !keys.is_empty() {
            let sequence = format!(
                "{}{}",
                self.buffer.to_keycode_string(),
                key.to_keycode_string()
            );
            self.buffer.clear();
            return (Vec::new(), KeySequence::Completed(sequence));
        }

        self.buffer.add_key(key);

        let keys = self.buffer.get_keys();
        let binding = resolve_binding(&self.tree, &self.mode, &keys, None);
        let sequence = self.buffer.to_keycode_string();

        match binding {
            Ok(binding) => {
                self.buffer.clear();

                let messages = get_messages_from_binding(&self.mode, &binding);
                if let Some(mode) = binding.force {
                    self.mode = mode;
                }

                (messages, KeySequence::Completed(sequence))
            }
            Err(KeyMapError::KeySequenceIncomplete) => (Vec::new(), KeySequence::Changed(sequence)),
            Err(error) => {
                tracing::trace!("no binding for {:?}: {:?}", sequence, error);

                let messages = match (&self.mode, self.buffer.to_text()) {
                    (Mode::Prompt(_), Some(text)) => {
                        vec![KeymapMessage::Prompt(PromptMessage::Insert(text))]
                    }
                    _ => Vec::new(),
                };

                self.buffer.clear();
                (messages, KeySequence::Completed(sequence))
            }
        }
    }
}

fn resolve_binding(
    tree: &KeyTree,
    mode: &Mode,
    keys: &[Key],
    before: Option<&Binding>,
) -> Result<Binding, KeyMapError> {
    if keys.is_empty() {
        return Err(KeyMapError::NoKeysRemaining);
    }

    let (binding, unused_keys) = get_binding_by_keys(before, tree, mode, keys)?;
    let mut next = match resolve_binding(tree, mode, &unused_keys, Some(&binding)) {
        Ok(it) => it,
        Err(KeyMapError::NoKeysRemaining) => {
            if binding.kind == BindingKind::Repeat {
                return Err(KeyMapError::KeySequenceIncomplete);
            } else {
                return Ok(binding);
            }
        }
        Err(error) => return Err(error),
    };

    if let BindingKind::Repeat = binding.kind {
        next.repeat = get_repeat(&binding, &next);
        Ok(next)
    } else {
        Ok(binding)
    }
}

fn get_binding_by_keys(
    before: Option<&Binding>,
    tree: &KeyTree,
    mode: &Mode,
    keys: &[Key],
) -> Result<(Binding, Vec<Key>), KeyMapError> {
    let (mut binding, unused_keys) = tree.get_binding(mode, keys)?;

    let binding = if let BindingKind::RepeatOrMotion(motion) = binding.kind {
        if before.is_some_and(|before| before.kind == BindingKind::Repeat) {
            binding.kind = BindingKind::Repeat;
            binding
        } else {
            Binding::from_motion(motion)
        }
    } else {
        binding
    };

    Ok((binding, unused_keys))
}

fn get_repeat(current: &Binding, next: &Binding) -> Option<usize> {
    if !next.repeatable {
        return next.repeat;
    }

    let current_repeat = match current.repeat {
        Some(it) => it,
        None => return next.repeat,
    };

    let repeat = match next.repeat {
        Some(next_repeat) => {
            let repeat_len = next_repeat.to_string().len();
            let pow = match 10_usize.checked_pow(repeat_len as u32) {
                Some(it) => it,
                None => {
                    return next.repeat;
                }
            };

            current_repeat
                .checked_mul(pow)
                .and_then(|it| it.checked_add(next_repeat))
                .unwrap_or(usize::MAX)
        }
        None => current_repeat,
    };

    Some(repeat)
}

/// Messages resolved by the binding come first, the mode change last. That
/// way a submit is handled while the prompt still holds its text.
fn get_messages_from_binding(mode: &Mode, binding: &Binding) -> Vec<KeymapMessage> {
    let mut messages = Vec::new();

    let repeat = binding.repeat.unwrap_or(1);
    match &binding.kind {
        BindingKind::Message(msg) => {
            for _ in 0..repeat {
                messages.push(msg.clone());
            }
        }
        BindingKind::Motion(direction) => {
            messages.push(KeymapMessage::MoveCursor(repeat, direction.clone()))
        }
        BindingKind::Prompt(msg) => messages.push(KeymapMessage::Prompt(msg.clone())),
        BindingKind::None => {}
        BindingKind::Repeat | BindingKind::RepeatOrMotion(_) => {
            tracing::warn!("unresolved repeat binding: {:?}", binding);
        }
    }

    if let Some(md) = &binding.force {
        messages.push(KeymapMessage::ChangeMode(mode.clone(), md.clone()));
    };

    messages
}

use std::{collections::HashMap, slice::Iter};

use crate::{
    key::Key,
    message::{Binding, Mode},
    KeyMapError,
};

#[derive(Debug, Default)]
pub struct KeyTree {
    modes: HashMap<Mode, Node>,
}

#[derive(Clone, Debug)]
pub enum Node {
    Binding(Binding),
    Key(HashMap<Key, Node>),
}

impl KeyTree {
    pub fn add_mapping(
        &mut self,
        mode: &Mode,
        keys: Vec<Key>,
        binding: Binding,
    ) -> Result<(), KeyMapError> {
        if keys.is_empty() {
            return Err(KeyMapError::NoKeysRemaining);
        }

        let node = self
            .modes
            .entry(mode.clone())
            .or_insert_with(|| Node::Key(HashMap::new()));

        add_mapping_node(&mut keys.iter(), node, binding, mode)
    }

    pub fn get_binding(
        &self,
        mode: &Mode,
        keys: &[Key],
    ) -> Result<(Binding, Vec<Key>), KeyMapError> {
        let node = match self.modes.get(mode) {
            Some(it) => it,
            None => return Err(KeyMapError::ModeUnresolvable(mode.to_string())),
        };

        let mut iter = keys.iter();
        match get_node(node, &mut iter)? {
            Node::Binding(binding) => Ok((binding.clone(), iter.cloned().collect())),
            Node::Key(_) => Err(KeyMapError::KeySequenceIncomplete),
        }
    }
}

fn add_mapping_node(
    iter: &mut Iter<'_, Key>,
    node: &mut Node,
    binding: Binding,
    mode: &Mode,
) -> Result<(), KeyMapError> {
    let map = match node {
        Node::Key(map) => map,
        Node::Binding(_) => return Err(KeyMapError::MappingConflict(mode.to_string())),
    };

    let key = match iter.next() {
        Some(it) => it,
        None => return Err(KeyMapError::NoKeysRemaining),
    };

    if iter.len() == 0 {
        if map.contains_key(key) {
            return Err(KeyMapError::MappingConflict(mode.to_string()));
        }

        map.insert(key.clone(), Node::Binding(binding));
        Ok(())
    } else {
        let next = map
            .entry(key.clone())
            .or_insert_with(|| Node::Key(HashMap::new()));

        add_mapping_node(iter, next, binding, mode)
    }
}

fn get_node<'a>(node: &'a Node, iter: &mut Iter<'_, Key>) -> Result<&'a Node, KeyMapError> {
    match node {
        Node::Binding(_) => Ok(node),
        Node::Key(map) => {
            let key = match iter.next() {
                Some(it) => it,
                None => return Ok(node),
            };

            match map.get(key) {
                Some(next) => get_node(next, iter),
                None => Err(KeyMapError::NoValidBindingFound),
            }
        }
    }
}

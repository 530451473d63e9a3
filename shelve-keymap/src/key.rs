use std::{collections::VecDeque, fmt::Display, hash::Hash};

#[derive(Clone, Debug, Eq)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: Vec<KeyModifier>,
}

impl Key {
    pub fn new(key: KeyCode, modifiers: Vec<KeyModifier>) -> Self {
        Self {
            code: key,
            modifiers,
        }
    }

    /// Vim like notation, e.g. `j`, `G`, `<C-l>` or `<S-tab>`.
    pub fn to_keycode_string(&self) -> String {
        let mut modifiers = self.modifiers.clone();
        modifiers.sort();
        modifiers.dedup();

        let mut code = self.code.to_string();
        if let KeyCode::Char(_) = self.code {
            if let Some(position) = modifiers.iter().position(|m| m == &KeyModifier::Shift) {
                modifiers.remove(position);
                code = code.to_uppercase();
            }

            if modifiers.is_empty() {
                return code;
            }
        }

        let prefix: String = modifiers.iter().map(KeyModifier::prefix).collect();
        format!("<{}{}>", prefix, code)
    }

    pub fn from_keycode_string(keycode: &str) -> Option<Self> {
        let regex = regex::Regex::new(r"[^-<>]+|^-$|--").ok()?;
        let mut parts = regex
            .find_iter(keycode)
            .map(|m| m.as_str())
            .collect::<VecDeque<_>>();

        let code = match parts.pop_back()? {
            "--" => "-",
            it => it,
        };

        let mut modifiers: Vec<_> = parts
            .into_iter()
            .filter_map(KeyModifier::from_prefix)
            .collect();

        let mut chars = code.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_uppercase() {
                modifiers.push(KeyModifier::Shift);
            }
        }

        KeyCode::from_keycode_string(code).map(|code| Self::new(code, modifiers))
    }

    /// The text this key types into a prompt. Keys held with anything but
    /// shift do not type.
    pub fn to_text(&self) -> Option<String> {
        if self
            .modifiers
            .iter()
            .any(|modifier| *modifier != KeyModifier::Shift)
        {
            return None;
        }

        let shifted = self.modifiers.contains(&KeyModifier::Shift);
        match self.code {
            KeyCode::Char(c) if shifted => Some(c.to_uppercase().to_string()),
            KeyCode::Char(c) => Some(c.to_string()),
            KeyCode::Backslash => Some(String::from("\\")),
            KeyCode::Bar => Some(String::from("|")),
            KeyCode::LessThan => Some(String::from("<")),
            KeyCode::Space => Some(String::from(" ")),
            _ => None,
        }
    }
}

impl Hash for Key {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.to_keycode_string().hash(state);
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        if self.code != other.code {
            return false;
        }

        if self.modifiers.len() != other.modifiers.len() {
            return false;
        }

        self.modifiers
            .iter()
            .all(|modifier| other.modifiers.contains(modifier))
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_text() {
            Some(text) => write!(f, "{}", text),
            None => write!(f, "{}", self.to_keycode_string()),
        }
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum KeyCode {
    Backslash,
    Backspace,
    Bar,
    Char(char),
    Delete,
    Down,
    End,
    Enter,
    Esc,
    Home,
    Left,
    LessThan,
    PageDown,
    PageUp,
    Right,
    Space,
    Tab,
    Up,
}

const NAMED_KEYS: [(KeyCode, &str); 17] = [
    (KeyCode::Backslash, "bslash"),
    (KeyCode::Backspace, "bs"),
    (KeyCode::Bar, "bar"),
    (KeyCode::Delete, "del"),
    (KeyCode::Down, "down"),
    (KeyCode::End, "end"),
    (KeyCode::Enter, "cr"),
    (KeyCode::Esc, "esc"),
    (KeyCode::Home, "home"),
    (KeyCode::Left, "left"),
    (KeyCode::LessThan, "lt"),
    (KeyCode::PageDown, "pagedown"),
    (KeyCode::PageUp, "pageup"),
    (KeyCode::Right, "right"),
    (KeyCode::Space, "space"),
    (KeyCode::Tab, "tab"),
    (KeyCode::Up, "up"),
];

impl KeyCode {
    pub fn from_keycode_string(keycode: &str) -> Option<Self> {
        if let Some((code, _)) = NAMED_KEYS.iter().find(|(_, name)| *name == keycode) {
            return Some(code.clone());
        }

        let mut chars = keycode.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Self::from_char(c)),
            _ => None,
        }
    }

    /// Chars with a name of their own map to it, letters are stored lower
    /// case since shift is a modifier.
    pub fn from_char(c: char) -> KeyCode {
        match c {
            '\\' => KeyCode::Backslash,
            '|' => KeyCode::Bar,
            '<' => KeyCode::LessThan,
            ' ' => KeyCode::Space,
            passed => KeyCode::Char(passed.to_ascii_lowercase()),
        }
    }
}

impl Display for KeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let KeyCode::Char(c) = self {
            return write!(f, "{}", c);
        }

        let name = NAMED_KEYS
            .iter()
            .find(|(code, _)| code == self)
            .map_or("", |(_, name)| *name);

        write!(f, "{}", name)
    }
}

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum KeyModifier {
    Alt,
    Command,
    Ctrl,
    Shift,
}

impl KeyModifier {
    fn prefix(&self) -> &'static str {
        match self {
            KeyModifier::Alt => "A-",
            KeyModifier::Command => "D-",
            KeyModifier::Ctrl => "C-",
            KeyModifier::Shift => "S-",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix.to_ascii_uppercase().as_str() {
            "A" => Some(KeyModifier::Alt),
            "C" => Some(KeyModifier::Ctrl),
            "D" => Some(KeyModifier::Command),
            "S" => Some(KeyModifier::Shift),
            _ => None,
        }
    }
}

use std::fmt::Display;

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Mode {
    #[default]
    Navigation,
    Prompt(PromptKind),
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Navigation => write!(f, "navigation"),
            Mode::Prompt(PromptKind::Move) => write!(f, "move"),
            Mode::Prompt(PromptKind::Rename) => write!(f, "rename"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PromptKind {
    Move,
    Rename,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    pub force: Option<Mode>,
    pub kind: BindingKind,
    pub repeat: Option<usize>,
    pub repeatable: bool,
}

impl Default for Binding {
    fn default() -> Self {
        Self {
            force: None,
            kind: BindingKind::default(),
            repeat: None,
            repeatable: true,
        }
    }
}

impl Binding {
    pub fn from_motion(motion: CursorDirection) -> Self {
        Self {
            kind: BindingKind::Motion(motion),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum BindingKind {
    Message(KeymapMessage),
    Motion(CursorDirection),
    #[default]
    None,
    Prompt(PromptMessage),
    Repeat,
    RepeatOrMotion(CursorDirection),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CursorDirection {
    Bottom,
    Down,
    Top,
    Up,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Cycle {
    Backward,
    Forward,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PromptCursor {
    End,
    Left,
    Right,
    Start,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PromptMessage {
    Clear,
    CyclePreset(Cycle),
    CycleRecent(Cycle),
    DeleteCharBeforeCursor,
    DeleteCharOnCursor,
    Insert(String),
    MoveCursor(PromptCursor),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum KeySequence {
    Completed(String),
    Changed(String),
    None,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum KeymapMessage {
    ChangeMode(Mode, Mode),
    ClearRecents,
    MoveCursor(usize, CursorDirection),
    OpenCurrent,
    Prompt(PromptMessage),
    Quit,
    Refresh,
    SubmitPrompt,
    TrashCurrent,
}

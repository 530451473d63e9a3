use ratatui::prelude::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Debug)]
pub struct AppLayout {
    pub queue: Rect,
    pub details: Rect,
    pub statusline: Rect,
    pub commandline: Rect,
}

impl AppLayout {
    pub fn new(rect: Rect) -> Self {
        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(100),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(rect);

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(Constraint::from_ratios([(2, 5), (3, 5)]))
            .split(main[0]);

        Self {
            queue: panes[0],
            details: panes[1],
            statusline: main[1],
            commandline: main[2],
        }
    }
}

#[derive(Clone, Debug)]
pub struct StatusLineLayout {
    pub root: Rect,
    pub key_sequence: Rect,
    pub position: Rect,
}

impl StatusLineLayout {
    pub fn new(rect: Rect, key_sequence_width: u16, position_width: u16) -> Self {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(key_sequence_width),
                Constraint::Length(1),
                Constraint::Length(position_width),
            ])
            .split(rect);

        Self {
            root: layout[0],
            key_sequence: layout[1],
            position: layout[3],
        }
    }
}

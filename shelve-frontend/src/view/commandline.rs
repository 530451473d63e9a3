use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use shelve_keymap::message::{Mode, PromptKind};

use crate::model::{Model, Status};

pub fn view(model: &Model, frame: &mut Frame, rect: Rect) {
    let kind = match &model.mode {
        Mode::Prompt(kind) => kind,
        Mode::Navigation => {
            frame.render_widget(Paragraph::new(status(model)), rect);
            return;
        }
    };

    let prefix = match kind {
        PromptKind::Rename => "rename: ".to_string(),
        PromptKind::Move => match model.selected_preset() {
            Some(preset) if model.prompt.text.trim().is_empty() => {
                format!("move to [{}]: ", preset)
            }
            _ => "move to: ".to_string(),
        },
    };

    let before_cursor: String = model.prompt.text.chars().take(model.prompt.cursor).collect();
    let offset = Span::raw(format!("{}{}", prefix, before_cursor)).width();

    let line = Line::from(vec![
        Span::styled(prefix, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(model.prompt.text.as_str()),
    ]);
    frame.render_widget(Paragraph::new(line), rect);

    let x = rect
        .x
        .saturating_add(u16::try_from(offset).unwrap_or(u16::MAX))
        .min(rect.right().saturating_sub(1));
    frame.set_cursor_position((x, rect.y));
}

fn status(model: &Model) -> Line<'_> {
    match &model.status {
        Some(Status::Error(error)) => {
            Line::from(Span::styled(error.as_str(), Style::default().fg(Color::Red)))
        }
        Some(Status::Information(info)) => Line::from(Span::raw(info.as_str())),
        None => Line::default(),
    }
}

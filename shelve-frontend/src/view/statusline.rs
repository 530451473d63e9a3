use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::{layout::StatusLineLayout, model::Model};

pub fn view(model: &Model, frame: &mut Frame, rect: Rect) {
    let style = Style::default().fg(Color::Gray);

    let root = Line::from(Span::styled(model.root.to_string_lossy(), style));
    let key_sequence = Line::from(Span::styled(model.key_sequence.as_str(), style));
    let position = get_position_content(model, style);

    let layout = StatusLineLayout::new(
        rect,
        width(&key_sequence),
        width(&position),
    );

    frame.render_widget(
        Block::default().style(Style::default().bg(Color::Black)),
        rect,
    );

    frame.render_widget(Paragraph::new(root), layout.root);
    frame.render_widget(Paragraph::new(key_sequence), layout.key_sequence);
    frame.render_widget(Paragraph::new(position), layout.position);
}

fn get_position_content(model: &Model, style: Style) -> Line<'static> {
    let count = model.listing.len();
    let position = if count == 0 {
        0
    } else {
        model.listing.index + 1
    };

    Line::from(Span::styled(format!("{}/{}", position, count), style))
}

fn width(line: &Line) -> u16 {
    u16::try_from(line.width()).unwrap_or(u16::MAX)
}

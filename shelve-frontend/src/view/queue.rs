use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::model::Model;

pub fn view(model: &Model, frame: &mut Frame, rect: Rect) {
    let items: Vec<_> = model
        .listing
        .files
        .iter()
        .map(|file| ListItem::new(file.as_str()))
        .collect();

    let title = format!(" queue ({}) ", model.listing.len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !model.listing.is_empty() {
        state.select(Some(model.listing.index));
    }

    frame.render_stateful_widget(list, rect, &mut state);
}

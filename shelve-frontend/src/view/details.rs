use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use shelve_keymap::message::{Mode, PromptKind};

use crate::model::Model;

const HELP: [(&str, &str); 9] = [
    ("j/k", "next / previous"),
    ("gg/G", "first / last"),
    ("o", "open in viewer"),
    ("r", "rename"),
    ("m", "move (tab: preset, C-n/C-p: recent)"),
    ("dd", "trash"),
    ("cr", "clear recent folders"),
    ("C-l", "refresh"),
    ("q", "quit"),
];

pub fn view(model: &Model, frame: &mut Frame, rect: Rect) {
    let label = Style::default().fg(Color::DarkGray);
    let heading = Style::default().add_modifier(Modifier::BOLD);

    let current = match &model.listing.current {
        Some(file) => Span::styled(file.as_str(), heading),
        None => Span::styled("no files left to sort", label),
    };

    let position = if model.listing.is_empty() {
        "0 / 0".to_string()
    } else {
        format!("{} / {}", model.listing.index + 1, model.listing.len())
    };

    let mut lines = vec![
        Line::from(vec![Span::styled("file      ", label), current]),
        Line::from(vec![Span::styled("position  ", label), Span::raw(position)]),
        Line::from(vec![
            Span::styled("root      ", label),
            Span::raw(model.root.to_string_lossy().to_string()),
        ]),
        Line::default(),
        Line::styled("destinations", heading),
    ];

    let moving = model.mode == Mode::Prompt(PromptKind::Move);
    for (index, preset) in model.presets.iter().enumerate() {
        let selected = moving && model.prompt.preset == Some(index);
        let marker = if selected { "> " } else { "  " };
        let style = if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        lines.push(Line::styled(format!("{}{}", marker, preset), style));
    }

    lines.push(Line::default());
    lines.push(Line::styled("recent folders", heading));
    if model.recents.is_empty() {
        lines.push(Line::styled("  none", label));
    }

    for (index, folder) in model.recents.entries().iter().enumerate() {
        let style = if moving && model.prompt.recent == Some(index) {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{:>3} ", index + 1), label),
            Span::styled(folder.as_str(), style),
        ]));
    }

    lines.push(Line::default());
    for (keys, description) in HELP {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<6}", keys), label),
            Span::styled(description, label),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" details "))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, rect);
}

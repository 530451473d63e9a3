use crate::{error::AppError, layout::AppLayout, model::Model, terminal::TerminalWrapper};

mod commandline;
mod details;
mod queue;
mod statusline;

pub fn render_model(terminal: &mut TerminalWrapper, model: &Model) -> Result<(), AppError> {
    terminal.draw(|frame| {
        let layout = AppLayout::new(frame.area());

        queue::view(model, frame, layout.queue);
        details::view(model, frame, layout.details);
        statusline::view(model, frame, layout.statusline);
        commandline::view(model, frame, layout.commandline);
    })
}

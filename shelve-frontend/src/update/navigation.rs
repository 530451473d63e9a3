use shelve_keymap::message::CursorDirection;

use crate::{action::Action, model::Model, task::Task};

/// Selects the target in the current snapshot right away and re-lists, so the
/// selection is corrected if root changed in the meantime.
pub fn move_cursor(model: &mut Model, count: usize, direction: &CursorDirection) -> Vec<Action> {
    let index = model.listing.index;
    let target = match direction {
        CursorDirection::Bottom => model.listing.len().saturating_sub(1),
        CursorDirection::Down => index.saturating_add(count),
        CursorDirection::Top => 0,
        CursorDirection::Up => index.saturating_sub(count),
    };

    model.listing = std::mem::take(&mut model.listing).select(target);

    vec![Action::Task(Task::Refresh(model.listing.index))]
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use shelve_core::Listing;

    use super::*;

    fn model(len: usize, index: usize) -> Model {
        let mut model = Model::new(PathBuf::from("/inbox"), Vec::new());
        let files = (0..len).map(|i| format!("{:02}.pdf", i)).collect();
        model.listing = Listing::new(files, index);
        model
    }

    #[test]
    fn move_cursor_saturates_at_both_ends() {
        let mut model = model(3, 1);

        let _ = move_cursor(&mut model, 10, &CursorDirection::Down);
        assert_eq!(2, model.listing.index);

        let _ = move_cursor(&mut model, 10, &CursorDirection::Up);
        assert_eq!(0, model.listing.index);
    }

    #[test]
    fn move_cursor_top_and_bottom() {
        let mut model = model(5, 2);

        let _ = move_cursor(&mut model, 1, &CursorDirection::Bottom);
        assert_eq!(4, model.listing.index);
        assert_eq!(Some("04.pdf".to_string()), model.listing.current);

        let _ = move_cursor(&mut model, 1, &CursorDirection::Top);
        assert_eq!(0, model.listing.index);
    }

    #[test]
    fn move_cursor_on_empty_queue_stays_at_zero() {
        let mut model = model(0, 0);

        let actions = move_cursor(&mut model, 1, &CursorDirection::Down);

        assert_eq!(0, model.listing.index);
        assert_eq!(None, model.listing.current);
        assert_eq!(vec![Action::Task(Task::Refresh(0))], actions);
    }
}

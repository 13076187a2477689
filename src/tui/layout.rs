use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Sidebar width in columns
pub const SIDEBAR_WIDTH: u16 = 26;
/// Below this terminal width the sidebar is hidden
const MIN_WIDTH_FOR_SIDEBAR: u16 = 70;
/// Input box: one text row plus borders
const INPUT_HEIGHT: u16 = 3;

/// Chat screen layout
pub struct AppLayout {
    pub sidebar_area: Rect,
    pub messages_area: Rect,
    pub input_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// - Sidebar: fixed width (left), dropped on narrow terminals
    /// - Messages: remaining space (right)
    /// - Input box: 3 rows under the messages
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        let sidebar_width = if area.width >= MIN_WIDTH_FOR_SIDEBAR { SIDEBAR_WIDTH } else { 0 };
        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(1)])
            .split(vertical_chunks[0]);

        let chat_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(INPUT_HEIGHT)])
            .split(horizontal_chunks[1]);

        Self {
            sidebar_area: horizontal_chunks[0],
            messages_area: chat_chunks[0],
            input_area: chat_chunks[1],
            status_area: vertical_chunks[1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_splits_correctly() {
        let layout = AppLayout::new(Rect::new(0, 0, 100, 30));

        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.status_area.y, 29);
        assert_eq!(layout.status_area.width, 100);

        assert_eq!(layout.sidebar_area.width, SIDEBAR_WIDTH);
        assert_eq!(layout.sidebar_area.height, 29);

        assert_eq!(layout.messages_area.width, 100 - SIDEBAR_WIDTH);
        assert_eq!(layout.messages_area.height, 26);
        assert_eq!(layout.input_area.height, 3);
        assert_eq!(layout.input_area.y, 26);
    }

    #[test]
    fn test_narrow_terminal_hides_sidebar() {
        let layout = AppLayout::new(Rect::new(0, 0, 50, 20));
        assert_eq!(layout.sidebar_area.width, 0);
        assert_eq!(layout.messages_area.width, 50);
    }
}

//! Layout dimension constants for TUI rendering.

/// Height of the header bar in lines.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of the search input widget (border + text).
pub const SEARCH_INPUT_HEIGHT: u16 = 3;

/// Height of one card: border, name, id, cover line, border.
pub const CARD_HEIGHT: u16 = 5;

/// Narrowest a card may be before the grid drops a column.
pub const MIN_CARD_WIDTH: u16 = 24;

/// Share of the content width given to the viewer when it is open
/// beside the grid.
pub const VIEWER_WIDTH_PERCENT: u16 = 55;

/// Lines moved per viewer scroll step.
pub const VIEWER_SCROLL_STEP: u16 = 5;

/// Width percentage for overlay popups (help, import prompt).
pub const POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for the help overlay.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 70;

/// Number of card columns that fit in `width` cells. Always at least one.
pub fn grid_columns(width: u16) -> usize {
    usize::from((width / MIN_CARD_WIDTH).max(1))
}

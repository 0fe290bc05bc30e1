//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Grid cursor
    /// Move card selection left. Default: h/←
    SelectLeft,
    /// Move card selection right. Default: l/→
    SelectRight,
    /// Move card selection up one row. Default: k/↑
    SelectUp,
    /// Move card selection down one row. Default: j/↓
    SelectDown,
    /// Open the selected card in the viewer. Default: Enter
    OpenSelected,

    // Pagination
    /// Expose the next page of the filtered view. Default: m
    LoadMore,

    // Query
    /// Focus the search input. Default: /
    StartSearch,
    /// Clear the search text. Default: Esc (while typing)
    ClearSearch,
    /// Cycle the sort selector. Default: o
    CycleSort,

    // Viewer
    /// Close the viewer pane. Default: Esc / c
    CloseViewer,
    /// Toggle fullscreen viewer. Default: f
    ToggleFullscreen,
    /// Pop the open document out to a standalone file. Default: b
    PopOut,
    /// Scroll the viewer up. Default: k/↑ (viewer focused)
    ViewerScrollUp,
    /// Scroll the viewer down. Default: j/↓ (viewer focused)
    ViewerScrollDown,

    // Persisted state
    /// Export stores to a `.data` file. Default: e
    ExportState,
    /// Prompt for a `.data` file to import. Default: i
    ImportState,

    // Application
    /// Toggle dark mode. Default: d
    ToggleDarkMode,
    /// Re-fetch the record list. Default: r
    Reload,
    /// Show help overlay. Default: ?
    Help,
    /// Exit. Default: q/Ctrl+c
    Quit,
}

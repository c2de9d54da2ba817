use super::document::DocumentId;
use super::style::TextStyle;

/// All messages that can be sent through the FLTK channel.
/// Each menu callback sends one of these; the dispatch loop in main handles them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    // File
    TabNew,
    FileOpen,
    FileSave,
    TabCloseActive,
    TabRenameActive,
    TabNext,
    TabPrevious,
    FileQuit,
    WindowClose,

    // Tab bar
    TabSwitch(DocumentId),
    TabClose(DocumentId),
    TabRename(DocumentId),

    // Edit
    EditCut,
    EditCopy,
    EditPaste,
    ApplyStyle(TextStyle),

    // Undo/Redo
    EditUndo,
    EditRedo,

    // Themes
    ToggleTheme,
}

use std::path::Path;

use fltk::{
    dialog,
    menu::MenuBar,
    prelude::*,
    text::{TextBuffer, TextEditor},
    window::Window,
};

use super::controllers::tabs::TabManager;
use super::domain::document::DocumentId;
use super::domain::settings::AppSettings;
use super::domain::style::TextStyle;
use super::domain::theme::Theme;
use super::infrastructure::error::AppError;
use super::services::file_io::{
    default_extension_would_overwrite, read_text_file, with_default_extension, write_text_file,
};
use crate::ui::dialogs::rename_tab::show_rename_tab_dialog;
use crate::ui::file_dialogs::{native_open_dialog, native_save_dialog};
use crate::ui::main_window::{APP_TITLE, MainWidgets};
use crate::ui::menu::set_theme_label;
use crate::ui::style_table::style_table;
use crate::ui::tab_bar::TabBar;
use crate::ui::theme::apply_theme;
#[cfg(target_os = "windows")]
use crate::ui::theme::set_windows_titlebar_theme;

/// The editor shell: one window, one editor widget, and the tab collection
/// whose active buffer is bound to that editor.
pub struct AppState {
    pub tab_manager: TabManager,
    pub tab_bar: TabBar,
    pub editor: TextEditor,
    pub window: Window,
    pub menu: MenuBar,
    pub theme: Theme,
    theme_menu_index: i32,
    font_size: i32,
}

/// The chooser only confirmed the name the user typed; ask again for the
/// `.txt` name actually written.
fn confirm_replace(path: &Path) -> bool {
    let prompt = format!("{} already exists.\nDo you want to replace it?", path.display());
    dialog::choice2_default(&prompt, "Cancel", "Replace", "") == Some(1)
}

impl AppState {
    pub fn new(widgets: MainWidgets, settings: &AppSettings, theme: Theme, theme_menu_index: i32) -> Self {
        let MainWidgets {
            wind,
            menu,
            tab_bar,
            text_editor,
        } = widgets;

        let mut state = Self {
            tab_manager: TabManager::new(settings.undo_limit),
            tab_bar,
            editor: text_editor,
            window: wind,
            menu,
            theme,
            theme_menu_index,
            font_size: settings.font_size as i32,
        };
        state.new_tab();
        state.apply_theme();
        state
    }

    // --- Tabs ---

    /// Remember where the cursor was in the tab we are leaving.
    fn store_cursor(&mut self) {
        let pos = self.editor.insert_position();
        if let Some(doc) = self.tab_manager.active_doc_mut() {
            doc.cursor_position = pos;
            doc.seal_history();
        }
    }

    /// Bind the active document's buffer and marks to the editor and put
    /// the cursor back where that tab left it.
    fn bind_active_buffer(&mut self) {
        if let Some(doc) = self.tab_manager.active_doc() {
            self.editor.set_buffer(doc.buffer.clone());
            self.editor
                .set_highlight_data_ext(doc.style_buffer.clone(), style_table(self.theme, self.font_size));
            self.editor.set_insert_position(doc.cursor_position);
            self.editor.show_insert_position();
        }
    }

    /// Swap in a style table for the current theme. Buffer and cursor stay.
    fn restyle_active(&mut self) {
        if let Some(doc) = self.tab_manager.active_doc() {
            self.editor
                .set_highlight_data_ext(doc.style_buffer.clone(), style_table(self.theme, self.font_size));
        }
    }

    fn show_active(&mut self) {
        self.bind_active_buffer();
        self.update_window_title();
        self.rebuild_tab_bar();
        let _ = self.editor.take_focus();
        self.editor.redraw();
    }

    pub fn update_window_title(&mut self) {
        let title = match self.tab_manager.active_doc() {
            Some(doc) => format!("{} - {}", doc.display_name, APP_TITLE),
            None => APP_TITLE.to_string(),
        };
        self.window.set_label(&title);
    }

    pub fn rebuild_tab_bar(&mut self) {
        let active_id = self.tab_manager.active_id();
        self.tab_bar
            .rebuild(self.tab_manager.documents(), active_id, self.theme);
    }

    /// New Tab: append "Tab {n}", select it, and give it the current theme
    /// and the style table.
    pub fn new_tab(&mut self) {
        self.store_cursor();
        self.tab_manager.add_tab();
        self.show_active();
    }

    pub fn switch_to_document(&mut self, id: DocumentId) {
        if self.tab_manager.active_id() == Some(id) {
            return;
        }
        self.store_cursor();
        self.tab_manager.set_active(id);
        self.show_active();
    }

    pub fn next_tab(&mut self) {
        if let Some(id) = self.tab_manager.next_doc_id() {
            self.switch_to_document(id);
        }
    }

    pub fn prev_tab(&mut self) {
        if let Some(id) = self.tab_manager.prev_doc_id() {
            self.switch_to_document(id);
        }
    }

    pub fn close_active_tab(&mut self) {
        if let Some(id) = self.tab_manager.active_id() {
            self.close_tab(id);
        }
    }

    /// Close a tab. The last remaining tab stays; the user gets a warning.
    pub fn close_tab(&mut self, id: DocumentId) {
        let closing_active = self.tab_manager.active_id() == Some(id);
        if closing_active && self.tab_manager.count() > 1 {
            // Unbind before the buffer is freed with its document
            self.editor.set_buffer(None::<TextBuffer>);
        }

        match self.tab_manager.remove(id) {
            Ok(()) => self.show_active(),
            Err(AppError::LastTab) => {
                tracing::warn!("refused to close the last tab");
                dialog::alert_default(&AppError::LastTab.to_string());
            }
            Err(e) => tracing::error!("closing tab failed: {}", e),
        }
    }

    pub fn rename_active_tab(&mut self) {
        if let Some(id) = self.tab_manager.active_id() {
            self.rename_tab(id);
        }
    }

    /// Prompt for a new name. Cancel or an empty answer keeps the old one.
    pub fn rename_tab(&mut self, id: DocumentId) {
        let Some(current) = self.tab_manager.doc_by_id(id).map(|d| d.display_name.clone()) else {
            return;
        };
        let Some(new_name) = show_rename_tab_dialog(&current) else {
            return;
        };
        if self.tab_manager.rename(id, &new_name) {
            tracing::debug!(?id, from = %current, to = %new_name, "tab renamed");
            self.update_window_title();
            self.rebuild_tab_bar();
        }
    }

    // --- File operations ---

    /// Open: replace the active buffer's content with a file's text.
    pub fn file_open(&mut self) {
        let Some(path) = native_open_dialog() else {
            return;
        };
        match read_text_file(Path::new(&path)) {
            Ok(content) => {
                if let Some(doc) = self.tab_manager.active_doc_mut() {
                    doc.replace_text(&content);
                }
                self.editor.set_insert_position(0);
                self.editor.show_insert_position();
                self.editor.redraw();
            }
            Err(e) => {
                tracing::error!(%path, "open failed: {}", e);
                dialog::alert_default(&format!("Error opening file: {}", e));
            }
        }
    }

    /// Save: write the active buffer's text (never its marks) to a chosen path.
    pub fn file_save(&mut self) {
        let Some(text) = self.tab_manager.active_doc().map(|d| d.text()) else {
            return;
        };
        let Some(chosen) = native_save_dialog() else {
            return;
        };
        let path = with_default_extension(&chosen);
        if default_extension_would_overwrite(&chosen, &path) && !confirm_replace(&path) {
            tracing::debug!(path = %path.display(), "save cancelled, file kept");
            return;
        }
        if let Err(e) = write_text_file(&path, &text) {
            tracing::error!(path = %path.display(), "save failed: {}", e);
            dialog::alert_default(&format!("Error saving file: {}", e));
        }
    }

    // --- Edit ---

    fn has_selection(&self) -> bool {
        self.tab_manager
            .active_doc()
            .is_some_and(|d| d.selection().is_some())
    }

    fn seal_active_history(&self) {
        if let Some(doc) = self.tab_manager.active_doc() {
            doc.seal_history();
        }
    }

    pub fn cut(&mut self) {
        if self.has_selection() {
            self.seal_active_history();
            self.editor.cut();
        }
    }

    pub fn copy(&mut self) {
        if self.has_selection() {
            self.editor.copy();
        }
    }

    pub fn paste(&mut self) {
        self.seal_active_history();
        self.editor.paste();
    }

    /// Mark the selection. Without a selection this does nothing.
    pub fn apply_style(&mut self, style: TextStyle) {
        let applied = self
            .tab_manager
            .active_doc_mut()
            .is_some_and(|d| d.apply_style(style));
        if applied {
            self.editor.redraw();
        } else {
            tracing::debug!(style = style.name(), "no selection to mark");
        }
    }

    // --- Undo/Redo ---

    pub fn undo(&mut self) {
        let cursor = self.tab_manager.active_doc_mut().and_then(|d| d.undo());
        self.place_cursor(cursor, "undo");
    }

    pub fn redo(&mut self) {
        let cursor = self.tab_manager.active_doc_mut().and_then(|d| d.redo());
        self.place_cursor(cursor, "redo");
    }

    fn place_cursor(&mut self, cursor: Option<i32>, action: &str) {
        match cursor {
            Some(pos) => {
                self.editor.set_insert_position(pos);
                self.editor.show_insert_position();
                self.editor.redraw();
            }
            None => tracing::debug!("nothing to {}", action),
        }
    }

    // --- Themes ---

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        tracing::info!(theme = ?self.theme, "theme toggled");
        self.apply_theme();
        set_theme_label(&self.menu, self.theme_menu_index, self.theme);
    }

    /// Push the current theme to every widget. Tabs share the one editor,
    /// so restyling the active buffer covers all of them; the others get
    /// the new table when they are next bound.
    pub fn apply_theme(&mut self) {
        apply_theme(&mut self.editor, &mut self.window, &mut self.menu, self.theme);
        self.tab_bar.apply_theme(self.theme);
        #[cfg(target_os = "windows")]
        if self.window.shown() {
            set_windows_titlebar_theme(&self.window, self.theme);
        }
        self.restyle_active();
        self.editor.redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::messages::Message;
    use crate::ui::main_window::build_main_window;
    use crate::ui::menu::build_menu;
    use crate::ui::widget_test_lock;
    use fltk::app;

    fn shell() -> AppState {
        let settings = AppSettings {
            word_wrap_enabled: false,
            ..AppSettings::default()
        };
        let (sender, _receiver) = app::channel::<Message>();
        let mut widgets = build_main_window(&settings, &sender);
        let index = build_menu(&mut widgets.menu, &sender, Theme::Light);
        AppState::new(widgets, &settings, Theme::Light, index)
    }

    #[test]
    #[ignore = "builds the main window; needs a display"]
    fn test_theme_toggle_keeps_caret() {
        let _guard = widget_test_lock();
        let mut state = shell();
        state.tab_manager.active_doc_mut().unwrap().buffer.set_text("hello");
        state.editor.set_insert_position(5);

        state.toggle_theme();
        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(state.editor.insert_position(), 5);

        state.toggle_theme();
        assert_eq!(state.theme, Theme::Light);
        assert_eq!(state.editor.insert_position(), 5);
    }

    #[test]
    #[ignore = "builds the main window; needs a display"]
    fn test_switching_back_restores_caret() {
        let _guard = widget_test_lock();
        let mut state = shell();
        let first = state.tab_manager.active_id().unwrap();
        state.tab_manager.active_doc_mut().unwrap().buffer.set_text("hello");
        state.editor.set_insert_position(3);

        state.new_tab();
        assert_eq!(state.editor.insert_position(), 0);

        state.switch_to_document(first);
        assert_eq!(state.editor.insert_position(), 3);
    }
}

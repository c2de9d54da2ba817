use fltk::{
    app::Sender,
    enums::{Key, Shortcut},
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::domain::messages::Message;
use crate::app::domain::style::TextStyle;
use crate::app::domain::theme::Theme;

/// Path prefix of the single Themes entry; the label after it changes.
const THEMES_MENU: &str = "Themes";

/// Build the menu bar. Returns the index of the theme toggle item so its
/// label can be updated in place.
pub fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>, theme: Theme) -> i32 {
    let s = sender;
    let divider = MenuFlag::MenuDivider;
    let normal = MenuFlag::Normal;

    // File
    menu.add("File/New Tab", Shortcut::Ctrl | 't', normal, { let s = *s; move |_| s.send(Message::TabNew) });
    menu.add("File/Open", Shortcut::Ctrl | 'o', normal, { let s = *s; move |_| s.send(Message::FileOpen) });
    menu.add("File/Save", Shortcut::Ctrl | 's', divider, { let s = *s; move |_| s.send(Message::FileSave) });
    menu.add("File/Close Tab", Shortcut::Ctrl | 'w', normal, { let s = *s; move |_| s.send(Message::TabCloseActive) });
    menu.add("File/Rename Tab", Shortcut::None, normal, { let s = *s; move |_| s.send(Message::TabRenameActive) });
    menu.add("File/Next Tab", Shortcut::Ctrl | Key::Tab, normal, { let s = *s; move |_| s.send(Message::TabNext) });
    menu.add("File/Previous Tab", Shortcut::Ctrl | Shortcut::Shift | Key::Tab, divider, { let s = *s; move |_| s.send(Message::TabPrevious) });
    menu.add("File/Exit", Shortcut::Ctrl | 'q', normal, { let s = *s; move |_| s.send(Message::FileQuit) });

    // Edit
    menu.add("Edit/Cut", Shortcut::Ctrl | 'x', normal, { let s = *s; move |_| s.send(Message::EditCut) });
    menu.add("Edit/Copy", Shortcut::Ctrl | 'c', normal, { let s = *s; move |_| s.send(Message::EditCopy) });
    menu.add("Edit/Paste", Shortcut::Ctrl | 'v', divider, { let s = *s; move |_| s.send(Message::EditPaste) });
    menu.add("Edit/Bold", Shortcut::Ctrl | 'b', normal, { let s = *s; move |_| s.send(Message::ApplyStyle(TextStyle::Bold)) });
    menu.add("Edit/Italic", Shortcut::Ctrl | 'i', normal, { let s = *s; move |_| s.send(Message::ApplyStyle(TextStyle::Italic)) });
    menu.add("Edit/Underline", Shortcut::Ctrl | 'u', normal, { let s = *s; move |_| s.send(Message::ApplyStyle(TextStyle::Underline)) });

    // Undo/Redo ("\/" keeps the slash out of the menu path)
    menu.add("Undo\\/Redo/Undo", Shortcut::Ctrl | 'z', normal, { let s = *s; move |_| s.send(Message::EditUndo) });
    menu.add("Undo\\/Redo/Redo", Shortcut::Ctrl | 'y', normal, { let s = *s; move |_| s.send(Message::EditRedo) });

    // Themes
    let path = format!("{}/{}", THEMES_MENU, theme.toggle_label());
    menu.add(&path, Shortcut::None, normal, { let s = *s; move |_| s.send(Message::ToggleTheme) })
}

/// Relabel the theme toggle to name the theme it switches to.
pub fn set_theme_label(menu: &MenuBar, index: i32, theme: Theme) {
    match menu.at(index) {
        Some(mut item) => {
            item.set_label(theme.toggle_label());
        }
        None => tracing::warn!(index, "theme menu item not found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::widget_test_lock;
    use fltk::app;

    fn label_at(menu: &MenuBar, index: i32) -> Option<String> {
        menu.at(index).and_then(|item| item.label())
    }

    #[test]
    fn test_theme_item_label_follows_toggles() {
        let _guard = widget_test_lock();
        let (sender, _receiver) = app::channel::<Message>();
        let mut menu = MenuBar::new(0, 0, 400, 30, "");

        let index = build_menu(&mut menu, &sender, Theme::Light);
        assert_eq!(label_at(&menu, index).as_deref(), Some("Dark Theme"));
        assert_eq!(menu.find_index("Themes/Dark Theme"), index);

        let dark = Theme::Light.toggled();
        set_theme_label(&menu, index, dark);
        assert_eq!(label_at(&menu, index).as_deref(), Some("Light Theme"));

        set_theme_label(&menu, index, dark.toggled());
        assert_eq!(label_at(&menu, index).as_deref(), Some("Dark Theme"));
    }

    #[test]
    fn test_dark_start_labels_light_theme() {
        let _guard = widget_test_lock();
        let (sender, _receiver) = app::channel::<Message>();
        let mut menu = MenuBar::new(0, 0, 400, 30, "");

        let index = build_menu(&mut menu, &sender, Theme::Dark);
        assert_eq!(label_at(&menu, index).as_deref(), Some("Light Theme"));
    }

    #[test]
    fn test_tab_cycling_items_exist() {
        let _guard = widget_test_lock();
        let (sender, _receiver) = app::channel::<Message>();
        let mut menu = MenuBar::new(0, 0, 400, 30, "");
        build_menu(&mut menu, &sender, Theme::Light);

        assert!(menu.find_index("File/Next Tab") >= 0);
        assert!(menu.find_index("File/Previous Tab") >= 0);
    }
}

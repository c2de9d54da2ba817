use fltk::{
    app::{self, Sender},
    enums::{Event, Key},
    group::Flex,
    menu::MenuBar,
    prelude::*,
    text::{TextBuffer, TextEditor, WrapMode},
    window::Window,
};

use crate::app::domain::messages::Message;
use crate::app::domain::settings::AppSettings;
use crate::app::domain::style::TextStyle;
use super::tab_bar::{TabBar, TAB_BAR_HEIGHT};

pub const APP_TITLE: &str = "TabPad";

pub struct MainWidgets {
    pub wind: Window,
    pub menu: MenuBar,
    pub tab_bar: TabBar,
    pub text_editor: TextEditor,
}

/// Ctrl+key combinations the editor would otherwise swallow with its own
/// bindings (FLTK's single-level undo in particular).
fn editor_shortcut(key: Key, shift: bool) -> Option<Message> {
    let ch = key.to_char()?.to_ascii_lowercase();
    match (ch, shift) {
        ('z', false) => Some(Message::EditUndo),
        ('z', true) | ('y', _) => Some(Message::EditRedo),
        ('b', _) => Some(Message::ApplyStyle(TextStyle::Bold)),
        ('i', _) => Some(Message::ApplyStyle(TextStyle::Italic)),
        ('u', _) => Some(Message::ApplyStyle(TextStyle::Underline)),
        _ => None,
    }
}

pub fn build_main_window(settings: &AppSettings, sender: &Sender<Message>) -> MainWidgets {
    let (w, h) = (settings.window_width, settings.window_height);
    let mut wind = Window::new(100, 100, w, h, APP_TITLE);
    wind.set_xclass(APP_TITLE);

    let mut flex = Flex::new(0, 0, w, h, None);
    flex.set_type(fltk::group::FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, 30, "");
    flex.fixed(&menu, 30);

    let tab_bar = TabBar::new(0, 30, w, *sender);
    flex.fixed(&tab_bar.widget, TAB_BAR_HEIGHT);

    let mut text_editor = TextEditor::new(0, 0, 0, 0, "");
    text_editor.set_buffer(TextBuffer::default());
    text_editor.set_text_size(settings.font_size as i32);
    if settings.word_wrap_enabled {
        text_editor.wrap_mode(WrapMode::AtBounds, 0);
    }

    let s = *sender;
    text_editor.handle(move |_, event| {
        if event != Event::KeyDown || !app::is_event_ctrl() {
            return false;
        }
        match editor_shortcut(app::event_key(), app::is_event_shift()) {
            Some(msg) => {
                s.send(msg);
                true
            }
            None => false,
        }
    });

    flex.end();
    wind.resizable(&flex);
    wind.end();

    MainWidgets {
        wind,
        menu,
        tab_bar,
        text_editor,
    }
}

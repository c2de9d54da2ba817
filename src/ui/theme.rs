use fltk::{enums::Color, menu::MenuBar, prelude::*, text::TextEditor, window::Window};

use crate::app::domain::theme::Theme;

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::from_rgb(r, g, b)
}

/// Apply the theme's colors to the editor and the window chrome.
pub fn apply_theme(editor: &mut TextEditor, window: &mut Window, menu: &mut MenuBar, theme: Theme) {
    let palette = theme.palette();

    editor.set_color(rgb(palette.background));
    editor.set_text_color(rgb(palette.foreground));
    editor.set_cursor_color(rgb(palette.foreground));
    editor.set_selection_color(rgb(palette.selection));

    window.set_color(rgb(palette.chrome));
    window.set_label_color(rgb(palette.foreground));
    menu.set_color(rgb(palette.chrome));
    menu.set_text_color(if theme.is_dark() {
        Color::from_rgb(220, 220, 220)
    } else {
        Color::Black
    });
    // Hover color
    menu.set_selection_color(if theme.is_dark() {
        Color::from_rgb(60, 60, 60)
    } else {
        Color::from_rgb(200, 200, 200)
    });

    editor.redraw();
    window.redraw();
    menu.redraw();
}

/// Set Windows title bar theme (Windows 10 build 1809+)
/// Must be called AFTER window.show() to have a valid HWND
#[cfg(target_os = "windows")]
pub fn set_windows_titlebar_theme(window: &Window, theme: Theme) {
    use std::mem::size_of;
    use std::ptr::from_ref;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Dwm::{DWMWINDOWATTRIBUTE, DwmSetWindowAttribute};

    let on: i32 = if theme.is_dark() { 1 } else { 0 };

    // SAFETY: the window has been shown, so raw_handle() is a live HWND.
    unsafe {
        let hwnd = HWND(window.raw_handle() as *mut std::ffi::c_void);

        // 20 = DWMWA_USE_IMMERSIVE_DARK_MODE (Windows 11 / Windows 10 2004+),
        // 19 = the same attribute on Windows 10 1809-1903
        for attr in [20, 19] {
            if let Err(e) = DwmSetWindowAttribute(
                hwnd,
                DWMWINDOWATTRIBUTE(attr),
                from_ref(&on).cast(),
                size_of::<i32>() as u32,
            ) {
                tracing::debug!("DwmSetWindowAttribute({}) failed: {}", attr, e);
            }
        }
    }
}

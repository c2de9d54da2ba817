use fltk::{
    enums::{Color, Font},
    text::{StyleTableEntryExt, TextAttr},
};

use crate::app::domain::style::{StyleMask, TextStyle};
use crate::app::domain::theme::Theme;

fn font_for(mask: StyleMask) -> Font {
    match (mask.has(TextStyle::Bold), mask.has(TextStyle::Italic)) {
        (false, false) => Font::Helvetica,
        (true, false) => Font::HelveticaBold,
        (false, true) => Font::HelveticaItalic,
        (true, true) => Font::HelveticaBoldItalic,
    }
}

/// One entry per style character `'A'..='H'`, colored for `theme`.
/// Rebuilt on every theme change since the entries carry the foreground.
pub fn style_table(theme: Theme, font_size: i32) -> Vec<StyleTableEntryExt> {
    let palette = theme.palette();
    let (fr, fg, fb) = palette.foreground;
    let (br, bg, bb) = palette.background;
    StyleMask::all()
        .map(|mask| StyleTableEntryExt {
            color: Color::from_rgb(fr, fg, fb),
            font: font_for(mask),
            size: font_size,
            attr: if mask.has(TextStyle::Underline) {
                TextAttr::Underline
            } else {
                TextAttr::None
            },
            bgcolor: Color::from_rgb(br, bg, bb),
        })
        .collect()
}

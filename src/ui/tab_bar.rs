use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    app::{self, Sender},
    draw,
    enums::{Align, Color, Event, Font},
    prelude::*,
    widget::Widget,
};

use crate::app::domain::document::{Document, DocumentId};
use crate::app::domain::messages::Message;
use crate::app::domain::theme::Theme;

pub const TAB_BAR_HEIGHT: i32 = 30;

const MIN_TAB_WIDTH: i32 = 60;
const MAX_TAB_WIDTH: i32 = 200;
const CLOSE_BTN_SIZE: i32 = 14;
const CLOSE_BTN_MARGIN: i32 = 6;
const TAB_H_PADDING: i32 = 10;
const CORNER_RADIUS: i32 = 6;
const TAB_GAP: i32 = 1;
const PLUS_BTN_WIDTH: i32 = 28;
const PLUS_BTN_MARGIN: i32 = 4;

struct TabInfo {
    id: DocumentId,
    display_name: String,
    is_active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum LayoutItem {
    Tab { index: usize, x: i32, width: i32 },
    PlusButton { x: i32 },
}

#[derive(Debug, PartialEq)]
enum HitResult {
    Tab { index: usize, is_close: bool },
    PlusButton,
    None,
}

struct TabBarState {
    tabs: Vec<TabInfo>,
    layout: Vec<LayoutItem>,
    theme: Theme,
    hover_tab_index: Option<usize>,
    hover_close: bool,
    hover_plus: bool,
    sender: Sender<Message>,
    widget_w: i32,
}

/// Row of tabs above the editor. Purely a view: it draws the documents it
/// was last rebuilt with and turns clicks into messages.
pub struct TabBar {
    pub widget: Widget,
    state: Rc<RefCell<TabBarState>>,
}

impl TabBar {
    pub fn new(x: i32, y: i32, w: i32, sender: Sender<Message>) -> Self {
        let state = Rc::new(RefCell::new(TabBarState {
            tabs: Vec::new(),
            layout: Vec::new(),
            theme: Theme::Light,
            hover_tab_index: None,
            hover_close: false,
            hover_plus: false,
            sender,
            widget_w: w,
        }));

        let mut widget = Widget::new(x, y, w, TAB_BAR_HEIGHT, None);

        let draw_state = state.clone();
        widget.draw(move |wid| {
            let st = draw_state.borrow();
            draw_tab_bar(wid, &st);
        });

        let handle_state = state.clone();
        widget.handle(move |wid, event| handle_tab_bar(wid, event, &handle_state));

        // The window layout hands us our real width; tabs must follow it
        let resize_state = state.clone();
        widget.resize_callback(move |_, _, _, w, _| {
            let mut st = resize_state.borrow_mut();
            st.widget_w = w;
            st.layout = compute_layout(st.tabs.len(), w);
        });

        Self { widget, state }
    }

    pub fn rebuild(&mut self, documents: &[Document], active_id: Option<DocumentId>, theme: Theme) {
        let mut st = self.state.borrow_mut();
        st.theme = theme;
        st.widget_w = self.widget.w();
        st.tabs = documents
            .iter()
            .map(|doc| TabInfo {
                id: doc.id,
                display_name: doc.display_name.clone(),
                is_active: active_id == Some(doc.id),
            })
            .collect();
        st.hover_tab_index = None;
        st.hover_close = false;
        st.layout = compute_layout(st.tabs.len(), st.widget_w);
        drop(st);
        self.widget.redraw();
    }

    pub fn apply_theme(&mut self, theme: Theme) {
        self.state.borrow_mut().theme = theme;
        self.widget.redraw();
    }
}

// --- Layout computation ---

/// Tabs share the width left of the plus button, clamped per tab.
fn compute_layout(tab_count: usize, widget_w: i32) -> Vec<LayoutItem> {
    let mut layout = Vec::with_capacity(tab_count + 1);
    if tab_count == 0 {
        layout.push(LayoutItem::PlusButton { x: PLUS_BTN_MARGIN });
        return layout;
    }

    let count = tab_count as i32;
    let available = widget_w - PLUS_BTN_WIDTH - PLUS_BTN_MARGIN * 2 - TAB_GAP * count;
    let width = (available / count).clamp(MIN_TAB_WIDTH, MAX_TAB_WIDTH);

    let mut x = 0;
    for index in 0..tab_count {
        layout.push(LayoutItem::Tab { index, x, width });
        x += width + TAB_GAP;
    }
    layout.push(LayoutItem::PlusButton { x: x + PLUS_BTN_MARGIN });
    layout
}

// --- Hit-testing ---

fn hit_test_layout(items: &[LayoutItem], wy: i32, mx: i32, my: i32) -> HitResult {
    if my < wy || my >= wy + TAB_BAR_HEIGHT {
        return HitResult::None;
    }

    for item in items {
        match *item {
            LayoutItem::Tab { index, x, width } => {
                if mx >= x && mx < x + width {
                    let close_x = x + width - CLOSE_BTN_MARGIN - CLOSE_BTN_SIZE;
                    let close_y = wy + (TAB_BAR_HEIGHT - CLOSE_BTN_SIZE) / 2;
                    let is_close = mx >= close_x
                        && mx <= close_x + CLOSE_BTN_SIZE
                        && my >= close_y
                        && my <= close_y + CLOSE_BTN_SIZE;
                    return HitResult::Tab { index, is_close };
                }
            }
            LayoutItem::PlusButton { x } => {
                if mx >= x && mx < x + PLUS_BTN_WIDTH {
                    return HitResult::PlusButton;
                }
            }
        }
    }
    HitResult::None
}

// --- Colors ---

struct ThemeColors {
    bar_bg: Color,
    active_bg: Color,
    inactive_bg: Color,
    active_text: Color,
    inactive_text: Color,
    close_hover_bg: Color,
    plus_hover_bg: Color,
}

/// Blend `from` toward `to`; `pct` is how far, out of 100.
fn blend(from: (u8, u8, u8), to: (u8, u8, u8), pct: u16) -> Color {
    let mix = |a: u8, b: u8| ((a as u16 * (100 - pct) + b as u16 * pct) / 100) as u8;
    Color::from_rgb(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// Tab bar shades are derived from the editor palette so the active tab
/// blends into the text area below it.
fn theme_colors(theme: Theme) -> ThemeColors {
    let p = theme.palette();
    ThemeColors {
        bar_bg: blend(p.chrome, p.foreground, 12),
        active_bg: blend(p.background, p.foreground, 0),
        inactive_bg: blend(p.chrome, p.foreground, 4),
        active_text: blend(p.foreground, p.background, 0),
        inactive_text: blend(p.foreground, p.background, 45),
        close_hover_bg: blend(p.chrome, p.foreground, 22),
        plus_hover_bg: blend(p.chrome, p.foreground, 16),
    }
}

// --- Truncation ---

fn truncate_to_fit(text: &str, max_width: i32) -> String {
    if max_width <= 0 {
        return String::new();
    }
    draw::set_font(Font::Helvetica, 12);
    let (tw, _) = draw::measure(text, false);
    if tw <= max_width {
        return text.to_string();
    }

    let ellipsis = "...";
    let (ew, _) = draw::measure(ellipsis, false);
    if ew >= max_width {
        return ellipsis.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    for len in (1..chars.len()).rev() {
        let candidate: String = chars[..len].iter().collect();
        let full = format!("{candidate}{ellipsis}");
        let (fw, _) = draw::measure(&full, false);
        if fw <= max_width {
            return full;
        }
    }
    ellipsis.to_string()
}

// --- Drawing ---

fn draw_rounded_top_rect(x: i32, y: i32, w: i32, h: i32, r: i32, color: Color) {
    draw::set_draw_color(color);
    draw::draw_rectf(x, y + r, w, h - r);
    draw::draw_rectf(x + r, y, w - 2 * r, r);
    draw::draw_pie(x, y, 2 * r, 2 * r, 90.0, 180.0);
    draw::draw_pie(x + w - 2 * r, y, 2 * r, 2 * r, 0.0, 90.0);
}

fn draw_tab_bar(wid: &Widget, st: &TabBarState) {
    let wx = wid.x();
    let wy = wid.y();
    let wh = wid.h();
    let colors = theme_colors(st.theme);

    draw::set_draw_color(colors.bar_bg);
    draw::draw_rectf(wx, wy, wid.w(), wh);

    for item in &st.layout {
        match *item {
            LayoutItem::Tab { index, x, width } => {
                let tx = wx + x;
                let tab = &st.tabs[index];

                if tab.is_active {
                    draw_rounded_top_rect(tx, wy, width, wh, CORNER_RADIUS, colors.active_bg);
                } else {
                    draw_rounded_top_rect(tx, wy + 2, width, wh - 2, CORNER_RADIUS, colors.inactive_bg);
                }

                let text_color = if tab.is_active {
                    colors.active_text
                } else {
                    colors.inactive_text
                };
                let text_area_width = width - TAB_H_PADDING - CLOSE_BTN_MARGIN - CLOSE_BTN_SIZE - TAB_H_PADDING;
                let display_text = truncate_to_fit(&tab.display_name, text_area_width);

                draw::set_draw_color(text_color);
                draw::set_font(Font::Helvetica, 12);
                // draw_text2 without symbols so '@' in a tab name stays literal
                draw::draw_text2(
                    &display_text.replace('@', "@@"),
                    tx + TAB_H_PADDING,
                    wy,
                    text_area_width,
                    wh,
                    Align::Left | Align::Inside,
                );

                let close_x = tx + width - CLOSE_BTN_MARGIN - CLOSE_BTN_SIZE;
                let close_y = wy + (wh - CLOSE_BTN_SIZE) / 2;
                let is_hovered_tab = st.hover_tab_index == Some(index);
                if is_hovered_tab && st.hover_close {
                    draw::set_draw_color(colors.close_hover_bg);
                    draw::draw_rectf(close_x - 2, close_y - 2, CLOSE_BTN_SIZE + 4, CLOSE_BTN_SIZE + 4);
                }

                draw::set_draw_color(if tab.is_active || is_hovered_tab {
                    text_color
                } else {
                    colors.inactive_text
                });
                draw::set_font(Font::HelveticaBold, 20);
                draw::draw_text2("\u{00d7}", close_x, close_y, CLOSE_BTN_SIZE, CLOSE_BTN_SIZE, Align::Center);
            }
            LayoutItem::PlusButton { x } => {
                let px = wx + x;
                let btn_h = wh - 4;
                let btn_y = wy + 2;
                let (bg, fg) = if st.hover_plus {
                    (colors.plus_hover_bg, colors.active_text)
                } else {
                    (colors.inactive_bg, colors.inactive_text)
                };
                draw_rounded_top_rect(px, btn_y, PLUS_BTN_WIDTH, btn_h, CORNER_RADIUS, bg);
                draw::set_draw_color(fg);
                draw::set_font(Font::HelveticaBold, 16);
                draw::draw_text2("+", px, btn_y, PLUS_BTN_WIDTH, btn_h, Align::Center);
            }
        }
    }
}

// --- Event handling ---

fn handle_tab_bar(wid: &mut Widget, event: Event, state: &Rc<RefCell<TabBarState>>) -> bool {
    match event {
        Event::Push => {
            let st = state.borrow();
            let mx = app::event_x() - wid.x();
            let my = app::event_y();
            let button = app::event_button();
            let sender = st.sender;

            match hit_test_layout(&st.layout, wid.y(), mx, my) {
                HitResult::PlusButton if button == 1 => {
                    sender.send(Message::TabNew);
                    true
                }
                HitResult::Tab { index, is_close } => {
                    let tab_id = st.tabs[index].id;
                    match button {
                        // Middle click closes, like most tabbed editors
                        2 => sender.send(Message::TabClose(tab_id)),
                        1 if is_close => sender.send(Message::TabClose(tab_id)),
                        1 if app::event_clicks() => sender.send(Message::TabRename(tab_id)),
                        1 => sender.send(Message::TabSwitch(tab_id)),
                        _ => {}
                    }
                    true
                }
                _ => false,
            }
        }
        Event::Move => {
            let mut st = state.borrow_mut();
            let mx = app::event_x() - wid.x();
            let my = app::event_y();

            let (new_hover, new_close, new_hover_plus) = match hit_test_layout(&st.layout, wid.y(), mx, my) {
                HitResult::Tab { index, is_close } => (Some(index), is_close, false),
                HitResult::PlusButton => (None, false, true),
                HitResult::None => (None, false, false),
            };

            if new_hover != st.hover_tab_index || new_close != st.hover_close || new_hover_plus != st.hover_plus {
                st.hover_tab_index = new_hover;
                st.hover_close = new_close;
                st.hover_plus = new_hover_plus;
                drop(st);
                wid.redraw();
            }
            true
        }
        Event::Leave => {
            let mut st = state.borrow_mut();
            if st.hover_tab_index.is_some() || st.hover_close || st.hover_plus {
                st.hover_tab_index = None;
                st.hover_close = false;
                st.hover_plus = false;
                drop(st);
                wid.redraw();
            }
            false
        }
        Event::Enter => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_layout_has_only_plus() {
        assert_eq!(compute_layout(0, 640), vec![LayoutItem::PlusButton { x: PLUS_BTN_MARGIN }]);
    }

    #[test]
    fn test_tab_width_is_clamped() {
        let layout = compute_layout(1, 2000);
        assert_eq!(layout[0], LayoutItem::Tab { index: 0, x: 0, width: MAX_TAB_WIDTH });

        let layout = compute_layout(20, 640);
        assert!(matches!(layout[0], LayoutItem::Tab { width: MIN_TAB_WIDTH, .. }));
    }

    #[test]
    fn test_plus_follows_last_tab() {
        let layout = compute_layout(2, 2000);
        let expected_x = 2 * (MAX_TAB_WIDTH + TAB_GAP) + PLUS_BTN_MARGIN;
        assert_eq!(layout.last(), Some(&LayoutItem::PlusButton { x: expected_x }));
    }

    #[test]
    fn test_active_tab_matches_editor_background() {
        for theme in [Theme::Light, Theme::Dark] {
            let (r, g, b) = theme.palette().background;
            assert_eq!(theme_colors(theme).active_bg, Color::from_rgb(r, g, b));
        }
        assert_eq!(blend((0, 0, 0), (200, 100, 50), 50), Color::from_rgb(100, 50, 25));
    }

    #[test]
    fn test_hit_testing() {
        let layout = compute_layout(2, 2000);
        let mid = TAB_BAR_HEIGHT / 2;

        assert_eq!(hit_test_layout(&layout, 0, 5, mid), HitResult::Tab { index: 0, is_close: false });
        assert_eq!(
            hit_test_layout(&layout, 0, MAX_TAB_WIDTH + TAB_GAP + 5, mid),
            HitResult::Tab { index: 1, is_close: false }
        );

        let close_x = MAX_TAB_WIDTH - CLOSE_BTN_MARGIN - CLOSE_BTN_SIZE / 2;
        assert_eq!(hit_test_layout(&layout, 0, close_x, mid), HitResult::Tab { index: 0, is_close: true });

        let plus_x = 2 * (MAX_TAB_WIDTH + TAB_GAP) + PLUS_BTN_MARGIN + 1;
        assert_eq!(hit_test_layout(&layout, 0, plus_x, mid), HitResult::PlusButton);

        assert_eq!(hit_test_layout(&layout, 0, 5, TAB_BAR_HEIGHT + 1), HitResult::None);
    }

    #[test]
    fn test_layout_follows_widget_resize() {
        let _guard = crate::ui::widget_test_lock();
        let (sender, _receiver) = app::channel::<Message>();
        let mut bar = TabBar::new(0, 0, 200, sender);
        let docs = vec![
            Document::new(DocumentId(1), "Tab 1".to_string(), 10),
            Document::new(DocumentId(2), "Tab 2".to_string(), 10),
        ];
        bar.rebuild(&docs, Some(DocumentId(1)), Theme::Light);
        assert_eq!(bar.state.borrow().layout, compute_layout(2, 200));

        bar.widget.resize(0, 0, 2000, TAB_BAR_HEIGHT);
        let st = bar.state.borrow();
        assert_eq!(st.widget_w, 2000);
        assert_eq!(st.layout, compute_layout(2, 2000));
        assert_eq!(st.layout[1], LayoutItem::Tab { index: 1, x: MAX_TAB_WIDTH + TAB_GAP, width: MAX_TAB_WIDTH });
    }
}

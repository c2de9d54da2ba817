use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    button::{Button, ReturnButton},
    enums::{Align, CallbackTrigger},
    frame::Frame,
    input::Input,
    prelude::*,
    window::Window,
};

use super::run_dialog;

/// Widgets of the "Rename Tab" prompt. Built hidden; `finish` frees the
/// window and hands back the answer.
struct RenameTabDialog {
    window: Window,
    input: Input,
    ok_btn: ReturnButton,
    result: Rc<RefCell<Option<String>>>,
}

impl RenameTabDialog {
    fn new(current_name: &str) -> Self {
        let mut window = Window::default()
            .with_size(340, 120)
            .with_label("Rename Tab");
        window.make_modal(true);

        let prompt = format!("Enter a new name for '{}':", current_name);
        Frame::default()
            .with_pos(15, 10)
            .with_size(310, 25)
            .with_label(&prompt)
            .with_align(Align::Left | Align::Inside | Align::Clip);
        let mut input = Input::default().with_pos(15, 40).with_size(310, 28);
        input.set_value(current_name);

        let mut ok_btn = ReturnButton::default()
            .with_pos(150, 80)
            .with_size(85, 28)
            .with_label("OK");
        let mut cancel_btn = Button::default()
            .with_pos(240, 80)
            .with_size(85, 28)
            .with_label("Cancel");

        window.end();
        window.make_resizable(false);

        let result: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));

        let result_ok = result.clone();
        let input_ok = input.clone();
        let mut win_ok = window.clone();
        ok_btn.set_callback(move |_| {
            *result_ok.borrow_mut() = Some(input_ok.value());
            win_ok.hide();
        });

        // Enter in the input confirms
        let mut ok_enter = ok_btn.clone();
        input.set_trigger(CallbackTrigger::EnterKeyAlways);
        input.set_callback(move |_| ok_enter.do_callback());

        let mut win_cancel = window.clone();
        cancel_btn.set_callback(move |_| win_cancel.hide());

        let mut win_x = window.clone();
        window.set_callback(move |_| win_x.hide());

        Self {
            window,
            input,
            ok_btn,
            result,
        }
    }

    fn finish(self) -> Option<String> {
        let answer = self.result.borrow_mut().take();
        Window::delete(self.window);
        answer
    }
}

/// Modal "Rename Tab" prompt, pre-filled with the current name.
///
/// Returns `None` on cancel or window close. An empty answer comes back as
/// `Some("")`; the caller decides that it means "keep the old name".
pub fn show_rename_tab_dialog(current_name: &str) -> Option<String> {
    let mut dialog = RenameTabDialog::new(current_name);
    // Centering asks FLTK for the screen size, which opens the display
    let mut window = dialog.window.clone().center_screen();
    window.show();
    let _ = dialog.input.take_focus();
    run_dialog(&dialog.window);
    dialog.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::widget_test_lock;

    #[test]
    fn test_prompt_is_prefilled_and_cancel_returns_none() {
        let _guard = widget_test_lock();
        let dialog = RenameTabDialog::new("Tab 3");
        assert_eq!(dialog.input.value(), "Tab 3");
        assert_eq!(dialog.finish(), None);
    }

    #[test]
    fn test_ok_returns_typed_name() {
        let _guard = widget_test_lock();
        let mut dialog = RenameTabDialog::new("Tab 1");
        dialog.input.set_value("Notes");
        dialog.ok_btn.do_callback();

        assert_eq!(dialog.finish(), Some("Notes".to_string()));
    }
}

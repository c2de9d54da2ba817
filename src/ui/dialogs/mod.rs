pub mod rename_tab;

use fltk::{app, prelude::*, window::Window};

/// Pump events until the modal window is hidden. Quitting the app hides
/// it too.
pub fn run_dialog(dialog: &Window) {
    while dialog.shown() {
        app::wait();
        if app::should_program_quit() {
            let mut d = dialog.clone();
            d.hide();
        }
    }
}

pub mod dialogs;
pub mod file_dialogs;
pub mod main_window;
pub mod menu;
pub mod style_table;
pub mod tab_bar;
pub mod theme;

/// FLTK keeps the "current group" in a global, so tests that build widgets
/// take turns.
#[cfg(test)]
pub(crate) fn widget_test_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

use fltk::dialog::{FileDialogType, NativeFileChooser, NativeFileChooserOptions};

use crate::app::services::file_filters::text_files_filter;

fn run_chooser(kind: FileDialogType, title: &str, confirm_overwrite: bool) -> Option<String> {
    let mut nfc = NativeFileChooser::new(kind);
    nfc.set_title(title);
    nfc.set_filter(&text_files_filter());
    if confirm_overwrite {
        nfc.set_option(NativeFileChooserOptions::SaveAsConfirm);
    }
    nfc.show(); // blocks until close
    let filename = nfc.filename();
    let s = filename.to_string_lossy();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Returns None when the user cancels.
pub fn native_open_dialog() -> Option<String> {
    run_chooser(FileDialogType::BrowseFile, "Open", false)
}

/// Returns None when the user cancels.
pub fn native_save_dialog() -> Option<String> {
    run_chooser(FileDialogType::BrowseSaveFile, "Save", true)
}

use std::cell::{Cell, RefCell};
use std::ffi::c_void;
use std::rc::Rc;

use fltk::text::TextBuffer;

use super::history::{Edit, EditHistory};
use super::style::{mark_run, plain_run, StyleMask, TextStyle};
use crate::app::infrastructure::buffer::{buffer_range_no_leak, buffer_text_no_leak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

/// The closure type stored behind the FFI `void* cbArg`.
type ModifyCb = dyn FnMut(i32, i32, i32, *const std::ffi::c_char);

/// The one C callback every document registers. FLTK removes callbacks by
/// (function, argument) pair, so the function must be a fixed item.
///
/// # Safety
///
/// `cb_arg` must be the pointer returned by `register_modify_callback()`.
/// It stays valid until `cleanup()` removes the callback and frees the box.
unsafe extern "C" fn modify_shim(
    pos: std::ffi::c_int,
    n_inserted: std::ffi::c_int,
    n_deleted: std::ffi::c_int,
    _n_restyled: std::ffi::c_int,
    deleted_text: *const std::ffi::c_char,
    cb_arg: *mut c_void,
) {
    if cb_arg.is_null() {
        tracing::warn!("buffer modify callback fired without its closure");
        return;
    }
    // SAFETY: cb_arg points to the Box<ModifyCb> allocated in
    // register_modify_callback, alive until cleanup().
    unsafe {
        let cb: &mut Box<ModifyCb> = &mut *(cb_arg as *mut Box<ModifyCb>);
        cb(pos, n_inserted, n_deleted, deleted_text);
    }
}

unsafe extern "C" {
    fn Fl_Text_Buffer_add_modify_callback(
        buf: *mut c_void,
        cb: Option<
            unsafe extern "C" fn(
                std::ffi::c_int,
                std::ffi::c_int,
                std::ffi::c_int,
                std::ffi::c_int,
                *const std::ffi::c_char,
                *mut c_void,
            ),
        >,
        cb_arg: *mut c_void,
    );
    fn Fl_Text_Buffer_remove_modify_callback(
        buf: *mut c_void,
        cb: Option<
            unsafe extern "C" fn(
                std::ffi::c_int,
                std::ffi::c_int,
                std::ffi::c_int,
                std::ffi::c_int,
                *const std::ffi::c_char,
                *mut c_void,
            ),
        >,
        cb_arg: *mut c_void,
    );
}

/// Box the closure and register it via FFI. Returns the `cbArg` pointer
/// that must be stored for later cleanup.
///
/// The callback keeps the style buffer the same length as the text (new
/// text is unmarked) and records every change in the edit history unless
/// the change is an undo/redo being replayed.
fn register_modify_callback(
    buffer: &TextBuffer,
    style_buffer: &TextBuffer,
    history: &Rc<RefCell<EditHistory>>,
    replaying: &Rc<Cell<bool>>,
) -> *mut c_void {
    let text_buf = buffer.clone();
    let mut style_buf = style_buffer.clone();
    let history = history.clone();
    let replaying = replaying.clone();

    let cb: Box<ModifyCb> = Box::new(
        move |pos: i32, inserted: i32, deleted: i32, deleted_text: *const std::ffi::c_char| {
            if inserted <= 0 && deleted <= 0 {
                return;
            }
            if deleted > 0 {
                style_buf.remove(pos, pos + deleted);
            }
            if inserted > 0 {
                style_buf.insert(pos, &plain_run(inserted as usize));
            }
            if replaying.get() {
                return;
            }

            let removed = if deleted > 0 && !deleted_text.is_null() {
                // SAFETY: FLTK passes a null-terminated copy of the removed
                // text that lives for the duration of the callback.
                unsafe { std::ffi::CStr::from_ptr(deleted_text) }
                    .to_string_lossy()
                    .into_owned()
            } else {
                String::new()
            };
            let added = buffer_range_no_leak(&text_buf, pos, pos + inserted.max(0));
            history
                .borrow_mut()
                .record(Edit::new(pos.max(0) as usize, removed, added));
        },
    );

    let data = Box::into_raw(Box::new(cb)) as *mut c_void;

    // SAFETY: `data` (Box<Box<ModifyCb>>) is handed to modify_shim on every
    // buffer modification and stays valid until cleanup() removes the
    // callback, which Drop guarantees.
    unsafe {
        Fl_Text_Buffer_add_modify_callback(buffer.as_ptr() as *mut c_void, Some(modify_shim), data);
    }

    data
}

/// One tab's buffer: text, the parallel style buffer holding
/// bold/italic/underline marks, and its own undo history.
pub struct Document {
    pub id: DocumentId,
    pub display_name: String,
    pub buffer: TextBuffer,
    pub style_buffer: TextBuffer,
    pub cursor_position: i32,
    history: Rc<RefCell<EditHistory>>,
    replaying: Rc<Cell<bool>>,
    /// Pointer to the heap-allocated closure passed to FLTK's modify callback.
    /// Must be freed in cleanup() after removing the callback.
    modify_cb_data: *mut c_void,
}

impl Document {
    pub fn new(id: DocumentId, display_name: String, undo_limit: usize) -> Self {
        let mut buffer = TextBuffer::default();
        // History is ours; FLTK's single-level undo would fight it.
        buffer.can_undo(false);
        let style_buffer = TextBuffer::default();
        let history = Rc::new(RefCell::new(EditHistory::new(undo_limit)));
        let replaying = Rc::new(Cell::new(false));

        let modify_cb_data = register_modify_callback(&buffer, &style_buffer, &history, &replaying);

        Self {
            id,
            display_name,
            buffer,
            style_buffer,
            cursor_position: 0,
            history,
            replaying,
            modify_cb_data,
        }
    }

    pub fn text(&self) -> String {
        buffer_text_no_leak(&self.buffer)
    }

    /// Replace the whole content (used by Open). One undo step; marks reset.
    pub fn replace_text(&mut self, content: &str) {
        self.history.borrow_mut().seal();
        self.buffer.unselect();
        self.buffer.set_text(content);
        self.history.borrow_mut().seal();
        self.cursor_position = 0;
    }

    /// Selected byte range, if any text is selected.
    pub fn selection(&self) -> Option<(i32, i32)> {
        self.buffer
            .selection_position()
            .filter(|(start, end)| end > start)
    }

    /// Mark the selected range. Returns false when nothing is selected.
    pub fn apply_style(&mut self, style: TextStyle) -> bool {
        let Some((start, end)) = self.selection() else {
            return false;
        };
        let current = buffer_range_no_leak(&self.style_buffer, start, end);
        let marked = mark_run(&current, style);
        self.style_buffer.replace(start, end, &marked);
        true
    }

    pub fn style_at(&self, pos: i32) -> StyleMask {
        buffer_range_no_leak(&self.style_buffer, pos, pos + 1)
            .chars()
            .next()
            .map(StyleMask::from_char)
            .unwrap_or_default()
    }

    /// End the current typing run so the next edit is a separate undo step.
    pub fn seal_history(&self) {
        self.history.borrow_mut().seal();
    }

    pub fn can_undo(&self) -> bool {
        self.history.borrow().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.borrow().can_redo()
    }

    /// Undo one step. Returns the cursor position after it, or None at the
    /// start of history.
    pub fn undo(&mut self) -> Option<i32> {
        let edit = self.history.borrow_mut().undo()?;
        Some(self.replay(&edit))
    }

    /// Redo one step. Returns the cursor position after it, or None when
    /// there is nothing to redo.
    pub fn redo(&mut self) -> Option<i32> {
        let edit = self.history.borrow_mut().redo()?;
        Some(self.replay(&edit))
    }

    fn replay(&mut self, edit: &Edit) -> i32 {
        let start = edit.pos as i32;
        let end = (edit.pos + edit.deleted.len()) as i32;
        self.replaying.set(true);
        self.buffer.unselect();
        self.buffer.replace(start, end, &edit.inserted);
        self.replaying.set(false);
        self.cursor_position = edit.end() as i32;
        self.cursor_position
    }

    /// Clean up FFI resources. Called automatically by Drop.
    ///
    /// Idempotent - safe to call multiple times.
    pub fn cleanup(&mut self) {
        if self.modify_cb_data.is_null() {
            return;
        }

        // SAFETY: remove the callback from FLTK first so it stops calling
        // modify_shim with our pointer, then free the closure. Passing the
        // same `modify_shim` pointer lets FLTK find the entry.
        unsafe {
            Fl_Text_Buffer_remove_modify_callback(
                self.buffer.as_ptr() as *mut c_void,
                Some(modify_shim),
                self.modify_cb_data,
            );
            let _ = Box::from_raw(self.modify_cb_data as *mut Box<ModifyCb>);
        }
        self.modify_cb_data = std::ptr::null_mut();

        self.buffer.set_text("");
        self.style_buffer.set_text("");
    }
}

impl Drop for Document {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::new(DocumentId(1), "Tab 1".to_string(), 50)
    }

    #[test]
    fn test_new_document_is_empty() {
        let d = doc();
        assert_eq!(d.text(), "");
        assert!(!d.can_undo());
        assert!(!d.can_redo());
        assert_eq!(d.style_buffer.length(), 0);
    }

    #[test]
    fn test_typing_is_undoable() {
        let mut d = doc();
        d.buffer.insert(0, "h");
        d.buffer.insert(1, "i");
        assert!(d.can_undo());

        assert_eq!(d.undo(), Some(0));
        assert_eq!(d.text(), "");
        assert_eq!(d.redo(), Some(2));
        assert_eq!(d.text(), "hi");
    }

    #[test]
    fn test_undo_at_boundary_is_noop() {
        let mut d = doc();
        assert_eq!(d.undo(), None);
        assert_eq!(d.redo(), None);
        assert_eq!(d.text(), "");
    }

    #[test]
    fn test_style_buffer_tracks_text_length() {
        let mut d = doc();
        d.buffer.insert(0, "hello world");
        assert_eq!(d.style_buffer.length(), d.buffer.length());
        d.buffer.remove(0, 6);
        assert_eq!(d.style_buffer.length(), d.buffer.length());
        d.buffer.replace(0, 5, "earth!");
        assert_eq!(d.style_buffer.length(), d.buffer.length());
    }

    #[test]
    fn test_bold_marks_only_the_selection() {
        let mut d = doc();
        d.buffer.set_text("plain bold plain");
        d.buffer.select(6, 10);
        assert!(d.apply_style(TextStyle::Bold));

        assert!(!d.style_at(0).has(TextStyle::Bold));
        assert!(d.style_at(6).has(TextStyle::Bold));
        assert!(d.style_at(9).has(TextStyle::Bold));
        assert!(!d.style_at(10).has(TextStyle::Bold));
        // Marking does not touch the text or its history
        assert_eq!(d.text(), "plain bold plain");
    }

    #[test]
    fn test_marks_stack() {
        let mut d = doc();
        d.buffer.set_text("word");
        d.buffer.select(0, 4);
        d.apply_style(TextStyle::Italic);
        d.apply_style(TextStyle::Underline);
        let mask = d.style_at(2);
        assert!(mask.has(TextStyle::Italic));
        assert!(mask.has(TextStyle::Underline));
        assert!(!mask.has(TextStyle::Bold));
    }

    #[test]
    fn test_style_without_selection_is_noop() {
        let mut d = doc();
        d.buffer.set_text("nothing selected");
        assert!(!d.apply_style(TextStyle::Bold));
        assert_eq!(d.style_at(0), StyleMask::PLAIN);
    }

    #[test]
    fn test_replace_text_clears_marks_and_is_one_step() {
        let mut d = doc();
        d.buffer.set_text("before");
        d.buffer.select(0, 6);
        d.apply_style(TextStyle::Bold);

        d.replace_text("after loading");
        assert_eq!(d.text(), "after loading");
        assert_eq!(d.style_at(0), StyleMask::PLAIN);

        d.undo();
        assert_eq!(d.text(), "before");
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let mut d = doc();
        d.buffer.set_text("x");
        d.cleanup();
        d.cleanup();
        assert_eq!(d.text(), "");
    }
}

/// Read text from an FLTK TextBuffer without leaking the C-allocated copy.
///
/// fltk-rs's `TextBuffer::text()` copies the `malloc()`'d string returned by
/// `Fl_Text_Buffer_text()` into a Rust `String` but never frees the original,
/// so every call leaks the full buffer size. Saving goes through here instead.
pub fn buffer_text_no_leak(buf: &fltk::text::TextBuffer) -> String {
    unsafe extern "C" {
        fn Fl_Text_Buffer_text(buf: *mut std::ffi::c_void) -> *mut std::ffi::c_char;
        fn free(ptr: *mut std::ffi::c_void);
    }

    // SAFETY: `buf.as_ptr()` is the live FLTK buffer. Fl_Text_Buffer_text
    // returns a malloc'd, null-terminated copy (or null), which we copy out
    // and hand back to free() exactly once.
    unsafe {
        let inner = buf.as_ptr() as *mut std::ffi::c_void;
        let ptr = Fl_Text_Buffer_text(inner);
        if ptr.is_null() {
            return String::new();
        }
        let cstr = std::ffi::CStr::from_ptr(ptr);
        let result = cstr.to_string_lossy().into_owned();
        free(ptr as *mut std::ffi::c_void);
        result
    }
}

/// Read `start..end` from an FLTK TextBuffer, freeing the C copy.
pub fn buffer_range_no_leak(buf: &fltk::text::TextBuffer, start: i32, end: i32) -> String {
    unsafe extern "C" {
        fn Fl_Text_Buffer_text_range(
            buf: *mut std::ffi::c_void,
            start: std::ffi::c_int,
            end: std::ffi::c_int,
        ) -> *mut std::ffi::c_char;
        fn free(ptr: *mut std::ffi::c_void);
    }

    if end <= start {
        return String::new();
    }

    // SAFETY: same contract as `buffer_text_no_leak`; FLTK clamps the range
    // to the buffer and returns a malloc'd, null-terminated copy.
    unsafe {
        let inner = buf.as_ptr() as *mut std::ffi::c_void;
        let ptr = Fl_Text_Buffer_text_range(inner, start, end);
        if ptr.is_null() {
            return String::new();
        }
        let result = std::ffi::CStr::from_ptr(ptr).to_string_lossy().into_owned();
        free(ptr as *mut std::ffi::c_void);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fltk::text::TextBuffer;

    #[test]
    fn test_reads_full_buffer() {
        let mut buf = TextBuffer::default();
        buf.set_text("first line\nsecond line\n");
        assert_eq!(buffer_text_no_leak(&buf), "first line\nsecond line\n");
    }

    #[test]
    fn test_reads_range() {
        let mut buf = TextBuffer::default();
        buf.set_text("hello world");
        assert_eq!(buffer_range_no_leak(&buf, 6, 11), "world");
        assert_eq!(buffer_range_no_leak(&buf, 3, 3), "");
    }

    #[test]
    fn test_empty_buffer() {
        let buf = TextBuffer::default();
        assert_eq!(buffer_text_no_leak(&buf), "");
    }
}

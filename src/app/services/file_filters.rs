/// Filter for the Open/Save choosers, in FLTK's multi-line format
/// ("Description\tPattern" per line).
pub fn text_files_filter() -> String {
    ["Text Files\t*.txt", "All Files\t*"].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_lists_text_then_all() {
        let filter = text_files_filter();
        let lines: Vec<&str> = filter.lines().collect();
        assert_eq!(lines, vec!["Text Files\t*.txt", "All Files\t*"]);
    }
}

//! Bold/italic/underline marks.
//!
//! Marks live in a style buffer that runs parallel to the text buffer, one
//! style character per text byte. A style character encodes a 3-bit mask as
//! `'A' + mask`, so `'A'` is plain text and `'H'` is bold+italic+underline.

/// One of the three marks the Edit menu can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextStyle {
    Bold,
    Italic,
    Underline,
}

impl TextStyle {
    fn bit(self) -> u8 {
        match self {
            TextStyle::Bold => 0b001,
            TextStyle::Italic => 0b010,
            TextStyle::Underline => 0b100,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TextStyle::Bold => "bold",
            TextStyle::Italic => "italic",
            TextStyle::Underline => "underline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleMask(u8);

impl StyleMask {
    pub const PLAIN: StyleMask = StyleMask(0);
    /// Number of distinct masks, which is also the style table length.
    pub const COUNT: usize = 8;

    pub fn with(self, style: TextStyle) -> Self {
        StyleMask(self.0 | style.bit())
    }

    pub fn has(self, style: TextStyle) -> bool {
        self.0 & style.bit() != 0
    }

    pub fn to_char(self) -> char {
        (b'A' + self.0) as char
    }

    /// Unknown characters read as plain.
    pub fn from_char(ch: char) -> Self {
        match ch {
            'A'..='H' => StyleMask(ch as u8 - b'A'),
            _ => StyleMask::PLAIN,
        }
    }

    /// Every mask in style-table order (`'A'`, `'B'`, ...).
    pub fn all() -> impl Iterator<Item = StyleMask> {
        (0..Self::COUNT as u8).map(StyleMask)
    }
}

/// Plain style run for freshly inserted text.
pub fn plain_run(len: usize) -> String {
    StyleMask::PLAIN.to_char().to_string().repeat(len)
}

/// Add `style` to every position of an existing style run, keeping the marks
/// already there.
pub fn mark_run(run: &str, style: TextStyle) -> String {
    run.chars()
        .map(|ch| StyleMask::from_char(ch).with(style).to_char())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_is_a() {
        assert_eq!(StyleMask::PLAIN.to_char(), 'A');
        assert_eq!(plain_run(3), "AAA");
        assert_eq!(plain_run(0), "");
    }

    #[test]
    fn test_marks_combine() {
        let mask = StyleMask::PLAIN
            .with(TextStyle::Bold)
            .with(TextStyle::Italic);
        assert!(mask.has(TextStyle::Bold));
        assert!(mask.has(TextStyle::Italic));
        assert!(!mask.has(TextStyle::Underline));
        assert_eq!(mask.to_char(), 'D');
    }

    #[test]
    fn test_marking_is_idempotent() {
        let once = mark_run("AAB", TextStyle::Bold);
        assert_eq!(once, "BBB");
        assert_eq!(mark_run(&once, TextStyle::Bold), once);
    }

    #[test]
    fn test_mark_keeps_existing_marks() {
        let run = mark_run("AB", TextStyle::Underline);
        let masks: Vec<StyleMask> = run.chars().map(StyleMask::from_char).collect();
        assert!(masks.iter().all(|m| m.has(TextStyle::Underline)));
        assert!(!masks[0].has(TextStyle::Bold));
        assert!(masks[1].has(TextStyle::Bold));
    }

    #[test]
    fn test_unknown_char_reads_plain() {
        assert_eq!(StyleMask::from_char('z'), StyleMask::PLAIN);
    }

    #[test]
    fn test_all_masks_in_table_order() {
        let chars: String = StyleMask::all().map(StyleMask::to_char).collect();
        assert_eq!(chars, "ABCDEFGH");
    }
}

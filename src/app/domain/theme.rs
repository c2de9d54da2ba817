/// The two editor themes. Owned by the shell state and flipped by the
/// Themes menu; the toggled value is not written back to settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Background/foreground pair applied to every buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: (u8, u8, u8),
    pub foreground: (u8, u8, u8),
    pub selection: (u8, u8, u8),
    pub chrome: (u8, u8, u8),
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Label of the Themes menu item: it names the theme you switch *to*.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "Dark Theme",
            Theme::Dark => "Light Theme",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: (255, 255, 255),
                foreground: (0, 0, 0),
                selection: (173, 216, 230),
                chrome: (240, 240, 240),
            },
            Theme::Dark => Palette {
                background: (0, 0, 0),
                foreground: (255, 255, 255),
                selection: (70, 70, 100),
                chrome: (35, 35, 35),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_light() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::default().toggle_label(), "Dark Theme");
    }

    #[test]
    fn test_toggle_twice_restores_theme_and_label() {
        let start = Theme::Light;
        let once = start.toggled();
        assert_eq!(once, Theme::Dark);
        assert_eq!(once.toggle_label(), "Light Theme");

        let twice = once.toggled();
        assert_eq!(twice, start);
        assert_eq!(twice.toggle_label(), start.toggle_label());
    }

    #[test]
    fn test_palettes_are_inverse() {
        let light = Theme::Light.palette();
        let dark = Theme::Dark.palette();
        assert_eq!(light.background, dark.foreground);
        assert_eq!(light.foreground, dark.background);
    }
}

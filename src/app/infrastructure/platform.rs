use crate::app::domain::theme::Theme;

/// Ask the desktop whether dark mode is on. Falls back to light.
pub fn detect_system_theme() -> Theme {
    if system_prefers_dark() {
        tracing::debug!("system prefers a dark theme");
        Theme::Dark
    } else {
        Theme::Light
    }
}

#[cfg(target_os = "windows")]
fn system_prefers_dark() -> bool {
    use winreg::RegKey;
    use winreg::enums::HKEY_CURRENT_USER;

    RegKey::predef(HKEY_CURRENT_USER)
        .open_subkey("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize")
        .and_then(|key| key.get_value::<u32, _>("AppsUseLightTheme"))
        // AppsUseLightTheme: 0 = dark mode, 1 = light mode
        .map(|value| value == 0)
        .unwrap_or(false)
}

#[cfg(target_os = "linux")]
fn system_prefers_dark() -> bool {
    let gtk_theme = gsettings("gtk-theme");
    if gtk_theme.as_deref().is_some_and(gtk_theme_is_dark) {
        return true;
    }
    gsettings("color-scheme")
        .as_deref()
        .is_some_and(color_scheme_is_dark)
}

#[cfg(target_os = "linux")]
fn gsettings(key: &str) -> Option<String> {
    use std::process::Command;

    match Command::new("gsettings")
        .args(["get", "org.gnome.desktop.interface", key])
        .output()
    {
        Ok(output) => Some(String::from_utf8_lossy(&output.stdout).into_owned()),
        Err(e) => {
            tracing::debug!("gsettings unavailable: {}", e);
            None
        }
    }
}

#[cfg(target_os = "macos")]
fn system_prefers_dark() -> bool {
    use std::process::Command;

    Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .is_some_and(|output| apple_style_is_dark(&String::from_utf8_lossy(&output.stdout)))
}

#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
fn system_prefers_dark() -> bool {
    false
}

#[cfg_attr(not(any(target_os = "linux", test)), allow(dead_code))]
fn gtk_theme_is_dark(theme: &str) -> bool {
    theme.to_lowercase().contains("dark")
}

#[cfg_attr(not(any(target_os = "linux", test)), allow(dead_code))]
fn color_scheme_is_dark(scheme: &str) -> bool {
    scheme.contains("prefer-dark")
}

#[cfg_attr(not(any(target_os = "macos", test)), allow(dead_code))]
fn apple_style_is_dark(style: &str) -> bool {
    style.to_lowercase().contains("dark")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gtk_theme_names() {
        assert!(gtk_theme_is_dark("'Adwaita-dark'\n"));
        assert!(gtk_theme_is_dark("'Yaru-Dark'"));
        assert!(!gtk_theme_is_dark("'Adwaita'"));
    }

    #[test]
    fn test_color_scheme() {
        assert!(color_scheme_is_dark("'prefer-dark'\n"));
        assert!(!color_scheme_is_dark("'default'"));
    }

    #[test]
    fn test_apple_style() {
        assert!(apple_style_is_dark("Dark\n"));
        assert!(!apple_style_is_dark(""));
    }
}

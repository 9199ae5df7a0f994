use ratatui::style::{Color, Modifier, Style as RatStyle};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::mode::Mode;

/// Color that can be serialized/deserialized
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeColor {
    /// Named color: "red", "blue", "cyan", etc.
    Named(NamedColor),
    /// RGB color: [255, 128, 0]
    Rgb([u8; 3]),
    /// 256-color index: 42
    Indexed(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
    DarkGray,
    LightBlue,
    LightCyan,
    LightYellow,
    White,
    Reset,
}

impl From<ThemeColor> for Color {
    fn from(tc: ThemeColor) -> Color {
        match tc {
            ThemeColor::Named(n) => match n {
                NamedColor::Black => Color::Black,
                NamedColor::Red => Color::Red,
                NamedColor::Green => Color::Green,
                NamedColor::Yellow => Color::Yellow,
                NamedColor::Blue => Color::Blue,
                NamedColor::Magenta => Color::Magenta,
                NamedColor::Cyan => Color::Cyan,
                NamedColor::Gray => Color::Gray,
                NamedColor::DarkGray => Color::DarkGray,
                NamedColor::LightBlue => Color::LightBlue,
                NamedColor::LightCyan => Color::LightCyan,
                NamedColor::LightYellow => Color::LightYellow,
                NamedColor::White => Color::White,
                NamedColor::Reset => Color::Reset,
            },
            ThemeColor::Rgb([r, g, b]) => Color::Rgb(r, g, b),
            ThemeColor::Indexed(i) => Color::Indexed(i),
        }
    }
}

/// Style definition for a single element
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<ThemeColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<ThemeColor>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub dim: bool,
}

impl ElementStyle {
    pub fn fg(color: ThemeColor) -> Self {
        Self { fg: Some(color), ..Default::default() }
    }

    pub fn with_bg(mut self, color: ThemeColor) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn with_dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn to_ratatui(&self) -> RatStyle {
        let mut style = RatStyle::default();
        if let Some(fg) = self.fg {
            style = style.fg(fg.into());
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg.into());
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.underline {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        style
    }
}

/// Complete theme configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,

    #[serde(default)]
    pub background: Option<ThemeColor>,

    // Table
    pub header: ElementStyle,
    pub header_pinned: ElementStyle,
    pub cell: ElementStyle,
    pub cell_pinned: ElementStyle,
    pub sort_active: ElementStyle,
    pub sort_inactive: ElementStyle,
    pub focus_column: ElementStyle,

    // Pagination
    pub page_button: ElementStyle,
    pub page_current: ElementStyle,
    pub page_disabled: ElementStyle,
    pub page_size_input: ElementStyle,
    pub page_size_editing: ElementStyle,

    // Status bar
    pub status_bar: ElementStyle,
    pub status_mode_normal: ElementStyle,
    pub status_mode_edit: ElementStyle,
    pub message_info: ElementStyle,
    pub message_error: ElementStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    /// Light theme (default)
    pub fn light() -> Self {
        use NamedColor::*;
        Self {
            name: "light".to_string(),
            background: None,
            header: ElementStyle::fg(ThemeColor::Named(Black)).with_bold(),
            header_pinned: ElementStyle::fg(ThemeColor::Named(Black))
                .with_bg(ThemeColor::Named(LightCyan))
                .with_bold(),
            cell: ElementStyle::fg(ThemeColor::Named(Black)),
            cell_pinned: ElementStyle::fg(ThemeColor::Named(Black))
                .with_bg(ThemeColor::Named(LightCyan)),
            sort_active: ElementStyle::fg(ThemeColor::Named(Black)).with_bold(),
            sort_inactive: ElementStyle::fg(ThemeColor::Named(Gray)),
            focus_column: ElementStyle::fg(ThemeColor::Named(Blue)).with_underline(),
            page_button: ElementStyle::fg(ThemeColor::Named(Blue)),
            page_current: ElementStyle::fg(ThemeColor::Named(White))
                .with_bg(ThemeColor::Named(Blue))
                .with_bold(),
            page_disabled: ElementStyle::fg(ThemeColor::Named(Gray)).with_dim(),
            page_size_input: ElementStyle::fg(ThemeColor::Named(Black)).with_underline(),
            page_size_editing: ElementStyle::fg(ThemeColor::Named(Black))
                .with_bg(ThemeColor::Named(LightYellow)),
            status_bar: ElementStyle::fg(ThemeColor::Named(Black))
                .with_bg(ThemeColor::Named(Gray)),
            status_mode_normal: ElementStyle::fg(ThemeColor::Named(White))
                .with_bg(ThemeColor::Named(Blue))
                .with_bold(),
            status_mode_edit: ElementStyle::fg(ThemeColor::Named(Black))
                .with_bg(ThemeColor::Named(Yellow))
                .with_bold(),
            message_info: ElementStyle::fg(ThemeColor::Named(Black)),
            message_error: ElementStyle::fg(ThemeColor::Named(Red)).with_bold(),
        }
    }

    /// Dark theme with black background
    pub fn dark() -> Self {
        use NamedColor::*;
        Self {
            name: "dark".to_string(),
            background: Some(ThemeColor::Named(Black)),
            header: ElementStyle::fg(ThemeColor::Named(White)).with_bold(),
            header_pinned: ElementStyle::fg(ThemeColor::Named(White))
                .with_bg(ThemeColor::Named(DarkGray))
                .with_bold(),
            cell: ElementStyle::fg(ThemeColor::Named(White)),
            cell_pinned: ElementStyle::fg(ThemeColor::Named(White))
                .with_bg(ThemeColor::Named(DarkGray)),
            sort_active: ElementStyle::fg(ThemeColor::Named(LightYellow)).with_bold(),
            sort_inactive: ElementStyle::fg(ThemeColor::Named(Gray)),
            focus_column: ElementStyle::fg(ThemeColor::Named(LightCyan)).with_underline(),
            page_button: ElementStyle::fg(ThemeColor::Named(LightBlue)),
            page_current: ElementStyle::fg(ThemeColor::Named(Black))
                .with_bg(ThemeColor::Named(LightCyan))
                .with_bold(),
            page_disabled: ElementStyle::fg(ThemeColor::Named(DarkGray)),
            page_size_input: ElementStyle::fg(ThemeColor::Named(White)).with_underline(),
            page_size_editing: ElementStyle::fg(ThemeColor::Named(Black))
                .with_bg(ThemeColor::Named(LightYellow)),
            status_bar: ElementStyle::fg(ThemeColor::Named(White))
                .with_bg(ThemeColor::Named(DarkGray)),
            status_mode_normal: ElementStyle::fg(ThemeColor::Named(Black))
                .with_bg(ThemeColor::Named(LightBlue))
                .with_bold(),
            status_mode_edit: ElementStyle::fg(ThemeColor::Named(Black))
                .with_bg(ThemeColor::Named(LightYellow))
                .with_bold(),
            message_info: ElementStyle::fg(ThemeColor::Named(White)),
            message_error: ElementStyle::fg(ThemeColor::Named(Red)).with_bold(),
        }
    }

    /// Load theme from TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Get theme by name
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// List available built-in themes
    pub fn builtin_names() -> &'static [&'static str] {
        &["dark", "light"]
    }
}

/// Runtime style manager
#[derive(Debug, Clone, Default)]
pub struct Style {
    pub theme: Theme,
}

impl Style {
    pub fn with_theme(theme: Theme) -> Self {
        Self { theme }
    }

    // Convenience accessors that return ratatui styles
    pub fn header(&self, pinned: bool) -> RatStyle {
        let base = self.base();
        if pinned {
            base.patch(self.theme.header_pinned.to_ratatui())
        } else {
            base.patch(self.theme.header.to_ratatui())
        }
    }

    pub fn cell(&self, pinned: bool) -> RatStyle {
        let base = self.base();
        if pinned {
            base.patch(self.theme.cell_pinned.to_ratatui())
        } else {
            base.patch(self.theme.cell.to_ratatui())
        }
    }

    pub fn sort_glyph(&self, active: bool) -> RatStyle {
        if active {
            self.theme.sort_active.to_ratatui()
        } else {
            self.theme.sort_inactive.to_ratatui()
        }
    }

    pub fn focus_column(&self) -> RatStyle {
        self.theme.focus_column.to_ratatui()
    }

    pub fn page_button(&self) -> RatStyle {
        self.theme.page_button.to_ratatui()
    }

    pub fn page_current(&self) -> RatStyle {
        self.theme.page_current.to_ratatui()
    }

    pub fn page_disabled(&self) -> RatStyle {
        self.theme.page_disabled.to_ratatui()
    }

    pub fn page_size_input(&self, editing: bool) -> RatStyle {
        if editing {
            self.theme.page_size_editing.to_ratatui()
        } else {
            self.theme.page_size_input.to_ratatui()
        }
    }

    pub fn status_bar(&self) -> RatStyle {
        self.theme.status_bar.to_ratatui()
    }

    pub fn status_mode(&self, mode: &Mode) -> RatStyle {
        match mode {
            Mode::Normal => self.theme.status_mode_normal.to_ratatui(),
            Mode::PageSize => self.theme.status_mode_edit.to_ratatui(),
        }
    }

    pub fn message_info(&self) -> RatStyle {
        self.theme.message_info.to_ratatui()
    }

    pub fn message_error(&self) -> RatStyle {
        self.theme.message_error.to_ratatui()
    }

    pub fn background(&self) -> Option<Color> {
        self.theme.background.map(|c| c.into())
    }

    fn base(&self) -> RatStyle {
        match self.background() {
            Some(bg) => RatStyle::default().bg(bg),
            None => RatStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_by_name() {
        assert_eq!(Theme::by_name("DARK").map(|t| t.name), Some("dark".to_string()));
        assert!(Theme::by_name("neon").is_none());
        for name in Theme::builtin_names() {
            assert!(Theme::by_name(name).is_some());
        }
    }

    #[test]
    fn test_theme_roundtrip_through_file() {
        let theme = Theme::dark();
        let text = toml::to_string(&theme).unwrap();

        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        file.write_all(text.as_bytes()).unwrap();

        let loaded = Theme::from_file(file.path()).unwrap();
        assert_eq!(loaded, theme);
    }

    #[test]
    fn test_color_forms() {
        let style: ElementStyle = toml::from_str("fg = \"red\"\nbg = [1, 2, 3]\nbold = true").unwrap();
        let rat = style.to_ratatui();
        assert_eq!(rat.fg, Some(Color::Red));
        assert_eq!(rat.bg, Some(Color::Rgb(1, 2, 3)));
        assert!(rat.add_modifier.contains(Modifier::BOLD));

        let indexed: ElementStyle = toml::from_str("fg = 42").unwrap();
        assert_eq!(indexed.to_ratatui().fg, Some(Color::Indexed(42)));
    }

    #[test]
    fn test_sort_glyph_styles_differ() {
        let style = Style::default();
        assert_ne!(style.sort_glyph(true), style.sort_glyph(false));
    }
}

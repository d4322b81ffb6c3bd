// Theme support for the TUI
//
// Color palettes selectable via config. "auto" uses the terminal's ANSI
// palette, named themes use true color (RGB).

use crate::tui::traits::ComponentId;
use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Base colors
    pub foreground: Color,
    pub background: Color,
    pub muted: Color,
    pub error: Color,
    pub warn: Color,

    // Product fields
    pub price: Color,
    pub brand: Color,

    // UI element colors
    pub status_bar: Color,
    pub title: Color,
    pub border: Color,
    pub border_type: BorderType,
    pub highlight: Color,
    pub selection: Color,
    pub selection_fg: Color,

    // Panel identity colors (used when focused)
    pub panel_products: Color,
    pub panel_filter: Color,
    pub panel_logs: Color,
}

impl Theme {
    /// Names accepted by `by_name`
    pub const NAMES: [&'static str; 4] = ["auto", "dracula", "nord", "gruvbox"];

    /// Load theme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dracula" => Self::dracula(),
            "nord" => Self::nord(),
            "gruvbox" => Self::gruvbox(),
            _ => Self::auto(), // "auto" or unknown
        }
    }

    /// Auto theme - uses terminal's ANSI palette
    pub fn auto() -> Self {
        Self {
            name: "auto".to_string(),
            foreground: Color::Reset,
            background: Color::Reset,
            muted: Color::DarkGray,
            error: Color::Red,
            warn: Color::Yellow,
            price: Color::Green,
            brand: Color::Magenta,
            status_bar: Color::Green,
            title: Color::Cyan,
            border: Color::White,
            border_type: BorderType::Rounded,
            highlight: Color::Yellow,
            selection: Color::Blue,
            selection_fg: Color::White,
            panel_products: Color::Cyan,
            panel_filter: Color::Yellow,
            panel_logs: Color::DarkGray,
        }
    }

    /// Dracula theme - https://draculatheme.com
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            foreground: Color::Rgb(0xf8, 0xf8, 0xf2),
            background: Color::Rgb(0x28, 0x2a, 0x36),
            muted: Color::Rgb(0x62, 0x72, 0xa4),  // comment
            error: Color::Rgb(0xff, 0x55, 0x55),  // red
            warn: Color::Rgb(0xff, 0xb8, 0x6c),   // orange
            price: Color::Rgb(0x50, 0xfa, 0x7b),  // green
            brand: Color::Rgb(0xff, 0x79, 0xc6),  // pink
            status_bar: Color::Rgb(0x50, 0xfa, 0x7b),
            title: Color::Rgb(0x8b, 0xe9, 0xfd),  // cyan
            border: Color::Rgb(0x62, 0x72, 0xa4),
            border_type: BorderType::Rounded,
            highlight: Color::Rgb(0xf1, 0xfa, 0x8c), // yellow
            selection: Color::Rgb(0x44, 0x47, 0x5a),
            selection_fg: Color::Rgb(0xf8, 0xf8, 0xf2),
            panel_products: Color::Rgb(0x8b, 0xe9, 0xfd),
            panel_filter: Color::Rgb(0xbd, 0x93, 0xf9), // purple
            panel_logs: Color::Rgb(0x62, 0x72, 0xa4),
        }
    }

    /// Nord theme - https://nordtheme.com
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            foreground: Color::Rgb(0xd8, 0xde, 0xe9),
            background: Color::Rgb(0x2e, 0x34, 0x40),
            muted: Color::Rgb(0x4c, 0x56, 0x6a),  // polar night
            error: Color::Rgb(0xbf, 0x61, 0x6a),  // aurora red
            warn: Color::Rgb(0xd0, 0x87, 0x70),   // aurora orange
            price: Color::Rgb(0xa3, 0xbe, 0x8c),  // aurora green
            brand: Color::Rgb(0xb4, 0x8e, 0xad),  // aurora purple
            status_bar: Color::Rgb(0xa3, 0xbe, 0x8c),
            title: Color::Rgb(0x88, 0xc0, 0xd0),  // frost cyan
            border: Color::Rgb(0x4c, 0x56, 0x6a),
            border_type: BorderType::Plain,
            highlight: Color::Rgb(0xeb, 0xcb, 0x8b), // aurora yellow
            selection: Color::Rgb(0x43, 0x4c, 0x5e),
            selection_fg: Color::Rgb(0xec, 0xef, 0xf4),
            panel_products: Color::Rgb(0x88, 0xc0, 0xd0),
            panel_filter: Color::Rgb(0x81, 0xa1, 0xc1), // frost blue
            panel_logs: Color::Rgb(0x4c, 0x56, 0x6a),
        }
    }

    /// Gruvbox theme - https://github.com/morhetz/gruvbox
    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            foreground: Color::Rgb(0xeb, 0xdb, 0xb2),
            background: Color::Rgb(0x28, 0x28, 0x28),
            muted: Color::Rgb(0x92, 0x83, 0x74),  // gray
            error: Color::Rgb(0xfb, 0x49, 0x34),  // red
            warn: Color::Rgb(0xfe, 0x80, 0x19),   // orange
            price: Color::Rgb(0xb8, 0xbb, 0x26),  // green
            brand: Color::Rgb(0xd3, 0x86, 0x9b),  // purple
            status_bar: Color::Rgb(0xb8, 0xbb, 0x26),
            title: Color::Rgb(0x83, 0xa5, 0x98),  // aqua
            border: Color::Rgb(0x92, 0x83, 0x74),
            border_type: BorderType::Thick,
            highlight: Color::Rgb(0xfa, 0xbd, 0x2f), // yellow
            selection: Color::Rgb(0x50, 0x49, 0x45),
            selection_fg: Color::Rgb(0xfb, 0xf1, 0xc7),
            panel_products: Color::Rgb(0x83, 0xa5, 0x98),
            panel_filter: Color::Rgb(0xfa, 0xbd, 0x2f),
            panel_logs: Color::Rgb(0x92, 0x83, 0x74),
        }
    }

    /// Border color for a panel based on focus state
    ///
    /// Focused panels use their identity color, unfocused the general border.
    pub fn panel_border(&self, panel: ComponentId, focused: bool) -> Color {
        if !focused {
            return self.border;
        }
        match panel {
            ComponentId::Products => self.panel_products,
            ComponentId::Filter => self.panel_filter,
            ComponentId::Logs => self.panel_logs,
            _ => self.highlight,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::auto()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_name_is_case_insensitive() {
        assert_eq!(Theme::by_name("Nord").name, "nord");
        assert_eq!(Theme::by_name("DRACULA").name, "dracula");
    }

    #[test]
    fn unknown_name_falls_back_to_auto() {
        assert_eq!(Theme::by_name("solarized").name, "auto");
    }

    #[test]
    fn every_listed_name_resolves() {
        for name in Theme::NAMES {
            assert_eq!(Theme::by_name(name).name, name);
        }
    }
}

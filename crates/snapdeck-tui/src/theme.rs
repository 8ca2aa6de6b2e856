use ratatui::style::Color;

/// Runtime theme colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub grey1: Color,
    pub grey2: Color,

    // Semantic colors
    pub accent: Color,
    pub moving: Color,
    pub throttled: Color,
    pub info: Color,
}

impl Theme {
    /// Background for section `index`; alternates so section edges stay visible mid-transition
    pub fn section_bg(&self, index: usize) -> Color {
        if index % 2 == 0 {
            self.bg0
        } else {
            self.bg1
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Material dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            moving: Color::Rgb(0xd8, 0xa6, 0x57),
            throttled: Color::Rgb(0xe7, 0x8a, 0x4e),
            info: Color::Rgb(0x7d, 0xae, 0xa3),
        }
    }
}

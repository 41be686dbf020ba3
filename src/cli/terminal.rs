//! Terminal capability detection and colored output

use catalog::ColorChoice;
use owo_colors::{OwoColorize, colors::css};

/// Detects whether stdout supports colored output
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Colors menu messages, or passes them through unchanged when disabled
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Resolves a color choice against the capabilities of stdout
    pub fn detect(choice: ColorChoice) -> Self {
        let enabled = match choice {
            ColorChoice::Auto => supports_color(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        };
        Self { enabled }
    }

    #[cfg(test)]
    pub const fn plain() -> Self {
        Self { enabled: false }
    }

    pub const fn is_enabled(self) -> bool {
        self.enabled
    }

    /// Color as success (green)
    pub fn success(self, text: &str) -> String {
        if self.enabled {
            text.fg::<css::Green>().to_string()
        } else {
            text.to_string()
        }
    }

    /// Color as warning (amber)
    pub fn warning(self, text: &str) -> String {
        if self.enabled {
            text.fg::<css::Orange>().to_string()
        } else {
            text.to_string()
        }
    }

    /// Color as info (blue)
    pub fn info(self, text: &str) -> String {
        if self.enabled {
            text.fg::<css::LightBlue>().to_string()
        } else {
            text.to_string()
        }
    }

    /// Dim the text
    pub fn dim(self, text: &str) -> String {
        if self.enabled {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

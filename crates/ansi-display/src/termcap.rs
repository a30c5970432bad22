// SPDX-License-Identifier: MIT
//
// Terminal capabilities — what the host says the terminal can display.
//
// Detection lives with the host (environment variables, terminfo, replies
// to queries). This module only holds the resulting values and answers one
// question for the emitter: given these capabilities, what should this
// attribute actually look like on the wire?
//
// Color fallback chain:
//
//   Direct ──▶ Indexed256 ──▶ Indexed16 ──▶ Indexed8 ──▶ NoColor
//   (RGB)      (xterm cube)   (system 16)   (low 8)      (nothing)

use std::fmt;
use std::str::FromStr;

use crate::attr::{Style, TermAttr};
use crate::color::{TermColor, palette};
use crate::error::Error;

// ─── ColorMode ───────────────────────────────────────────────────────────────

/// Color depth supported by a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorMode {
    /// Monochrome: no color escapes at all.
    NoColor,
    /// The eight standard colors.
    Indexed8,
    /// Standard plus bright colors.
    Indexed16,
    /// The xterm 256-color palette.
    #[default]
    Indexed256,
    /// 24-bit truecolor.
    Direct,
}

impl ColorMode {
    /// Number of distinct colors this mode can show.
    #[must_use]
    pub const fn max_colors(self) -> u32 {
        match self {
            Self::NoColor => 0,
            Self::Indexed8 => 8,
            Self::Indexed16 => 16,
            Self::Indexed256 => 256,
            Self::Direct => 1 << 24,
        }
    }
}

impl FromStr for ColorMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "mono" | "nocolor" | "0" => Ok(Self::NoColor),
            "8" => Ok(Self::Indexed8),
            "16" => Ok(Self::Indexed16),
            "256" => Ok(Self::Indexed256),
            "truecolor" | "24bit" | "direct" => Ok(Self::Direct),
            _ => Err(Error::UnknownColorMode(s.to_owned())),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoColor => "none",
            Self::Indexed8 => "8",
            Self::Indexed16 => "16",
            Self::Indexed256 => "256",
            Self::Direct => "truecolor",
        })
    }
}

// ─── TermCap ─────────────────────────────────────────────────────────────────

/// Capability descriptor supplied by the host display.
///
/// ```
/// use ansi_display::attr::Style;
/// use ansi_display::termcap::{ColorMode, TermCap};
///
/// let caps = TermCap::new(ColorMode::Indexed16, Style::all() - Style::BLINK);
/// assert!(caps.supports_indexed());
/// assert!(!caps.supports_truecolor());
/// assert!(!caps.supports_style(Style::BLINK));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TermCap {
    /// Supported color depth.
    pub colors: ColorMode,
    /// Style flags the terminal renders. Others are dropped before output.
    pub styles: Style,
}

impl TermCap {
    /// Create a descriptor from its parts.
    #[inline]
    #[must_use]
    pub const fn new(colors: ColorMode, styles: Style) -> Self {
        Self { colors, styles }
    }

    /// Truecolor terminal with every style.
    #[inline]
    #[must_use]
    pub const fn direct() -> Self {
        Self::new(ColorMode::Direct, Style::all())
    }

    /// Builder: replace the color depth.
    #[inline]
    #[must_use]
    pub const fn with_colors(mut self, colors: ColorMode) -> Self {
        self.colors = colors;
        self
    }

    /// Builder: replace the supported style set.
    #[inline]
    #[must_use]
    pub const fn with_styles(mut self, styles: Style) -> Self {
        self.styles = styles;
        self
    }

    /// Whether RGB colors can be sent as-is.
    #[inline]
    #[must_use]
    pub const fn supports_truecolor(self) -> bool {
        matches!(self.colors, ColorMode::Direct)
    }

    /// Whether palette colors can be sent at all.
    #[inline]
    #[must_use]
    pub const fn supports_indexed(self) -> bool {
        !matches!(self.colors, ColorMode::NoColor)
    }

    /// Number of distinct colors the terminal can show.
    #[inline]
    #[must_use]
    pub const fn max_colors(self) -> u32 {
        self.colors.max_colors()
    }

    /// Whether every flag in `flag` is rendered by the terminal.
    #[inline]
    #[must_use]
    pub const fn supports_style(self, flag: Style) -> bool {
        self.styles.contains(flag)
    }

    /// Narrow one color to what this terminal can display.
    #[must_use]
    pub fn convert_color(self, color: TermColor) -> TermColor {
        match (self.colors, color) {
            (_, TermColor::Default | TermColor::NoColor) | (ColorMode::Direct, _) => color,
            (ColorMode::NoColor, _) => TermColor::NoColor,
            (ColorMode::Indexed256, TermColor::Rgb(r, g, b)) => {
                TermColor::Indexed(palette::rgb_to_xterm256(r, g, b))
            }
            (ColorMode::Indexed256, TermColor::Indexed(_)) => color,
            (ColorMode::Indexed16, c) => TermColor::Indexed(to_ansi16(c)),
            (ColorMode::Indexed8, c) => TermColor::Indexed(to_ansi8(c)),
        }
    }

    /// Narrow a whole attribute: both colors, and unsupported styles dropped.
    #[must_use]
    pub fn convert(self, attr: TermAttr) -> TermAttr {
        TermAttr {
            fg: self.convert_color(attr.fg),
            bg: self.convert_color(attr.bg),
            style: attr.style & self.styles,
        }
    }
}

impl Default for TermCap {
    /// 256 colors, every style: what nearly every terminal in use handles.
    fn default() -> Self {
        Self::new(ColorMode::Indexed256, Style::all())
    }
}

/// System-16 index for a concrete color.
fn to_ansi16(color: TermColor) -> u8 {
    match color {
        TermColor::Indexed(idx) if idx < 16 => idx,
        TermColor::Indexed(idx) => {
            let (r, g, b) = palette::ansi256_to_rgb(idx);
            palette::nearest_ansi16(r, g, b)
        }
        TermColor::Rgb(r, g, b) => palette::nearest_ansi16(r, g, b),
        // Callers filter these out before narrowing.
        TermColor::Default | TermColor::NoColor => 0,
    }
}

/// Base-8 index for a concrete color, matched against the 8 base colors
/// rather than masking a system-16 index.
fn to_ansi8(color: TermColor) -> u8 {
    match color {
        TermColor::Indexed(idx) if idx < 8 => idx,
        TermColor::Indexed(idx) => {
            let (r, g, b) = palette::ansi256_to_rgb(idx);
            palette::nearest_ansi8(r, g, b)
        }
        TermColor::Rgb(r, g, b) => palette::nearest_ansi8(r, g, b),
        TermColor::Default | TermColor::NoColor => 0,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

// SPDX-License-Identifier: MIT
//
// Terminal colors and their 4-byte canonical encoding.
//
// A `TermColor` is what actually reaches the wire: terminal default, a
// palette index, a 24-bit RGB triple, or "no color at all" (monochrome
// terminals). In memory it is an ordinary enum. The packed word exists only
// at the boundary where colors are compared or cached:
//
//   ┌──────────┬──────────────────────────────────────┐
//   │ bits     │ meaning                              │
//   ├──────────┼──────────────────────────────────────┤
//   │ 31..24   │ tag: 0 Default, 1 Indexed, 2 RGB,    │
//   │          │      3 NoColor                       │
//   │ 23..0    │ payload: index in bits 7..0, or      │
//   │          │      0xRRGGBB; zero when unused      │
//   └──────────┴──────────────────────────────────────┘
//
// Equality and hashing go through the encoded word, so two colors compare
// equal exactly when their encodings are bit-identical.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};

const TAG_DEFAULT: u8 = 0;
const TAG_INDEXED: u8 = 1;
const TAG_RGB: u8 = 2;
const TAG_NO_COLOR: u8 = 3;

const TAG_SHIFT: u32 = 24;
const PAYLOAD_MASK: u32 = 0x00FF_FFFF;

// ─── TermColor ───────────────────────────────────────────────────────────────

/// A color as the terminal sees it.
#[derive(Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TermColor {
    /// The terminal's own default color (SGR 39 / 49).
    #[default]
    Default,
    /// A palette index, 0–255.
    Indexed(u8),
    /// 24-bit truecolor.
    Rgb(u8, u8, u8),
    /// No color information is sent at all.
    NoColor,
}

impl TermColor {
    /// Build an RGB color from a `0xRRGGBB` value. Bits above 23 are ignored.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Each cast keeps one channel byte.
    pub const fn rgb_hex(hex: u32) -> Self {
        Self::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Pack into the canonical 4-byte word.
    #[inline]
    #[must_use]
    pub const fn encode(self) -> u32 {
        match self {
            Self::Default => (TAG_DEFAULT as u32) << TAG_SHIFT,
            Self::Indexed(idx) => ((TAG_INDEXED as u32) << TAG_SHIFT) | idx as u32,
            Self::Rgb(r, g, b) => {
                ((TAG_RGB as u32) << TAG_SHIFT)
                    | ((r as u32) << 16)
                    | ((g as u32) << 8)
                    | b as u32
            }
            Self::NoColor => (TAG_NO_COLOR as u32) << TAG_SHIFT,
        }
    }

    /// Unpack a word produced by [`encode`](Self::encode).
    ///
    /// Payload bytes a variant does not use are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColorTag`] if the high byte is not a known tag.
    #[allow(clippy::cast_possible_truncation)] // Tag and index are single bytes.
    pub fn decode(word: u32) -> Result<Self> {
        let payload = word & PAYLOAD_MASK;
        match (word >> TAG_SHIFT) as u8 {
            TAG_DEFAULT => Ok(Self::Default),
            TAG_INDEXED => Ok(Self::Indexed(payload as u8)),
            TAG_RGB => Ok(Self::rgb_hex(payload)),
            TAG_NO_COLOR => Ok(Self::NoColor),
            tag => Err(Error::InvalidColorTag(tag)),
        }
    }

    /// Whether this is the terminal default color.
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

impl PartialEq for TermColor {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.encode() == other.encode()
    }
}

impl Eq for TermColor {}

impl Hash for TermColor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.encode().hash(state);
    }
}

impl From<TermColor> for u32 {
    #[inline]
    fn from(color: TermColor) -> Self {
        color.encode()
    }
}

impl TryFrom<u32> for TermColor {
    type Error = Error;

    fn try_from(word: u32) -> Result<Self> {
        Self::decode(word)
    }
}

impl fmt::Debug for TermColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Indexed(idx) => write!(f, "indexed({idx})"),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::NoColor => write!(f, "nocolor"),
        }
    }
}

impl fmt::Display for TermColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ─── ANSI Palette ────────────────────────────────────────────────────────────

pub mod palette {
    //! xterm palette tables and nearest-match helpers used when a terminal
    //! can't display the requested color depth.
    //!
    //! - Colors 0–7: standard colors
    //! - Colors 8–15: bright variants
    //! - Colors 16–231: 6×6×6 RGB cube
    //! - Colors 232–255: 24-step grayscale ramp

    /// The xterm defaults for the first 16 palette entries.
    pub const ANSI16_RGB: [(u8, u8, u8); 16] = [
        (0, 0, 0),       // 0: Black
        (128, 0, 0),     // 1: Red
        (0, 128, 0),     // 2: Green
        (128, 128, 0),   // 3: Yellow
        (0, 0, 128),     // 4: Blue
        (128, 0, 128),   // 5: Magenta
        (0, 128, 128),   // 6: Cyan
        (192, 192, 192), // 7: White
        (128, 128, 128), // 8: Bright Black
        (255, 0, 0),     // 9: Bright Red
        (0, 255, 0),     // 10: Bright Green
        (255, 255, 0),   // 11: Bright Yellow
        (0, 0, 255),     // 12: Bright Blue
        (255, 0, 255),   // 13: Bright Magenta
        (0, 255, 255),   // 14: Bright Cyan
        (255, 255, 255), // 15: Bright White
    ];

    /// Channel values of the 6×6×6 cube.
    const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

    /// Convert a palette index to its xterm RGB value.
    #[must_use]
    pub fn ansi256_to_rgb(idx: u8) -> (u8, u8, u8) {
        match idx {
            0..=15 => ANSI16_RGB[idx as usize],
            16..=231 => {
                let idx = idx - 16;
                (
                    CUBE_LEVELS[(idx / 36) as usize],
                    CUBE_LEVELS[((idx % 36) / 6) as usize],
                    CUBE_LEVELS[(idx % 6) as usize],
                )
            }
            232..=255 => {
                let v = 8 + 10 * (idx - 232);
                (v, v, v)
            }
        }
    }

    /// Nearest cube level for one channel (thresholds sit at the midpoints).
    const fn cube_index(v: u8) -> u8 {
        if v < 48 {
            0
        } else if v < 115 {
            1
        } else {
            (v - 35) / 40
        }
    }

    fn distance_sq((r1, g1, b1): (u8, u8, u8), (r2, g2, b2): (u8, u8, u8)) -> u32 {
        let d = |a: u8, b: u8| u32::from(a.abs_diff(b)).pow(2);
        d(r1, r2) + d(g1, g2) + d(b1, b2)
    }

    /// Map an RGB triple onto the 240 non-system xterm colors (16–255).
    ///
    /// Picks whichever is closer: the nearest cube entry or the nearest
    /// grayscale step. Ties go to the cube.
    #[must_use]
    pub fn rgb_to_xterm256(r: u8, g: u8, b: u8) -> u8 {
        let (ri, gi, bi) = (cube_index(r), cube_index(g), cube_index(b));
        let cube_idx = 16 + 36 * ri + 6 * gi + bi;
        let cube_rgb = (
            CUBE_LEVELS[ri as usize],
            CUBE_LEVELS[gi as usize],
            CUBE_LEVELS[bi as usize],
        );

        let avg = (u16::from(r) + u16::from(g) + u16::from(b)) / 3;
        #[allow(clippy::cast_possible_truncation)] // Clamped to 0..=23.
        let gray_step = (avg.saturating_sub(3) / 10).min(23) as u8;
        let gray_idx = 232 + gray_step;
        let gray_rgb = ansi256_to_rgb(gray_idx);

        let target = (r, g, b);
        if distance_sq(gray_rgb, target) < distance_sq(cube_rgb, target) {
            gray_idx
        } else {
            cube_idx
        }
    }

    /// Nearest of the 16 system colors by squared RGB distance.
    #[must_use]
    pub fn nearest_ansi16(r: u8, g: u8, b: u8) -> u8 {
        nearest_in(&ANSI16_RGB, (r, g, b))
    }

    /// Nearest of the 8 base colors (no bright variants).
    #[must_use]
    pub fn nearest_ansi8(r: u8, g: u8, b: u8) -> u8 {
        nearest_in(&ANSI16_RGB[..8], (r, g, b))
    }

    fn nearest_in(table: &[(u8, u8, u8)], target: (u8, u8, u8)) -> u8 {
        let mut best_idx = 0u8;
        let mut best_dist = u32::MAX;
        for (idx, &rgb) in (0u8..).zip(table) {
            let dist = distance_sq(rgb, target);
            if dist < best_dist {
                best_dist = dist;
                best_idx = idx;
            }
        }
        best_idx
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::palette::*;
    use super::*;
    use proptest::prelude::*;

    // ── Encoding ────────────────────────────────────────────────────────

    #[test]
    fn encode_default_is_zero() {
        assert_eq!(TermColor::Default.encode(), 0);
    }

    #[test]
    fn encode_indexed_puts_index_in_low_byte() {
        assert_eq!(TermColor::Indexed(0xAB).encode(), 0x0100_00AB);
    }

    #[test]
    fn encode_rgb_layout() {
        assert_eq!(TermColor::Rgb(0x12, 0x34, 0x56).encode(), 0x0212_3456);
    }

    #[test]
    fn encode_no_color_tag_only() {
        assert_eq!(TermColor::NoColor.encode(), 0x0300_0000);
    }

    #[test]
    fn decode_ignores_unused_payload() {
        assert_eq!(TermColor::decode(0x01FF_FF07).unwrap(), TermColor::Indexed(7));
        assert_eq!(TermColor::decode(0x00AB_CDEF).unwrap(), TermColor::Default);
    }

    #[test]
    fn decode_rejects_unknown_tag() {
        assert!(matches!(
            TermColor::decode(0x0400_0000),
            Err(Error::InvalidColorTag(4))
        ));
    }

    #[test]
    fn try_from_and_into_mirror_encode_decode() {
        let word: u32 = TermColor::Rgb(1, 2, 3).into();
        assert_eq!(TermColor::try_from(word).unwrap(), TermColor::Rgb(1, 2, 3));
    }

    #[test]
    fn rgb_hex_splits_channels() {
        assert_eq!(TermColor::rgb_hex(0xFF_55_00), TermColor::Rgb(255, 85, 0));
    }

    #[test]
    fn variants_with_same_payload_differ() {
        assert_ne!(TermColor::Default, TermColor::NoColor);
        assert_ne!(TermColor::Indexed(0), TermColor::Default);
        assert_ne!(TermColor::Rgb(0, 0, 0), TermColor::Indexed(0));
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", TermColor::Rgb(255, 0, 128)), "#ff0080");
        assert_eq!(format!("{:?}", TermColor::Indexed(42)), "indexed(42)");
        assert_eq!(format!("{}", TermColor::Default), "default");
        assert_eq!(format!("{}", TermColor::NoColor), "nocolor");
    }

    #[test]
    fn every_index_round_trips() {
        for idx in 0u8..=255 {
            let c = TermColor::Indexed(idx);
            assert_eq!(TermColor::decode(c.encode()).unwrap(), c);
        }
    }

    proptest! {
        #[test]
        fn prop_rgb_round_trips(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let c = TermColor::Rgb(r, g, b);
            prop_assert_eq!(TermColor::decode(c.encode()).unwrap(), c);
        }

        #[test]
        fn prop_equality_matches_encoding(a in any::<u32>(), b in any::<u32>()) {
            if let (Ok(x), Ok(y)) = (TermColor::decode(a), TermColor::decode(b)) {
                prop_assert_eq!(x == y, x.encode() == y.encode());
            }
        }
    }

    // ── Palette ─────────────────────────────────────────────────────────

    #[test]
    fn ansi256_standard_colors() {
        assert_eq!(ansi256_to_rgb(0), (0, 0, 0));
        assert_eq!(ansi256_to_rgb(9), (255, 0, 0));
        assert_eq!(ansi256_to_rgb(15), (255, 255, 255));
    }

    #[test]
    fn ansi256_cube() {
        assert_eq!(ansi256_to_rgb(16), (0, 0, 0));
        assert_eq!(ansi256_to_rgb(196), (255, 0, 0));
        assert_eq!(ansi256_to_rgb(231), (255, 255, 255));
    }

    #[test]
    fn ansi256_grayscale() {
        assert_eq!(ansi256_to_rgb(232), (8, 8, 8));
        assert_eq!(ansi256_to_rgb(255), (238, 238, 238));
    }

    #[test]
    fn xterm256_pure_colors_hit_cube_corners() {
        assert_eq!(rgb_to_xterm256(255, 0, 0), 196);
        assert_eq!(rgb_to_xterm256(0, 255, 0), 46);
        assert_eq!(rgb_to_xterm256(0, 0, 255), 21);
        assert_eq!(rgb_to_xterm256(0, 0, 0), 16);
        assert_eq!(rgb_to_xterm256(255, 255, 255), 231);
    }

    #[test]
    fn xterm256_mid_gray_uses_ramp() {
        assert_eq!(rgb_to_xterm256(128, 128, 128), 244);
    }

    #[test]
    fn xterm256_round_trips_cube_entries() {
        for idx in 16u8..=231 {
            let (r, g, b) = ansi256_to_rgb(idx);
            assert_eq!(rgb_to_xterm256(r, g, b), idx, "cube index {idx}");
        }
    }

    #[test]
    fn nearest16_exact_matches() {
        for idx in 0u8..16 {
            let (r, g, b) = ANSI16_RGB[idx as usize];
            assert_eq!(nearest_ansi16(r, g, b), idx);
        }
    }

    #[test]
    fn nearest16_light_gray_is_white() {
        assert_eq!(nearest_ansi16(200, 200, 200), 7);
    }

    #[test]
    fn nearest8_mid_gray_is_white() {
        assert_eq!(nearest_ansi8(128, 128, 128), 7);
        assert_eq!(nearest_ansi8(255, 255, 255), 7);
    }

    #[test]
    fn nearest8_bright_colors_fold_to_base() {
        for idx in 9u8..16 {
            let (r, g, b) = ANSI16_RGB[idx as usize];
            assert_eq!(nearest_ansi8(r, g, b), idx - 8, "bright index {idx}");
        }
    }
}

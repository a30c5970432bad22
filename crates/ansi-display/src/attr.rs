// SPDX-License-Identifier: MIT
//
// Cell attributes — the complete styling of one character position.
//
// A `TermAttr` is foreground + background + style flags, always handled as
// a whole. There are no sparse updates: the emitter compares the entire
// attribute against what it last sent and derives the SGR delta itself.

use crate::color::TermColor;

// ─── Style Flags ─────────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Text style flags.
    ///
    /// Each flag has a distinct SGR "set" and "clear" code, so a change in
    /// one flag never disturbs another:
    ///
    /// ```
    /// use ansi_display::attr::Style;
    ///
    /// let style = Style::BOLD | Style::UNDERLINE;
    /// assert_eq!(style.sgr_set_codes().collect::<Vec<_>>(), [1, 4]);
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Style: u8 {
        /// SGR 1, cleared by 22.
        const BOLD      = 1 << 0;
        /// SGR 3, cleared by 23.
        const ITALIC    = 1 << 1;
        /// SGR 4, cleared by 24.
        const UNDERLINE = 1 << 2;
        /// SGR 5, cleared by 25.
        const BLINK     = 1 << 3;
        /// SGR 7, cleared by 27.
        const REVERSE   = 1 << 4;
        /// SGR 9, cleared by 29.
        const STRIKE    = 1 << 5;
    }
}

/// `(flag, set code, clear code)` in emission order.
const STYLE_CODES: [(Style, u8, u8); 6] = [
    (Style::BOLD, 1, 22),
    (Style::ITALIC, 3, 23),
    (Style::UNDERLINE, 4, 24),
    (Style::BLINK, 5, 25),
    (Style::REVERSE, 7, 27),
    (Style::STRIKE, 9, 29),
];

impl Style {
    /// SGR set codes for every flag present, in emission order.
    pub fn sgr_set_codes(self) -> impl Iterator<Item = u8> {
        STYLE_CODES
            .into_iter()
            .filter(move |&(flag, _, _)| self.contains(flag))
            .map(|(_, set, _)| set)
    }

    /// SGR codes that move a terminal from `self` to `next`: a set code for
    /// each newly enabled flag, a clear code for each disabled one.
    pub fn sgr_delta(self, next: Self) -> impl Iterator<Item = u8> {
        let changed = self ^ next;
        STYLE_CODES
            .into_iter()
            .filter(move |&(flag, _, _)| changed.contains(flag))
            .map(move |(flag, set, clear)| if next.contains(flag) { set } else { clear })
    }
}

// ─── TermAttr ────────────────────────────────────────────────────────────────

/// Foreground, background and style of one cell.
///
/// Equality compares the encoded color words and the style bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TermAttr {
    /// Text color.
    pub fg: TermColor,
    /// Cell background color.
    pub bg: TermColor,
    /// Style flags.
    pub style: Style,
}

impl TermAttr {
    /// Create an attribute from its three parts.
    #[inline]
    #[must_use]
    pub const fn new(fg: TermColor, bg: TermColor, style: Style) -> Self {
        Self { fg, bg, style }
    }

    /// Builder: replace the foreground.
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: TermColor) -> Self {
        self.fg = fg;
        self
    }

    /// Builder: replace the background.
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: TermColor) -> Self {
        self.bg = bg;
        self
    }

    /// Builder: replace the style flags.
    #[inline]
    #[must_use]
    pub const fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Canonical packed form: `(fg | bg << 32, style bits)`.
    #[inline]
    #[must_use]
    pub const fn encode(self) -> (u64, u8) {
        (
            self.fg.encode() as u64 | (self.bg.encode() as u64) << 32,
            self.style.bits(),
        )
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(from: Style, to: Style) -> Vec<u8> {
        from.sgr_delta(to).collect()
    }

    // ── Style ───────────────────────────────────────────────────────────

    #[test]
    fn set_codes_follow_flag_order() {
        let all = Style::all();
        assert_eq!(all.sgr_set_codes().collect::<Vec<_>>(), [1, 3, 4, 5, 7, 9]);
    }

    #[test]
    fn set_codes_empty_for_plain_style() {
        assert_eq!(Style::empty().sgr_set_codes().count(), 0);
    }

    #[test]
    fn delta_same_style_is_empty() {
        let s = Style::BOLD | Style::REVERSE;
        assert!(delta(s, s).is_empty());
    }

    #[test]
    fn delta_enables_new_flag() {
        assert_eq!(delta(Style::empty(), Style::BOLD), [1]);
    }

    #[test]
    fn delta_clears_removed_flag() {
        assert_eq!(delta(Style::BOLD, Style::empty()), [22]);
    }

    #[test]
    fn delta_mixes_set_and_clear() {
        let from = Style::BOLD | Style::UNDERLINE;
        let to = Style::UNDERLINE | Style::REVERSE;
        assert_eq!(delta(from, to), [22, 7]);
    }

    #[test]
    fn delta_clear_codes_are_distinct() {
        assert_eq!(delta(Style::all(), Style::empty()), [22, 23, 24, 25, 27, 29]);
    }

    // ── TermAttr ────────────────────────────────────────────────────────

    #[test]
    fn default_attr_is_plain() {
        let attr = TermAttr::default();
        assert!(attr.fg.is_default());
        assert!(attr.bg.is_default());
        assert!(attr.style.is_empty());
    }

    #[test]
    fn builders_compose() {
        let attr = TermAttr::default()
            .with_fg(TermColor::Indexed(1))
            .with_bg(TermColor::Rgb(0, 0, 255))
            .with_style(Style::ITALIC);
        assert_eq!(
            attr,
            TermAttr::new(TermColor::Indexed(1), TermColor::Rgb(0, 0, 255), Style::ITALIC)
        );
    }

    #[test]
    fn encode_packs_both_words() {
        let attr = TermAttr::new(TermColor::Indexed(5), TermColor::NoColor, Style::BOLD);
        assert_eq!(attr.encode(), (0x0300_0000_0100_0005, 1));
    }

    #[test]
    fn attrs_differing_only_in_style_are_unequal() {
        let a = TermAttr::new(TermColor::Default, TermColor::Default, Style::BOLD);
        assert_ne!(a, a.with_style(Style::ITALIC));
    }
}

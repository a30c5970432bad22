// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No state,
// no decisions about when to emit; that's the emitter's job. This module
// just knows the byte-level encoding of every sequence the crate sends.
//
// All cursor positions are 0-indexed in our API and converted to 1-indexed
// for the terminal (ANSI uses 1-based coordinates).
//
// All functions return `io::Result` propagated from the underlying writer.
// They never fail when writing into the emitter's Vec-backed buffer.

use std::io::{self, Write};

use crate::color::TermColor;
use crate::termcap::ColorMode;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to `(x, y)` with CUP: `ESC [ row ; col H`.
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1)
}

/// Move the cursor to column `x` of the current row with CHA: `ESC [ col G`.
#[inline]
pub fn cursor_x(w: &mut impl Write, x: u16) -> io::Result<()> {
    write!(w, "\x1b[{}G", u32::from(x) + 1)
}

/// Move the cursor to the top-left corner: `ESC [ H`.
#[inline]
pub fn cursor_home(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[H")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2). The cursor does not move.
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

// ─── SGR ─────────────────────────────────────────────────────────────────────

/// Six style codes plus two five-number color specs.
const MAX_SGR_PARAMS: usize = 16;

/// Parameter list for one combined SGR sequence.
///
/// Every parameter this crate sends fits in a byte (style codes, color
/// selectors, palette indices, RGB channels), so the list lives on the stack.
#[derive(Debug, Clone, Copy)]
pub struct SgrParams {
    buf: [u8; MAX_SGR_PARAMS],
    len: usize,
}

impl SgrParams {
    /// An empty list.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: [0; MAX_SGR_PARAMS],
            len: 0,
        }
    }

    /// Append one parameter. Parameters past capacity are dropped.
    #[inline]
    pub fn push(&mut self, param: u8) {
        if let Some(slot) = self.buf.get_mut(self.len) {
            *slot = param;
            self.len += 1;
        }
    }

    /// Append the foreground selector for `color` as a `mode` terminal
    /// understands.
    ///
    /// `39` default, `38;5;i` indexed, `38;2;r;g;b` truecolor, nothing
    /// for [`TermColor::NoColor`]. On 8- and 16-color terminals, indices
    /// below 16 use the short forms `30`–`37` and `90`–`97`.
    pub fn fg(&mut self, color: TermColor, mode: ColorMode) {
        self.color(color, mode, 38, 39);
    }

    /// Append the background selector for `color` (`49`, `48;5;i`,
    /// `48;2;r;g;b`, or `40`–`47` / `100`–`107` on 8- and 16-color terminals).
    pub fn bg(&mut self, color: TermColor, mode: ColorMode) {
        self.color(color, mode, 48, 49);
    }

    fn color(&mut self, color: TermColor, mode: ColorMode, extended: u8, default: u8) {
        match color {
            TermColor::Default => self.push(default),
            TermColor::Indexed(idx) if idx < 16 && mode <= ColorMode::Indexed16 => {
                // 38 → 30 / 90, 48 → 40 / 100.
                let base = extended - 8;
                if idx < 8 {
                    self.push(base + idx);
                } else {
                    self.push(base + 60 + idx - 8);
                }
            }
            TermColor::Indexed(idx) => {
                self.push(extended);
                self.push(5);
                self.push(idx);
            }
            TermColor::Rgb(r, g, b) => {
                self.push(extended);
                self.push(2);
                self.push(r);
                self.push(g);
                self.push(b);
            }
            TermColor::NoColor => {}
        }
    }

    /// Whether nothing has been pushed.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The collected parameters.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl Default for SgrParams {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<u8> for SgrParams {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        for param in iter {
            self.push(param);
        }
    }
}

/// Emit `ESC [ p1;p2;… m`. Does nothing for an empty list.
pub fn sgr(w: &mut impl Write, params: &SgrParams) -> io::Result<()> {
    let Some((first, rest)) = params.as_slice().split_first() else {
        return Ok(());
    };
    write!(w, "\x1b[{first}")?;
    for param in rest {
        write!(w, ";{param}")?;
    }
    w.write_all(b"m")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

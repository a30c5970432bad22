// SPDX-License-Identifier: MIT
//
// Composition of a host display with the ANSI emitter.
//
// A host display owns the screen buffer and decides which cells changed.
// It knows nothing about escape codes. The emitter knows escape codes and
// nothing about screens. Two small traits describe the two halves:
//
//   TerminalDisplay  — the host: capabilities and the screen-info reload hook.
//   LowLevelDisplay  — the byte-level surface: write / move / flush.
//
// `AnsiDisplay<D, W>` holds one of each and implements both traits purely
// by delegation, adding one behavior of its own: after the host reloads its
// screen info, the emitter's cached attribute is dropped. A resize or a
// capability change can reset the terminal's rendering state behind our
// back, and a stale cache would skip escapes the terminal now needs.

use std::io::{self, Write};

use tracing::debug;

use crate::attr::TermAttr;
use crate::output::AnsiEmitter;
use crate::termcap::TermCap;

// ─── Traits ──────────────────────────────────────────────────────────────────

/// A host display backend.
pub trait TerminalDisplay {
    /// Capabilities of the terminal as currently detected by the host.
    fn termcap(&self) -> TermCap;

    /// Re-read screen dimensions and capabilities.
    fn reload_screen_info(&mut self);
}

/// Low-level output operations a buffered display drives.
pub trait LowLevelDisplay {
    /// Draw `text` at the cursor with `attr`.
    fn write_chars(&mut self, text: &str, attr: TermAttr);

    /// Move the cursor to `(x, y)`, 0-based.
    fn move_cursor(&mut self, x: u16, y: u16);

    /// Move the cursor to column `x` on row `y`, which the cursor is
    /// already on.
    fn move_cursor_x(&mut self, x: u16, y: u16);

    /// Push everything written so far to the terminal.
    ///
    /// # Errors
    ///
    /// Returns the output sink's error.
    fn flush(&mut self) -> io::Result<()>;
}

// ─── AnsiDisplay ─────────────────────────────────────────────────────────────

/// A host display `D` whose low-level output is ANSI written to `W`.
///
/// ```
/// use ansi_display::attr::{Style, TermAttr};
/// use ansi_display::color::TermColor;
/// use ansi_display::display::{AnsiDisplay, LowLevelDisplay, TerminalDisplay};
/// use ansi_display::termcap::TermCap;
///
/// struct Host;
///
/// impl TerminalDisplay for Host {
///     fn termcap(&self) -> TermCap {
///         TermCap::direct()
///     }
///     fn reload_screen_info(&mut self) {}
/// }
///
/// let mut display = AnsiDisplay::new(Host, Vec::new());
/// display.move_cursor(0, 0);
/// display.write_chars("hi", TermAttr::default().with_style(Style::BOLD));
/// display.flush().unwrap();
/// assert_eq!(display.emitter().sink().as_slice(), b"\x1b[1;1H\x1b[1;39;49mhi");
/// ```
#[derive(Debug)]
pub struct AnsiDisplay<D, W: Write> {
    host: D,
    emitter: AnsiEmitter<W>,
}

impl<D: TerminalDisplay, W: Write> AnsiDisplay<D, W> {
    /// Wrap `host`, sending output to `sink`.
    #[must_use]
    pub fn new(host: D, sink: W) -> Self {
        Self {
            host,
            emitter: AnsiEmitter::new(sink),
        }
    }

    /// Forget the last emitted attribute.
    pub fn clear_attributes(&mut self) {
        self.emitter.clear_attributes();
    }

    /// Clear the screen, home the cursor, and forget the attribute.
    pub fn clear_screen(&mut self) {
        self.emitter.clear_screen();
    }

    /// The wrapped host.
    #[inline]
    #[must_use]
    pub const fn host(&self) -> &D {
        &self.host
    }

    /// The wrapped host, mutably.
    #[inline]
    pub const fn host_mut(&mut self) -> &mut D {
        &mut self.host
    }

    /// The ANSI emitter.
    #[inline]
    #[must_use]
    pub const fn emitter(&self) -> &AnsiEmitter<W> {
        &self.emitter
    }

    /// Split back into host and emitter.
    #[must_use]
    pub fn into_parts(self) -> (D, AnsiEmitter<W>) {
        (self.host, self.emitter)
    }
}

impl<D: TerminalDisplay, W: Write> TerminalDisplay for AnsiDisplay<D, W> {
    fn termcap(&self) -> TermCap {
        self.host.termcap()
    }

    fn reload_screen_info(&mut self) {
        self.host.reload_screen_info();
        self.emitter.clear_attributes();
        debug!(caps = ?self.host.termcap(), "screen info reloaded, attribute cache dropped");
    }
}

impl<D: TerminalDisplay, W: Write> LowLevelDisplay for AnsiDisplay<D, W> {
    fn write_chars(&mut self, text: &str, attr: TermAttr) {
        self.emitter.write_chars(text, attr, self.host.termcap());
    }

    fn move_cursor(&mut self, x: u16, y: u16) {
        self.emitter.move_cursor(x, y);
    }

    fn move_cursor_x(&mut self, x: u16, y: u16) {
        self.emitter.move_cursor_x(x, y);
    }

    fn flush(&mut self) -> io::Result<()> {
        self.emitter.flush()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::Style;
    use crate::color::TermColor;
    use crate::termcap::ColorMode;

    struct FixedHost {
        caps: TermCap,
        reloads: usize,
    }

    impl TerminalDisplay for FixedHost {
        fn termcap(&self) -> TermCap {
            self.caps
        }

        fn reload_screen_info(&mut self) {
            self.reloads += 1;
        }
    }

    fn display(caps: TermCap) -> AnsiDisplay<FixedHost, Vec<u8>> {
        AnsiDisplay::new(FixedHost { caps, reloads: 0 }, Vec::new())
    }

    #[test]
    fn write_uses_host_caps() {
        let mut d = display(TermCap::default().with_colors(ColorMode::Indexed16));
        d.write_chars("x", TermAttr::default().with_fg(TermColor::Rgb(255, 0, 0)));
        assert_eq!(d.emitter().pending(), b"\x1b[91;49mx");
    }

    #[test]
    fn termcap_delegates_to_host() {
        let d = display(TermCap::direct());
        assert_eq!(d.termcap(), TermCap::direct());
    }

    #[test]
    fn reload_calls_host_and_invalidates() {
        let mut d = display(TermCap::direct());
        d.write_chars("x", TermAttr::default());
        assert!(d.emitter().last_attr().is_some());
        d.reload_screen_info();
        assert_eq!(d.host().reloads, 1);
        assert_eq!(d.emitter().last_attr(), None);
    }

    #[test]
    fn cursor_calls_forward() {
        let mut d = display(TermCap::direct());
        d.move_cursor(1, 1);
        d.move_cursor_x(7, 1);
        assert_eq!(d.emitter().pending(), b"\x1b[2;2H\x1b[8G");
    }

    #[test]
    fn clear_screen_passes_through() {
        let mut d = display(TermCap::direct());
        let attr = TermAttr::default().with_style(Style::BOLD);
        d.write_chars("a", attr);
        d.clear_screen();
        d.write_chars("b", attr);
        assert_eq!(
            d.emitter().pending(),
            b"\x1b[1;39;49ma\x1b[2J\x1b[H\x1b[1;39;49mb"
        );
    }

    #[test]
    fn into_parts_returns_both_halves() {
        let mut d = display(TermCap::direct());
        d.host_mut().reloads = 3;
        d.clear_attributes();
        let (host, emitter) = d.into_parts();
        assert_eq!(host.reloads, 3);
        assert!(emitter.pending().is_empty());
    }
}

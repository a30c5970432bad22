// SPDX-License-Identifier: MIT
//
// Output buffering and stateful attribute emission.
//
// Two components work together to minimize terminal I/O:
//
//   OutputBuffer — accumulates all ANSI bytes in memory so a whole render
//   pass reaches the terminal in a single write.
//
//   AnsiEmitter — remembers the last attribute it sent and emits only the
//   SGR parameters that differ. If the previous run was bold red on default
//   and the next run is too, only the characters go out.
//
// Cursor position is never tracked here. The host's cell-diffing engine
// knows where the cursor is and asks for moves explicitly.

use std::io::{self, Write};

use tracing::{debug, trace};

use crate::ansi::{self, SgrParams};
use crate::attr::{Style, TermAttr};
use crate::termcap::{ColorMode, TermCap};

// ─── OutputBuffer ────────────────────────────────────────────────────────────

/// A byte buffer that accumulates ANSI output for a single write.
///
/// Default capacity: 16 KB, enough for most frames without reallocation.
#[derive(Debug)]
pub struct OutputBuffer {
    buf: Vec<u8>,
}

const DEFAULT_CAPACITY: usize = 16_384;

impl OutputBuffer {
    /// Create an empty buffer with default capacity (16 KB).
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Number of bytes accumulated.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append raw text.
    #[inline]
    pub fn push_str(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// Clear the buffer for reuse (keeps allocated capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // No-op: draining to the sink is `AnsiEmitter::flush`.
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── AnsiEmitter ─────────────────────────────────────────────────────────────

/// Stateful ANSI backend: buffers output and skips redundant SGR sequences.
///
/// # State
///
/// `last_attr` is `None` ("unset") at start, after [`clear_attributes`],
/// after [`clear_screen`], and after a host reload. While unset, the next
/// write describes its attribute in full: every set style flag plus both
/// colors. Once set, writes emit only what changed:
///
/// ```
/// use ansi_display::attr::{Style, TermAttr};
/// use ansi_display::color::TermColor;
/// use ansi_display::output::AnsiEmitter;
/// use ansi_display::termcap::TermCap;
///
/// let mut em = AnsiEmitter::new(Vec::new());
/// let attr = TermAttr::new(TermColor::Indexed(1), TermColor::Default, Style::BOLD);
/// em.write_chars("A", attr, TermCap::default());
/// em.write_chars("B", attr, TermCap::default());
/// assert_eq!(em.pending(), b"\x1b[1;38;5;1;49mAB");
/// ```
///
/// [`clear_attributes`]: AnsiEmitter::clear_attributes
/// [`clear_screen`]: AnsiEmitter::clear_screen
#[derive(Debug)]
pub struct AnsiEmitter<W: Write> {
    out: OutputBuffer,
    last_attr: Option<TermAttr>,
    sink: W,
}

impl<W: Write> AnsiEmitter<W> {
    /// Create an emitter that flushes into `sink`.
    #[must_use]
    pub fn new(sink: W) -> Self {
        Self {
            out: OutputBuffer::new(),
            last_attr: None,
            sink,
        }
    }

    /// Forget the last emitted attribute. Emits nothing.
    pub fn clear_attributes(&mut self) {
        self.last_attr = None;
    }

    /// Clear the screen and home the cursor, then forget the attribute.
    pub fn clear_screen(&mut self) {
        ansi::clear_screen(&mut self.out).ok();
        ansi::cursor_home(&mut self.out).ok();
        self.last_attr = None;
    }

    /// Append `text` drawn with `attr`, narrowed to what `caps` supports.
    pub fn write_chars(&mut self, text: &str, attr: TermAttr, caps: TermCap) {
        let attr = caps.convert(attr);
        if self.last_attr != Some(attr) {
            let params = sgr_transition(self.last_attr, attr, caps.colors);
            if self.last_attr.is_none() {
                trace!(?attr, "emitting full attribute");
            }
            ansi::sgr(&mut self.out, &params).ok();
            self.last_attr = Some(attr);
        }
        self.out.push_str(text);
    }

    /// Move the cursor to `(x, y)`, 0-based. Always emitted.
    pub fn move_cursor(&mut self, x: u16, y: u16) {
        ansi::cursor_to(&mut self.out, x, y).ok();
    }

    /// Move the cursor to column `x`, 0-based, staying on the current row.
    ///
    /// The caller guarantees the cursor is already on row `_y`; when that
    /// can't be guaranteed use [`move_cursor`](Self::move_cursor) instead.
    pub fn move_cursor_x(&mut self, x: u16, _y: u16) {
        ansi::cursor_x(&mut self.out, x).ok();
    }

    /// Write everything buffered to the sink in one call, then empty the
    /// buffer. Does not touch the sink when nothing is buffered.
    ///
    /// Buffered bytes are dropped even when the sink fails; nothing is
    /// retried.
    ///
    /// # Errors
    ///
    /// Returns the sink's error from `write_all` or `flush`.
    pub fn flush(&mut self) -> io::Result<()> {
        if self.out.is_empty() {
            return Ok(());
        }
        let bytes = self.out.len();
        let result = self
            .sink
            .write_all(self.out.as_bytes())
            .and_then(|()| self.sink.flush());
        self.out.clear();
        match &result {
            Ok(()) => trace!(bytes, "flushed"),
            Err(e) => debug!(bytes, error = %e, "flush failed, output dropped"),
        }
        result
    }

    /// Bytes waiting for the next flush.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        self.out.as_bytes()
    }

    /// The attribute the terminal is known to have, if any.
    #[inline]
    #[must_use]
    pub const fn last_attr(&self) -> Option<TermAttr> {
        self.last_attr
    }

    /// The output sink.
    #[inline]
    #[must_use]
    pub const fn sink(&self) -> &W {
        &self.sink
    }

    /// The output sink, mutably.
    #[inline]
    pub const fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Consume the emitter, returning the sink. Unflushed bytes are lost.
    #[must_use]
    pub fn into_sink(self) -> W {
        self.sink
    }
}

/// SGR parameters that take the terminal from `prev` to `next`.
///
/// Order: changed style flags, foreground, background. From the unset state
/// the previous style counts as empty and both colors are always sent.
/// Color selectors take the short forms `mode` calls for.
fn sgr_transition(prev: Option<TermAttr>, next: TermAttr, mode: ColorMode) -> SgrParams {
    let mut params = SgrParams::new();
    let prev_style = prev.map_or(Style::empty(), |p| p.style);
    params.extend(prev_style.sgr_delta(next.style));
    if prev.is_none_or(|p| p.fg != next.fg) {
        params.fg(next.fg, mode);
    }
    if prev.is_none_or(|p| p.bg != next.bg) {
        params.bg(next.bg, mode);
    }
    params
}

// ─── Tests ───────────────────────────────────────────────────────────────────

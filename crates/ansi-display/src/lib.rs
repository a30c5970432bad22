// SPDX-License-Identifier: MIT
//
// ansi-display — stateful ANSI output for buffered terminal displays.
//
// A host display decides which cells changed and asks for runs of text to
// be drawn with one attribute each. This crate turns those requests into
// the fewest bytes that produce the right picture: it remembers the last
// attribute it sent, packs every changed SGR parameter into one sequence,
// narrows colors to what the terminal can show, and writes the whole pass
// to the sink in one call.
//
//   host display ──▶ AnsiDisplay ──▶ AnsiEmitter ──▶ OutputBuffer ──▶ sink
//                    (delegation)    (SGR diffing)   (one write)

pub mod ansi;
pub mod attr;
pub mod color;
pub mod display;
pub mod error;
pub mod output;
pub mod termcap;

pub use attr::{Style, TermAttr};
pub use color::TermColor;
pub use display::{AnsiDisplay, LowLevelDisplay, TerminalDisplay};
pub use error::{Error, Result};
pub use output::AnsiEmitter;
pub use termcap::{ColorMode, TermCap};

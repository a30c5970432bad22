// SPDX-License-Identifier: MIT
//
// ansi-display demo — draws a color ramp and a style sampler to stdout.
//
// The host here is deliberately tiny: it owns no screen buffer, it just
// reports capabilities. Pick the color depth with ANSI_DISPLAY_COLORS
// (none, 8, 16, 256, truecolor) to watch the fallback chain at work, and
// set RUST_LOG=ansi_display=trace to see flushes on stderr.
//
// Usage:
//   ANSI_DISPLAY_COLORS=16 cargo run -p ansi-display --example demo

use std::io;

use ansi_display::{
    AnsiDisplay, ColorMode, LowLevelDisplay, Style, TermAttr, TermCap, TermColor, TerminalDisplay,
};
use tracing_subscriber::EnvFilter;

/// Number of columns in the color ramp.
const RAMP_WIDTH: u16 = 64;

struct DemoHost {
    caps: TermCap,
}

impl DemoHost {
    fn from_env() -> ansi_display::Result<Self> {
        let colors = match std::env::var("ANSI_DISPLAY_COLORS") {
            Ok(name) => name.parse::<ColorMode>()?,
            Err(_) => ColorMode::Direct,
        };
        Ok(Self {
            caps: TermCap::default().with_colors(colors),
        })
    }
}

impl TerminalDisplay for DemoHost {
    fn termcap(&self) -> TermCap {
        self.caps
    }

    fn reload_screen_info(&mut self) {}
}

#[allow(clippy::cast_possible_truncation)] // Values stay within 0..=255.
fn ramp_color(col: u16) -> TermColor {
    let t = u32::from(col) * 255 / u32::from(RAMP_WIDTH - 1);
    TermColor::Rgb(t as u8, (255 - t) as u8 / 2, 255 - t as u8)
}

fn main() -> ansi_display::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let host = DemoHost::from_env()?;
    let mut display = AnsiDisplay::new(host, io::stdout());
    display.clear_screen();

    display.move_cursor(0, 0);
    let title = TermAttr::default().with_style(Style::BOLD | Style::UNDERLINE);
    let heading = format!("colors: {}", display.termcap().colors);
    display.write_chars(&heading, title);

    display.move_cursor(0, 2);
    for col in 0..RAMP_WIDTH {
        display.write_chars(" ", TermAttr::default().with_bg(ramp_color(col)));
    }

    let samples = [
        ("bold", Style::BOLD),
        ("italic", Style::ITALIC),
        ("underline", Style::UNDERLINE),
        ("blink", Style::BLINK),
        ("reverse", Style::REVERSE),
        ("strike", Style::STRIKE),
    ];
    display.move_cursor(0, 4);
    let mut x = 0;
    for (name, style) in samples {
        display.move_cursor_x(x, 4);
        display.write_chars(name, TermAttr::default().with_style(style));
        x += 12;
    }

    display.move_cursor(0, 6);
    display.write_chars("", TermAttr::default());
    display.flush()?;
    println!();
    Ok(())
}

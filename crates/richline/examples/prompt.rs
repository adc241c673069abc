//! Interactive demo of [`RichLine::read`] with a user callback that
//! uppercases the rendered line and wraps it in a color escape, leaving the
//! underlying buffer (and thus what gets returned) untouched.
//!
//! ```bash
//! RUST_LOG=richline=trace cargo run --example prompt -p richline
//! ```

use std::io::{self, Write};
use std::os::unix::io::AsRawFd;

use richline::{load_terminfo, Callback, EditContext, Redraw, RichLine};

struct Uppercase;

impl<W: Write> Callback<W> for Uppercase {
    fn call(&mut self, ctx: &mut EditContext<'_, W>, next: &mut Redraw<'_, W>) -> io::Result<()> {
        ctx.prev_text = ctx.prev_text.to_uppercase();
        ctx.curr_text = ctx.curr_text.to_uppercase();
        next(ctx)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let term = load_terminfo(None, Some("xterm"))?;
    let stdin = io::stdin();
    let fd = stdin.as_raw_fd();
    let richline = RichLine::new(term, fd);

    let mut uppercase = Uppercase;
    let text = richline.read(
        io::stdout(),
        Some(&mut uppercase),
        &['\n', '\r'],
        "type something (rendered uppercase, stored as typed): ",
    )?;

    println!("\r\nyou typed: {text:?}");
    Ok(())
}

//! Interactive demo of [`RichPassword`]: type a password, watch each
//! character flash briefly before masking, press F1 to toggle clear-text
//! display.
//!
//! ```bash
//! RUST_LOG=richline=trace cargo run --example password -p richline
//! ```

use std::io;
use std::os::unix::io::AsRawFd;

use richline::{load_terminfo, RichPassword};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let term = load_terminfo(None, Some("xterm"))?;
    let stdin = io::stdin();
    let fd = stdin.as_raw_fd();
    let mut password = RichPassword::new(term, fd)?;

    let text = password.read(io::stdout(), &['\n', '\r'], "password: ")?;

    println!("\r\nlength: {}", text.chars().count());
    Ok(())
}

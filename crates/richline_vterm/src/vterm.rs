//! Virtual terminal cursor model.

use std::io::{self, Write};
use std::os::unix::io::RawFd;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::trace;

use richline_input::{read_cursor_position_reply, ByteSource};
use richline_terminfo::Terminfo;

use crate::error::Error;

/// Set by the `SIGWINCH` handler installed by [`install_resize_handler`];
/// polled at the next event boundary rather than acted on inside the
/// handler itself, which only performs the one async-signal-safe store.
static RESIZED: AtomicBool = AtomicBool::new(false);

extern "C" fn on_sigwinch(_signum: libc::c_int) {
    RESIZED.store(true, Ordering::Relaxed);
}

/// Install a process-wide `SIGWINCH` handler. Optional: callers that never
/// expect a resize (piped input, fixed-geometry terminals in tests) can
/// skip this and simply never see `VTerm::refresh_if_resized` do anything.
///
/// # Errors
///
/// Returns an error if `sigaction` fails.
pub fn install_resize_handler() -> Result<(), Error> {
    unsafe {
        nix::sys::signal::signal(
            nix::sys::signal::Signal::SIGWINCH,
            nix::sys::signal::SigHandler::Handler(on_sigwinch),
        )
        .map_err(|e| Error::Io(e.into()))?;
    }
    Ok(())
}

/// Query the kernel for the window size of `fd` via `TIOCGWINSZ`. Exposed
/// so callers can pre-fetch the size they hand to [`VTerm::new`] separately
/// from the escape-sequence machinery, and so tests can avoid it entirely.
///
/// # Errors
///
/// Returns an error if the ioctl fails (e.g. `fd` is not a terminal).
pub fn query_window_size(fd: RawFd) -> io::Result<(u16, u16)> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, std::ptr::addr_of_mut!(ws)) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    if ws.ws_col == 0 || ws.ws_row == 0 {
        return Ok((80, 24));
    }
    Ok((ws.ws_col, ws.ws_row))
}

/// Mirrors the hardware cursor's position under text wrap.
pub struct VTerm<W: Write> {
    out: W,
    fd: RawFd,
    cursor_x: u16,
    cursor_y: u16,
    width: u16,
    height: u16,
    cuf1: Vec<u8>,
    cub1: Vec<u8>,
}

impl<W: Write> VTerm<W> {
    /// Construct a virtual cursor anchored at `(x, y)` (1-based) over a
    /// `(width, height)` the caller already queried (typically via
    /// [`query_window_size`]). Kept separate from the size query so the
    /// mirror itself has no ioctl dependency and can be built against any
    /// `fd`, including one that isn't a real terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if `cuf1`/`cub1` are missing from `term`.
    pub fn new(
        term: &Terminfo,
        fd: RawFd,
        out: W,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    ) -> Result<Self, Error> {
        let cuf1 = term.get("cuf1")?.value.as_bytes().unwrap_or(&[]).to_vec();
        let cub1 = term.get("cub1")?.value.as_bytes().unwrap_or(&[]).to_vec();
        Ok(VTerm {
            out,
            fd,
            cursor_x: x.max(1),
            cursor_y: y.max(1),
            width: width.max(1),
            height: height.max(1),
            cuf1,
            cub1,
        })
    }

    /// Borrow the underlying writer, e.g. to inspect what's been emitted so
    /// far.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    #[must_use]
    pub fn position(&self) -> (u16, u16) {
        (self.cursor_x, self.cursor_y)
    }

    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Re-synchronize size and cursor position if a `SIGWINCH` arrived
    /// since the last check. Writes `ESC [ 6 n` and reads the terminal's
    /// reply through the same escape-sequence collector the decoder uses.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the size query, the write, or the
    /// cursor-position reply.
    pub fn refresh_if_resized<S: ByteSource>(
        &mut self,
        input: &mut S,
    ) -> Result<bool, Error> {
        if !RESIZED.swap(false, Ordering::AcqRel) {
            return Ok(false);
        }

        let (width, height) = query_window_size(self.fd)?;
        self.width = width.max(1);
        self.height = height.max(1);

        self.out.write_all(b"\x1b[6n")?;
        self.out.flush()?;
        let (x, y) = read_cursor_position_reply(input)?;
        self.cursor_x = x;
        self.cursor_y = y;
        trace!(width, height, x, y, "vterm resynchronized after resize");
        Ok(true)
    }

    /// Advance the logical cursor forward by `steps` code points, crossing
    /// line wraps as needed.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn move_forward(&mut self, steps: usize, update_index_only: bool) -> io::Result<()> {
        if steps == 0 {
            return Ok(());
        }
        let steps = steps as u32;
        let width = u32::from(self.width);
        let x = u32::from(self.cursor_x);

        if x + steps <= width {
            self.cursor_x = (x + steps) as u16;
            if !update_index_only {
                self.write_repeated(&self.cuf1.clone(), steps as usize)?;
            }
            return Ok(());
        }

        let down = (x + steps - 1) / width;
        let new_x = (x + steps - 1) % width + 1;
        self.cursor_y += down as u16;
        self.cursor_x = new_x as u16;

        if !update_index_only {
            self.out.write_all(b"\r")?;
            for _ in 0..down {
                self.out.write_all(b"\n")?;
            }
            if new_x > 1 {
                self.write_repeated(&self.cuf1.clone(), (new_x - 1) as usize)?;
            }
            self.out.flush()?;
        }
        Ok(())
    }

    /// Move the logical cursor backward by `steps` code points.
    ///
    /// Deliberately does **not** emit row-up sequences when this crosses a
    /// line-wrap boundary: the redraw engine above never asks to move
    /// backward across a boundary it did not itself
    /// previously advance across, so the `(x, y)` bookkeeping here is kept
    /// correct for the *next* forward motion without needing to walk the
    /// physical cursor up a row. This assumes a cooperative terminal and is
    /// covered by [the crate's regression test][`crate::tests`].
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn move_backward(&mut self, steps: usize, update_index_only: bool) -> io::Result<()> {
        if steps == 0 {
            return Ok(());
        }
        let steps = steps as i64;
        let width = i64::from(self.width);
        let x = i64::from(self.cursor_x);

        if steps < x {
            self.cursor_x -= steps as u16;
        } else {
            let diff = x - steps;
            let new_x = diff.rem_euclid(width);
            let new_x = if new_x == 0 { width } else { new_x };
            let down = diff / width;
            self.cursor_y = (i64::from(self.cursor_y) - 1 + down).max(1) as u16;
            self.cursor_x = new_x as u16;
        }

        if !update_index_only {
            self.write_repeated(&self.cub1.clone(), steps as usize)?;
        }
        Ok(())
    }

    /// Emit `text` verbatim and advance the mirror as if a forward motion
    /// of `text`'s length had happened with `update_index_only`.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn write(&mut self, text: &[u8]) -> io::Result<()> {
        self.out.write_all(text)?;
        let len = String::from_utf8_lossy(text).chars().count();
        self.move_forward(len, true)?;
        self.out.flush()
    }

    /// Write raw bytes with no cursor bookkeeping (used for capabilities
    /// like `clr_eos` that don't move the logical cursor).
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn write_raw(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.out.write_all(bytes)?;
        self.out.flush()
    }

    fn write_repeated(&mut self, seq: &[u8], times: usize) -> io::Result<()> {
        for _ in 0..times {
            self.out.write_all(seq)?;
        }
        self.out.flush()
    }
}

//! TTY raw-mode guard.

use std::os::unix::io::RawFd;
use std::sync::atomic::{AtomicBool, Ordering};

use nix::fcntl::{self, FcntlArg, OFlag};
use nix::sys::termios::{self, InputFlags, LocalFlags, SetArg, SpecialCharacterIndices};
use nix::unistd;
use tracing::debug;

use crate::error::Error;

/// Only one raw-mode guard may be active on a given descriptor at a time.
/// stdin is the only descriptor this crate ever puts into raw mode, so one
/// process-wide flag is enough to catch accidental double-acquisition.
static ACTIVE: AtomicBool = AtomicBool::new(false);

/// Scoped acquisition of cbreak + non-blocking mode on a terminal file
/// descriptor. Restores the previous terminal attributes and file-status
/// flags on every exit path, including panics that unwind through it.
pub struct RawModeGuard {
    fd: RawFd,
    original_termios: termios::Termios,
    original_flags: OFlag,
}

impl RawModeGuard {
    /// Put `fd` into cbreak + non-blocking mode.
    ///
    /// # Errors
    ///
    /// Returns an error if `fd` is not a TTY, if another guard is already
    /// active, or if the underlying termios/fcntl calls fail.
    pub fn acquire(fd: RawFd) -> Result<Self, Error> {
        if !unistd::isatty(fd).unwrap_or(false) {
            return Err(Error::NotATty);
        }
        if ACTIVE.swap(true, Ordering::AcqRel) {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "a raw-mode guard is already active on this descriptor",
            )));
        }

        let original_termios = termios::tcgetattr(unsafe_fd(fd))?;
        let original_flags =
            OFlag::from_bits_truncate(fcntl::fcntl(fd, FcntlArg::F_GETFL)?);

        let mut raw = original_termios.clone();
        // cbreak: no line buffering, no echo, no special input processing.
        // ISIG is left set so ^C/^Z keep working.
        raw.local_flags &= !(LocalFlags::ICANON | LocalFlags::ECHO | LocalFlags::IEXTEN);
        raw.input_flags &= !(InputFlags::IXON | InputFlags::ICRNL);
        raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
        raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;
        termios::tcsetattr(unsafe_fd(fd), SetArg::TCSADRAIN, &raw)?;

        fcntl::fcntl(fd, FcntlArg::F_SETFL(original_flags | OFlag::O_NONBLOCK))?;

        debug!(fd, "raw mode enabled");

        Ok(RawModeGuard {
            fd,
            original_termios,
            original_flags,
        })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = termios::tcsetattr(
            unsafe_fd(self.fd),
            SetArg::TCSADRAIN,
            &self.original_termios,
        );
        let _ = fcntl::fcntl(self.fd, FcntlArg::F_SETFL(self.original_flags));
        ACTIVE.store(false, Ordering::Release);
        debug!(fd = self.fd, "raw mode restored");
    }
}

/// `nix`'s termios functions take any `AsFd`; a bare `RawFd` bound to `'_`
/// like this is enough for the borrowed calls made in this module.
fn unsafe_fd(fd: RawFd) -> std::os::fd::BorrowedFd<'static> {
    // SAFETY: the returned `BorrowedFd` never outlives the `RawModeGuard`
    // call that produced it; stdin's descriptor is valid for the lifetime
    // of the process.
    unsafe { std::os::fd::BorrowedFd::borrow_raw(fd) }
}

use std::fmt;

/// Errors raised by the raw-mode guard or the input decoder.
#[derive(Debug)]
pub enum Error {
    /// stdin is not a TTY.
    NotATty,
    /// A termios/ioctl call failed.
    Io(std::io::Error),
    /// A termios/ioctl call failed at the `nix` layer.
    Nix(nix::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotATty => write!(f, "stdin is not a tty"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Nix(e) => write!(f, "terminal control error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Nix(e) => Some(e),
            Error::NotATty => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<nix::Error> for Error {
    fn from(e: nix::Error) -> Self {
        Error::Nix(e)
    }
}

use std::fmt;

/// Errors raised while querying or updating the virtual cursor.
#[derive(Debug)]
pub enum Error {
    /// A capability this crate depends on (`cuf1`, `cub1`) is missing from
    /// the loaded terminfo description.
    MissingCapability(richline_terminfo::Error),
    /// Querying window size or cursor position failed.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingCapability(e) => write!(f, "terminal lacks a required capability: {e}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MissingCapability(e) => Some(e),
            Error::Io(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<richline_terminfo::Error> for Error {
    fn from(e: richline_terminfo::Error) -> Self {
        Error::MissingCapability(e)
    }
}

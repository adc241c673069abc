use std::fmt;

/// Errors raised by [`crate::RichLine`] and [`crate::RichPassword`].
#[derive(Debug)]
pub enum Error {
    Terminfo(richline_terminfo::Error),
    Input(richline_input::Error),
    VTerm(richline_vterm::Error),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Terminfo(e) => write!(f, "terminfo error: {e}"),
            Error::Input(e) => write!(f, "input error: {e}"),
            Error::VTerm(e) => write!(f, "virtual cursor error: {e}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Terminfo(e) => Some(e),
            Error::Input(e) => Some(e),
            Error::VTerm(e) => Some(e),
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
        Error::Terminfo(e)
    }
}

impl From<richline_input::Error> for Error {
    fn from(e: richline_input::Error) -> Self {
        Error::Input(e)
    }
}

impl From<richline_vterm::Error> for Error {
    fn from(e: richline_vterm::Error) -> Self {
        Error::VTerm(e)
    }
}

use std::fmt;

/// Errors returned while locating, loading or querying a terminfo database.
#[derive(Debug)]
pub enum Error {
    /// `TERM` is unset and no fallback terminal name was provided.
    Unset,
    /// No terminfo file could be found for the given terminal name.
    NotFound(String),
    /// The file did not start with the expected legacy-format magic number.
    BadMagic(i16),
    /// A section of the file ended before its declared size was consumed.
    Truncated(&'static str),
    /// A string-table offset pointed outside the string table.
    OffsetOutOfRange { offset: i16, table_len: usize },
    /// `get` was called with a name that matches no known capability.
    NotAnEntry(String),
    /// Reading the compiled terminfo file failed.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Unset => {
                write!(f, "TERM is unset and no fallback terminal was requested")
            }
            Error::NotFound(name) => {
                write!(f, "no terminfo file found for terminal '{name}'")
            }
            Error::BadMagic(got) => {
                write!(f, "bad magic number {got:#o} in terminfo header")
            }
            Error::Truncated(section) => {
                write!(f, "terminfo file truncated in {section} section")
            }
            Error::OffsetOutOfRange { offset, table_len } => {
                write!(
                    f,
                    "string offset {offset} out of range for a {table_len}-byte string table"
                )
            }
            Error::NotAnEntry(name) => {
                write!(f, "'{name}' is not a valid terminfo capability")
            }
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
